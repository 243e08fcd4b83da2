use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use super::StoreError;
use crate::models::profilemodel::{Profile, UserRole};

#[async_trait]
pub trait ProfileStoreExt {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    /// Create-if-absent. Registration can race job posting, so the row may
    /// already exist; the existing row wins and is returned unchanged.
    async fn insert_profile_if_absent(
        &self,
        user_id: Uuid,
        role: UserRole,
        full_name: String,
        phone: String,
        location: String,
        profession: Option<String>,
    ) -> Result<Profile, StoreError>;

    /// Overwrites the contact fields on the caller's own row. Returns the
    /// affected-row count so callers can tell "no such profile" apart from
    /// success.
    async fn update_profile_contact(
        &self,
        user_id: Uuid,
        full_name: String,
        phone: String,
        location: String,
    ) -> Result<u64, StoreError>;
}

#[async_trait]
impl ProfileStoreExt for DBClient {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, role, full_name, phone, location, profession,
                   rating_sum, rating_count, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn insert_profile_if_absent(
        &self,
        user_id: Uuid,
        role: UserRole,
        full_name: String,
        phone: String,
        location: String,
        profession: Option<String>,
    ) -> Result<Profile, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, role, full_name, phone, location, profession)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role)
        .bind(full_name)
        .bind(phone)
        .bind(location)
        .bind(profession)
        .execute(&self.pool)
        .await?;

        let profile = self.get_profile(user_id).await?;
        profile.ok_or(StoreError::NotFound)
    }

    async fn update_profile_contact(
        &self,
        user_id: Uuid,
        full_name: String,
        phone: String,
        location: String,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET full_name = $2, phone = $3, location = $4
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(phone)
        .bind(location)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
