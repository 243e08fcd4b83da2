use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Worker,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Worker => "worker",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub role: UserRole,
    pub full_name: String,
    pub phone: String,
    pub location: String,
    pub profession: Option<String>,
    pub rating_sum: i64,
    pub rating_count: i64,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
}

impl Profile {
    /// None until the worker has received at least one rating.
    pub fn average_rating(&self) -> Option<f64> {
        if self.rating_count > 0 {
            Some(self.rating_sum as f64 / self.rating_count as f64)
        } else {
            None
        }
    }
}
