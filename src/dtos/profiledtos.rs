use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::profilemodel::{Profile, UserRole};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub full_name: String,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: String,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: Uuid,
    pub role: UserRole,
    pub full_name: String,
    pub phone: String,
    pub location: String,
    pub profession: Option<String>,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileDto {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            role: profile.role,
            full_name: profile.full_name.clone(),
            phone: profile.phone.clone(),
            location: profile.location.clone(),
            profession: profile.profession.clone(),
            average_rating: profile.average_rating(),
            rating_count: profile.rating_count,
            created_at: profile.created_at,
        }
    }
}
