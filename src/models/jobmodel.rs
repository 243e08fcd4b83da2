use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub assigned_worker_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub required_profession: String,
    pub location: String,
    pub budget: Option<BigDecimal>,
    pub status: JobStatus,
    pub is_rated: bool,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
}

/// Structured payload packed into the jobs.description column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobDescription {
    pub text: String,
    pub is_urgent: bool,
    pub job_type: String,
}

impl JobDescription {
    pub fn new(text: String, is_urgent: bool, job_type: String) -> Self {
        Self {
            text,
            is_urgent,
            job_type,
        }
    }

    pub fn encode(&self) -> String {
        // Serialization of a plain struct cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| self.text.clone())
    }

    /// Rows written before the payload format existed hold plain text.
    /// Those decode into the fallback shape instead of erroring.
    pub fn decode(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            text: raw.to_string(),
            is_urgent: false,
            job_type: "General".to_string(),
        })
    }
}
