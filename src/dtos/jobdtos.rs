use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::{Job, JobApplication, JobDescription, JobStatus};
use crate::service::job_service::{CustomerBoardEntry, WorkerBoard};

//Job DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "Required profession is required"))]
    pub required_profession: String,

    #[validate(range(min = 0.0, message = "Budget must not be negative"))]
    pub budget: Option<f64>,

    #[validate(length(min = 1, max = 2000, message = "Description must be between 1 and 2000 characters"))]
    pub description: String,

    #[serde(default)]
    pub is_urgent: bool,

    #[serde(default = "default_job_type")]
    pub job_type: String,
}

fn default_job_type() -> String {
    "General".to_string()
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AcceptWorkerDto {
    pub worker_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RateWorkerDto {
    pub worker_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

/// Job as consumers see it: the packed description blob decoded back into
/// its structured form.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub assigned_worker_id: Option<Uuid>,
    pub title: String,
    pub description: JobDescription,
    pub required_profession: String,
    pub location: String,
    pub budget: Option<f64>,
    pub status: JobStatus,
    pub is_rated: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl JobDto {
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: job.id,
            customer_id: job.customer_id,
            assigned_worker_id: job.assigned_worker_id,
            title: job.title.clone(),
            description: JobDescription::decode(&job.description),
            required_profession: job.required_profession.clone(),
            location: job.location.clone(),
            budget: job.budget.as_ref().and_then(|b| b.to_f64()),
            status: job.status,
            is_rated: job.is_rated,
            created_at: job.created_at,
        }
    }

    pub fn from_jobs(jobs: &[Job]) -> Vec<Self> {
        jobs.iter().map(Self::from_job).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerBoardEntryDto {
    pub job: JobDto,
    pub applications: Vec<JobApplication>,
}

impl CustomerBoardEntryDto {
    pub fn from_entries(entries: Vec<CustomerBoardEntry>) -> Vec<Self> {
        entries
            .into_iter()
            .map(|entry| Self {
                job: JobDto::from_job(&entry.job),
                applications: entry.applications,
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerBoardDto {
    pub open_jobs: Vec<JobDto>,
    pub applications: Vec<JobApplication>,
    pub assigned_jobs: Vec<JobDto>,
}

impl WorkerBoardDto {
    pub fn from_board(board: WorkerBoard) -> Self {
        Self {
            open_jobs: JobDto::from_jobs(&board.open_jobs),
            applications: board.applications,
            assigned_jobs: JobDto::from_jobs(&board.assigned_jobs),
        }
    }
}
