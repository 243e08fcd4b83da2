use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{db::StoreError, error::HttpError, models::jobmodel::JobStatus};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Profile not found for user {0}")]
    ProfileNotFound(Uuid),

    #[error("Worker profile not found for user {0}")]
    WorkerProfileNotFound(Uuid),

    #[error("Job {0} is not in status {1:?}")]
    InvalidJobStatus(Uuid, JobStatus),

    #[error("Job {0} has already been rated")]
    JobAlreadyRated(Uuid),

    #[error("User {0} is not authorized to perform this action on job {1}")]
    UnauthorizedJobAccess(Uuid, Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::JobNotFound(_)
            | ServiceError::ProfileNotFound(_)
            | ServiceError::WorkerProfileNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidJobStatus(_, _)
            | ServiceError::JobAlreadyRated(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedJobAccess(_, _) => StatusCode::FORBIDDEN,

            ServiceError::Store(StoreError::UniqueViolation) => StatusCode::CONFLICT,

            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error.status_code() {
            StatusCode::NOT_FOUND => HttpError::not_found(error.to_string()),
            StatusCode::BAD_REQUEST => HttpError::bad_request(error.to_string()),
            StatusCode::FORBIDDEN => HttpError::forbidden(error.to_string()),
            StatusCode::CONFLICT => HttpError::conflict(error.to_string()),
            _ => HttpError::server_error(error.to_string()),
        }
    }
}
