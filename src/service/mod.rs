pub mod error;
pub mod job_service;
