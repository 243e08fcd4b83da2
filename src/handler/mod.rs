pub mod jobs;
pub mod profiles;
