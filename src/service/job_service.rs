use std::sync::Arc;

use serde::Serialize;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{
        jobdb::{JobStoreExt, RatingOutcome},
        profiledb::ProfileStoreExt,
        StoreError,
    },
    dtos::jobdtos::CreateJobDto,
    models::{
        jobmodel::{Job, JobApplication, JobDescription, JobStatus},
        profilemodel::{Profile, UserRole},
    },
    service::error::ServiceError,
};

/// Owns every valid state transition across jobs, applications and the
/// profile rating aggregate. The authenticated caller's id always arrives as
/// an explicit parameter; nothing here reads ambient session state.
#[derive(Debug, Clone)]
pub struct JobService<S> {
    store: Arc<S>,
}

impl<S> JobService<S>
where
    S: JobStoreExt + ProfileStoreExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registration and first use can race, leaving a caller without a
    /// profile row. Jobs and applications hold foreign keys into profiles,
    /// so a minimal fallback row is provisioned before any insert that
    /// depends on it. Create-if-absent, safe to call repeatedly.
    async fn ensure_profile(&self, user_id: Uuid, role: UserRole) -> Result<Profile, ServiceError> {
        if let Some(profile) = self.store.get_profile(user_id).await? {
            return Ok(profile);
        }

        let fallback_name = match role {
            UserRole::Customer => "Customer User",
            UserRole::Worker => "Worker User",
        };

        tracing::debug!("provisioning fallback {} profile for {}", role.to_str(), user_id);

        let profile = self
            .store
            .insert_profile_if_absent(
                user_id,
                role,
                fallback_name.to_string(),
                String::new(),
                String::new(),
                None,
            )
            .await?;

        Ok(profile)
    }

    pub async fn post_job(
        &self,
        customer_id: Uuid,
        job_data: CreateJobDto,
    ) -> Result<Job, ServiceError> {
        for (field, value) in [
            ("title", &job_data.title),
            ("location", &job_data.location),
            ("required_profession", &job_data.required_profession),
            ("description", &job_data.description),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::Validation(format!("{} is required", field)));
            }
        }

        let budget = match job_data.budget {
            Some(amount) if amount < 0.0 => {
                return Err(ServiceError::Validation(
                    "budget must not be negative".to_string(),
                ));
            }
            Some(amount) => BigDecimal::try_from(amount).ok(),
            None => None,
        };

        self.ensure_profile(customer_id, UserRole::Customer).await?;

        let description = JobDescription::new(
            job_data.description,
            job_data.is_urgent,
            job_data.job_type,
        );

        let job = self
            .store
            .insert_job(
                customer_id,
                job_data.title,
                description.encode(),
                job_data.required_profession,
                job_data.location,
                budget,
            )
            .await?;

        tracing::info!("customer {} posted job {}", customer_id, job.id);

        Ok(job)
    }

    /// A duplicate submission hits the (job_id, worker_id) uniqueness
    /// constraint and is swallowed: the worker already applied and the
    /// outcome they wanted holds. Every other storage failure surfaces.
    pub async fn apply_for_job(&self, worker_id: Uuid, job_id: Uuid) -> Result<(), ServiceError> {
        self.ensure_profile(worker_id, UserRole::Worker).await?;

        match self.store.insert_application(job_id, worker_id).await {
            Ok(_) => Ok(()),
            Err(StoreError::UniqueViolation) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Moves the job to in_progress, accepts the chosen application and
    /// rejects every sibling, as one transactional unit in the store.
    pub async fn accept_worker(
        &self,
        customer_id: Uuid,
        job_id: Uuid,
        worker_id: Uuid,
    ) -> Result<(), ServiceError> {
        let job = self
            .store
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        if job.status != JobStatus::Open {
            return Err(ServiceError::InvalidJobStatus(job_id, job.status));
        }

        let affected = self
            .store
            .assign_worker(job_id, customer_id, worker_id)
            .await?;

        // The scoped update re-checks owner and status; zero rows after the
        // checks above means another accept won the race.
        if affected == 0 {
            return Err(ServiceError::InvalidJobStatus(job_id, JobStatus::InProgress));
        }

        tracing::info!("job {} assigned to worker {}", job_id, worker_id);

        Ok(())
    }

    /// Completion carries no guard on the current status: a job can jump
    /// straight from open to completed, and re-completing a completed job is
    /// a no-op.
    pub async fn mark_job_done(&self, customer_id: Uuid, job_id: Uuid) -> Result<(), ServiceError> {
        let job = self
            .store
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        let affected = self.store.complete_job(job_id, customer_id).await?;
        if affected == 0 {
            return Err(ServiceError::JobNotFound(job_id));
        }

        Ok(())
    }

    /// Records a single 1-5 rating for the worker on a completed job. The
    /// rating-flag claim and the aggregate increment happen as one store
    /// transaction: a duplicate rater loses the flag claim and rolls back
    /// before touching the aggregate, and concurrent raters of the same
    /// worker never lose an update.
    pub async fn rate_worker(
        &self,
        customer_id: Uuid,
        job_id: Uuid,
        worker_id: Uuid,
        rating: i32,
    ) -> Result<(), ServiceError> {
        if !(1..=5).contains(&rating) {
            return Err(ServiceError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }

        let job = self
            .store
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        if job.status != JobStatus::Completed {
            return Err(ServiceError::InvalidJobStatus(job_id, job.status));
        }

        if job.is_rated {
            return Err(ServiceError::JobAlreadyRated(job_id));
        }

        let outcome = self
            .store
            .record_rating(job_id, customer_id, worker_id, rating as i64)
            .await?;

        match outcome {
            RatingOutcome::Recorded => {
                tracing::info!("worker {} rated {} on job {}", worker_id, rating, job_id);
                Ok(())
            }
            // A concurrent rating claimed the flag between our check and
            // the transaction; nothing was written for this caller.
            RatingOutcome::AlreadyRated => Err(ServiceError::JobAlreadyRated(job_id)),
            RatingOutcome::WorkerMissing => Err(ServiceError::WorkerProfileNotFound(worker_id)),
        }
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: String,
        phone: String,
        location: String,
    ) -> Result<(), ServiceError> {
        let affected = self
            .store
            .update_profile_contact(user_id, full_name, phone, location)
            .await?;

        if affected == 0 {
            return Err(ServiceError::ProfileNotFound(user_id));
        }

        Ok(())
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile, ServiceError> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or(ServiceError::ProfileNotFound(user_id))
    }

    pub async fn open_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.store.get_open_jobs().await?)
    }

    /// Job listing for the posting side: every job the customer owns, with
    /// the applications received for each.
    pub async fn customer_board(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerBoardEntry>, ServiceError> {
        let jobs = self.store.get_jobs_by_customer(customer_id).await?;

        let mut entries = Vec::with_capacity(jobs.len());
        for job in jobs {
            let applications = self.store.get_applications_for_job(job.id).await?;
            entries.push(CustomerBoardEntry { job, applications });
        }

        Ok(entries)
    }

    pub async fn worker_board(&self, worker_id: Uuid) -> Result<WorkerBoard, ServiceError> {
        let open_jobs = self.store.get_open_jobs().await?;
        let applications = self.store.get_applications_by_worker(worker_id).await?;
        let assigned_jobs = self.store.get_jobs_assigned_to_worker(worker_id).await?;

        Ok(WorkerBoard {
            open_jobs,
            applications,
            assigned_jobs,
        })
    }

    /// Applications for a job, visible to its owner only.
    pub async fn job_applications(
        &self,
        customer_id: Uuid,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, ServiceError> {
        let job = self
            .store
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        Ok(self.store.get_applications_for_job(job_id).await?)
    }
}

// Result types for service methods
#[derive(Debug, Serialize)]
pub struct CustomerBoardEntry {
    pub job: Job,
    pub applications: Vec<JobApplication>,
}

#[derive(Debug, Serialize)]
pub struct WorkerBoard {
    pub open_jobs: Vec<Job>,
    pub applications: Vec<JobApplication>,
    pub assigned_jobs: Vec<Job>,
}
