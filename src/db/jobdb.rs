use async_trait::async_trait;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use super::StoreError;
use crate::models::jobmodel::{ApplicationStatus, Job, JobApplication, JobStatus};

const JOB_COLUMNS: &str = r#"
    id, customer_id, assigned_worker_id, title, description,
    required_profession, location, budget, status, is_rated, created_at
"#;

const APPLICATION_COLUMNS: &str = "id, job_id, worker_id, status, created_at";

/// Outcome of a rating attempt, settled inside the store transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingOutcome {
    Recorded,
    AlreadyRated,
    WorkerMissing,
}

#[async_trait]
pub trait JobStoreExt {
    async fn insert_job(
        &self,
        customer_id: Uuid,
        title: String,
        description: String,
        required_profession: String,
        location: String,
        budget: Option<BigDecimal>,
    ) -> Result<Job, StoreError>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, StoreError>;

    async fn get_open_jobs(&self) -> Result<Vec<Job>, StoreError>;

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<Job>, StoreError>;

    async fn get_jobs_assigned_to_worker(&self, worker_id: Uuid) -> Result<Vec<Job>, StoreError>;

    /// Assigns a worker to an open job owned by `customer_id` and settles
    /// every application for that job, all inside one transaction: the job
    /// moves to in_progress, the matching application to accepted, every
    /// sibling to rejected. Returns how many job rows the first update hit;
    /// zero means the scoped update matched nothing and the whole unit
    /// rolled back.
    async fn assign_worker(
        &self,
        job_id: Uuid,
        customer_id: Uuid,
        worker_id: Uuid,
    ) -> Result<u64, StoreError>;

    /// Scoped status update to completed. No guard on the current status;
    /// re-completing a completed job matches a row and is harmless.
    async fn complete_job(&self, job_id: Uuid, customer_id: Uuid) -> Result<u64, StoreError>;

    /// Claims the job's once-only rating flag and applies the score to the
    /// worker's aggregate, as one transaction. The flag claim comes first:
    /// its `is_rated = FALSE` predicate is the concurrency guard, so the
    /// loser of a duplicate-rating race rolls back without ever touching
    /// the aggregate. The aggregate update itself is a single SQL increment,
    /// so concurrent raters of the same worker on different jobs never lose
    /// an update.
    async fn record_rating(
        &self,
        job_id: Uuid,
        customer_id: Uuid,
        worker_id: Uuid,
        score: i64,
    ) -> Result<RatingOutcome, StoreError>;

    async fn insert_application(
        &self,
        job_id: Uuid,
        worker_id: Uuid,
    ) -> Result<JobApplication, StoreError>;

    async fn get_applications_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, StoreError>;

    async fn get_applications_by_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<JobApplication>, StoreError>;
}

#[async_trait]
impl JobStoreExt for DBClient {
    async fn insert_job(
        &self,
        customer_id: Uuid,
        title: String,
        description: String,
        required_profession: String,
        location: String,
        budget: Option<BigDecimal>,
    ) -> Result<Job, StoreError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs
            (customer_id, title, description, required_profession, location, budget, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'open')
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(customer_id)
        .bind(title)
        .bind(description)
        .bind(required_profession)
        .bind(location)
        .bind(budget)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, StoreError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn get_open_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = 'open' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<Job>, StoreError> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE customer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn get_jobs_assigned_to_worker(&self, worker_id: Uuid) -> Result<Vec<Job>, StoreError> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE assigned_worker_id = $1 ORDER BY created_at DESC"
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn assign_worker(
        &self,
        job_id: Uuid,
        customer_id: Uuid,
        worker_id: Uuid,
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let job_update = sqlx::query(
            r#"
            UPDATE jobs
            SET assigned_worker_id = $3, status = $4
            WHERE id = $1 AND customer_id = $2 AND status = 'open'
            "#,
        )
        .bind(job_id)
        .bind(customer_id)
        .bind(worker_id)
        .bind(JobStatus::InProgress)
        .execute(&mut *tx)
        .await?;

        if job_update.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(0);
        }

        sqlx::query(
            r#"
            UPDATE job_applications
            SET status = $3
            WHERE job_id = $1 AND worker_id = $2
            "#,
        )
        .bind(job_id)
        .bind(worker_id)
        .bind(ApplicationStatus::Accepted)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE job_applications
            SET status = $3
            WHERE job_id = $1 AND worker_id <> $2
            "#,
        )
        .bind(job_id)
        .bind(worker_id)
        .bind(ApplicationStatus::Rejected)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(job_update.rows_affected())
    }

    async fn complete_job(&self, job_id: Uuid, customer_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = $3
            WHERE id = $1 AND customer_id = $2
            "#,
        )
        .bind(job_id)
        .bind(customer_id)
        .bind(JobStatus::Completed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn record_rating(
        &self,
        job_id: Uuid,
        customer_id: Uuid,
        worker_id: Uuid,
        score: i64,
    ) -> Result<RatingOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query(
            r#"
            UPDATE jobs
            SET is_rated = TRUE
            WHERE id = $1 AND customer_id = $2 AND is_rated = FALSE
            "#,
        )
        .bind(job_id)
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(RatingOutcome::AlreadyRated);
        }

        let incremented = sqlx::query(
            r#"
            UPDATE profiles
            SET rating_sum = rating_sum + $2,
                rating_count = rating_count + 1
            WHERE id = $1
            "#,
        )
        .bind(worker_id)
        .bind(score)
        .execute(&mut *tx)
        .await?;

        if incremented.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(RatingOutcome::WorkerMissing);
        }

        tx.commit().await?;

        Ok(RatingOutcome::Recorded)
    }

    async fn insert_application(
        &self,
        job_id: Uuid,
        worker_id: Uuid,
    ) -> Result<JobApplication, StoreError> {
        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            INSERT INTO job_applications (job_id, worker_id, status)
            VALUES ($1, $2, 'pending')
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    async fn get_applications_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let applications = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM job_applications
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    async fn get_applications_by_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let applications = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM job_applications
            WHERE worker_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }
}
