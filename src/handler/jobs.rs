use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        jobdtos::{
            AcceptWorkerDto, CreateJobDto, CustomerBoardEntryDto, JobDto, RateWorkerDto,
            WorkerBoardDto,
        },
        ApiResponse,
    },
    error::HttpError,
    middleware::AuthUser,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        // Job lifecycle routes
        .route("/jobs", post(post_job).get(list_open_jobs))
        .route("/jobs/:job_id/apply", post(apply_for_job))
        .route("/jobs/:job_id/accept", put(accept_worker))
        .route("/jobs/:job_id/complete", put(mark_job_done))
        .route("/jobs/:job_id/rate", post(rate_worker))
        .route("/jobs/:job_id/applications", get(get_job_applications))
        // Dashboard routes
        .route("/customer/board", get(customer_board))
        .route("/worker/board", get(worker_board))
}

pub async fn post_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state.job_service.post_job(auth.id, body).await?;

    Ok(Json(ApiResponse::success(
        "Job posted successfully",
        JobDto::from_job(&job),
    )))
}

pub async fn list_open_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.job_service.open_jobs().await?;

    Ok(Json(ApiResponse::success(
        "Open jobs retrieved successfully",
        JobDto::from_jobs(&jobs),
    )))
}

pub async fn apply_for_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.job_service.apply_for_job(auth.id, job_id).await?;

    Ok(Json(ApiResponse::success("Application submitted", ())))
}

pub async fn accept_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<AcceptWorkerDto>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .job_service
        .accept_worker(auth.id, job_id, body.worker_id)
        .await?;

    Ok(Json(ApiResponse::success("Worker accepted", ())))
}

pub async fn mark_job_done(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.job_service.mark_job_done(auth.id, job_id).await?;

    Ok(Json(ApiResponse::success("Job marked as completed", ())))
}

pub async fn rate_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<RateWorkerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .job_service
        .rate_worker(auth.id, job_id, body.worker_id, body.rating)
        .await?;

    Ok(Json(ApiResponse::success("Rating submitted", ())))
}

pub async fn get_job_applications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let applications = app_state
        .job_service
        .job_applications(auth.id, job_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Applications retrieved successfully",
        applications,
    )))
}

pub async fn customer_board(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let entries = app_state.job_service.customer_board(auth.id).await?;

    Ok(Json(ApiResponse::success(
        "Customer board retrieved successfully",
        CustomerBoardEntryDto::from_entries(entries),
    )))
}

pub async fn worker_board(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let board = app_state.job_service.worker_board(auth.id).await?;

    Ok(Json(ApiResponse::success(
        "Worker board retrieved successfully",
        WorkerBoardDto::from_board(board),
    )))
}
