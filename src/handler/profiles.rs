use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use validator::Validate;

use crate::{
    dtos::{
        profiledtos::{ProfileDto, UpdateProfileDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::AuthUser,
    AppState,
};

pub fn profiles_handler() -> Router {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

pub async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state.job_service.get_profile(auth.id).await?;

    Ok(Json(ApiResponse::success(
        "Profile retrieved successfully",
        ProfileDto::from_profile(&profile),
    )))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .job_service
        .update_profile(auth.id, body.full_name, body.phone, body.location)
        .await?;

    Ok(Json(ApiResponse::success("Profile updated", ())))
}
