use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{jobs::jobs_handler, profiles::profiles_handler},
    middleware::auth,
    AppState,
};

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let protected_routes = jobs_handler()
        .merge(profiles_handler())
        .layer(middleware::from_fn(auth));

    let api_routes = Router::new()
        .route("/healthcheck", get(health_check))
        .merge(protected_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
