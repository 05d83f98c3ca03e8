//! # api-adapters
//!
//! The JSON surface over the services. Every response is a
//! `{success, message, data?}` envelope so clients render outcomes without
//! special-casing errors; sessions ride on bearer tokens.

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::AppState;

use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        // projects
        .route(
            "/api/projects",
            get(handlers::list_approved).post(handlers::submit),
        )
        .route("/api/projects/all", get(handlers::list_all))
        .route("/api/projects/stats", get(handlers::project_stats))
        .route("/api/projects/status/{status}", get(handlers::list_by_status))
        .route("/api/projects/{id}/approve", post(handlers::approve))
        .route("/api/projects/{id}/reject", post(handlers::reject))
        .route("/api/projects/{id}", delete(handlers::remove_project))
        // likes
        .route("/api/likes/toggle", post(handlers::toggle_like))
        .route("/api/likes/batch", post(handlers::likes_batch))
        .route("/api/likes/{item_type}/{item_id}", get(handlers::likes_summary))
        // comments
        .route(
            "/api/comments/{item_type}/{item_id}",
            get(handlers::list_comments),
        )
        .route("/api/comments", post(handlers::add_comment))
        .route("/api/comments/{id}", delete(handlers::remove_comment))
        .route("/api/comments/{id}/like", post(handlers::toggle_comment_like))
        // auth
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/session", get(handlers::session))
        .route("/api/auth/refresh", post(handlers::refresh))
        .layer(TraceLayer::new_for_http())
        .layer(cors_policy())
        .with_state(state)
}

// The UI and API may live on different origins.
fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
