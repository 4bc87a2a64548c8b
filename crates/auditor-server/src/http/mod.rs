//! Routes, shared state and the listener.

mod error;
pub mod handlers;
mod server;
mod state;

pub use error::ApiError;
pub use server::serve;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes();

    Router::new()
        .route("/", get(handlers::health::banner))
        .route("/api/repo/upload", post(handlers::upload::upload_repo))
        .route("/api/scan/start", post(handlers::scan::start_scan))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
