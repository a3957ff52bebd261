//! Route definitions for the TAP Grading Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Grading computation
        .nest("/gradings", grading_routes())
        // Delivery submission (two-step form)
        .nest("/deliveries", delivery_routes())
}

/// Grading calculation routes
fn grading_routes() -> Router<AppState> {
    Router::new().route("/calculate", post(handlers::calculate_grading))
}

/// Delivery submission routes
fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/identity", post(handlers::prepare_identity))
        .route("/", post(handlers::submit_delivery))
}
