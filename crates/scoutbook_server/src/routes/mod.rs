//! HTTP routes.
//!
//! Every handler is a single pass: extract and validate the request shape,
//! run exactly one data access operation in a unit of work, map the result.

use crate::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

pub mod companies;
pub mod profiles;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Builds the full application router around an injected state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(profiles::router())
        .merge(companies::router())
        // Browser extensions post from arbitrary page origins.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: scoutbook_core::core_version(),
    })
}
