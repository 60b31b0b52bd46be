//! API route definitions

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;

/// Create all API routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))

        // On-chain token detail
        .route("/api/token/:address", get(handlers::get_token_detail))

        // Market data
        .route("/api/dextools/trending", get(handlers::get_trending))
        .route("/api/dextools/socials/:contract_address", get(handlers::get_socials))
        .route("/api/dextools/audit/:contract_address", get(handlers::get_audit))

        // Add state to all routes
        .with_state(state)
}
