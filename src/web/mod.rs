//! HTTP surface of the aggregation gateway

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::gateway::Aggregator;

/// Shared application state for all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream aggregation; holds no per-request state
    pub aggregator: Arc<Aggregator>,
    /// Application configuration
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>, config: Arc<GatewayConfig>) -> Self {
        Self { aggregator, config }
    }
}
