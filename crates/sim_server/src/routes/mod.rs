//! Route modules for the simulation server
//!
//! - health: health and readiness probes
//! - simulate: probability-mode simulation endpoint
//! - mcp: JSON-RPC tool surface

pub mod health;
pub mod mcp;
pub mod simulate;

use axum::Router;
use serde::{Deserialize, Serialize};
use sim_engine::InputLimits;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::relay::EngineBackend;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
    /// Where MCP tool calls get their simulation result
    pub backend: EngineBackend,
    /// Clamping ranges for the simulation endpoint
    pub limits: InputLimits,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let backend = EngineBackend::from_config(&config);
        Self {
            config,
            start_time: std::time::Instant::now(),
            backend,
            limits: InputLimits::default(),
        }
    }
}

/// Error body for non-JSON-RPC failures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    router_with_state(AppState::new(config))
}

/// Build the router around an existing state
pub fn router_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::routes())
        .merge(simulate::routes())
        .merge(mcp::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
