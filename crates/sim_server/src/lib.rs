//! HTTP and MCP tool service for the decision simulation engine
//!
//! Exposes the probability-mode simulation endpoint consumed by the UI and an
//! MCP (JSON-RPC) surface with a single `analyze_decision` tool. Simulation
//! either runs in-process or is relayed to a remote engine given by
//! `ENGINE_URL`.

pub mod config;
pub mod relay;
pub mod routes;
pub mod server;

pub use sim_engine;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
