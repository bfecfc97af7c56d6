//! Probability-mode simulation endpoint
//!
//! The body is never rejected for its shape: unparseable JSON is treated as an
//! empty object and every numeric field is clamped by [`InputLimits`].
//!
//! [`InputLimits`]: sim_engine::InputLimits

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use sim_engine::{simulate, SimulateRequest};
use std::time::Instant;

use super::{AppState, ErrorResponse};

/// Build the simulation routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/simulate", post(simulate_handler))
}

/// POST /api/simulate
async fn simulate_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = serde_json::from_slice(&body).unwrap_or_else(|_| Value::Object(Default::default()));
    let request = SimulateRequest::from_json(&value, &state.limits);

    let iterations = request.iterations;
    let seed = request.seed;
    let started = Instant::now();

    match tokio::task::spawn_blocking(move || simulate(&request)).await {
        Ok(Ok(result)) => {
            tracing::info!(
                iterations,
                ?seed,
                probability = result.probability_success,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Simulation complete"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Ok(Err(e)) => internal_error(e.to_string()),
        Err(e) => internal_error(e.to_string()),
    }
}

fn internal_error(message: String) -> Response {
    tracing::error!(%message, "Simulation failed");
    let body = ErrorResponse {
        error: "simulation_failed".to_string(),
        message,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
