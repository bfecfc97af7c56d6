//! Simulation backend used by the MCP tool.
//!
//! The tool attaches a probability-mode result for the decision. In-process it
//! runs the decision's own outcome formula. When an engine URL is configured
//! the decision is posted there in the weighted-assumption shape that endpoint
//! accepts, which scores an unweighted sum of the inputs.

use std::time::Duration;

use serde_json::Value;
use sim_engine::{decision_probability, DecisionRequest, EngineError, InputLimits};
use thiserror::Error;

use crate::config::ServerConfig;

/// Appended to the tool text when the structured result was relayed.
pub const RELAYED_NOTE: &str = "Note: the structured result comes from the remote engine, which \
                                scores the inputs as an unweighted sum rather than the decision \
                                formula above.";

/// Failure to obtain a simulation result.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The remote engine answered with a non-2xx status.
    #[error("Engine error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The remote engine could not be reached, timed out, or sent an
    /// unreadable body.
    #[error("Engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The in-process engine rejected the request.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// The blocking simulation task panicked or was cancelled.
    #[error("Simulation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The in-process result could not be encoded.
    #[error("Failed to encode simulation result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RelayError {
    /// Whether the remote engine did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RelayError::Transport(e) if e.is_timeout())
    }
}

/// Where simulation requests are executed.
#[derive(Debug, Clone)]
pub enum EngineBackend {
    /// Run the engine on a blocking worker thread in this process.
    InProcess,
    /// POST the request to a remote simulation endpoint.
    Remote {
        /// Endpoint URL.
        url: String,
        /// Shared HTTP client.
        client: reqwest::Client,
        /// Upper bound on one relayed request.
        timeout: Duration,
    },
}

impl EngineBackend {
    /// Remote when `engine_url` is set, in-process otherwise.
    pub fn from_config(config: &ServerConfig) -> Self {
        match &config.engine_url {
            Some(url) => EngineBackend::Remote {
                url: url.clone(),
                client: reqwest::Client::new(),
                timeout: config.engine_timeout(),
            },
            None => EngineBackend::InProcess,
        }
    }

    /// Whether requests leave the process.
    pub fn is_remote(&self) -> bool {
        matches!(self, EngineBackend::Remote { .. })
    }

    /// Short label for health output.
    pub fn describe(&self) -> &'static str {
        match self {
            EngineBackend::InProcess => "in-process",
            EngineBackend::Remote { .. } => "remote",
        }
    }

    /// Probability-mode JSON (`iterations`, `probabilitySuccess`, `label`,
    /// `summary`) for `request` at threshold zero.
    pub async fn decision_outcome(
        &self,
        request: &DecisionRequest,
        limits: &InputLimits,
    ) -> Result<Value, RelayError> {
        match self {
            EngineBackend::InProcess => {
                let request = request.clone();
                let result =
                    tokio::task::spawn_blocking(move || decision_probability(&request)).await??;
                Ok(serde_json::to_value(result)?)
            }
            EngineBackend::Remote {
                url,
                client,
                timeout,
            } => {
                let body = request.to_simulate_request(limits);
                let response = client
                    .post(url)
                    .timeout(*timeout)
                    .json(&body)
                    .send()
                    .await
                    .inspect_err(|e| {
                        tracing::warn!(%url, timeout = e.is_timeout(), error = %e, "Remote engine unreachable")
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    tracing::warn!(%url, status = status.as_u16(), "Remote engine returned an error");
                    return Err(RelayError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }
                Ok(response.json::<Value>().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_engine::Variable;

    fn request() -> DecisionRequest {
        let mut request = DecisionRequest::new(
            "Renew the vendor contract",
            vec![
                Variable::new("savings", 50.0, 40.0, 60.0),
                Variable::new("fees", -20.0, -25.0, -15.0),
            ],
        );
        request.iterations = 2_000;
        request.seed = Some(3);
        request
    }

    #[test]
    fn test_from_config_selects_backend() {
        let config = ServerConfig::default();
        let backend = EngineBackend::from_config(&config);
        assert!(!backend.is_remote());
        assert_eq!(backend.describe(), "in-process");

        let config = ServerConfig {
            engine_url: Some("http://127.0.0.1:9/api/simulate".to_string()),
            engine_timeout_secs: 4,
            ..Default::default()
        };
        let backend = EngineBackend::from_config(&config);
        assert!(backend.is_remote());
        assert_eq!(backend.describe(), "remote");
        match backend {
            EngineBackend::Remote { timeout, .. } => assert_eq!(timeout, Duration::from_secs(4)),
            EngineBackend::InProcess => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_in_process_outcome() {
        let value = EngineBackend::InProcess
            .decision_outcome(&request(), &InputLimits::default())
            .await
            .unwrap();

        assert_eq!(value["iterations"], 2_000);
        assert_eq!(value["probabilitySuccess"], 1.0);
        assert_eq!(value["label"], "HIGH");
        assert_eq!(value["summary"]["enabledCount"], 2);
        assert_eq!(value["summary"]["threshold"], 0.0);
    }

    #[tokio::test]
    async fn test_in_process_loss_is_low() {
        let request = DecisionRequest::new(
            "Hire without enough work",
            vec![
                Variable::new("salary", 200_000.0, 190_000.0, 210_000.0),
                Variable::new("productivity", 1.0, 1.0, 1.0),
                Variable::new("value_per_year", 100_000.0, 100_000.0, 100_000.0),
            ],
        );

        let value = EngineBackend::InProcess
            .decision_outcome(&request, &InputLimits::default())
            .await
            .unwrap();

        assert_eq!(value["probabilitySuccess"], 0.0);
        assert_eq!(value["label"], "LOW");
    }

    #[tokio::test]
    async fn test_in_process_rejects_bad_iterations() {
        let mut bad = request();
        bad.iterations = 0;

        let err = EngineBackend::InProcess
            .decision_outcome(&bad, &InputLimits::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Engine(_)));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_status_error_display() {
        let err = RelayError::Status {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "Engine error (503): overloaded");
    }
}
