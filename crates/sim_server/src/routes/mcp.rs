//! MCP tool surface over JSON-RPC 2.0
//!
//! One tool is exposed, `analyze_decision`. A call validates its arguments,
//! runs the percentile analysis with sensitivity ranking in-process, and
//! attaches the probability-mode JSON from the configured
//! [`EngineBackend`](crate::relay::EngineBackend). If that backend fails the
//! summary is still returned, after the error line, with `isError` set.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sim_engine::{analyze_decision, DecisionRequest, Variable, MAX_ITERATIONS};
use validator::Validate;

use super::AppState;
use crate::relay::RELAYED_NOTE;

/// MCP protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name of the single exposed tool.
pub const TOOL_NAME: &str = "analyze_decision";

/// JSON-RPC error codes used by this endpoint.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Incoming JSON-RPC envelope
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Outgoing JSON-RPC envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// `params` of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Arguments of `analyze_decision`
///
/// `variables` stays a JSON map so the caller's key order survives into the
/// report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeDecisionArgs {
    #[validate(length(min = 1, message = "decision_name must not be empty"))]
    pub decision_name: String,
    #[validate(custom(function = "validate_variables"))]
    pub variables: Map<String, Value>,
    #[validate(range(min = 1000, max = 300000))]
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
}

/// One entry of the `variables` map
#[derive(Debug, Clone, Deserialize)]
struct VariableSpec {
    base: f64,
    min: f64,
    max: f64,
    #[serde(default)]
    label: Option<String>,
}

fn validate_variables(variables: &Map<String, Value>) -> Result<(), validator::ValidationError> {
    if variables.is_empty() {
        let mut err = validator::ValidationError::new("empty");
        err.message = Some("variables must contain at least one entry".into());
        return Err(err);
    }
    Ok(())
}

impl AnalyzeDecisionArgs {
    /// Schema-checks and converts into an engine request.
    pub fn into_request(self) -> Result<DecisionRequest, String> {
        self.validate().map_err(|e| e.to_string())?;

        let mut variables = Vec::with_capacity(self.variables.len());
        for (name, value) in self.variables {
            let spec: VariableSpec = serde_json::from_value(value)
                .map_err(|e| format!("variable '{}': {}", name, e))?;
            let mut variable = Variable::new(name, spec.base, spec.min, spec.max);
            variable.label = spec.label;
            variables.push(variable);
        }

        let mut request = DecisionRequest::new(self.decision_name, variables);
        if let Some(iterations) = self.iterations {
            request.iterations = iterations;
        }
        request.seed = self.seed;
        request.validate().map_err(|e| e.to_string())?;
        Ok(request)
    }
}

/// Descriptor returned by `tools/list`
pub fn tool_descriptor() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "Run a Monte Carlo analysis of a decision. Each variable is sampled \
                        from a normal distribution centred on its base value with standard \
                        deviation (max - min) / 4, clamped to [min, max]. Returns the outcome \
                        distribution and the variables ranked by impact.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "decision_name": {
                    "type": "string",
                    "description": "Short description of the decision being evaluated"
                },
                "variables": {
                    "type": "object",
                    "description": "Decision inputs keyed by name",
                    "additionalProperties": {
                        "type": "object",
                        "properties": {
                            "base": { "type": "number" },
                            "min": { "type": "number" },
                            "max": { "type": "number" },
                            "label": { "type": "string" }
                        },
                        "required": ["base", "min", "max"]
                    }
                },
                "iterations": {
                    "type": "integer",
                    "minimum": 1000,
                    "maximum": MAX_ITERATIONS
                },
                "seed": { "type": "integer", "minimum": 0 }
            },
            "required": ["decision_name", "variables"]
        }
    })
}

/// Build the MCP routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/mcp", get(mcp_health).post(mcp_handler))
}

/// GET /mcp
async fn mcp_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": state.config.service_name,
    }))
}

/// POST /mcp
async fn mcp_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::failure(Value::Null, codes::PARSE_ERROR, format!("Parse error: {}", e)),
            )
        }
    };
    let id = request.id.clone().unwrap_or(Value::Null);

    if request.jsonrpc != "2.0" {
        return reply(
            StatusCode::BAD_REQUEST,
            JsonRpcResponse::failure(id, codes::PARSE_ERROR, "jsonrpc must be \"2.0\""),
        );
    }

    if request.method.starts_with("notifications/") {
        tracing::debug!(method = %request.method, "Notification received");
        return StatusCode::ACCEPTED.into_response();
    }

    match request.method.as_str() {
        "initialize" => reply(
            StatusCode::OK,
            JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": state.config.service_name,
                        "version": crate::VERSION,
                    }
                }),
            ),
        ),
        "ping" => reply(StatusCode::OK, JsonRpcResponse::success(id, json!({}))),
        "tools/list" => reply(
            StatusCode::OK,
            JsonRpcResponse::success(id, json!({ "tools": [tool_descriptor()] })),
        ),
        "tools/call" => call_tool(&state, id, request.params).await,
        other => reply(
            StatusCode::NOT_FOUND,
            JsonRpcResponse::failure(id, codes::METHOD_NOT_FOUND, format!("Unknown method: {}", other)),
        ),
    }
}

async fn call_tool(state: &AppState, id: Value, params: Option<Value>) -> Response {
    let params: ToolCallParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
        Ok(params) => params,
        Err(e) => {
            return reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::failure(id, codes::INVALID_PARAMS, format!("Invalid params: {}", e)),
            )
        }
    };

    if params.name != TOOL_NAME {
        return reply(
            StatusCode::NOT_FOUND,
            JsonRpcResponse::failure(
                id,
                codes::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", params.name),
            ),
        );
    }

    let request = match serde_json::from_value::<AnalyzeDecisionArgs>(params.arguments)
        .map_err(|e| e.to_string())
        .and_then(AnalyzeDecisionArgs::into_request)
    {
        Ok(request) => request,
        Err(message) => {
            tracing::info!(%message, "Rejected analyze_decision arguments");
            return reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::failure(id, codes::INVALID_PARAMS, message),
            );
        }
    };

    let analysis = {
        let request = request.clone();
        tokio::task::spawn_blocking(move || analyze_decision(&request)).await
    };
    let report = match analysis {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            return reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::failure(id, codes::INVALID_PARAMS, e.to_string()),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis task failed");
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                JsonRpcResponse::failure(id, codes::INTERNAL_ERROR, e.to_string()),
            );
        }
    };

    tracing::info!(
        decision = %report.decision_name,
        model = %report.model,
        iterations = report.result.iterations,
        seed = ?request.seed,
        "Decision analysed"
    );

    let summary = report.summary_text();
    let result = match state.backend.decision_outcome(&request, &state.limits).await {
        Ok(structured) => {
            let mut content = vec![json!({ "type": "text", "text": summary })];
            if state.backend.is_remote() {
                content.push(json!({ "type": "text", "text": RELAYED_NOTE }));
            }
            json!({
                "content": content,
                "structuredContent": structured,
                "isError": false,
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, timeout = e.is_timeout(), "Simulation relay failed");
            json!({
                "content": [
                    { "type": "text", "text": e.to_string() },
                    { "type": "text", "text": summary }
                ],
                "isError": true,
            })
        }
    };

    reply(StatusCode::OK, JsonRpcResponse::success(id, result))
}

fn reply(status: StatusCode, body: JsonRpcResponse) -> Response {
    (status, Json(body)).into_response()
}
