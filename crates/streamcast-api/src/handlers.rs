//! Route handler functions.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use streamcast_core::{RequestEnvelope, ResponseEnvelope};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub stream_title: String,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST / - run one request envelope through the skill.
///
/// Prompt files are read from disk during dispatch, so the skill runs on
/// the blocking pool.
pub async fn invoke(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let request_type = envelope.request.kind.type_name().to_string();
    let skill = state.skill.clone();
    let result = tokio::task::spawn_blocking(move || skill.invoke(&envelope))
        .await
        .map_err(|e| ApiError::Internal(format!("Skill task failed: {}", e)))?;

    match result {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            tracing::warn!(request_type = %request_type, error = %err, "Request not answered");
            Err(err.into())
        }
    }
}

/// GET /health - liveness and the stream being served.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        stream_title: state.skill.stream().title.clone(),
    })
}
