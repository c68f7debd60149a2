use crate::response::{not_found, ApiError};
use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use spinhook_core::SlackPayload;
use std::sync::Arc;
use tracing::{debug, warn};

/// Check the `{token}` path segment against `slack.token`.
///
/// Equal-length tokens are compared in constant time.
pub fn validate_secret(config_secret: &str, request_secret: &str) -> bool {
    let (expected, given) = (config_secret.as_bytes(), request_secret.as_bytes());
    expected.len() == given.len()
        && expected
            .iter()
            .zip(given)
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

/// `GET /` liveness probe.
pub async fn ping_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /{token}`: relay a Slack webhook payload to the configured backend.
///
/// Any token other than the configured `slack.token` is answered exactly
/// like an unknown path.
pub async fn webhook_handler(
    Path(token): Path<String>,
    State(state): State<Arc<AppState>>,
    uri: Uri,
    body: Bytes,
) -> Response {
    if !validate_secret(&state.token, &token) {
        warn!(path = %uri.path(), "Webhook token rejected");
        return not_found(uri.path());
    }

    match relay_payload(&state, &body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => {
            debug!(error = %e.0, "Webhook not relayed");
            e.into_response()
        }
    }
}

async fn relay_payload(state: &AppState, body: &[u8]) -> Result<serde_json::Value, ApiError> {
    let relay = state.relay.as_ref().map_err(|e| ApiError(e.clone()))?;
    let payload = SlackPayload::from_json(body)?;
    Ok(relay.deliver(&payload).await?)
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> Response {
    not_found(uri.path())
}
