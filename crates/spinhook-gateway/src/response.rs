use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use spinhook_core::RelayError;

/// The JSON body of every non-success response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    status: &'static str,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// An `error` envelope with an optional `detail`.
    pub fn new(msg: impl Into<String>, detail: Option<serde_json::Value>) -> Self {
        Self {
            status: "error",
            msg: msg.into(),
            detail,
        }
    }
}

/// A [`RelayError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub RelayError);

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        Self(e)
    }
}

impl ApiError {
    /// Lookup and configuration problems are 404s, backend failures 500s.
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            RelayError::ConfigSectionMissing(_) | RelayError::ChannelNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            RelayError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::BackendCallFailed { .. }
            | RelayError::UnsupportedFormat(_)
            | RelayError::ConfigMissing(_)
            | RelayError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = ErrorEnvelope::new(self.0.to_string(), self.0.detail().cloned());
        (status, Json(envelope)).into_response()
    }
}

/// 404 for any path other than the webhook and liveness routes.
pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new(
            format!("{path} not found"),
            Some(serde_json::Value::String(
                "The requested URL was not found on the server.".to_string(),
            )),
        )),
    )
        .into_response()
}
