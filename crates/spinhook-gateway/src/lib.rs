//! HTTP front end of the spinhook relay.
//!
//! Serves `GET /` for liveness and `POST /{token}` for Slack-compatible
//! webhooks. Every failure is answered with a JSON envelope
//! `{"status": "error", "msg": ..., "detail": ...}`.

/// Error envelope and status mapping.
pub mod response;
/// Router construction.
pub mod server;
/// Request handlers.
pub mod webhook;

pub use response::{ApiError, ErrorEnvelope};
pub use server::{AppState, RelayServer};
