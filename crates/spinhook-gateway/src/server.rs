use crate::webhook::{not_found_handler, ping_handler, webhook_handler};
use axum::{
    routing::{get, post},
    Router,
};
use spinhook_channels::Relay;
use spinhook_core::{RelayConfig, RelayError, RelayResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared, read-only state handed to every request.
pub struct AppState {
    /// Secret path segment the webhook is served under.
    pub token: String,
    /// The backend chosen at startup, or why none could be built.
    pub relay: Result<Relay, RelayError>,
}

/// The webhook relay HTTP server.
pub struct RelayServer;

impl RelayServer {
    /// Build the router from a validated config.
    ///
    /// Fails only when `slack.token` is missing. A target whose section or
    /// credentials are incomplete still produces a router; every webhook
    /// call then answers with the configuration error.
    pub fn build(config: &RelayConfig) -> RelayResult<Router> {
        let token = config.slack_token()?.to_string();
        let relay = Relay::from_config(config);

        match &relay {
            Ok(relay) => info!(
                backend = %relay.target(),
                "Target notification platform: {}",
                relay.target().label()
            ),
            Err(e) => warn!(error = %e, "No usable notification backend configured"),
        }

        Ok(Self::with_state(AppState { token, relay }))
    }

    /// Build the router around an already assembled state.
    pub fn with_state(state: AppState) -> Router {
        Router::new()
            .route("/", get(ping_handler).fallback(not_found_handler))
            .route("/{token}", post(webhook_handler).fallback(not_found_handler))
            .fallback(not_found_handler)
            .with_state(Arc::new(state))
    }
}
