use crate::backend::{build_backend, Authorization, Backend};
use crate::resolver::{channel_or_default, resolve_channel};
use reqwest::header::AUTHORIZATION;
use spinhook_core::{RelayConfig, RelayError, RelayResult, SlackPayload, Target};
use tracing::{info, warn};

/// Delivers Slack payloads to the configured backend.
///
/// Built once at startup. Each [`deliver`](Relay::deliver) performs exactly
/// one outbound HTTP call; there are no retries.
pub struct Relay {
    backend: Box<dyn Backend>,
    client: reqwest::Client,
    default_channel: Option<String>,
}

impl Relay {
    /// Wrap an already built backend.
    pub fn new(backend: Box<dyn Backend>, default_channel: Option<String>) -> Self {
        Self {
            backend,
            client: reqwest::Client::new(),
            default_channel,
        }
    }

    /// Select and build the backend named by `target`.
    pub fn from_config(config: &RelayConfig) -> RelayResult<Self> {
        let backend = build_backend(config)?;
        Ok(Self::new(
            backend,
            config.default_channel().map(str::to_string),
        ))
    }

    /// The platform this relay delivers to.
    pub fn target(&self) -> Target {
        self.backend.target()
    }

    /// Resolve, transform and forward `payload`.
    ///
    /// Returns the backend's JSON response body on success. A transport
    /// error, non-2xx status or a body the backend marks as failed becomes
    /// [`RelayError::BackendCallFailed`] carrying the body as detail.
    pub async fn deliver(&self, payload: &SlackPayload) -> RelayResult<serde_json::Value> {
        let channel = channel_or_default(payload.channel_name(), self.default_channel.as_deref())?;
        let destination = resolve_channel(channel, self.backend.channel_mapping())?;
        let request = self.backend.transform(&destination, payload)?;

        let mut builder = self.client.post(&request.url).json(&request.body);
        builder = match &request.authorization {
            Some(Authorization::Bot(token)) => builder.header(AUTHORIZATION, format!("Bot {token}")),
            Some(Authorization::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            warn!(backend = %self.target(), error = %e, "Backend request failed");
            self.failure(&destination, serde_json::Value::String(e.to_string()))
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        if !status.is_success() || !self.backend.accepts(&body) {
            warn!(
                backend = %self.target(),
                destination = %destination,
                status = status.as_u16(),
                "Backend rejected notification"
            );
            return Err(self.failure(&destination, body));
        }

        info!(
            backend = %self.target(),
            channel = %channel,
            destination = %destination,
            attachments = payload.attachments.len(),
            "Notification relayed"
        );
        Ok(body)
    }

    fn failure(&self, destination: &str, detail: serde_json::Value) -> RelayError {
        RelayError::BackendCallFailed {
            msg: format!(
                "Failed to send {} notification to {}: {destination}",
                self.target().label(),
                self.backend.destination_kind()
            ),
            detail,
        }
    }
}
