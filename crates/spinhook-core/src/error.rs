use thiserror::Error;

/// Convenience alias for `Result<T, RelayError>`.
pub type RelayResult<T> = Result<T, RelayError>;

/// Every failure the relay can report.
///
/// Variants raised while serving a request carry the exact message that is
/// returned to the webhook caller, so their `Display` output is the bare
/// message without a subsystem prefix.
#[derive(Error, Debug, Clone)]
pub enum RelayError {
    /// The config file could not be read or parsed. Fatal at startup.
    #[error("Config error: {0}")]
    ConfigMissing(String),

    /// The config file parsed but is unusable (missing `slack.token`,
    /// unsupported `target`). Fatal at startup.
    #[error("{0}")]
    InvalidConfig(String),

    /// A section or key needed to serve a request is not configured.
    #[error("{0}")]
    ConfigSectionMissing(String),

    /// The Slack channel has no entry in the backend's `channel_mapping`.
    #[error("Slack channel {0} not found in channel_mapping config")]
    ChannelNotFound(String),

    /// The request body is not a Slack webhook payload.
    #[error("Invalid Slack payload: {0}")]
    InvalidPayload(String),

    /// The outbound call failed or the backend rejected the message.
    #[error("{msg}")]
    BackendCallFailed {
        /// Human readable summary naming the backend and destination.
        msg: String,
        /// Backend response body (JSON when the backend sent JSON).
        detail: serde_json::Value,
    },

    /// The link translator was asked for a markup it does not know.
    #[error("Unsupported link format: {0}")]
    UnsupportedFormat(String),
}

impl RelayError {
    /// Shorthand for a missing top-level section, e.g. `'discord'`.
    pub fn missing_section(section: &str) -> Self {
        Self::ConfigSectionMissing(format!("'{section}' section not found in config"))
    }

    /// Shorthand for a key missing inside a backend section.
    pub fn missing_key(key: &str, section: &str) -> Self {
        Self::ConfigSectionMissing(format!(
            "'{key}' section not found in '{section}' section of config"
        ))
    }

    /// The `detail` payload to report alongside the message, if any.
    pub fn detail(&self) -> Option<&serde_json::Value> {
        match self {
            Self::BackendCallFailed { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidPayload(e.to_string())
    }
}
