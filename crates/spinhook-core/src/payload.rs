use crate::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// A Slack incoming-webhook payload, as posted by Spinnaker.
///
/// Only the fields the relay reads are typed; the untouched request body is
/// kept alongside for the Slack passthrough backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackPayload {
    /// Target channel, usually `#`-prefixed.
    #[serde(default)]
    pub channel: Option<String>,
    /// Sender name Spinnaker sets; not forwarded by the rewriting backends.
    #[serde(default)]
    pub username: Option<String>,
    /// Emoji alias such as `:rocket:`, used to pick a Discord author.
    #[serde(default)]
    pub icon_emoji: Option<String>,
    /// Message attachments, rendered in order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(skip)]
    raw: serde_json::Value,
}

/// One Slack message attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Bold heading line, may contain Slack links.
    #[serde(default)]
    pub title: Option<String>,
    /// Plain-text body of the attachment.
    pub fallback: String,
    /// Named (`good`, `warning`, `danger`) or hex color.
    #[serde(default)]
    pub color: Option<String>,
}

impl SlackPayload {
    /// Parse a request body, keeping the raw JSON for passthrough.
    pub fn from_json(body: &[u8]) -> RelayResult<Self> {
        let raw: serde_json::Value = serde_json::from_slice(body)?;
        Self::from_value(raw)
    }

    /// Build a payload from an already-parsed JSON document.
    pub fn from_value(raw: serde_json::Value) -> RelayResult<Self> {
        if !raw.is_object() {
            return Err(RelayError::InvalidPayload(
                "expected a JSON object".to_string(),
            ));
        }
        let mut payload: Self = serde_json::from_value(raw.clone())?;
        payload.raw = raw;
        Ok(payload)
    }

    /// The request body exactly as received.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// `channel` with the leading `#` removed, if a non-empty one was sent.
    pub fn channel_name(&self) -> Option<&str> {
        self.channel
            .as_deref()
            .map(|c| c.strip_prefix('#').unwrap_or(c))
            .filter(|c| !c.is_empty())
    }
}
