use crate::backend::{base_url, require, Authorization, Backend, OutboundRequest};
use spinhook_core::{
    ChannelMapping, RelayError, RelayResult, SlackConfig, SlackPayload, Target,
};

const SLACK_API_BASE: &str = "https://slack.com/api";

/// Slack passthrough backend.
///
/// Re-posts the incoming payload through `chat.postMessage` with only the
/// `channel` rewritten. Without a `channel_mapping` the Slack channel name
/// is used as-is.
pub struct SlackBackend {
    bot_token: String,
    api_base: String,
    channel_mapping: Option<ChannelMapping>,
}

impl SlackBackend {
    /// Build from the `slack` config section.
    pub fn from_config(section: Option<&SlackConfig>) -> RelayResult<Self> {
        let section = section.ok_or_else(|| RelayError::missing_section("slack"))?;
        let bot_token = require(section.bot_token.as_ref(), "bot_token", Target::Slack)?;

        Ok(Self {
            bot_token: bot_token.to_string(),
            api_base: base_url(section.api_base_url.as_ref(), SLACK_API_BASE),
            channel_mapping: section.channel_mapping.clone(),
        })
    }
}

impl Backend for SlackBackend {
    fn target(&self) -> Target {
        Target::Slack
    }

    fn destination_kind(&self) -> &'static str {
        "channel"
    }

    fn channel_mapping(&self) -> Option<&ChannelMapping> {
        self.channel_mapping.as_ref()
    }

    fn transform(
        &self,
        destination: &str,
        payload: &SlackPayload,
    ) -> RelayResult<OutboundRequest> {
        let mut body = payload.raw().clone();
        let fields = body.as_object_mut().ok_or_else(|| {
            RelayError::InvalidPayload("expected a JSON object".to_string())
        })?;
        fields.insert(
            "channel".to_string(),
            serde_json::Value::String(destination.to_string()),
        );

        Ok(OutboundRequest {
            url: format!("{}/chat.postMessage", self.api_base),
            authorization: Some(Authorization::Bearer(self.bot_token.clone())),
            body,
        })
    }

    /// The Web API answers 200 with `{"ok": false}` on failure.
    fn accepts(&self, body: &serde_json::Value) -> bool {
        body["ok"].as_bool().unwrap_or(false)
    }
}
