use crate::backend::{base_url, render_attachments, require, Authorization, Backend, OutboundRequest};
use serde::Serialize;
use spinhook_core::{
    BotConfig, ChannelMapping, LinkFormat, RelayError, RelayResult, SlackPayload, Target,
};

const WEBEX_API_BASE: &str = "https://webexapis.com/v1";

/// Webex backend: one Markdown message per payload, posted to a room.
pub struct WebexBackend {
    bot_token: String,
    api_base: String,
    channel_mapping: ChannelMapping,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageRequest<'a> {
    room_id: &'a str,
    markdown: String,
}

impl WebexBackend {
    /// Build from the `webex` config section.
    pub fn from_config(section: Option<&BotConfig>) -> RelayResult<Self> {
        let section = section.ok_or_else(|| RelayError::missing_section("webex"))?;
        let bot_token = require(section.bot_token.as_ref(), "bot_token", Target::Webex)?;
        let channel_mapping = section
            .channel_mapping
            .clone()
            .ok_or_else(|| RelayError::missing_key("channel_mapping", "webex"))?;

        Ok(Self {
            bot_token: bot_token.to_string(),
            api_base: base_url(section.api_base_url.as_ref(), WEBEX_API_BASE),
            channel_mapping,
        })
    }
}

impl Backend for WebexBackend {
    fn target(&self) -> Target {
        Target::Webex
    }

    fn destination_kind(&self) -> &'static str {
        "room id"
    }

    fn channel_mapping(&self) -> Option<&ChannelMapping> {
        Some(&self.channel_mapping)
    }

    fn transform(
        &self,
        destination: &str,
        payload: &SlackPayload,
    ) -> RelayResult<OutboundRequest> {
        let request = CreateMessageRequest {
            room_id: destination,
            markdown: render_attachments(&payload.attachments, LinkFormat::Markdown, |title| {
                format!("**{title}**")
            }),
        };

        Ok(OutboundRequest {
            url: format!("{}/messages", self.api_base),
            authorization: Some(Authorization::Bearer(self.bot_token.clone())),
            body: serde_json::to_value(request)
                .map_err(|e| RelayError::InvalidPayload(e.to_string()))?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_message() {
        let config = BotConfig {
            bot_token: Some("webex-token".to_string()),
            channel_mapping: Some([("deploys", "ROOM")].into_iter().collect()),
            api_base_url: Some("http://localhost:9999/v1/".to_string()),
        };
        let backend = WebexBackend::from_config(Some(&config)).unwrap();
        let payload = SlackPayload::from_value(json!({
            "attachments": [
                {"title": "Prod", "fallback": "Deploy <https://x.com|done>"},
                {"title": "Staging", "fallback": "Deploy pending"}
            ]
        }))
        .unwrap();

        let request = backend.transform("ROOM", &payload).unwrap();
        assert_eq!(request.url, "http://localhost:9999/v1/messages");
        assert_eq!(
            request.authorization,
            Some(Authorization::Bearer("webex-token".to_string()))
        );
        assert_eq!(
            request.body,
            json!({
                "roomId": "ROOM",
                "markdown": "**Prod**\nDeploy [done](https://x.com)\n\n**Staging**\nDeploy pending"
            })
        );
    }

    #[test]
    fn test_missing_section() {
        let err = WebexBackend::from_config(None).err().unwrap();
        assert_eq!(err.to_string(), "'webex' section not found in config");
    }
}
