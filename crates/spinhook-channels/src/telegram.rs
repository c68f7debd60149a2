use crate::backend::{base_url, render_attachments, require, Backend, OutboundRequest};
use serde::Serialize;
use spinhook_core::{
    BotConfig, ChannelMapping, LinkFormat, RelayError, RelayResult, SlackPayload, Target,
};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API backend.
///
/// All attachments are folded into a single HTML-formatted `sendMessage`
/// call. The bot token travels in the URL path.
pub struct TelegramBackend {
    bot_token: String,
    api_base: String,
    channel_mapping: ChannelMapping,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    parse_mode: &'static str,
    text: String,
}

impl TelegramBackend {
    /// Build from the `telegram` config section.
    pub fn from_config(section: Option<&BotConfig>) -> RelayResult<Self> {
        let section = section.ok_or_else(|| RelayError::missing_section("telegram"))?;
        let channel_mapping = section
            .channel_mapping
            .clone()
            .ok_or_else(|| RelayError::missing_key("channel_mapping", "telegram"))?;
        let bot_token = require(section.bot_token.as_ref(), "bot_token", Target::Telegram)?;

        Ok(Self {
            bot_token: bot_token.to_string(),
            api_base: base_url(section.api_base_url.as_ref(), TELEGRAM_API_BASE),
            channel_mapping,
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }
}

impl Backend for TelegramBackend {
    fn target(&self) -> Target {
        Target::Telegram
    }

    fn destination_kind(&self) -> &'static str {
        "chat id"
    }

    fn channel_mapping(&self) -> Option<&ChannelMapping> {
        Some(&self.channel_mapping)
    }

    fn transform(
        &self,
        destination: &str,
        payload: &SlackPayload,
    ) -> RelayResult<OutboundRequest> {
        let request = SendMessageRequest {
            chat_id: destination,
            parse_mode: "HTML",
            text: render_attachments(&payload.attachments, LinkFormat::Html, |title| {
                format!("<b>{title}</b>")
            }),
        };

        Ok(OutboundRequest {
            url: self.api_url("sendMessage"),
            authorization: None,
            body: serde_json::to_value(request)
                .map_err(|e| RelayError::InvalidPayload(e.to_string()))?,
        })
    }

    /// Telegram reports failures as `{"ok": false, ...}`.
    fn accepts(&self, body: &serde_json::Value) -> bool {
        body["ok"].as_bool().unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend() -> TelegramBackend {
        let config = BotConfig {
            bot_token: Some("123:abc".to_string()),
            channel_mapping: Some([("deploys", "-100")].into_iter().collect()),
            api_base_url: None,
        };
        TelegramBackend::from_config(Some(&config)).unwrap()
    }

    #[test]
    fn test_send_message_request() {
        let payload = SlackPayload::from_value(json!({
            "channel": "#deploys",
            "attachments": [{"fallback": "Deploy succeeded", "title": "Prod"}]
        }))
        .unwrap();

        let request = backend().transform("-100", &payload).unwrap();
        assert_eq!(request.url, "https://api.telegram.org/bot123:abc/sendMessage");
        assert!(request.authorization.is_none());
        assert_eq!(
            request.body,
            json!({
                "chat_id": "-100",
                "parse_mode": "HTML",
                "text": "<b>Prod</b>\nDeploy succeeded"
            })
        );
    }

    #[test]
    fn test_links_become_anchors() {
        let payload = SlackPayload::from_value(json!({
            "attachments": [
                {"fallback": "<https://spin.example.com/e/1|Execution> done", "title": "<https://spin.example.com|app>"},
                {"fallback": "tail"}
            ]
        }))
        .unwrap();

        let request = backend().transform("-100", &payload).unwrap();
        assert_eq!(
            request.body["text"],
            "<b><a href=\"https://spin.example.com\">app</a></b>\n\
             <a href=\"https://spin.example.com/e/1\">Execution</a> done\n\ntail"
        );
    }

    #[test]
    fn test_accepts_only_ok_bodies() {
        let backend = backend();
        assert!(backend.accepts(&json!({"ok": true, "result": {}})));
        assert!(!backend.accepts(&json!({"ok": false, "description": "chat not found"})));
        assert!(!backend.accepts(&json!("gateway timeout")));
    }

    #[test]
    fn test_missing_channel_mapping() {
        let config = BotConfig {
            bot_token: Some("t".to_string()),
            ..BotConfig::default()
        };
        let err = TelegramBackend::from_config(Some(&config)).err().unwrap();
        assert_eq!(
            err.to_string(),
            "'channel_mapping' section not found in 'telegram' section of config"
        );
    }

    #[test]
    fn test_missing_bot_token() {
        let config = BotConfig {
            channel_mapping: Some(ChannelMapping::default()),
            ..BotConfig::default()
        };
        let err = TelegramBackend::from_config(Some(&config)).err().unwrap();
        assert_eq!(
            err.to_string(),
            "'bot_token' section not found in 'telegram' section of config"
        );
    }
}
