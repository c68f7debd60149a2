use crate::backend::{base_url, require, Authorization, Backend, OutboundRequest};
use serde::Serialize;
use spinhook_core::{
    resolve_color, translate_links, AuthorPreset, ChannelMapping, DiscordConfig, LinkFormat,
    RelayError, RelayResult, SlackPayload, Target,
};
use std::collections::HashMap;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Discord backend: one embed per Slack attachment, posted through the
/// channel messages endpoint with a bot token.
pub struct DiscordBackend {
    bot_token: String,
    api_base: String,
    channel_mapping: ChannelMapping,
    default_author: Option<AuthorPreset>,
    /// Keyed by emoji alias without surrounding colons.
    authors: HashMap<String, AuthorPreset>,
}

// ── Discord API types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CreateMessageRequest {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<EmbedAuthor>,
}

#[derive(Debug, Clone, Serialize)]
struct EmbedAuthor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

// ── Implementation ──────────────────────────────────────────────────────────

impl DiscordBackend {
    /// Build from the `discord` config section.
    pub fn from_config(section: Option<&DiscordConfig>) -> RelayResult<Self> {
        let section = section.ok_or_else(|| RelayError::missing_section("discord"))?;
        let bot_token = require(section.bot_token.as_ref(), "bot_token", Target::Discord)?;
        let channel_mapping = section
            .channel_mapping
            .clone()
            .ok_or_else(|| RelayError::missing_key("channel_mapping", "discord"))?;

        Ok(Self {
            bot_token: bot_token.to_string(),
            api_base: base_url(section.api_base_url.as_ref(), DISCORD_API_BASE),
            channel_mapping,
            default_author: section.author.clone(),
            authors: section
                .authors
                .iter()
                .map(|(alias, preset)| (normalize_emoji(alias).to_string(), preset.clone()))
                .collect(),
        })
    }

    /// The author for a payload: the preset whose alias matches
    /// `icon_emoji`, otherwise the default author.
    fn author_for(&self, icon_emoji: Option<&str>) -> Option<EmbedAuthor> {
        icon_emoji
            .and_then(|emoji| self.authors.get(normalize_emoji(emoji)))
            .or(self.default_author.as_ref())
            .map(|preset| EmbedAuthor {
                name: preset.name.clone(),
                icon_url: preset.icon_url.clone(),
            })
    }
}

fn normalize_emoji(alias: &str) -> &str {
    alias.trim().trim_matches(':')
}

impl Backend for DiscordBackend {
    fn target(&self) -> Target {
        Target::Discord
    }

    fn destination_kind(&self) -> &'static str {
        "channel id"
    }

    fn channel_mapping(&self) -> Option<&ChannelMapping> {
        Some(&self.channel_mapping)
    }

    fn transform(
        &self,
        destination: &str,
        payload: &SlackPayload,
    ) -> RelayResult<OutboundRequest> {
        let author = self.author_for(payload.icon_emoji.as_deref());

        let embeds = payload
            .attachments
            .iter()
            .map(|attachment| Embed {
                title: attachment
                    .title
                    .as_deref()
                    .map(|t| translate_links(t, LinkFormat::Markdown)),
                description: translate_links(&attachment.fallback, LinkFormat::Markdown),
                color: resolve_color(attachment.color.as_deref()),
                author: author.clone(),
            })
            .collect();

        Ok(OutboundRequest {
            url: format!("{}/channels/{destination}/messages", self.api_base),
            authorization: Some(Authorization::Bot(self.bot_token.clone())),
            body: serde_json::to_value(CreateMessageRequest { embeds })
                .map_err(|e| RelayError::InvalidPayload(e.to_string()))?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend() -> DiscordBackend {
        let config: DiscordConfig = discord_config(
            r#"
bot_token: disc-token
channel_mapping:
  deploys: "123"
author:
  name: Spinnaker
  icon_url: https://example.com/spin.png
authors:
  ":rocket:":
    name: Release bot
    icon_url: https://example.com/rocket.png
"#,
        );
        DiscordBackend::from_config(Some(&config)).unwrap()
    }

    fn discord_config(yaml: &str) -> DiscordConfig {
        let wrapped = format!(
            "slack:\n  token: t\ndiscord:\n{}",
            yaml.lines()
                .map(|l| format!("  {l}\n"))
                .collect::<String>()
        );
        spinhook_core::RelayConfig::from_yaml_str(&wrapped)
            .unwrap()
            .discord
            .unwrap()
    }

    fn payload(body: serde_json::Value) -> SlackPayload {
        SlackPayload::from_value(body).unwrap()
    }

    #[test]
    fn test_one_embed_per_attachment() {
        let request = backend()
            .transform(
                "123",
                &payload(json!({
                    "channel": "#deploys",
                    "attachments": [
                        {"title": "Prod", "fallback": "see <https://x.com|here>", "color": "good"},
                        {"fallback": "second", "color": "#336699"},
                        {"fallback": "third"}
                    ]
                })),
            )
            .unwrap();

        assert_eq!(request.url, "https://discord.com/api/v10/channels/123/messages");
        assert_eq!(
            request.authorization,
            Some(Authorization::Bot("disc-token".to_string()))
        );

        let embeds = request.body["embeds"].as_array().unwrap();
        assert_eq!(embeds.len(), 3);
        assert_eq!(embeds[0]["title"], "Prod");
        assert_eq!(embeds[0]["description"], "see [here](https://x.com)");
        assert_eq!(embeds[0]["color"], 0x2EB67D);
        assert_eq!(embeds[1]["color"], 0x336699);
        assert!(embeds[1].get("title").is_none());
        assert!(embeds[2].get("color").is_none());
    }

    #[test]
    fn test_default_author() {
        let request = backend()
            .transform("123", &payload(json!({"attachments": [{"fallback": "x"}]})))
            .unwrap();
        let author = &request.body["embeds"][0]["author"];
        assert_eq!(author["name"], "Spinnaker");
        assert_eq!(author["icon_url"], "https://example.com/spin.png");
    }

    #[test]
    fn test_author_alias_from_icon_emoji() {
        let request = backend()
            .transform(
                "123",
                &payload(json!({"icon_emoji": ":rocket:", "attachments": [{"fallback": "x"}]})),
            )
            .unwrap();
        let author = &request.body["embeds"][0]["author"];
        assert_eq!(author["name"], "Release bot");
        assert_eq!(author["icon_url"], "https://example.com/rocket.png");
    }

    #[test]
    fn test_unknown_emoji_falls_back_to_default() {
        let request = backend()
            .transform(
                "123",
                &payload(json!({"icon_emoji": ":ghost:", "attachments": [{"fallback": "x"}]})),
            )
            .unwrap();
        assert_eq!(request.body["embeds"][0]["author"]["name"], "Spinnaker");
    }

    #[test]
    fn test_no_author_configured() {
        let config = discord_config("bot_token: b\nchannel_mapping:\n  a: \"1\"\n");
        let backend = DiscordBackend::from_config(Some(&config)).unwrap();
        let request = backend
            .transform("1", &payload(json!({"attachments": [{"fallback": "x"}]})))
            .unwrap();
        assert!(request.body["embeds"][0].get("author").is_none());
    }

    #[test]
    fn test_missing_bot_token() {
        let config = discord_config("channel_mapping:\n  a: \"1\"\n");
        let err = DiscordBackend::from_config(Some(&config)).err().unwrap();
        assert_eq!(
            err.to_string(),
            "'bot_token' section not found in 'discord' section of config"
        );
    }

    #[test]
    fn test_missing_section() {
        let err = DiscordBackend::from_config(None).err().unwrap();
        assert_eq!(err.to_string(), "'discord' section not found in config");
    }
}
