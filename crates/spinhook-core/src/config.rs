use crate::{RelayError, RelayResult};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// The chat platform notifications are relayed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Discord channel messages with embeds.
    Discord,
    /// Telegram Bot API `sendMessage`.
    Telegram,
    /// Webex room messages.
    Webex,
    /// Slack `chat.postMessage` passthrough.
    Slack,
}

impl Target {
    /// Config key of the platform, also the name of its config section.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Telegram => "telegram",
            Self::Webex => "webex",
            Self::Slack => "slack",
        }
    }

    /// Display name used in log lines and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Discord => "Discord",
            Self::Telegram => "Telegram",
            Self::Webex => "Webex",
            Self::Slack => "Slack",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discord" => Ok(Self::Discord),
            "telegram" => Ok(Self::Telegram),
            "webex" => Ok(Self::Webex),
            "slack" => Ok(Self::Slack),
            other => Err(RelayError::InvalidConfig(format!(
                "Unsupported target notification platform: {other}"
            ))),
        }
    }
}

/// Slack channel name (without `#`) to backend destination id.
///
/// Destination ids may be written as YAML strings or integers (Telegram chat
/// ids are negative numbers); both are kept as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMapping(HashMap<String, String>);

impl ChannelMapping {
    /// Exact-match lookup of a channel name.
    pub fn get(&self, channel: &str) -> Option<&str> {
        self.0.get(channel).map(String::as_str)
    }

    /// Number of mapped channels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no channel is mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ChannelMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for ChannelMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DestinationId {
            Text(String),
            Int(i64),
        }

        let raw = HashMap::<String, DestinationId>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(channel, id)| {
                    let id = match id {
                        DestinationId::Text(s) => s,
                        DestinationId::Int(n) => n.to_string(),
                    };
                    (channel, id)
                })
                .collect(),
        ))
    }
}

/// Name and icon shown as the author of a Discord embed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorPreset {
    /// Author name.
    pub name: String,
    /// Author avatar URL.
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// The `slack` section: inbound secret plus the Slack passthrough backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackConfig {
    /// Secret path segment the webhook is served under.
    #[serde(default)]
    pub token: Option<String>,
    /// Channel used when a payload carries no `channel`.
    #[serde(default)]
    pub default_channel: Option<String>,
    /// Bot token for `chat.postMessage` when `target: slack`.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Optional channel name to channel id mapping.
    #[serde(default)]
    pub channel_mapping: Option<ChannelMapping>,
    /// Overrides the Slack Web API base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// A bot-token backend section (`telegram`, `webex`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Bot credential.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Channel name to chat or room id.
    #[serde(default)]
    pub channel_mapping: Option<ChannelMapping>,
    /// Overrides the platform API base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// The `discord` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token, sent as `Authorization: Bot ...`.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Channel name to Discord channel id.
    #[serde(default)]
    pub channel_mapping: Option<ChannelMapping>,
    /// Overrides the Discord API base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Author used when the payload's `icon_emoji` matches no alias.
    #[serde(default)]
    pub author: Option<AuthorPreset>,
    /// `icon_emoji` alias (with or without colons) to author preset.
    #[serde(default)]
    pub authors: HashMap<String, AuthorPreset>,
}

/// Static relay configuration, loaded once at startup.
///
/// Backend sections stay optional after loading: a missing section is
/// reported to the webhook caller rather than refusing to start.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfig {
    /// Platform name, see [`Target`].
    #[serde(default)]
    pub target: Option<String>,
    /// Inbound secret and Slack backend.
    #[serde(default)]
    pub slack: Option<SlackConfig>,
    /// Discord backend.
    #[serde(default)]
    pub discord: Option<DiscordConfig>,
    /// Telegram backend.
    #[serde(default)]
    pub telegram: Option<BotConfig>,
    /// Webex backend.
    #[serde(default)]
    pub webex: Option<BotConfig>,
}

impl RelayConfig {
    /// Read, parse and validate a YAML config file.
    pub fn load(path: &Path) -> RelayResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RelayError::ConfigMissing(format!("Config file {} not found!", path.display()))
            } else {
                RelayError::ConfigMissing(format!(
                    "Failed to read config file {}: {e}",
                    path.display()
                ))
            }
        })?;
        let config = Self::from_yaml_str(&raw)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Parse and validate YAML config text.
    pub fn from_yaml_str(raw: &str) -> RelayResult<Self> {
        let config: Self = serde_yaml_ng::from_str(raw)
            .map_err(|e| RelayError::ConfigMissing(format!("Invalid YAML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Startup checks: `slack.token` must be set and `target`, when
    /// present, must name a supported platform.
    pub fn validate(&self) -> RelayResult<()> {
        self.slack_token()?;
        self.target()?;
        Ok(())
    }

    /// The secret path segment the webhook listens on.
    pub fn slack_token(&self) -> RelayResult<&str> {
        let slack = self.slack.as_ref().ok_or_else(|| {
            RelayError::InvalidConfig("'slack' section not found in config".to_string())
        })?;
        match slack.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(RelayError::InvalidConfig(
                "'token' not found in 'slack' section of config".to_string(),
            )),
        }
    }

    /// The configured target, `None` when the `target` key is absent.
    pub fn target(&self) -> RelayResult<Option<Target>> {
        self.target.as_deref().map(Target::from_str).transpose()
    }

    /// `slack.default_channel` with any leading `#` removed.
    pub fn default_channel(&self) -> Option<&str> {
        self.slack
            .as_ref()
            .and_then(|s| s.default_channel.as_deref())
            .map(|c| c.trim_start_matches('#'))
            .filter(|c| !c.is_empty())
    }
}
