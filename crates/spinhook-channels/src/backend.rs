use crate::discord::DiscordBackend;
use crate::slack::SlackBackend;
use crate::telegram::TelegramBackend;
use crate::webex::WebexBackend;
use spinhook_core::{
    translate_links, Attachment, ChannelMapping, LinkFormat, RelayConfig, RelayError,
    RelayResult, SlackPayload, Target,
};

/// How the outbound call authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// `Authorization: Bot <token>` (Discord).
    Bot(String),
    /// `Authorization: Bearer <token>` (Webex, Slack).
    Bearer(String),
}

/// A fully built call to a backend API.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// `None` when the credential is part of the URL (Telegram).
    pub authorization: Option<Authorization>,
    /// JSON request body.
    pub body: serde_json::Value,
}

/// A chat platform a Slack payload can be relayed to.
pub trait Backend: Send + Sync {
    /// Which platform this is.
    fn target(&self) -> Target;

    /// What a destination id is called on this platform, e.g. `chat id`.
    fn destination_kind(&self) -> &'static str;

    /// Slack channel → destination id mapping. `None` passes the Slack
    /// channel name through unchanged.
    fn channel_mapping(&self) -> Option<&ChannelMapping>;

    /// Build the platform request for `payload`, addressed to `destination`.
    fn transform(&self, destination: &str, payload: &SlackPayload)
        -> RelayResult<OutboundRequest>;

    /// Whether a 2xx response body actually reports success.
    fn accepts(&self, _body: &serde_json::Value) -> bool {
        true
    }
}

/// Build the backend named by `config.target`.
///
/// Errors here are per-request errors: the caller keeps the error and
/// reports it on every webhook call instead of refusing to start.
pub fn build_backend(config: &RelayConfig) -> RelayResult<Box<dyn Backend>> {
    let target = config.target()?.ok_or_else(|| {
        RelayError::ConfigSectionMissing("\"target\" section not found in config".to_string())
    })?;

    let backend: Box<dyn Backend> = match target {
        Target::Discord => Box::new(DiscordBackend::from_config(config.discord.as_ref())?),
        Target::Telegram => Box::new(TelegramBackend::from_config(config.telegram.as_ref())?),
        Target::Webex => Box::new(WebexBackend::from_config(config.webex.as_ref())?),
        Target::Slack => Box::new(SlackBackend::from_config(config.slack.as_ref())?),
    };
    Ok(backend)
}

/// Pull a required string out of a backend section.
pub(crate) fn require<'a>(
    value: Option<&'a String>,
    key: &str,
    target: Target,
) -> RelayResult<&'a str> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::missing_key(key, target.as_str()))
}

/// Join all attachments into one message body.
///
/// Each attachment becomes its (emphasised) title on one line followed by
/// its body; attachments are separated by a blank line.
pub(crate) fn render_attachments(
    attachments: &[Attachment],
    format: LinkFormat,
    emphasise: impl Fn(&str) -> String,
) -> String {
    attachments
        .iter()
        .map(|attachment| {
            let body = translate_links(&attachment.fallback, format);
            match attachment.title.as_deref() {
                Some(title) => format!("{}\n{body}", emphasise(&translate_links(title, format))),
                None => body,
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Strip a trailing slash from a configured base URL.
pub(crate) fn base_url(configured: Option<&String>, default: &str) -> String {
    configured
        .map_or(default, String::as_str)
        .trim_end_matches('/')
        .to_string()
}
