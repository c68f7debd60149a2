//! Chat backends for the spinhook relay.
//!
//! Each backend turns a [`SlackPayload`](spinhook_core::SlackPayload) into
//! its platform's native request. The [`Relay`] resolves the destination,
//! sends the request and normalises the response.
//!
//! # Main types
//!
//! - [`Backend`] — Trait implemented by every platform.
//! - [`Relay`] — Owns the selected backend and the HTTP client.
//! - [`OutboundRequest`] — A built, not yet sent, backend call.

/// Backend trait and selection.
pub mod backend;
/// Discord embeds.
pub mod discord;
/// Outbound delivery.
pub mod relay;
/// Slack channel to destination resolution.
pub mod resolver;
/// Slack passthrough.
pub mod slack;
/// Telegram HTML messages.
pub mod telegram;
/// Webex Markdown messages.
pub mod webex;

pub use backend::{build_backend, Authorization, Backend, OutboundRequest};
pub use discord::DiscordBackend;
pub use relay::Relay;
pub use resolver::{channel_or_default, resolve_channel};
pub use slack::SlackBackend;
pub use telegram::TelegramBackend;
pub use webex::WebexBackend;
