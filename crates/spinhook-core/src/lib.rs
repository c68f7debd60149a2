//! Core types for the spinhook relay.
//!
//! Shared by the backend and gateway crates: the error type, the YAML
//! configuration, the Slack webhook payload model and the text helpers used
//! to re-encode Slack markup for other chat platforms.
//!
//! # Main types
//!
//! - [`RelayError`] — Unified error enum, carrying caller-facing messages.
//! - [`RelayConfig`] — Static configuration loaded once at startup.
//! - [`SlackPayload`] — A parsed Slack incoming-webhook body.
//! - [`LinkFormat`] — Target markup for [`translate_links`].

/// Attachment color resolution.
pub mod color;
/// YAML configuration model and loader.
pub mod config;
/// Error type shared by all crates.
pub mod error;
/// Slack link markup translation.
pub mod links;
/// Slack webhook payload model.
pub mod payload;

pub use color::resolve_color;
pub use config::{
    AuthorPreset, BotConfig, ChannelMapping, DiscordConfig, RelayConfig, SlackConfig, Target,
};
pub use error::{RelayError, RelayResult};
pub use links::{translate, translate_links, LinkFormat};
pub use payload::{Attachment, SlackPayload};
