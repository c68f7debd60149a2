use spinhook_core::{ChannelMapping, RelayError, RelayResult};

/// Resolve a Slack channel (with or without `#`) to a backend destination.
///
/// Lookup is exact-match on the channel name. Without a mapping the bare
/// channel name is the destination.
pub fn resolve_channel(channel: &str, mapping: Option<&ChannelMapping>) -> RelayResult<String> {
    let channel = channel.strip_prefix('#').unwrap_or(channel);
    match mapping {
        Some(mapping) => mapping
            .get(channel)
            .map(str::to_string)
            .ok_or_else(|| RelayError::ChannelNotFound(channel.to_string())),
        None => Ok(channel.to_string()),
    }
}

/// The channel a payload is addressed to, falling back to the configured
/// default when the payload names none.
pub fn channel_or_default<'a>(
    payload_channel: Option<&'a str>,
    default_channel: Option<&'a str>,
) -> RelayResult<&'a str> {
    payload_channel.or(default_channel).ok_or_else(|| {
        RelayError::ConfigSectionMissing(
            "No channel in payload and 'default_channel' not found in 'slack' section of config"
                .to_string(),
        )
    })
}
