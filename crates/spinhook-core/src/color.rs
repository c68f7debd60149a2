//! Slack attachment colors.

/// Slack's named attachment colors.
const NAMED_COLORS: [(&str, &str); 3] = [
    ("good", "#2EB67D"),
    ("warning", "#ECB22E"),
    ("danger", "#E01E5A"),
];

/// Resolve a Slack attachment color to an RGB integer.
///
/// Named colors go through the Slack palette, anything else is read as hex
/// with an optional leading `#`. Returns `None` for absent, unparsable or
/// zero colors, which callers treat as "no color".
pub fn resolve_color(color: Option<&str>) -> Option<u32> {
    let color = color?.trim();
    let hex = NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == color)
        .map_or(color, |(_, hex)| *hex);
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    match u32::from_str_radix(hex, 16) {
        Ok(0) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(color, error = %e, "Ignoring unparsable attachment color");
            None
        }
    }
}
