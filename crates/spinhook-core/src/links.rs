//! Slack hyperlink rewriting.
//!
//! Slack marks links up as `<https://example.com|label>`. Telegram wants
//! HTML anchors and Discord/Webex want Markdown links.

use crate::{RelayError, RelayResult};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static SLACK_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(https?://[^|>]+)\|([^>]*)>").unwrap());

/// Markup a Slack link is rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFormat {
    /// `<a href="URL">TEXT</a>`
    Html,
    /// `[TEXT](URL)`
    Markdown,
}

impl FromStr for LinkFormat {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "markdown" => Ok(Self::Markdown),
            other => Err(RelayError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Rewrite every Slack link in `text`. Everything else is left untouched.
pub fn translate_links(text: &str, format: LinkFormat) -> String {
    let replacement = match format {
        LinkFormat::Html => r#"<a href="$1">$2</a>"#,
        LinkFormat::Markdown => "[$2]($1)",
    };
    SLACK_LINK.replace_all(text, replacement).into_owned()
}

/// [`translate_links`] with the format given by name (`html`, `markdown`).
pub fn translate(text: &str, mode: &str) -> RelayResult<String> {
    Ok(translate_links(text, mode.parse()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_html_link() {
        assert_eq!(
            translate("see <https://x.com|here>", "html").unwrap(),
            r#"see <a href="https://x.com">here</a>"#
        );
    }

    #[test]
    fn test_markdown_link() {
        assert_eq!(
            translate("see <https://x.com|here>", "markdown").unwrap(),
            "see [here](https://x.com)"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Deploy of app to prod <finished> | ok";
        assert_eq!(translate(text, "html").unwrap(), text);
        assert_eq!(translate(text, "markdown").unwrap(), text);
    }

    #[test]
    fn test_every_link_replaced() {
        let text = "Pipeline <https://spin.example.com/p/1|deploy> by \
                    <http://ci.example.com/job?id=2&x=y|ci>, see <https://docs.example.com|docs>";
        let html = translate_links(text, LinkFormat::Html);
        assert_eq!(html.matches("<a href=").count(), 3);
        assert!(!html.contains('|'));
        assert!(html.contains(r#"<a href="http://ci.example.com/job?id=2&x=y">ci</a>"#));

        let md = translate_links(text, LinkFormat::Markdown);
        assert_eq!(md.matches("](").count(), 3);
        assert!(!md.contains('<'));
        assert!(md.ends_with("see [docs](https://docs.example.com)"));
    }

    #[test]
    fn test_non_http_markers_left_alone() {
        let text = "<mailto:a@b.c|mail> and <#C123|general>";
        assert_eq!(translate_links(text, LinkFormat::Markdown), text);
    }

    #[test]
    fn test_adjacent_bare_link_does_not_swallow_next() {
        let text = "<https://a.com> then <https://b.com|b>";
        assert_eq!(
            translate_links(text, LinkFormat::Markdown),
            "<https://a.com> then [b](https://b.com)"
        );
    }

    #[test]
    fn test_unsupported_format() {
        let err = translate("x", "bbcode").unwrap_err();
        assert!(matches!(err, RelayError::UnsupportedFormat(ref f) if f == "bbcode"));
    }
}
