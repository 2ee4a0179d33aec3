/// Display formatting for extraction records
use url::Url;

/// Descriptions longer than this are cut and suffixed with an ellipsis
pub const DESCRIPTION_LIMIT: usize = 150;

/// How many feature tags are shown before collapsing into "+N more"
pub const VISIBLE_FEATURES: usize = 4;

pub const PLACEHOLDER: &str = "N/A";

/// Truncate a description to `DESCRIPTION_LIMIT` characters
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

/// Feature tags split out of a comma-delimited list
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTags {
    pub visible: Vec<String>,
    pub overflow: usize,
}

impl FeatureTags {
    /// Label for the hidden remainder, e.g. "+1 more"
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

/// Split a comma-delimited feature list into at most `VISIBLE_FEATURES` tags
///
/// Blank entries (from trailing or doubled commas) are dropped before counting,
/// so they never add to the `+N more` overflow.
pub fn feature_tags(features: &str) -> FeatureTags {
    let tokens: Vec<String> = features
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    let overflow = tokens.len().saturating_sub(VISIBLE_FEATURES);
    let visible = tokens.into_iter().take(VISIBLE_FEATURES).collect();

    FeatureTags { visible, overflow }
}

/// Hostname portion of a URL, e.g. `https://openai.com/page` → `openai.com`
pub fn hostname(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()?
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

/// Hostname for display, falling back to the raw string when it does not parse
pub fn display_host(url: &str) -> String {
    hostname(url).unwrap_or_else(|| url.to_string())
}

/// Banner text after a successful extraction
pub fn success_message(url: &str) -> String {
    format!("Successfully extracted data from {}", display_host(url))
}

/// Treat missing and empty text alike
pub fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => PLACEHOLDER,
    }
}

/// "1 extraction", "3 extractions"
pub fn extraction_count(count: usize) -> String {
    if count == 1 {
        "1 extraction".to_string()
    } else {
        format!("{} extractions", count)
    }
}

/// Normalise a server timestamp into something `Date` parses consistently
///
/// SQLite's `CURRENT_TIMESTAMP` yields `YYYY-MM-DD HH:MM:SS` in UTC with no
/// zone marker, which browsers would otherwise read as local time.
pub fn normalize_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let is_sqlite_form = bytes.len() == 19 && bytes[10] == b' ';

    if is_sqlite_form {
        format!("{}T{}Z", &raw[..10], &raw[11..])
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_description() {
        let description = "x".repeat(160);
        let truncated = truncate_description(&description);

        assert_eq!(truncated.len(), 153);
        assert!(truncated.ends_with("..."));
        assert_eq!(&truncated[..150], &description[..150]);
    }

    #[test]
    fn test_truncate_short_description_unchanged() {
        let description = "y".repeat(100);
        assert_eq!(truncate_description(&description), description);
    }

    #[test]
    fn test_truncate_exact_limit_unchanged() {
        let description = "z".repeat(150);
        assert_eq!(truncate_description(&description), description);
    }

    #[test]
    fn test_truncate_counts_characters() {
        let description = "é".repeat(151);
        let truncated = truncate_description(&description);

        assert_eq!(truncated.chars().count(), 153);
        assert!(truncated.starts_with(&"é".repeat(150)));
    }

    #[test]
    fn test_feature_tags_overflow() {
        let tags = feature_tags("A, B, C, D, E");

        assert_eq!(tags.visible, vec!["A", "B", "C", "D"]);
        assert_eq!(tags.overflow, 1);
        assert_eq!(tags.overflow_label(), Some("+1 more".to_string()));
    }

    #[test]
    fn test_feature_tags_within_limit() {
        let tags = feature_tags("Fast,  Smart ");

        assert_eq!(tags.visible, vec!["Fast", "Smart"]);
        assert_eq!(tags.overflow_label(), None);
    }

    #[test]
    fn test_feature_tags_skip_blank_entries() {
        let tags = feature_tags("API, , Webhooks,");
        assert_eq!(tags.visible, vec!["API", "Webhooks"]);
    }

    #[test]
    fn test_blank_entries_not_counted_as_overflow() {
        let tags = feature_tags("A,,B, ,C,D,E,,");

        assert_eq!(tags.visible, vec!["A", "B", "C", "D"]);
        assert_eq!(tags.overflow_label(), Some("+1 more".to_string()));
    }

    #[test]
    fn test_hostname() {
        assert_eq!(hostname("https://openai.com/page"), Some("openai.com".to_string()));
        assert_eq!(hostname("http://www.notion.so/product?x=1"), Some("www.notion.so".to_string()));
        assert_eq!(hostname("http://localhost:5000/data"), Some("localhost".to_string()));
        assert_eq!(hostname("not a url"), None);
        assert_eq!(hostname(""), None);
    }

    #[test]
    fn test_display_host_falls_back_to_raw() {
        assert_eq!(display_host("openai.com"), "openai.com");
        assert_eq!(display_host("https://stripe.com/pricing"), "stripe.com");
    }

    #[test]
    fn test_success_message_names_host() {
        let message = success_message("https://openai.com/page");
        assert!(message.contains("openai.com"));
        assert!(!message.contains("/page"));
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(Some("Notion")), "Notion");
        assert_eq!(or_placeholder(Some("")), "N/A");
        assert_eq!(or_placeholder(None), "N/A");
    }

    #[test]
    fn test_extraction_count() {
        assert_eq!(extraction_count(0), "0 extractions");
        assert_eq!(extraction_count(1), "1 extraction");
        assert_eq!(extraction_count(12), "12 extractions");
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(normalize_timestamp("2024-01-15 10:30:00"), "2024-01-15T10:30:00Z");
        assert_eq!(normalize_timestamp("2024-01-15T10:30:00+02:00"), "2024-01-15T10:30:00+02:00");
    }
}
