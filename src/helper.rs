use log::trace;
use url::Url;

use crate::{Result, ShelfError};

// Helper method for parsing tags
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Joins tags back into the comma-separated form used by drafts.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Fails with `MissingRequiredField` when `value` is empty or whitespace.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShelfError::MissingRequiredField { field });
    }
    Ok(())
}

/// Parses `url` as an absolute URL that carries a scheme and a non-empty host.
fn parse_absolute_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(parsed),
        _ => None,
    }
}

pub fn is_valid_url(url: &str) -> bool {
    parse_absolute_url(url).is_some()
}

/// Checks a bookmark URL: blank is `MissingRequiredField`, unparseable is `InvalidUrl`.
pub fn validate_url(url: &str) -> Result<()> {
    require("url", url)?;
    if !is_valid_url(url) {
        return Err(ShelfError::InvalidUrl {
            url: url.to_string(),
        });
    }
    Ok(())
}

/// Derives a bookmark title from the URL's hostname.
///
/// `https://www.rust-lang.org/learn` becomes `Rust-lang`. This never touches the
/// network; a URL that does not parse simply yields `None`.
pub fn suggest_title(url: &str) -> Option<String> {
    let parsed = parse_absolute_url(url)?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().unwrap_or_default();

    let mut chars = label.chars();
    let first = chars.next()?;
    let title: String = first.to_uppercase().chain(chars).collect();
    trace!("Suggested title '{}' for {}", title, url);
    Some(title)
}

/// Hostname of a URL for display, falling back to the raw string.
pub fn display_host(url: &str) -> String {
    parse_absolute_url(url)
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags(" work, ,home ,, work"),
            vec!["work", "home", "work"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn join_tags_round_trips_through_parse() {
        let tags = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(join_tags(&tags), "a, b c");
        assert_eq!(parse_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn url_validation_requires_scheme_and_host() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://localhost:8080/x?y=1"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn validate_url_distinguishes_blank_from_malformed() {
        assert!(matches!(
            validate_url("  "),
            Err(ShelfError::MissingRequiredField { field: "url" })
        ));
        assert!(matches!(
            validate_url("nope"),
            Err(ShelfError::InvalidUrl { .. })
        ));
        assert!(validate_url("https://example.com").is_ok());
    }

    #[test]
    fn suggest_title_uses_first_host_label() {
        assert_eq!(
            suggest_title("https://Example.com/path").as_deref(),
            Some("Example")
        );
        assert_eq!(
            suggest_title("https://www.github.com/rust-lang").as_deref(),
            Some("Github")
        );
        assert_eq!(
            suggest_title("https://docs.rs/url").as_deref(),
            Some("Docs")
        );
    }

    #[test]
    fn suggest_title_is_silent_on_bad_input() {
        assert_eq!(suggest_title(""), None);
        assert_eq!(suggest_title("definitely not a url"), None);
        assert_eq!(suggest_title("/just/a/path"), None);
    }

    #[test]
    fn display_host_falls_back_to_input() {
        assert_eq!(display_host("https://www.example.com/a"), "www.example.com");
        assert_eq!(display_host("garbage"), "garbage");
    }
}
