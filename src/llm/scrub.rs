use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Key prefixes issued by Google and common bearer-token formats.
const PREFIX_PATTERNS: [&str; 4] = ["AIza", "ya29.", "GOCSPX-", "eyJ"];

/// Markers whose following token is a credential.
const MARKER_PATTERNS: [&str; 8] = [
    "key=",
    "api_key=",
    "access_token=",
    "x-goog-api-key: ",
    "Authorization: Bearer ",
    "\"api_key\":\"",
    "\"key\":\"",
    "\"access_token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|(_, c)| !is_secret_char(*c))
        .map_or(input.len(), |(i, _)| from + i)
}

/// Replace the token following every occurrence of `marker`. With
/// `keep_marker` the marker text itself stays visible.
fn redact_after(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        if end == content_start {
            search_from = content_start;
            continue;
        }

        let replace_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

/// Scrub credential-like tokens from provider error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let hit = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|p| input.contains(p));
    if !hit {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        redact_after(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        redact_after(&mut scrubbed, prefix, false);
    }
    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let end = scrubbed
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map_or(scrubbed.len(), |(i, _)| i);
    format!("{}...", &scrubbed[..end])
}

#[cfg(test)]
mod tests {
    use super::{sanitize_api_error, scrub_secret_patterns};

    #[test]
    fn scrubs_google_api_key() {
        let input = "API key not valid: AIzaSyD-1234567890abcdefghijklmnop";
        let scrubbed = scrub_secret_patterns(input);
        assert!(!scrubbed.contains("AIzaSyD"));
        assert!(scrubbed.contains("[REDACTED]"));
    }

    #[test]
    fn scrubs_key_query_parameter_but_keeps_marker() {
        let input = "GET /v1beta/models?key=abc123def456 failed";
        let scrubbed = scrub_secret_patterns(input);
        assert_eq!(scrubbed, "GET /v1beta/models?key=[REDACTED] failed");
    }

    #[test]
    fn clean_text_is_borrowed() {
        let input = "quota exceeded for model";
        assert!(matches!(scrub_secret_patterns(input), std::borrow::Cow::Borrowed(_)));
    }

    #[test]
    fn long_errors_are_truncated() {
        let input = "é".repeat(500);
        let sanitized = sanitize_api_error(&input);
        assert!(sanitized.ends_with("..."));
        assert_eq!(sanitized.chars().count(), 203);
    }
}
