//! Small text helpers shared by the builtin rules.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// [`normalize_whitespace`], lowercased. Used for substring rule matching.
pub fn normalize_tokens(text: &str) -> String {
    normalize_whitespace(text).to_lowercase()
}

/// `"2.10.3"` into `[2, 10, 3]`; `None` if any segment is not a number.
pub fn parse_numbering(numbering: &str) -> Option<Vec<u64>> {
    numbering
        .split('.')
        .map(|segment| segment.parse().ok())
        .collect()
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
pub fn safe_trim(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
