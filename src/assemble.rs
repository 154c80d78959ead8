//! Paragraph text assembly.
//!
//! Word splits text into runs at arbitrary points (formatting changes, spell
//! check, revision ids). Kept runs are re-joined with a single space only where
//! the split would otherwise glue two words together, and duplicated word
//! sequences left behind by change-tracked edits are collapsed.

use crate::markup::Paragraph;

/// Reconstruct the normalized plain text of a paragraph.
pub fn assemble_paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    let mut prev: Option<&str> = None;

    for run in paragraph.kept_runs() {
        let current = run.text.as_str();
        if current.is_empty() {
            continue;
        }
        if prev.map_or(false, |prev| needs_join_space(prev, current)) {
            text.push(' ');
        }
        text.push_str(current);
        prev = Some(current);
    }

    collapse_repeated_words(&text).trim().to_string()
}

fn is_closing_punct(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '\'' | ')' | ']' | '}')
}

fn is_opening_punct(c: char) -> bool {
    matches!(c, '(' | '[' | '{' | '"' | '\'' | '“' | '”' | '‘')
}

/// Whether a space must be inserted between two consecutive run texts.
///
/// Both runs need non-space content, and the runs must meet without
/// whitespace on either side, so a run ending in a space is followed by exactly
/// that one space. Also, the next run must not open with closing punctuation, and
/// the previous run must not end with opening punctuation or an opening quote.
pub fn needs_join_space(prev: &str, next: &str) -> bool {
    let (prev_last, next_first) = match (prev.trim_end().chars().last(), next.trim_start().chars().next()) {
        (Some(p), Some(n)) => (p, n),
        _ => return false,
    };

    let touching = prev.chars().last().map_or(false, |c| !c.is_whitespace())
        && next.chars().next().map_or(false, |c| !c.is_whitespace());

    touching && !is_closing_punct(next_first) && !is_opening_punct(prev_last)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '\'' | '’' | '-' | '&')
}

/// A whitespace-delimited piece of text and the whitespace that follows it.
struct Piece<'a> {
    token: &'a str,
    trailing: &'a str,
}

impl<'a> Piece<'a> {
    fn word(&self) -> Option<&'a str> {
        as_word(self.token)
    }

    /// The word after any opening brackets or quotes, for the first word of a sequence.
    fn leading_word(&self) -> Option<&'a str> {
        as_word(self.token.trim_start_matches(is_opening_punct))
    }
}

fn as_word(token: &str) -> Option<&str> {
    if !token.is_empty() && token.chars().all(is_word_char) {
        Some(token)
    } else {
        None
    }
}

fn split_pieces(text: &str) -> (&str, Vec<Piece<'_>>) {
    let body_start = text.len() - text.trim_start().len();
    let leading = &text[..body_start];
    let mut pieces = Vec::new();
    let mut rest = &text[body_start..];

    while !rest.is_empty() {
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let after = &rest[token_end..];
        let ws_end = after.len() - after.trim_start().len();
        pieces.push(Piece {
            token: &rest[..token_end],
            trailing: &after[..ws_end],
        });
        rest = &after[ws_end..];
    }

    (leading, pieces)
}

/// Longest immediately repeated sequence of 2 to 6 words starting at `start`.
fn repeated_run_len(pieces: &[Piece], start: usize) -> Option<usize> {
    (2..=6).rev().find(|&n| {
        let window = match pieces.get(start..start + 2 * n) {
            Some(window) => window,
            None => return false,
        };
        let words: Option<Vec<&str>> = window
            .iter()
            .enumerate()
            .map(|(k, piece)| if k == 0 { piece.leading_word() } else { piece.word() })
            .collect();
        match words {
            Some(words) => (0..n).all(|k| words[k].to_lowercase() == words[n + k].to_lowercase()),
            None => false,
        }
    })
}

/// Collapse immediately repeated word sequences of 2 to 6 words.
///
/// Comparison is case-insensitive and only whole words participate, so
/// `"the Receiving Party the receiving party shall"` becomes
/// `"the Receiving Party shall"`. Whitespace between the kept words is
/// preserved as written.
pub fn collapse_repeated_words(text: &str) -> String {
    let (leading, mut pieces) = split_pieces(text);

    let mut i = 0;
    while i < pieces.len() {
        match repeated_run_len(&pieces, i) {
            // Re-check the same position so triples collapse fully.
            Some(n) => {
                let second_copy_end = i + 2 * n;
                let trailing = pieces[second_copy_end - 1].trailing;
                pieces.drain(i + n..second_copy_end);
                pieces[i + n - 1].trailing = trailing;
            }
            None => i += 1,
        }
    }

    let mut out = String::with_capacity(text.len());
    out.push_str(leading);
    for piece in &pieces {
        out.push_str(piece.token);
        out.push_str(piece.trailing);
    }
    out
}
