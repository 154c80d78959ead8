//! Defined term detection.
//!
//! Three independent passes run over every eligible paragraph:
//! - `(the "Term")` - parenthetical definition
//! - `"Term" means ...` - quoted term followed by a definitional verb
//! - a bold run followed by a definitional verb, only inside definition clauses
//!
//! Every candidate goes through [`normalize_term`] before it is recorded.

use std::collections::BTreeMap;
use std::fmt;

use layered_ooxml::Paragraph;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::trace::{ExtractionTrace, TraceEvent};
use crate::tree::{ClauseNode, DefinedTerm};

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\(\s*(?:the\s+)?["“”]([^"“”]+)["“”]\s*\)"#).unwrap());

static QUOTED_MEANS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)["“”]([^"“”]+)["“”]\s+(?:means|shall mean|is defined as|refers to)\b"#)
        .unwrap()
});

static DEFINITIONAL_VERB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:means|shall mean|is defined as|refers to)\b").unwrap());

static DEFIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)defin").unwrap());

static DEFINITIONS_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bdefinitions? of\b").unwrap());

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.*\]$").unwrap());

static TITLE_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z0-9'’\-&]+(?:\s+[A-Z][a-zA-Z0-9'’\-&]+){0,3}$").unwrap()
});

static ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,}(?:\s+[A-Z]{2,}){0,3}$").unwrap());

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "it", "any", "all", "in", "and", "or", "of", "for", "to",
];

/// Paragraph styles that never carry definitions (compared lowercased).
const BANNED_STYLES: &[&str] = &[
    "title",
    "heading",
    "heading1",
    "heading2",
    "listparagraph",
    "listnumber",
    "list-paragraph",
    "list-number",
];

/// Which pass produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermPass {
    /// `(the "Term")`
    Parenthetical,
    /// `"Term" means ...`
    QuotedMeans,
    /// Bold run followed by a definitional verb
    BoldRun,
}

impl fmt::Display for TermPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TermPass::Parenthetical => "parenthetical",
            TermPass::QuotedMeans => "quoted_means",
            TermPass::BoldRun => "bold_run",
        })
    }
}

/// Why a candidate did not become a defined term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermRejection {
    /// `[Party Name]` style template placeholder
    Placeholder,
    /// Shorter or longer than the configured bounds
    Length,
    /// A bare stop word such as "the"
    StopWord,
    /// Neither Title Case nor an acronym
    NotTitleCaseOrAcronym,
    /// A bold candidate without a definitional verb after it
    NoDefinitionalVerb,
}

impl fmt::Display for TermRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TermRejection::Placeholder => "placeholder",
            TermRejection::Length => "bad length",
            TermRejection::StopWord => "stop word",
            TermRejection::NotTitleCaseOrAcronym => "not title case or acronym",
            TermRejection::NoDefinitionalVerb => "missing definitional verb",
        })
    }
}

fn is_quote_or_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’')
}

/// Normalize a raw candidate, or say why it is not a term.
///
/// Surrounding quotes and whitespace are stripped; the result must be 2..=100
/// characters, not a stop word, and either Title Case (up to four words) or an
/// acronym (up to four all-caps tokens).
pub fn normalize_term(raw: &str) -> Result<String, TermRejection> {
    normalize_term_within(raw, 2, 100)
}

/// [`normalize_term`] with explicit length bounds.
pub fn normalize_term_within(raw: &str, min_len: usize, max_len: usize) -> Result<String, TermRejection> {
    if PLACEHOLDER.is_match(raw.trim()) {
        return Err(TermRejection::Placeholder);
    }

    let term = raw.trim_matches(is_quote_or_space);
    let len = term.chars().count();
    if len < min_len || len > max_len {
        return Err(TermRejection::Length);
    }

    if STOP_WORDS.contains(&term.to_lowercase().as_str()) {
        return Err(TermRejection::StopWord);
    }

    if !TITLE_CASE.is_match(term) && !ACRONYM.is_match(term) {
        return Err(TermRejection::NotTitleCaseOrAcronym);
    }

    Ok(term.to_string())
}

/// Returns true if term extraction must skip a paragraph with this style.
pub fn is_banned_style(style: &str) -> bool {
    let lower = style.to_lowercase();
    BANNED_STYLES.contains(&lower.as_str())
}

/// Whether the bold-run pass is active for a paragraph.
pub fn in_definitions_context(current: Option<&ClauseNode>, paragraph_text: &str) -> bool {
    current.map_or(false, |clause| DEFIN.is_match(&clause.text))
        || DEFINITIONS_OF.is_match(paragraph_text)
}

/// Candidates from the parenthetical pass, in text order.
pub fn parenthetical_candidates(text: &str) -> Vec<&str> {
    PARENTHETICAL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Candidates from the quoted-means pass, in text order.
pub fn quoted_means_candidates(text: &str) -> Vec<&str> {
    QUOTED_MEANS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// A phrase built from consecutive bold runs and the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoldCandidate {
    pub phrase: String,
    /// Lowercased text of the next one or two non-bold runs
    pub look_ahead: String,
}

impl BoldCandidate {
    pub fn has_definitional_verb(&self) -> bool {
        DEFINITIONAL_VERB.is_match(&self.look_ahead)
    }
}

/// Group consecutive bold kept runs into candidates.
pub fn bold_candidates(paragraph: &Paragraph) -> Vec<BoldCandidate> {
    let runs: Vec<_> = paragraph.kept_runs().collect();
    let mut candidates = Vec::new();

    let mut i = 0;
    while i < runs.len() {
        if !runs[i].bold {
            i += 1;
            continue;
        }

        let mut pieces = Vec::new();
        let mut j = i;
        while j < runs.len() && runs[j].bold {
            let piece = runs[j].plain_text.trim();
            if !piece.is_empty() {
                pieces.push(piece);
            }
            j += 1;
        }

        let look_ahead = runs[j..]
            .iter()
            .take(2)
            .take_while(|run| !run.bold)
            .map(|run| run.plain_text.trim())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        candidates.push(BoldCandidate {
            phrase: pieces.join(" "),
            look_ahead,
        });
        i = j;
    }

    candidates
}

/// Populates a term map paragraph by paragraph.
pub struct DefinedTermExtractor {
    min_len: usize,
    max_len: usize,
}

impl Default for DefinedTermExtractor {
    fn default() -> Self {
        Self {
            min_len: 2,
            max_len: 100,
        }
    }
}

impl DefinedTermExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_len_bounds(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Run all three passes over one paragraph.
    ///
    /// `text` is the assembled paragraph text and `current` the clause open
    /// after segmenting this paragraph.
    pub fn extract(
        &self,
        index: usize,
        paragraph: &Paragraph,
        text: &str,
        current: Option<&ClauseNode>,
        terms: &mut BTreeMap<String, DefinedTerm>,
        trace: &mut dyn ExtractionTrace,
    ) {
        if text.is_empty() {
            return;
        }

        if let Some(style) = paragraph.style.as_deref().filter(|s| is_banned_style(s)) {
            trace.record(TraceEvent::TermsSkipped {
                paragraph: index,
                style: style.to_string(),
            });
            return;
        }

        let defined_at = current.map(|clause| clause.number.as_str()).unwrap_or("");

        for candidate in parenthetical_candidates(text) {
            self.accept(candidate, TermPass::Parenthetical, defined_at, text, terms, trace);
        }

        for candidate in quoted_means_candidates(text) {
            self.accept(candidate, TermPass::QuotedMeans, defined_at, text, terms, trace);
        }

        if !in_definitions_context(current, text) {
            return;
        }

        for candidate in bold_candidates(paragraph) {
            match self.normalize(&candidate.phrase) {
                Err(reason) => trace.record(TraceEvent::TermRejected {
                    candidate: candidate.phrase,
                    pass: TermPass::BoldRun,
                    reason,
                }),
                Ok(_) if !candidate.has_definitional_verb() => {
                    trace.record(TraceEvent::TermRejected {
                        candidate: candidate.phrase,
                        pass: TermPass::BoldRun,
                        reason: TermRejection::NoDefinitionalVerb,
                    })
                }
                Ok(term) => self.insert(term, TermPass::BoldRun, defined_at, text, terms, trace),
            }
        }
    }

    fn normalize(&self, raw: &str) -> Result<String, TermRejection> {
        normalize_term_within(raw, self.min_len, self.max_len)
    }

    fn accept(
        &self,
        candidate: &str,
        pass: TermPass,
        defined_at: &str,
        text: &str,
        terms: &mut BTreeMap<String, DefinedTerm>,
        trace: &mut dyn ExtractionTrace,
    ) {
        match self.normalize(candidate) {
            Ok(term) => self.insert(term, pass, defined_at, text, terms, trace),
            Err(reason) => trace.record(TraceEvent::TermRejected {
                candidate: candidate.to_string(),
                pass,
                reason,
            }),
        }
    }

    fn insert(
        &self,
        term: String,
        pass: TermPass,
        defined_at: &str,
        text: &str,
        terms: &mut BTreeMap<String, DefinedTerm>,
        trace: &mut dyn ExtractionTrace,
    ) {
        trace.record(TraceEvent::TermAccepted {
            term: term.clone(),
            pass,
        });

        let record = DefinedTerm {
            defined_at: defined_at.to_string(),
            text: text.trim().to_string(),
        };
        if let Some(previous) = terms.insert(term.clone(), record) {
            trace.record(TraceEvent::TermRedefined {
                term,
                previous_defined_at: previous.defined_at,
                defined_at: defined_at.to_string(),
            });
        }
    }
}
