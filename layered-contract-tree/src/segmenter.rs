//! Clause segmentation.
//!
//! Paragraphs are visited in document order. A paragraph either starts a new
//! clause (decided by an ordered list of [`ClauseStartRule`]s) or continues the
//! open one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::trace::{ExtractionTrace, TraceEvent};
use crate::tree::ClauseNode;

/// Number given to the implicit clause holding text before the first clause.
pub const PREAMBLE_NUMBER: &str = "0";

/// Number given to clauses opened by list numbering without literal digits.
pub const AUTO_NUMBER: &str = "Auto";

static MANUAL_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)*)\.?\s+").unwrap());

/// The per-paragraph facts segmentation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphView<'a> {
    pub index: usize,
    /// Assembled text
    pub text: &'a str,
    pub style: Option<&'a str>,
    pub numbering_level: Option<&'a str>,
}

/// A detected clause start: its number and its text with any number prefix removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseStart {
    pub number: String,
    pub text: String,
}

/// One way a paragraph can start a clause.
///
/// Rules are tried in order and the first match decides the clause number.
pub trait ClauseStartRule {
    fn name(&self) -> &'static str;
    fn detect(&self, paragraph: &ParagraphView) -> Option<ClauseStart>;
}

/// `2.1 Indemnification`, `3. Term` - literal digits at the start of the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualNumberRule;

impl ClauseStartRule for ManualNumberRule {
    fn name(&self) -> &'static str {
        "manual_number"
    }

    fn detect(&self, paragraph: &ParagraphView) -> Option<ClauseStart> {
        let caps = MANUAL_NUMBER.captures(paragraph.text)?;
        let prefix = caps.get(0)?;
        Some(ClauseStart {
            number: caps[1].to_string(),
            text: paragraph.text[prefix.end()..].trim().to_string(),
        })
    }
}

/// Paragraphs carrying list or outline numbering.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberingLevelRule;

impl ClauseStartRule for NumberingLevelRule {
    fn name(&self) -> &'static str {
        "numbering_level"
    }

    fn detect(&self, paragraph: &ParagraphView) -> Option<ClauseStart> {
        paragraph.numbering_level.map(|_| ClauseStart {
            number: AUTO_NUMBER.to_string(),
            text: paragraph.text.trim().to_string(),
        })
    }
}

/// Paragraphs whose style name starts with "heading".
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingStyleRule;

impl ClauseStartRule for HeadingStyleRule {
    fn name(&self) -> &'static str {
        "heading_style"
    }

    fn detect(&self, paragraph: &ParagraphView) -> Option<ClauseStart> {
        let style = paragraph.style?;
        if style.to_lowercase().starts_with("heading") {
            Some(ClauseStart {
                number: String::new(),
                text: paragraph.text.trim().to_string(),
            })
        } else {
            None
        }
    }
}

/// Manual number, then list numbering, then heading style.
pub fn default_clause_rules() -> Vec<Box<dyn ClauseStartRule>> {
    vec![
        Box::new(ManualNumberRule),
        Box::new(NumberingLevelRule),
        Box::new(HeadingStyleRule),
    ]
}

enum SegmenterState {
    NoOpenClause,
    ClauseOpen(ClauseNode),
}

/// Accumulates clauses paragraph by paragraph.
pub struct ClauseSegmenter {
    rules: Vec<Box<dyn ClauseStartRule>>,
    retain_preamble: bool,
    state: SegmenterState,
    clauses: Vec<ClauseNode>,
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::with_rules(default_clause_rules())
    }
}

impl ClauseSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ClauseStartRule>>) -> Self {
        Self {
            rules,
            retain_preamble: true,
            state: SegmenterState::NoOpenClause,
            clauses: Vec::new(),
        }
    }

    /// Keep text before the first clause as clause `"0"` (the default), or drop it.
    pub fn retain_preamble(mut self, retain: bool) -> Self {
        self.retain_preamble = retain;
        self
    }

    /// The first rule that recognizes `paragraph` as a clause start.
    pub fn detect_start(&self, paragraph: &ParagraphView) -> Option<ClauseStart> {
        self.rules.iter().find_map(|rule| rule.detect(paragraph))
    }

    /// The clause currently accumulating text.
    pub fn current(&self) -> Option<&ClauseNode> {
        match &self.state {
            SegmenterState::ClauseOpen(clause) => Some(clause),
            SegmenterState::NoOpenClause => None,
        }
    }

    /// Feed the next paragraph. Paragraphs with empty text change nothing.
    pub fn push(&mut self, paragraph: &ParagraphView, trace: &mut dyn ExtractionTrace) {
        if paragraph.text.is_empty() {
            return;
        }

        if let Some(start) = self.detect_start(paragraph) {
            self.close(trace);
            trace.record(TraceEvent::ClauseOpened {
                number: start.number.clone(),
                start: paragraph.index,
            });
            self.state = SegmenterState::ClauseOpen(ClauseNode::new(
                start.number,
                start.text,
                paragraph.index,
            ));
            return;
        }

        if let SegmenterState::ClauseOpen(clause) = &mut self.state {
            clause.push_paragraph(paragraph.text);
        } else if self.retain_preamble {
            trace.record(TraceEvent::PreambleOpened {
                start: paragraph.index,
            });
            self.state = SegmenterState::ClauseOpen(ClauseNode::new(
                PREAMBLE_NUMBER,
                paragraph.text,
                paragraph.index,
            ));
        } else {
            trace.record(TraceEvent::PreambleDropped {
                paragraph: paragraph.index,
            });
        }
    }

    fn close(&mut self, trace: &mut dyn ExtractionTrace) {
        if let SegmenterState::ClauseOpen(clause) =
            std::mem::replace(&mut self.state, SegmenterState::NoOpenClause)
        {
            trace.record(TraceEvent::ClauseClosed {
                number: clause.number.clone(),
            });
            self.clauses.push(clause);
        }
    }

    /// Flush the open clause and return every clause in document order.
    pub fn finish(mut self, trace: &mut dyn ExtractionTrace) -> Vec<ClauseNode> {
        self.close(trace);
        self.clauses
    }
}
