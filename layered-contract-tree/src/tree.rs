//! The normalized contract representation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Title given to a successfully extracted tree.
pub const ANALYSIS_TITLE: &str = "Contract Analysis";

/// Title of the degenerate tree returned when no body could be located.
pub const ERROR_TITLE: &str = "Error";

/// A numbered or heading-delimited unit of contract text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseNode {
    /// `"2.1"`, `"Auto"` (list numbering), `""` (heading) or `"0"` (preamble)
    pub number: String,
    /// Clause text; continuation paragraphs are joined with `\n`
    pub text: String,
    /// Index of the paragraph that opened the clause
    pub start: usize,
    /// Filled in by [`build_tree`](crate::build_tree) only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ClauseNode>>,
}

impl ClauseNode {
    pub fn new(number: impl Into<String>, text: impl Into<String>, start: usize) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
            start,
            children: None,
        }
    }

    /// Append a continuation paragraph.
    pub fn push_paragraph(&mut self, text: &str) {
        self.text.push('\n');
        self.text.push_str(text);
    }
}

/// A group of clauses. Extraction emits a single synthetic section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub number: String,
    pub title: String,
    pub clauses: Vec<ClauseNode>,
}

impl Section {
    /// The synthetic section wrapping every extracted clause.
    pub fn main_document(clauses: Vec<ClauseNode>) -> Self {
        Self {
            number: "1".to_string(),
            title: "Main Document".to_string(),
            clauses,
        }
    }
}

/// Where and how a term was defined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedTerm {
    /// Number of the clause open when the definition was seen (may be empty)
    pub defined_at: String,
    /// Full text of the defining paragraph
    pub text: String,
}

/// Root output of extraction.
///
/// Built fresh for every call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTree {
    pub title: String,
    pub sections: Vec<Section>,
    /// Keyed by the normalized, case-sensitive term
    pub defined_terms: BTreeMap<String, DefinedTerm>,
    /// Internal hyperlink anchors in document order, duplicates kept
    pub references: Vec<String>,
    /// Zero or two party names
    pub parties: Vec<String>,
    /// Always empty from extraction; filled by an external bookmark collector
    #[serde(default)]
    pub bookmarks: BTreeSet<String>,
}

impl ContractTree {
    /// The tree returned when the markup has no locatable body.
    pub fn degenerate() -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            ..Self::default()
        }
    }

    /// Returns true for the tree produced by [`ContractTree::degenerate`].
    pub fn is_degenerate(&self) -> bool {
        self.title == ERROR_TITLE && self.sections.is_empty()
    }

    /// All clauses across all sections, in order.
    pub fn clauses(&self) -> impl Iterator<Item = &ClauseNode> {
        self.sections.iter().flat_map(|section| section.clauses.iter())
    }

    /// The set of clause numbers, as used for cross-reference validation.
    pub fn clause_numbers(&self) -> BTreeSet<&str> {
        self.clauses().map(|clause| clause.number.as_str()).collect()
    }

    /// Pretty RON rendering, used for debugging dumps and fixtures.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(6)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
    }

    /// Parse a tree previously written with [`ContractTree::to_ron_string`].
    pub fn from_ron_string(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
