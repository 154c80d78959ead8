#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Contract structure extraction.
//!
//! Builds a [`ContractTree`] (clauses, defined terms, parties and internal
//! cross-references) from WordprocessingML markup read by `layered-ooxml`.
//!
//! ## Pipeline
//!
//! Paragraphs are visited once, in document order:
//!
//! 1. [`assemble_paragraph_text`](layered_ooxml::assemble_paragraph_text) rebuilds the text
//! 2. [`ClauseSegmenter`] decides whether the paragraph opens a clause
//! 3. [`DefinedTermExtractor`] runs its parenthetical, quoted and bold passes
//! 4. [`collect_references`] gathers hyperlink anchors
//!
//! After the last paragraph, [`PartyExtractor`] runs its strategy cascade over
//! the whole text.
//!
//! ## Example
//!
//! ```
//! use layered_contract_tree::extract_contract;
//!
//! let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
//!   <w:body>
//!     <w:p><w:r><w:t>2.1 Indemnification</w:t></w:r></w:p>
//!   </w:body>
//! </w:document>"#;
//!
//! let tree = extract_contract(xml);
//! let clause = tree.clauses().next().unwrap();
//! assert_eq!(clause.number, "2.1");
//! assert_eq!(clause.text, "Indemnification");
//! ```

mod config;
mod extract;
mod hierarchy;
mod parties;
mod references;
mod segmenter;
mod terms;
mod trace;
mod tree;

pub use config::ExtractorConfig;
pub use extract::{extract_contract, ContractExtractor};
pub use hierarchy::{build_tree, find_clause_by_number, parent_number};
pub use parties::{
    default_party_strategies, BetweenStrategy, CapitalizedEntityStrategy, PartyContext,
    PartyExtractor, PartyStrategy, RoleLabelStrategy, SignatureBlockStrategy,
};
pub use references::collect_references;
pub use segmenter::{
    default_clause_rules, ClauseSegmenter, ClauseStart, ClauseStartRule, HeadingStyleRule,
    ManualNumberRule, NumberingLevelRule, ParagraphView, AUTO_NUMBER, PREAMBLE_NUMBER,
};
pub use terms::{
    bold_candidates, in_definitions_context, is_banned_style, normalize_term,
    normalize_term_within, parenthetical_candidates, quoted_means_candidates, BoldCandidate,
    DefinedTermExtractor, TermPass, TermRejection,
};
pub use trace::{ExtractionTrace, LogTrace, NoopTrace, RecordingTrace, TraceEvent};
pub use tree::{ClauseNode, ContractTree, DefinedTerm, Section, ANALYSIS_TITLE, ERROR_TITLE};

#[cfg(test)]
mod tests {
    mod support;

    mod extract;
    mod hierarchy;
    mod parties;
    mod segmenter;
    mod terms;
}
