#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Playbook evaluation over a [`ContractTree`](layered_contract_tree::ContractTree).
//!
//! A [`Playbook`] is an ordered list of [`Rule`]s. [`run_playbook`] evaluates
//! each rule against an extracted tree and returns one [`RuleResult`] per rule.
//!
//! ## Example
//!
//! ```
//! use layered_contract_tree::extract_contract;
//! use layered_playbook::{run_playbook, Playbook, Rule, UnavailableEvaluator};
//!
//! let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
//!   <w:body><w:p><w:r><w:t>1. Confidentiality</w:t></w:r></w:p></w:body>
//! </w:document>"#;
//! let tree = extract_contract(xml);
//!
//! let playbook = Playbook::new("NDA", vec![Rule::must_have_clause("law", "Governing Law")]);
//! let results = run_playbook(&playbook, &tree, &mut UnavailableEvaluator);
//! assert_eq!(
//!     results[0].messages(),
//!     vec!["The contract is missing the 'Governing Law' clause."]
//! );
//! ```

mod builtins;
mod engine;
mod error;
mod rule;
mod store;
mod text;

pub use builtins::{
    check_cross_references, check_defined_terms, check_numbering, check_party_names,
    forbidden_phrase, must_have_clause, run_builtin,
};
pub use engine::{run_playbook, SemanticEvaluator, SemanticResult, UnavailableEvaluator};
pub use error::{PlaybookError, PlaybookResult};
pub use rule::{Finding, Playbook, Rule, RuleKind, RuleResult};
pub use store::{KeyValueStore, MemoryStore, PlaybookStore, SettingsStore, API_KEY, PLAYBOOKS_KEY};
pub use text::{normalize_tokens, normalize_whitespace, parse_numbering, safe_trim, tokenize};

#[cfg(test)]
mod tests {
    mod builtins;
    mod engine;
    mod store;
    mod text;
}
