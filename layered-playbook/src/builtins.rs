//! Builtin rule checks.
//!
//! Each check reads a [`ContractTree`] and returns the findings for one rule.
//! Matching is plain text: substring search over whitespace-normalized,
//! lowercased clause text.

use std::collections::BTreeSet;

use layered_contract_tree::{ClauseNode, ContractTree};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::{Finding, Rule, RuleKind, RuleResult};
use crate::text::{normalize_tokens, parse_numbering};

static CAPITALIZED_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)*\b").unwrap());

/// Dispatch a non-semantic rule to its check.
pub fn run_builtin(rule: &Rule, tree: &ContractTree) -> RuleResult {
    match rule.kind {
        RuleKind::MustHaveClause => must_have_clause(rule, tree),
        RuleKind::ForbiddenPhrase => forbidden_phrase(rule, tree),
        RuleKind::CheckDefinedTerms => check_defined_terms(rule, tree),
        RuleKind::CheckCrossReferences => check_cross_references(rule, tree),
        RuleKind::CheckNumbering => check_numbering(rule, tree),
        RuleKind::CheckPartyNames => check_party_names(rule, tree),
        RuleKind::NumericLimit | RuleKind::PreferredWording | RuleKind::Unknown => {
            log::debug!("rule {:?}: no check for type {}", rule.id, rule.kind);
            RuleResult::default()
        }
    }
}

pub fn must_have_clause(rule: &Rule, tree: &ContractTree) -> RuleResult {
    let clause_name = match rule.clause_name.as_deref() {
        Some(name) => name,
        None => return RuleResult::default(),
    };

    let wanted = normalize_tokens(clause_name);
    let found = tree
        .clauses()
        .any(|clause| normalize_tokens(&clause.text).contains(&wanted));

    if found {
        RuleResult::default()
    } else {
        vec![Finding::new(
            rule,
            format!("The contract is missing the '{}' clause.", clause_name),
        )]
        .into()
    }
}

/// One finding per clause containing the phrase.
pub fn forbidden_phrase(rule: &Rule, tree: &ContractTree) -> RuleResult {
    let phrase = match rule.phrase.as_deref() {
        Some(phrase) => phrase,
        None => return RuleResult::default(),
    };

    let wanted = normalize_tokens(phrase);
    tree.clauses()
        .filter(|clause| normalize_tokens(&clause.text).contains(&wanted))
        .map(|clause| {
            Finding::new(
                rule,
                format!("The contract contains the forbidden phrase '{}'.", phrase),
            )
            .with_clause(clause)
        })
        .collect::<Vec<_>>()
        .into()
}

fn all_clause_text(tree: &ContractTree) -> String {
    tree.clauses()
        .map(|clause| clause.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unused definitions and capitalized phrases that look like undefined terms.
///
/// A term occurring at most once in the clause text counts as unused (the one
/// occurrence being its definition). Any distinct capitalized word sequence
/// that is neither a defined term (ignoring case) nor all caps is reported as
/// possibly undefined.
pub fn check_defined_terms(rule: &Rule, tree: &ContractTree) -> RuleResult {
    let all_text = all_clause_text(tree);
    let mut findings = Vec::new();

    for term in tree.defined_terms.keys() {
        let pattern = format!(r"\b{}\b", regex::escape(term));
        let occurrences = match Regex::new(&pattern) {
            Ok(re) => re.find_iter(&all_text).count(),
            Err(err) => {
                log::warn!("skipping term {:?}: {}", term, err);
                continue;
            }
        };
        if occurrences <= 1 {
            findings.push(Finding::new(
                rule,
                format!("Defined term '{}' is defined but never used.", term),
            ));
        }
    }

    let defined_lower: BTreeSet<String> = tree
        .defined_terms
        .keys()
        .map(|term| term.to_lowercase())
        .collect();

    let mut seen = BTreeSet::new();
    for candidate in CAPITALIZED_SEQUENCE.find_iter(&all_text) {
        let candidate = candidate.as_str();
        if !seen.insert(candidate) {
            continue;
        }
        if candidate.to_uppercase() == candidate
            || defined_lower.contains(&candidate.to_lowercase())
        {
            continue;
        }
        findings.push(Finding::new(
            rule,
            format!("Term '{}' may be used but is not defined.", candidate),
        ));
    }

    findings.into()
}

/// References that are neither a bookmark nor a clause number.
pub fn check_cross_references(rule: &Rule, tree: &ContractTree) -> RuleResult {
    let clause_numbers = tree.clause_numbers();
    tree.references
        .iter()
        .filter(|reference| {
            !tree.bookmarks.contains(reference.as_str())
                && !clause_numbers.contains(reference.as_str())
        })
        .map(|reference| {
            Finding::new(
                rule,
                format!(
                    "Broken cross-reference: The reference to '{}' does not point to a valid bookmark or clause number.",
                    reference
                ),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

/// Sibling clauses whose last number segment goes backwards.
///
/// Only consecutive clauses at the same depth (two or more segments) under the
/// same parent are compared; non-numeric numbers are never flagged.
pub fn check_numbering(rule: &Rule, tree: &ContractTree) -> RuleResult {
    let clauses: Vec<&ClauseNode> = tree.clauses().collect();
    let mut findings = Vec::new();

    for pair in clauses.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if numbering_goes_backwards(&prev.number, &curr.number) {
            findings.push(
                Finding::new(
                    rule,
                    format!(
                        "Incorrect numbering sequence: '{}' is followed by '{}'.",
                        prev.number, curr.number
                    ),
                )
                .with_clause(curr),
            );
        }
    }

    findings.into()
}

fn numbering_goes_backwards(prev: &str, curr: &str) -> bool {
    let (prev_parts, curr_parts) = match (parse_numbering(prev), parse_numbering(curr)) {
        (Some(p), Some(c)) => (p, c),
        _ => return false,
    };
    if curr_parts.len() < 2 || prev_parts.len() != curr_parts.len() {
        return false;
    }
    let depth = curr_parts.len() - 1;
    prev_parts[..depth] == curr_parts[..depth] && curr_parts[depth] < prev_parts[depth]
}

/// Compares party names; reports nothing yet.
pub fn check_party_names(rule: &Rule, tree: &ContractTree) -> RuleResult {
    if let Some((first, rest)) = tree.parties.split_first() {
        for other in rest {
            if !other.eq_ignore_ascii_case(first) {
                log::debug!("rule {:?}: parties {:?} and {:?} differ", rule.id, first, other);
            }
        }
    }
    RuleResult::default()
}
