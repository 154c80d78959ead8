use layered_contract_tree::{ClauseNode, ContractTree, DefinedTerm, Section};

use crate::{
    check_cross_references, check_defined_terms, check_numbering, check_party_names,
    forbidden_phrase, must_have_clause, run_builtin, Rule, RuleKind,
};

fn tree(clauses: &[(&str, &str)]) -> ContractTree {
    ContractTree {
        title: "Contract Analysis".to_string(),
        sections: vec![Section::main_document(
            clauses
                .iter()
                .enumerate()
                .map(|(i, (number, text))| ClauseNode::new(*number, *text, i))
                .collect(),
        )],
        ..ContractTree::default()
    }
}

fn define(tree: &mut ContractTree, term: &str, defined_at: &str) {
    tree.defined_terms.insert(
        term.to_string(),
        DefinedTerm {
            defined_at: defined_at.to_string(),
            text: String::new(),
        },
    );
}

#[test]
fn missing_clause_on_empty_tree() {
    let rule = Rule::must_have_clause("must_have_clause", "Governing Law");
    let result = must_have_clause(&rule, &ContractTree::default());

    assert_eq!(result.findings.len(), 1);
    assert_eq!(
        result.findings[0].message,
        "The contract is missing the 'Governing Law' clause."
    );
    assert!(result.findings[0].clause.is_none());
}

#[test]
fn present_clause_ignores_case_and_spacing() {
    let rule = Rule::must_have_clause("law", "Governing  Law");
    let tree = tree(&[("1", "Term"), ("12", "GOVERNING\nlaw. This Agreement is governed by...")]);
    assert!(must_have_clause(&rule, &tree).is_empty());
}

#[test]
fn rule_without_clause_name_is_silent() {
    let rule = Rule::new("law", RuleKind::MustHaveClause);
    assert!(must_have_clause(&rule, &ContractTree::default()).is_empty());
}

#[test]
fn forbidden_phrase_per_clause() {
    let rule = Rule::forbidden_phrase("no-perpetual", "in perpetuity");
    let tree = tree(&[
        ("1", "The licence is granted In  Perpetuity."),
        ("2", "Fees are due monthly."),
        ("3", "Obligations survive in perpetuity."),
    ]);
    let result = forbidden_phrase(&rule, &tree);

    let clauses: Vec<&str> = result
        .findings
        .iter()
        .filter_map(|f| f.clause.as_ref())
        .map(|c| c.number.as_str())
        .collect();
    assert_eq!(clauses, vec!["1", "3"]);
    assert_eq!(
        result.findings[0].message,
        "The contract contains the forbidden phrase 'in perpetuity'."
    );
}

#[test]
fn defined_terms_unused_and_undefined() {
    let rule = Rule::new("terms", RuleKind::CheckDefinedTerms);
    let mut tree = tree(&[
        ("1", "\"Services\" means support. \"Fees\" means money."),
        ("2", "Services are paid with Fees by the Customer under NDA terms."),
    ]);
    define(&mut tree, "Services", "1");
    define(&mut tree, "Fees", "1");
    define(&mut tree, "Deliverables", "1");

    let result = check_defined_terms(&rule, &tree);
    insta::assert_snapshot!(result.messages().join("\n"), @r###"
    Defined term 'Deliverables' is defined but never used.
    Term 'Customer' may be used but is not defined.
    "###);
}

#[test]
fn defined_terms_match_case_insensitively() {
    let rule = Rule::new("terms", RuleKind::CheckDefinedTerms);
    let mut tree = tree(&[(
        "1",
        "Effective Date and EFFECTIVE DATE and effective date, then effective date again.",
    )]);
    define(&mut tree, "effective date", "1");

    assert!(check_defined_terms(&rule, &tree).is_empty());
}

#[test]
fn cross_references_against_bookmarks_and_numbers() {
    let rule = Rule::new("refs", RuleKind::CheckCrossReferences);
    let mut tree = tree(&[("1", "Definitions"), ("2.1", "Payment")]);
    tree.references = vec!["2.1".to_string(), "_Ref1".to_string(), "_Missing".to_string()];
    tree.bookmarks.insert("_Ref1".to_string());

    let result = check_cross_references(&rule, &tree);
    assert_eq!(
        result.messages(),
        vec!["Broken cross-reference: The reference to '_Missing' does not point to a valid bookmark or clause number."]
    );
}

#[test]
fn numbering_sequence() {
    let rule = Rule::new("numbering", RuleKind::CheckNumbering);
    let tree = tree(&[
        ("1", "a"),
        ("1.1", "b"),
        ("1.3", "c"),
        ("1.2", "d"),
        ("2", "e"),
        ("1", "f"),
        ("2.1", "g"),
        ("Auto", "h"),
        ("3.2", "i"),
        ("4.1", "j"),
        ("4.1.2", "k"),
        ("4.1.1", "l"),
    ]);
    let result = check_numbering(&rule, &tree);

    assert_eq!(
        result.messages(),
        vec![
            "Incorrect numbering sequence: '1.3' is followed by '1.2'.",
            "Incorrect numbering sequence: '4.1.2' is followed by '4.1.1'.",
        ]
    );
    assert_eq!(result.findings[0].clause.as_ref().map(|c| c.start), Some(3));
}

#[test]
fn party_names_report_nothing() {
    let rule = Rule::new("parties", RuleKind::CheckPartyNames);
    let mut tree = tree(&[]);
    tree.parties = vec!["Acme Inc.".to_string(), "Beta LLC".to_string()];
    assert!(check_party_names(&rule, &tree).is_empty());
}

#[test]
fn placeholder_kinds_report_nothing() {
    let tree = tree(&[("1", "The fee shall not exceed 100 EUR.")]);
    for kind in &[RuleKind::NumericLimit, RuleKind::PreferredWording, RuleKind::Unknown] {
        assert!(run_builtin(&Rule::new("x", *kind), &tree).is_empty());
    }
}
