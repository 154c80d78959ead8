use super::support::*;
use crate::{
    extract_contract, ContractExtractor, ContractTree, ExtractorConfig, RecordingTrace,
    TraceEvent, ANALYSIS_TITLE,
};

fn nda() -> Vec<String> {
    vec![
        styled("Title", &[run("MUTUAL NON-DISCLOSURE AGREEMENT")]),
        p(r#"This agreement is made between Acme Inc and Beta LLC (the "Agreement")."#),
        p("Disclosing Party: Acme Inc."),
        p("Receiving Party: Beta LLC."),
        empty_p(),
        p("1. Definitions"),
        p_runs(&[
            bold("Effective Date"),
            run(" means the date first written above."),
        ]),
        p(r#""Confidential Information" means any non-public data."#),
        p("2. Obligations"),
        p_runs(&[
            run("The Receiving Party shall protect the "),
            deleted("secret "),
            run("Confidential Information as set out in "),
            hyperlink("_Ref12345", "Section 1"),
            run("."),
        ]),
        p_runs(&[bold("Purpose"), run(" means evaluating a transaction.")]),
        numbered(0, "Remedies"),
        styled("Heading2", &[run("Miscellaneous")]),
        p_runs(&[
            run("See "),
            hyperlink("_Ref12345", "Section 1"),
            run(" and "),
            hyperlink("_Toc1", "the table"),
            run("."),
        ]),
    ]
}

#[test]
fn nda_end_to_end() {
    let tree = extract_contract(&document(&nda()));

    assert_eq!(tree.title, ANALYSIS_TITLE);
    assert_eq!(tree.sections.len(), 1);
    assert_eq!(tree.sections[0].number, "1");
    assert_eq!(tree.sections[0].title, "Main Document");

    let clauses: Vec<(&str, &str, usize)> = tree
        .clauses()
        .map(|c| (c.number.as_str(), c.text.as_str(), c.start))
        .collect();
    assert_eq!(
        clauses,
        vec![
            (
                "0",
                "MUTUAL NON-DISCLOSURE AGREEMENT\nThis agreement is made between Acme Inc and Beta LLC (the \"Agreement\").\nDisclosing Party: Acme Inc.\nReceiving Party: Beta LLC.",
                0
            ),
            (
                "1",
                "Definitions\nEffective Date means the date first written above.\n\"Confidential Information\" means any non-public data.",
                5
            ),
            (
                "2",
                "Obligations\nThe Receiving Party shall protect the Confidential Information as set out in Section 1.\nPurpose means evaluating a transaction.",
                8
            ),
            ("Auto", "Remedies", 11),
            ("", "Miscellaneous\nSee Section 1 and the table.", 12),
        ]
    );

    let terms: Vec<(&str, &str)> = tree
        .defined_terms
        .iter()
        .map(|(term, def)| (term.as_str(), def.defined_at.as_str()))
        .collect();
    assert_eq!(
        terms,
        vec![
            ("Agreement", "0"),
            ("Confidential Information", "1"),
            ("Effective Date", "1"),
        ]
    );
    assert_eq!(
        tree.defined_terms["Confidential Information"].text,
        "\"Confidential Information\" means any non-public data."
    );

    assert_eq!(tree.references, vec!["_Ref12345", "_Ref12345", "_Toc1"]);
    assert_eq!(tree.parties, vec!["Acme Inc.", "Beta LLC."]);
    assert!(tree.bookmarks.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let xml = document(&nda());
    let extractor = ContractExtractor::default();
    let first = extractor.extract(&xml);
    let second = extractor.extract(&xml);
    assert_eq!(first, second);
    assert_eq!(first, extract_contract(&xml));
}

#[test]
fn tracked_deletions_never_leak() {
    let xml = document(&[
        p("1. Definitions"),
        p_runs(&[
            run("\"Services\" means "),
            deleted("free "),
            struck("unlimited "),
            run("support"),
            r#"<w:r><w:rPr><w:vanish/></w:rPr><w:t>hidden text</w:t></w:r>"#.to_string(),
            r#"<w:r><w:rPr><w:rStyle w:val="DeletedText"/></w:rPr><w:t>styled away</w:t></w:r>"#
                .to_string(),
            r#"<w:moveFrom w:id="2"><w:r><w:t>moved away</w:t></w:r></w:moveFrom>"#.to_string(),
            run("."),
        ]),
    ]);
    let tree = extract_contract(&xml);

    let all_text: String = tree
        .clauses()
        .map(|c| c.text.clone())
        .chain(tree.defined_terms.values().map(|d| d.text.clone()))
        .collect::<Vec<_>>()
        .join("\n");
    for removed in &["free", "unlimited", "hidden", "styled", "moved"] {
        assert!(!all_text.contains(removed), "{} leaked into {:?}", removed, all_text);
    }
    assert_eq!(tree.defined_terms["Services"].text, "\"Services\" means support.");
}

#[test]
fn manual_numbering() {
    let tree = extract_contract(&document(&[p("2.1 Indemnification")]));
    let clause = tree.clauses().next().unwrap();
    assert_eq!(clause.number, "2.1");
    assert_eq!(clause.text, "Indemnification");
    assert_eq!(clause.start, 0);
}

#[test]
fn parenthetical_term_in_clause() {
    let tree = extract_contract(&document(&[
        p("4. Scope"),
        p(r#"The parties agree to the terms (the "Agreement")."#),
    ]));
    assert_eq!(tree.defined_terms["Agreement"].defined_at, "4");
    assert_eq!(
        tree.defined_terms["Agreement"].text,
        r#"The parties agree to the terms (the "Agreement")."#
    );
}

#[test]
fn bold_terms_only_in_definition_clauses() {
    let definition = || {
        p_runs(&[
            bold("Effective Date"),
            run(" means the date of the last signature."),
        ])
    };

    let inside = extract_contract(&document(&[p("1. Definitions"), definition()]));
    assert!(inside.defined_terms.contains_key("Effective Date"));

    let outside = extract_contract(&document(&[p("7. General"), definition()]));
    assert!(outside.defined_terms.is_empty());

    let phrase = extract_contract(&document(&[
        p("7. General"),
        p_runs(&[
            bold("Effective Date"),
            run(" means the date in the definitions of this Agreement."),
        ]),
    ]));
    assert!(phrase.defined_terms.contains_key("Effective Date"));
}

#[test]
fn rejected_terms_are_not_keys() {
    let long = "A".repeat(150);
    let tree = extract_contract(&document(&[
        p(r#"Acme (the "[Party Name]") and Beta (the "the")."#),
        p(&format!(r#""{}" means nothing."#, long)),
    ]));
    assert!(tree.defined_terms.is_empty());
}

#[test]
fn flat_package_matches_plain_document() {
    let paragraphs = nda();
    let plain = extract_contract(&document(&paragraphs));
    let packaged = extract_contract(&flat_package(&paragraphs));

    assert!(!packaged.is_degenerate());
    assert_eq!(plain, packaged);
}

#[test]
fn missing_body_is_degenerate() {
    let mut trace = RecordingTrace::new();
    let tree = ContractExtractor::default().extract_with_trace(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
        &mut trace,
    );
    assert_eq!(tree, ContractTree::degenerate());
    assert!(tree.is_degenerate());
    assert!(matches!(trace.events[..], [TraceEvent::BodyMissing { .. }]));

    assert!(extract_contract("").is_degenerate());
    assert!(extract_contract("<not closed").is_degenerate());
    assert!(extract_contract("plain text").is_degenerate());
}

#[test]
fn empty_body() {
    let tree = extract_contract(&document(&[]));
    assert!(!tree.is_degenerate());
    assert_eq!(tree.sections.len(), 1);
    assert!(tree.sections[0].clauses.is_empty());
    assert!(tree.parties.is_empty());
}

#[test]
fn preamble_can_be_dropped() {
    let extractor = ContractExtractor::new(ExtractorConfig::default().with_retain_preamble(false));
    let tree = extractor.extract(&document(&[
        p(r#"Recitals (the "Background")."#),
        p("1. Purpose"),
    ]));

    assert_eq!(tree.clause_numbers().into_iter().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(tree.defined_terms["Background"].defined_at, "");
}

#[test]
fn trace_does_not_change_result() {
    let xml = document(&nda());
    let mut trace = RecordingTrace::new();
    let traced = ContractExtractor::default().extract_with_trace(&xml, &mut trace);
    assert_eq!(traced, extract_contract(&xml));

    assert_eq!(
        trace.events.first(),
        Some(&TraceEvent::BodyLocated {
            paragraphs: 14,
            packaged: false
        })
    );
    assert!(trace.events.contains(&TraceEvent::TermsSkipped {
        paragraph: 0,
        style: "Title".to_string()
    }));
    assert!(trace.events.contains(&TraceEvent::PartyStrategy {
        strategy: "role_label",
        candidates: vec!["Acme Inc.".to_string(), "Beta LLC.".to_string()],
    }));
}

#[test]
fn ron_dump() {
    let tree = extract_contract(&document(&[
        p("1. Definitions"),
        p(r#""NDA" means this agreement."#),
    ]));
    let ron = tree.to_ron_string().unwrap();
    assert_eq!(ContractTree::from_ron_string(&ron).unwrap(), tree);

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["definedTerms"]["NDA"]["definedAt"], "1");
    assert!(json["sections"][0]["clauses"][0].get("children").is_none());
}
