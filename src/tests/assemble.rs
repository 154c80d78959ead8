use crate::{assemble_paragraph_text, collapse_repeated_words, needs_join_space, Paragraph, Run};

fn run(text: &str) -> Run {
    Run {
        text: text.to_string(),
        plain_text: text.to_string(),
        ..Run::default()
    }
}

fn paragraph(runs: Vec<Run>) -> Paragraph {
    Paragraph {
        runs,
        ..Paragraph::default()
    }
}

#[test]
fn joins_split_words_with_a_space() {
    let p = paragraph(vec![run("The"), run("Receiving"), run("Party")]);
    insta::assert_snapshot!(assemble_paragraph_text(&p), @"The Receiving Party");
}

#[test]
fn no_space_before_closing_punctuation() {
    let p = paragraph(vec![run("the Agreement"), run("."), run(" Next")]);
    assert_eq!(assemble_paragraph_text(&p), "the Agreement. Next");
}

#[test]
fn no_space_after_opening_punctuation() {
    let p = paragraph(vec![run("terms ("), run("the "), run("“"), run("Agreement")]);
    assert_eq!(assemble_paragraph_text(&p), "terms (the “Agreement");
}

#[test]
fn join_space_only_where_runs_touch() {
    assert!(!needs_join_space("Hello ", "World"));
    assert!(!needs_join_space("Hello", " World"));
    assert!(needs_join_space("Hello", "World"));

    let p = paragraph(vec![run("Hello "), run("World")]);
    assert_eq!(assemble_paragraph_text(&p), "Hello World");

    let p = paragraph(vec![run("Hello "), run("World"), run(" again")]);
    assert_eq!(assemble_paragraph_text(&p), "Hello World again");
}

#[test]
fn excluded_runs_contribute_nothing() {
    let deleted = Run {
        deleted: true,
        ..run("old")
    };
    let struck = Run {
        strike: true,
        ..run("struck")
    };
    let styled = Run {
        style: Some("MyDeletedTextStyle".to_string()),
        ..run("styled")
    };
    let p = paragraph(vec![run("Payment"), deleted, struck, styled, run("terms")]);
    assert_eq!(assemble_paragraph_text(&p), "Payment terms");
}

#[test]
fn whitespace_only_runs_are_kept_without_extra_spaces() {
    let p = paragraph(vec![run("a"), run(" "), run("b")]);
    assert_eq!(assemble_paragraph_text(&p), "a b");
}

#[test]
fn join_rule_requires_content_on_both_sides() {
    assert!(!needs_join_space("", "word"));
    assert!(!needs_join_space("word", "   "));
    assert!(needs_join_space("word", "next"));
    assert!(!needs_join_space("word", ")"));
    assert!(!needs_join_space("[", "word"));
    assert!(!needs_join_space("\"", "word"));
}

#[test]
fn collapses_duplicated_sequences() {
    assert_eq!(
        collapse_repeated_words("the Receiving Party the receiving party shall"),
        "the Receiving Party shall"
    );
    assert_eq!(
        collapse_repeated_words("pay the fee pay the fee pay the fee now"),
        "pay the fee now"
    );
}

#[test]
fn single_repeated_words_are_kept() {
    assert_eq!(collapse_repeated_words("that that is"), "that that is");
}

#[test]
fn punctuation_breaks_sequences() {
    assert_eq!(
        collapse_repeated_words("the Company, the Company, and"),
        "the Company, the Company, and"
    );
}

#[test]
fn collapses_sequence_behind_opening_bracket() {
    assert_eq!(collapse_repeated_words("(the fee the fee is due"), "(the fee is due");
}

#[test]
fn duplication_from_tracked_runs_is_removed() {
    let p = paragraph(vec![
        run("shall indemnify"),
        run(" the Buyer"),
        run(" shall indemnify the Buyer"),
        run(" against losses."),
    ]);
    assert_eq!(
        assemble_paragraph_text(&p),
        "shall indemnify the Buyer against losses."
    );
}
