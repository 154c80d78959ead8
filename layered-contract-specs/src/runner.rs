//! Fixture execution and assertion checking.

use std::path::Path;

use layered_contract_tree::{
    ContractExtractor, ContractTree, LogTrace, RecordingTrace, TraceEvent,
};

use crate::config::PipelineConfig;
use crate::errors::SpecResult;
use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::{ClauseExpectation, ContractFixture, Expectations};
use crate::formatter::{format_failure, format_summary};
use crate::loader::load_all_fixtures;

/// Output of running one fixture through the extractor.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub tree: ContractTree,
    /// Recorded decisions; empty when the pipeline logs instead of recording
    pub events: Vec<TraceEvent>,
}

/// Whether one assertion held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionOutcome {
    Passed,
    Failed { expected: String, actual: String },
}

/// The outcome of one assertion, named by its reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// `title`, `clauses[2]`, `terms.Agreement`, ...
    pub reference: String,
    pub outcome: AssertionOutcome,
}

impl AssertionResult {
    fn check<T: std::fmt::Debug + PartialEq>(reference: String, expected: T, actual: T) -> Self {
        let outcome = if expected == actual {
            AssertionOutcome::Passed
        } else {
            AssertionOutcome::Failed {
                expected: format!("{:?}", expected),
                actual: format!("{:?}", actual),
            }
        };
        Self { reference, outcome }
    }

    pub fn passed(&self) -> bool {
        self.outcome == AssertionOutcome::Passed
    }
}

/// Run a fixture's markup through the extractor.
pub fn run_fixture(fixture: &ContractFixture, config: &PipelineConfig) -> PipelineResult {
    let extractor = ContractExtractor::new(fixture.config.apply(config.extractor.clone()));

    if config.record_trace {
        let mut trace = RecordingTrace::new();
        let tree = extractor.extract_with_trace(&fixture.markup, &mut trace);
        PipelineResult {
            tree,
            events: trace.events,
        }
    } else {
        PipelineResult {
            tree: extractor.extract_with_trace(&fixture.markup, &mut LogTrace),
            events: Vec::new(),
        }
    }
}

/// Check every expectation of a fixture against an extracted tree.
pub fn check_fixture_assertions(fixture: &ContractFixture, result: &PipelineResult) -> Vec<AssertionResult> {
    let expect = &fixture.expect;
    let tree = &result.tree;
    let mut results = Vec::new();

    if let Some(degenerate) = expect.degenerate {
        results.push(AssertionResult::check(
            "degenerate".to_string(),
            degenerate,
            tree.is_degenerate(),
        ));
    }

    if let Some(title) = &expect.title {
        results.push(AssertionResult::check(
            "title".to_string(),
            title.as_str(),
            tree.title.as_str(),
        ));
    }

    if let Some(numbers) = &expect.clause_numbers {
        let actual: Vec<&str> = tree.clauses().map(|c| c.number.as_str()).collect();
        let expected: Vec<&str> = numbers.iter().map(String::as_str).collect();
        results.push(AssertionResult::check("clause_numbers".to_string(), expected, actual));
    }

    for clause in &expect.clauses {
        results.push(check_clause(clause, tree));
    }

    check_terms(expect, tree, &mut results);

    for (i, needle) in expect.absent_text.iter().enumerate() {
        let found: Vec<&str> = tree
            .clauses()
            .filter(|c| c.text.contains(needle.as_str()))
            .map(|c| c.number.as_str())
            .collect();
        results.push(AssertionResult::check(
            ExpectedFailures::format_index_ref("absent_text", i),
            Vec::<&str>::new(),
            found,
        ));
    }

    if let Some(parties) = &expect.parties {
        results.push(AssertionResult::check(
            "parties".to_string(),
            parties,
            &tree.parties,
        ));
    }

    if let Some(references) = &expect.references {
        results.push(AssertionResult::check(
            "references".to_string(),
            references,
            &tree.references,
        ));
    }

    results
}

fn check_clause(expected: &ClauseExpectation, tree: &ContractTree) -> AssertionResult {
    let reference = ExpectedFailures::format_index_ref("clauses", expected.index);
    let clause = match tree.clauses().nth(expected.index) {
        Some(clause) => clause,
        None => {
            return AssertionResult {
                reference,
                outcome: AssertionOutcome::Failed {
                    expected: format!("a clause at index {}", expected.index),
                    actual: format!("{} clauses", tree.clauses().count()),
                },
            }
        }
    };

    let mut mismatches = Vec::new();
    if let Some(number) = &expected.number {
        if *number != clause.number {
            mismatches.push(format!("number={:?}", number));
        }
    }
    if let Some(text) = &expected.text {
        if *text != clause.text {
            mismatches.push(format!("text={:?}", text));
        }
    }
    if let Some(start) = expected.start {
        if start != clause.start {
            mismatches.push(format!("start={}", start));
        }
    }
    if let Some(needle) = &expected.contains {
        if !clause.text.contains(needle.as_str()) {
            mismatches.push(format!("text containing {:?}", needle));
        }
    }

    let outcome = if mismatches.is_empty() {
        AssertionOutcome::Passed
    } else {
        AssertionOutcome::Failed {
            expected: mismatches.join(", "),
            actual: format!(
                "number={:?}, text={:?}, start={}",
                clause.number, clause.text, clause.start
            ),
        }
    };
    AssertionResult { reference, outcome }
}

fn check_terms(expect: &Expectations, tree: &ContractTree, results: &mut Vec<AssertionResult>) {
    for (term, defined_at) in &expect.terms {
        results.push(AssertionResult::check(
            ExpectedFailures::format_ref("terms", term),
            Some(defined_at.as_str()),
            tree.defined_terms.get(term).map(|t| t.defined_at.as_str()),
        ));
    }

    if expect.exact_terms {
        let expected: Vec<&str> = expect.terms.keys().map(String::as_str).collect();
        let actual: Vec<&str> = tree.defined_terms.keys().map(String::as_str).collect();
        results.push(AssertionResult::check("terms".to_string(), expected, actual));
    }

    for term in &expect.absent_terms {
        results.push(AssertionResult::check(
            ExpectedFailures::format_ref("absent_terms", term),
            None,
            tree.defined_terms.get(term).map(|t| t.defined_at.as_str()),
        ));
    }
}

/// Everything a harness run produced.
#[derive(Debug, Clone, Default)]
pub struct HarnessRun {
    pub result: HarnessResult,
    /// Failure details and per-fixture summaries, ready to print
    pub report: String,
}

/// Run every fixture under `dir`, classifying failures against `failures`.
pub fn run_harness(
    dir: &Path,
    failures: &ExpectedFailures,
    config: &PipelineConfig,
) -> SpecResult<HarnessRun> {
    let mut run = HarnessRun::default();

    for (name, fixture) in load_all_fixtures(dir)? {
        let result = run_fixture(&fixture, config);
        let mut fixture_result = HarnessResult::new();

        for assertion in check_fixture_assertions(&fixture, &result) {
            if assertion.passed() {
                fixture_result.record_pass();
                continue;
            }
            let state = failures.is_expected(&name, &assertion.reference);
            fixture_result.record_failure(state);
            if state == FailureState::Regression {
                run.report.push_str(&format_failure(&name, &assertion, state));
            }
        }

        run.report.push_str(&format_summary(
            &name,
            fixture_result.passed,
            fixture_result.total - fixture_result.passed,
            fixture_result.expected_failures,
            fixture_result.regressions,
        ));
        run.result.merge(&fixture_result);
    }

    Ok(run)
}
