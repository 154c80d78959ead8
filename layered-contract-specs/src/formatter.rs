//! Failure and summary formatting.

use std::fmt::Write;

use crate::failures::FailureState;
use crate::runner::{AssertionOutcome, AssertionResult};

/// Format a failed assertion.
pub fn format_failure(fixture_name: &str, result: &AssertionResult, state: FailureState) -> String {
    let mut output = String::new();

    let label = match state {
        FailureState::Regression => "FAIL",
        FailureState::Known => "KNOWN",
        FailureState::Pending => "PENDING",
    };
    writeln!(output, "\n{}: {} {}", label, fixture_name, result.reference).unwrap();

    match &result.outcome {
        AssertionOutcome::Failed { expected, actual } => {
            writeln!(output, "    expected: {}", expected).unwrap();
            writeln!(output, "    found:    {}", actual).unwrap();
        }
        AssertionOutcome::Passed => {
            writeln!(output, "    (passed)").unwrap();
        }
    }

    output
}

/// Format a summary of all results.
pub fn format_summary(
    fixture_name: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let mut output = String::new();

    let status = if regressions > 0 { "FAIL" } else { "PASS" };

    writeln!(output, "{}: {}", status, fixture_name).unwrap();
    writeln!(
        output,
        "  {} passed, {} failed ({} expected, {} regressions)",
        passed, failed, expected_failures, regressions
    )
    .unwrap();

    output
}
