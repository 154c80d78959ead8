#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven regression harness for contract extraction.
//!
//! Test cases are TOML files under `fixtures/`, each holding document markup
//! and the clauses, terms, parties and references expected from it.
//! Assertions that are known to fail can be listed in an
//! `expected_failures.toml` so they are reported without failing the run.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture file format
//! - [`loader`] - Fixture discovery
//! - [`runner`] - Runs fixtures and checks their expectations
//! - [`failures`] - Expected failures tracking via TOML
//! - [`formatter`] - Failure and summary formatting
//! - [`errors`] - Error types for the harness

pub mod config;
pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use config::PipelineConfig;
pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{parse_fixture, ClauseExpectation, ContractFixture, Expectations, FixtureConfig};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{
    check_fixture_assertions, run_fixture, run_harness, AssertionOutcome, AssertionResult,
    HarnessRun, PipelineResult,
};
