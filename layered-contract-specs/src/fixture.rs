//! Fixture file format.
//!
//! A fixture is a TOML document holding a piece of WordprocessingML markup and
//! the facts expected of the tree extracted from it:
//!
//! ```toml
//! title = "Numbered clause"
//! markup = '''
//! <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
//!   <w:body><w:p><w:r><w:t>2.1 Indemnification</w:t></w:r></w:p></w:body>
//! </w:document>
//! '''
//!
//! [expect]
//! clause_numbers = ["2.1"]
//!
//! [[expect.clauses]]
//! index = 0
//! text = "Indemnification"
//! ```

use std::collections::BTreeMap;

use layered_contract_tree::ExtractorConfig;
use serde::Deserialize;

use crate::errors::{SpecError, SpecResult};

/// A parsed fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// The document markup fed to the extractor
    pub markup: String,
    #[serde(default)]
    pub config: FixtureConfig,
    #[serde(default)]
    pub expect: Expectations,
}

/// Per-fixture overrides of the pipeline's extractor configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    pub retain_preamble: Option<bool>,
    pub intro_paragraphs: Option<usize>,
    pub max_party_len: Option<usize>,
}

impl FixtureConfig {
    pub fn apply(&self, mut config: ExtractorConfig) -> ExtractorConfig {
        if let Some(retain) = self.retain_preamble {
            config = config.with_retain_preamble(retain);
        }
        if let Some(count) = self.intro_paragraphs {
            config = config.with_intro_paragraphs(count);
        }
        if let Some(len) = self.max_party_len {
            config = config.with_max_party_len(len);
        }
        config
    }
}

/// What the extracted tree must look like. Absent fields are not checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectations {
    pub degenerate: Option<bool>,
    pub title: Option<String>,
    /// Every clause number, in order
    pub clause_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub clauses: Vec<ClauseExpectation>,
    /// Term to the clause number it must be defined at
    #[serde(default)]
    pub terms: BTreeMap<String, String>,
    /// When set, `terms` must list every defined term
    #[serde(default)]
    pub exact_terms: bool,
    #[serde(default)]
    pub absent_terms: Vec<String>,
    /// Text that must not appear in any clause
    #[serde(default)]
    pub absent_text: Vec<String>,
    pub parties: Option<Vec<String>>,
    pub references: Option<Vec<String>>,
}

/// Checks against the clause at `index` in document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClauseExpectation {
    pub index: usize,
    pub number: Option<String>,
    pub text: Option<String>,
    pub start: Option<usize>,
    pub contains: Option<String>,
}

/// Parse fixture content.
pub fn parse_fixture(content: &str) -> SpecResult<ContractFixture> {
    toml::from_str(content).map_err(|err| SpecError::from_toml(content, err))
}
