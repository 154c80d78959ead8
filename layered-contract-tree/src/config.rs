//! Extractor configuration.

/// Tunable limits for [`ContractExtractor`](crate::ContractExtractor).
///
/// `Default` yields the documented extraction behaviour; the builder methods
/// exist for experiments and fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Text before the first clause opens an implicit clause numbered `"0"`
    pub retain_preamble: bool,
    /// Paragraphs scanned by the intro-based party strategies
    pub intro_paragraphs: usize,
    /// Party names must be shorter than this many characters
    pub max_party_len: usize,
    /// Accepted term length, inclusive
    pub min_term_len: usize,
    pub max_term_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            retain_preamble: true,
            intro_paragraphs: 12,
            max_party_len: 200,
            min_term_len: 2,
            max_term_len: 100,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop text that precedes the first clause instead of keeping it as clause `"0"`.
    pub fn with_retain_preamble(mut self, retain: bool) -> Self {
        self.retain_preamble = retain;
        self
    }

    pub fn with_intro_paragraphs(mut self, count: usize) -> Self {
        self.intro_paragraphs = count;
        self
    }

    pub fn with_max_party_len(mut self, len: usize) -> Self {
        self.max_party_len = len;
        self
    }

    pub fn with_term_len(mut self, min: usize, max: usize) -> Self {
        self.min_term_len = min;
        self.max_term_len = max;
        self
    }
}
