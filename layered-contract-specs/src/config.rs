//! Pipeline configuration for fixture runs.

use layered_contract_tree::ExtractorConfig;

/// How fixtures are run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base extractor configuration; fixtures may override parts of it
    pub extractor: ExtractorConfig,
    /// Keep every extraction decision in [`PipelineResult::events`](crate::PipelineResult::events)
    /// instead of forwarding them to the `log` facade
    pub record_trace: bool,
}

impl PipelineConfig {
    /// Default extractor settings with recorded traces.
    pub fn standard() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            record_trace: true,
        }
    }

    pub fn with_extractor(extractor: ExtractorConfig) -> Self {
        Self {
            extractor,
            ..Self::standard()
        }
    }

    pub fn with_record_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
