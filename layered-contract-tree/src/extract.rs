use std::collections::BTreeMap;

use layered_ooxml::{assemble_paragraph_text, BodySource, MarkupDocument};

use crate::config::ExtractorConfig;
use crate::parties::{PartyContext, PartyExtractor};
use crate::references::collect_references;
use crate::segmenter::{ClauseSegmenter, ParagraphView};
use crate::terms::DefinedTermExtractor;
use crate::trace::{ExtractionTrace, NoopTrace, TraceEvent};
use crate::tree::{ContractTree, Section, ANALYSIS_TITLE};

/// Turns OOXML markup into a [`ContractTree`].
///
/// Holds only configuration; every call builds its own containers, so one
/// extractor can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct ContractExtractor {
    config: ExtractorConfig,
}

impl ContractExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract without diagnostics.
    pub fn extract(&self, xml: &str) -> ContractTree {
        self.extract_with_trace(xml, &mut NoopTrace)
    }

    /// Extract, reporting each decision to `trace`.
    ///
    /// Never fails: markup that cannot be parsed, or that has no locatable
    /// body, yields [`ContractTree::degenerate`].
    pub fn extract_with_trace(&self, xml: &str, trace: &mut dyn ExtractionTrace) -> ContractTree {
        let document = match MarkupDocument::parse(xml) {
            Ok(document) => document,
            Err(err) => {
                trace.record(TraceEvent::BodyMissing {
                    reason: err.to_string(),
                });
                return ContractTree::degenerate();
            }
        };

        trace.record(TraceEvent::BodyLocated {
            paragraphs: document.paragraphs.len(),
            packaged: document.source == BodySource::PackagePart,
        });

        let mut segmenter = ClauseSegmenter::new().retain_preamble(self.config.retain_preamble);
        let term_extractor =
            DefinedTermExtractor::with_len_bounds(self.config.min_term_len, self.config.max_term_len);

        let mut defined_terms = BTreeMap::new();
        let mut references = Vec::new();
        let mut texts = Vec::with_capacity(document.paragraphs.len());

        for (index, paragraph) in document.paragraphs.iter().enumerate() {
            let text = assemble_paragraph_text(paragraph);

            if !text.is_empty() {
                segmenter.push(
                    &ParagraphView {
                        index,
                        text: &text,
                        style: paragraph.style.as_deref(),
                        numbering_level: paragraph.numbering_level.as_deref(),
                    },
                    trace,
                );
                term_extractor.extract(
                    index,
                    paragraph,
                    &text,
                    segmenter.current(),
                    &mut defined_terms,
                    trace,
                );
                collect_references(paragraph, &mut references, trace);
            }

            texts.push(text);
        }

        let clauses = segmenter.finish(trace);

        let context = PartyContext::new(
            texts.as_slice(),
            self.config.intro_paragraphs,
            self.config.max_party_len,
        );
        let parties = PartyExtractor::new().extract(&context, trace);

        ContractTree {
            title: ANALYSIS_TITLE.to_string(),
            sections: vec![Section::main_document(clauses)],
            defined_terms,
            references,
            parties,
            bookmarks: Default::default(),
        }
    }
}

/// Extract with the default configuration and no diagnostics.
pub fn extract_contract(xml: &str) -> ContractTree {
    ContractExtractor::default().extract(xml)
}
