//! Injectable diagnostics for extraction.
//!
//! The extractor reports what it decided (clause boundaries, accepted and
//! rejected term candidates, which party strategy won) to an
//! [`ExtractionTrace`]. Sinks only observe; nothing they do feeds back into
//! the result.

use std::fmt;

use crate::terms::{TermPass, TermRejection};

/// One observable extraction decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// No body could be located, the degenerate tree is returned
    BodyMissing { reason: String },
    /// The body was located and flattened
    BodyLocated { paragraphs: usize, packaged: bool },
    /// A paragraph opened a new clause
    ClauseOpened { number: String, start: usize },
    /// A clause was closed and appended to the output
    ClauseClosed { number: String },
    /// Text arrived before any clause and opened the implicit preamble clause
    PreambleOpened { start: usize },
    /// Text arrived before any clause and was dropped
    PreambleDropped { paragraph: usize },
    /// Term extraction skipped a paragraph because of its style
    TermsSkipped { paragraph: usize, style: String },
    /// A term candidate was accepted
    TermAccepted { term: String, pass: TermPass },
    /// A term candidate was rejected
    TermRejected {
        candidate: String,
        pass: TermPass,
        reason: TermRejection,
    },
    /// An accepted term replaced an earlier definition of the same key
    TermRedefined {
        term: String,
        previous_defined_at: String,
        defined_at: String,
    },
    /// An internal hyperlink anchor was collected
    ReferenceFound { anchor: String },
    /// A party strategy ran
    PartyStrategy {
        strategy: &'static str,
        candidates: Vec<String>,
    },
    /// No party strategy found two parties
    PartiesNotFound,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::BodyMissing { reason } => write!(f, "body missing: {}", reason),
            TraceEvent::BodyLocated {
                paragraphs,
                packaged,
            } => write!(
                f,
                "body located ({} paragraphs{})",
                paragraphs,
                if *packaged { ", package part" } else { "" }
            ),
            TraceEvent::ClauseOpened { number, start } => {
                write!(f, "clause {:?} opened at paragraph {}", number, start)
            }
            TraceEvent::ClauseClosed { number } => write!(f, "clause {:?} closed", number),
            TraceEvent::PreambleOpened { start } => {
                write!(f, "preamble clause opened at paragraph {}", start)
            }
            TraceEvent::PreambleDropped { paragraph } => {
                write!(f, "paragraph {} dropped, no open clause", paragraph)
            }
            TraceEvent::TermsSkipped { paragraph, style } => {
                write!(f, "paragraph {} skipped for terms (style {})", paragraph, style)
            }
            TraceEvent::TermAccepted { term, pass } => {
                write!(f, "term {:?} accepted ({})", term, pass)
            }
            TraceEvent::TermRejected {
                candidate,
                pass,
                reason,
            } => write!(f, "candidate {:?} rejected ({}): {}", candidate, pass, reason),
            TraceEvent::TermRedefined {
                term,
                previous_defined_at,
                defined_at,
            } => write!(
                f,
                "term {:?} redefined at {:?} (was {:?})",
                term, defined_at, previous_defined_at
            ),
            TraceEvent::ReferenceFound { anchor } => write!(f, "reference {:?}", anchor),
            TraceEvent::PartyStrategy {
                strategy,
                candidates,
            } => write!(f, "party strategy {}: {:?}", strategy, candidates),
            TraceEvent::PartiesNotFound => write!(f, "no party strategy matched"),
        }
    }
}

/// A sink for extraction decisions.
pub trait ExtractionTrace {
    fn record(&mut self, event: TraceEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl ExtractionTrace for NoopTrace {
    fn record(&mut self, _event: TraceEvent) {}
}

/// Forwards events to the `log` facade.
///
/// Rejections and per-paragraph noise go to `trace`, structural decisions to
/// `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl ExtractionTrace for LogTrace {
    fn record(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::TermRejected { .. }
            | TraceEvent::TermsSkipped { .. }
            | TraceEvent::ReferenceFound { .. }
            | TraceEvent::PreambleDropped { .. } => log::trace!("{}", event),
            TraceEvent::BodyMissing { .. } => log::warn!("{}", event),
            _ => log::debug!("{}", event),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingTrace {
    pub events: Vec<TraceEvent>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events matching a predicate.
    pub fn filter<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a TraceEvent> + 'a
    where
        F: Fn(&TraceEvent) -> bool + 'a,
    {
        self.events.iter().filter(move |event| predicate(event))
    }
}

impl ExtractionTrace for RecordingTrace {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
