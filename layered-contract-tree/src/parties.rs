//! Party name detection.
//!
//! An ordered cascade of [`PartyStrategy`]s runs over the document text; the
//! first strategy producing at least two names wins and contributes its first
//! two. A document where no strategy reaches two names has no parties.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::trace::{ExtractionTrace, TraceEvent};

static ROLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^(Disclosing Party|Receiving Party|Client|Customer|Contractor|Consultant|Vendor|Licensor|Licensee|Buyer|Seller|Service Provider|Company|Employer|Employee):\s*(.+)$",
    )
    .unwrap()
});

static BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)between\s+(.+?)\s+(?:and|&)\s+(.+?)(?:[.:;]| who| which| that|$)").unwrap()
});

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r]+").unwrap());

static WITNESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)IN WITNESS WHEREOF").unwrap());

static SIGNATURE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[A-Z][A-Z0-9 .,&()-]{3,}$").unwrap());

static SIGNATURE_BOILERPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)IN WITNESS WHEREOF|SIGNED|SIGNATURE|BY:").unwrap());

static CAPITALIZED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Za-z0-9&(),.'\- ]{3,})\b").unwrap());

static GENERIC_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)This Agreement|Non-Disclosure Agreement|Redlined|Draft|Parties|Agreement|Effective Date",
    )
    .unwrap()
});

/// Text views the strategies work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyContext {
    /// Every paragraph's text joined with `\n`
    pub full_text: String,
    /// The first few paragraphs joined with `\n`
    pub intro_text: String,
    /// Names must be shorter than this many characters
    pub max_len: usize,
}

impl PartyContext {
    pub fn new<S: AsRef<str>>(paragraphs: &[S], intro_paragraphs: usize, max_len: usize) -> Self {
        let join = |items: &[S]| {
            items
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<_>>()
                .join("\n")
        };
        let intro_end = intro_paragraphs.min(paragraphs.len());
        Self {
            full_text: join(paragraphs),
            intro_text: join(&paragraphs[..intro_end]),
            max_len,
        }
    }

    /// Text after the first "IN WITNESS WHEREOF", if any.
    pub fn signature_text(&self) -> Option<&str> {
        WITNESS
            .find(&self.full_text)
            .map(|m| &self.full_text[m.end()..])
    }

    fn fits(&self, name: &str) -> bool {
        name.chars().count() < self.max_len
    }
}

/// One heuristic for finding party names.
pub trait PartyStrategy {
    fn name(&self) -> &'static str;
    /// Every candidate this strategy sees, in the order it prefers them.
    fn candidates(&self, context: &PartyContext) -> Vec<String>;
}

/// `Disclosing Party: Acme Inc.` lines anywhere in the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleLabelStrategy;

impl PartyStrategy for RoleLabelStrategy {
    fn name(&self) -> &'static str {
        "role_label"
    }

    fn candidates(&self, context: &PartyContext) -> Vec<String> {
        ROLE_LINE
            .captures_iter(&context.full_text)
            .map(|caps| caps[2].trim().to_string())
            .filter(|name| context.fits(name))
            .collect()
    }
}

/// `between Acme Inc. and Beta LLC` in the opening paragraphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct BetweenStrategy;

impl PartyStrategy for BetweenStrategy {
    fn name(&self) -> &'static str {
        "between"
    }

    fn candidates(&self, context: &PartyContext) -> Vec<String> {
        let caps = match BETWEEN.captures(&context.intro_text) {
            Some(caps) => caps,
            None => return Vec::new(),
        };

        [&caps[1], &caps[2]]
            .iter()
            .map(|half| LINE_BREAKS.replace_all(half, " ").trim().to_string())
            .filter(|name| context.fits(name))
            .collect()
    }
}

/// All-caps entity lines after "IN WITNESS WHEREOF".
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureBlockStrategy;

impl PartyStrategy for SignatureBlockStrategy {
    fn name(&self) -> &'static str {
        "signature_block"
    }

    fn candidates(&self, context: &PartyContext) -> Vec<String> {
        let text = match context.signature_text() {
            Some(text) => text,
            None => return Vec::new(),
        };

        SIGNATURE_LINE
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .filter(|line| line.chars().count() > 3 && !SIGNATURE_BOILERPLATE.is_match(line))
            .map(str::to_string)
            .collect()
    }
}

/// Longest capitalized spans of the opening paragraphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizedEntityStrategy;

impl PartyStrategy for CapitalizedEntityStrategy {
    fn name(&self) -> &'static str {
        "capitalized_entity"
    }

    fn candidates(&self, context: &PartyContext) -> Vec<String> {
        let mut unique: Vec<String> = Vec::new();
        for caps in CAPITALIZED_SPAN.captures_iter(&context.intro_text) {
            let span = caps[1].trim();
            if span.chars().count() <= 3 || GENERIC_TERMS.is_match(span) {
                continue;
            }
            if !unique.iter().any(|seen| seen == span) {
                unique.push(span.to_string());
            }
        }

        // stable, so equal lengths keep document order
        unique.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        unique
    }
}

/// Role labels, then "between", then signature block, then capitalized spans.
pub fn default_party_strategies() -> Vec<Box<dyn PartyStrategy>> {
    vec![
        Box::new(RoleLabelStrategy),
        Box::new(BetweenStrategy),
        Box::new(SignatureBlockStrategy),
        Box::new(CapitalizedEntityStrategy),
    ]
}

/// Runs the strategy cascade.
pub struct PartyExtractor {
    strategies: Vec<Box<dyn PartyStrategy>>,
}

impl Default for PartyExtractor {
    fn default() -> Self {
        Self::with_strategies(default_party_strategies())
    }
}

impl PartyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(strategies: Vec<Box<dyn PartyStrategy>>) -> Self {
        Self { strategies }
    }

    /// Exactly two names, or none.
    pub fn extract(&self, context: &PartyContext, trace: &mut dyn ExtractionTrace) -> Vec<String> {
        for strategy in &self.strategies {
            let mut candidates = strategy.candidates(context);
            trace.record(TraceEvent::PartyStrategy {
                strategy: strategy.name(),
                candidates: candidates.clone(),
            });
            if candidates.len() >= 2 {
                candidates.truncate(2);
                return candidates;
            }
        }

        trace.record(TraceEvent::PartiesNotFound);
        Vec::new()
    }
}
