use layered_ooxml::Paragraph;

use crate::trace::{ExtractionTrace, TraceEvent};

/// Append every internal hyperlink anchor of `paragraph` to `references`.
///
/// Document order and duplicates are kept; anchors are not checked against
/// bookmarks or clause numbers here.
pub fn collect_references(
    paragraph: &Paragraph,
    references: &mut Vec<String>,
    trace: &mut dyn ExtractionTrace,
) {
    for anchor in &paragraph.anchors {
        trace.record(TraceEvent::ReferenceFound {
            anchor: anchor.clone(),
        });
        references.push(anchor.clone());
    }
}
