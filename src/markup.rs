//! Markup loading.
//!
//! Parses an OOXML string, locates the `w:body` element (directly, or inside
//! the main document part of a flattened `pkg:package`), and flattens the
//! paragraphs into owned [`Paragraph`] / [`Run`] values. Everything downstream
//! works on these owned values and never touches the XML tree again.

use roxmltree::{Document, Node};

use crate::scan::{enclosing_change, is_w, TrackChange};

/// WordprocessingML main namespace.
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Flat OPC package namespace (`pkg:package`, `pkg:part`).
pub const PKG_NS: &str = "http://schemas.microsoft.com/office/2006/xmlPackage";

/// Canonical part name of the main document inside a package.
pub const MAIN_DOCUMENT_PART: &str = "/word/document.xml";

/// Errors produced while loading markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The input (or an embedded part) is not well-formed XML.
    #[error("malformed markup: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Neither the document nor its main package part contains a body.
    #[error("no w:body element found")]
    MissingBody,
}

/// Result type for markup loading.
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Where the body element was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    /// A `w:body` element anywhere in the input tree
    Direct,
    /// The text content of the `/word/document.xml` package part
    PackagePart,
}

/// A formatting run (`w:r`) with the properties extraction cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    /// Text nodes verbatim; `w:br`, `w:cr`, `w:tab` and control whitespace become a space
    pub text: String,
    /// Only the `w:t` content, used for bold-term candidates
    pub plain_text: String,
    /// Has a `w:del` / `w:moveFrom` ancestor inside its paragraph
    pub deleted: bool,
    /// `w:strike` or `w:dstrike`
    pub strike: bool,
    /// `w:vanish`
    pub vanish: bool,
    /// `w:b` or `w:bCs`
    pub bold: bool,
    /// `w:rStyle` value
    pub style: Option<String>,
}

impl Run {
    /// Returns true if this run must not contribute any text.
    pub fn is_excluded(&self) -> bool {
        self.deleted
            || self.strike
            || self.vanish
            || self
                .style
                .as_deref()
                .map_or(false, |s| s.to_lowercase().contains("deletedtext"))
    }
}

/// A paragraph (`w:p`) flattened from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// `w:pPr/w:pStyle` value
    pub style: Option<String>,
    /// `w:pPr/w:numPr/w:ilvl` value, present for list/outline numbered paragraphs
    pub numbering_level: Option<String>,
    /// All runs of the paragraph in document order, excluded ones included
    pub runs: Vec<Run>,
    /// `w:anchor` of every internal hyperlink, in document order
    pub anchors: Vec<String>,
}

impl Paragraph {
    /// Runs that contribute text.
    pub fn kept_runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(|run| !run.is_excluded())
    }
}

/// The body of a word-processing document as owned paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    pub paragraphs: Vec<Paragraph>,
    pub source: BodySource,
}

impl MarkupDocument {
    /// Parse an OOXML string and flatten its body.
    ///
    /// Looks for `w:body` anywhere in the tree first. When there is none, the
    /// `pkg:part` named [`MAIN_DOCUMENT_PART`] is searched, and if its content
    /// is escaped text rather than inline XML, that text is parsed as its own
    /// document.
    pub fn parse(xml: &str) -> MarkupResult<Self> {
        let doc = Document::parse(xml)?;
        if let Some(body) = find_body(&doc) {
            return Ok(Self::from_body(body, BodySource::Direct));
        }

        let embedded = main_document_part(&doc)
            .map(embedded_text)
            .filter(|text| text.starts_with('<'))
            .ok_or(MarkupError::MissingBody)?;

        let inner = Document::parse(&embedded)?;
        find_body(&inner)
            .map(|body| Self::from_body(body, BodySource::PackagePart))
            .ok_or(MarkupError::MissingBody)
    }

    fn from_body(body: Node, source: BodySource) -> Self {
        let paragraphs = body
            .descendants()
            .filter(|n| is_w(n, "p"))
            .map(read_paragraph)
            .collect();
        Self { paragraphs, source }
    }
}

fn find_body<'a, 'i>(doc: &'a Document<'i>) -> Option<Node<'a, 'i>> {
    doc.descendants().find(|n| is_w(n, "body"))
}

fn main_document_part<'a, 'i>(doc: &'a Document<'i>) -> Option<Node<'a, 'i>> {
    doc.descendants().find(|n| {
        n.is_element()
            && n.tag_name().namespace() == Some(PKG_NS)
            && n.tag_name().name() == "part"
            && n.attribute((PKG_NS, "name")) == Some(MAIN_DOCUMENT_PART)
    })
}

fn embedded_text(part: Node) -> String {
    part.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// First direct child element `w:{name}`.
fn w_child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| is_w(n, name))
}

/// `w:val`, falling back to an unqualified `val` attribute.
fn w_val<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute((W_NS, "val")).or_else(|| node.attribute("val"))
}

/// A toggle property (`<w:b/>`, `<w:strike w:val="0"/>`) is on unless its
/// value explicitly turns it off.
fn toggle_on(node: Node) -> bool {
    !matches!(w_val(node), Some("0") | Some("false") | Some("off"))
}

fn has_toggle(props: Option<Node>, names: &[&str]) -> bool {
    props.map_or(false, |props| {
        props
            .children()
            .any(|n| names.iter().any(|name| is_w(&n, name)) && toggle_on(n))
    })
}

fn read_paragraph(p: Node) -> Paragraph {
    let ppr = w_child(p, "pPr");
    let style = ppr
        .and_then(|ppr| w_child(ppr, "pStyle"))
        .and_then(w_val)
        .map(str::to_string);
    let numbering_level = ppr
        .and_then(|ppr| w_child(ppr, "numPr"))
        .and_then(|num| w_child(num, "ilvl"))
        .and_then(w_val)
        .map(str::to_string);

    let runs = p
        .descendants()
        .filter(|n| is_w(n, "r"))
        .map(read_run)
        .collect();

    let anchors = p
        .descendants()
        .filter(|n| is_w(n, "hyperlink"))
        .filter_map(|n| n.attribute((W_NS, "anchor")))
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    Paragraph {
        style,
        numbering_level,
        runs,
        anchors,
    }
}

fn read_run(r: Node) -> Run {
    let rpr = w_child(r, "rPr");

    let mut text = String::new();
    let mut plain_text = String::new();
    for child in r.children().filter(|n| n.is_element()) {
        if is_w(&child, "t") {
            let content = child.text().unwrap_or("");
            plain_text.push_str(content);
            text.extend(
                content
                    .chars()
                    .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c }),
            );
        } else if is_w(&child, "br") || is_w(&child, "cr") || is_w(&child, "tab") {
            text.push(' ');
        }
    }

    Run {
        text,
        plain_text,
        deleted: enclosing_change(r, TrackChange::removes_content).is_some(),
        strike: has_toggle(rpr, &["strike", "dstrike"]),
        vanish: has_toggle(rpr, &["vanish"]),
        bold: has_toggle(rpr, &["b", "bCs"]),
        style: rpr
            .and_then(|rpr| w_child(rpr, "rStyle"))
            .and_then(w_val)
            .map(str::to_string),
    }
}
