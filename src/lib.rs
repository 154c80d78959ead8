#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Track-changes aware WordprocessingML reader.
//!
//! This crate is the bottom layer of the contract analysis workspace. It turns
//! a raw OOXML string (a `w:document`, or a flattened `pkg:package`) into an
//! owned [`MarkupDocument`] and reconstructs clean paragraph text from runs.
//!
//! ## Layers
//!
//! - [`MarkupDocument`] - Locates the body and flattens paragraphs and runs
//! - [`nearest_enclosing`] - Upward scan for change-tracking markers
//! - [`assemble_paragraph_text`] - Joins kept runs into normalized text
//! - [`collapse_repeated_words`] - Removes duplicated word sequences
//!
//! ## Example
//!
//! ```
//! use layered_ooxml::{assemble_paragraph_text, MarkupDocument};
//!
//! let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
//!   <w:body><w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t>World</w:t></w:r></w:p></w:body>
//! </w:document>"#;
//!
//! let doc = MarkupDocument::parse(xml).unwrap();
//! assert_eq!(assemble_paragraph_text(&doc.paragraphs[0]), "Hello World");
//! ```

mod assemble;
mod markup;
mod scan;

pub use assemble::{assemble_paragraph_text, collapse_repeated_words, needs_join_space};
pub use markup::{
    BodySource, MarkupDocument, MarkupError, MarkupResult, Paragraph, Run, MAIN_DOCUMENT_PART,
    PKG_NS, W_NS,
};
pub use scan::{enclosing_change, is_w, nearest_enclosing, TrackChange};
