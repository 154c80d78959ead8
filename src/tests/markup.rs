use crate::{BodySource, MarkupDocument, MarkupError};

fn document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    )
}

#[test]
fn reads_paragraph_properties() {
    let xml = document(
        r#"<w:p>
             <w:pPr>
               <w:pStyle w:val="Heading1"/>
               <w:numPr><w:ilvl w:val="1"/><w:numId w:val="4"/></w:numPr>
             </w:pPr>
             <w:r><w:t>Definitions</w:t></w:r>
           </w:p>"#,
    );
    let doc = MarkupDocument::parse(&xml).unwrap();

    assert_eq!(doc.source, BodySource::Direct);
    assert_eq!(doc.paragraphs.len(), 1);
    let p = &doc.paragraphs[0];
    assert_eq!(p.style.as_deref(), Some("Heading1"));
    assert_eq!(p.numbering_level.as_deref(), Some("1"));
    assert_eq!(p.runs.len(), 1);
    assert_eq!(p.runs[0].text, "Definitions");
}

#[test]
fn reads_run_flags() {
    let xml = document(
        r#"<w:p>
             <w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r>
             <w:r><w:rPr><w:b w:val="0"/></w:rPr><w:t>not bold</w:t></w:r>
             <w:r><w:rPr><w:strike/></w:rPr><w:t>struck</w:t></w:r>
             <w:r><w:rPr><w:vanish/></w:rPr><w:t>hidden</w:t></w:r>
             <w:r><w:rPr><w:rStyle w:val="DeletedText"/></w:rPr><w:t>styled</w:t></w:r>
             <w:del><w:r><w:delText>removed</w:delText></w:r></w:del>
             <w:moveFrom><w:r><w:t>moved</w:t></w:r></w:moveFrom>
           </w:p>"#,
    );
    let doc = MarkupDocument::parse(&xml).unwrap();
    let runs = &doc.paragraphs[0].runs;

    assert_eq!(runs.len(), 7);
    assert!(runs[0].bold && !runs[0].is_excluded());
    assert!(!runs[1].bold);
    assert!(runs[2].strike && runs[2].is_excluded());
    assert!(runs[3].vanish && runs[3].is_excluded());
    assert_eq!(runs[4].style.as_deref(), Some("DeletedText"));
    assert!(runs[4].is_excluded());
    assert!(runs[5].deleted);
    assert_eq!(runs[5].text, "");
    assert!(runs[6].deleted);
    assert_eq!(doc.paragraphs[0].kept_runs().count(), 2);
}

#[test]
fn breaks_and_tabs_become_spaces() {
    let xml = document(r#"<w:p><w:r><w:t>one</w:t><w:tab/><w:t>two</w:t><w:br/><w:t>three</w:t></w:r></w:p>"#);
    let doc = MarkupDocument::parse(&xml).unwrap();
    let run = &doc.paragraphs[0].runs[0];

    assert_eq!(run.text, "one two three");
    assert_eq!(run.plain_text, "onetwothree");
}

#[test]
fn collects_hyperlink_anchors_in_order() {
    let xml = document(
        r#"<w:p>
             <w:hyperlink w:anchor="_Ref1"><w:r><w:t>Section 2</w:t></w:r></w:hyperlink>
             <w:hyperlink r:id="rId5" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:r><w:t>site</w:t></w:r></w:hyperlink>
             <w:hyperlink w:anchor="_Ref1"><w:r><w:t>again</w:t></w:r></w:hyperlink>
           </w:p>"#,
    );
    let doc = MarkupDocument::parse(&xml).unwrap();

    assert_eq!(doc.paragraphs[0].anchors, vec!["_Ref1", "_Ref1"]);
}

#[test]
fn empty_hyperlink_anchor_is_skipped() {
    let xml = document(
        r#"<w:p>
             <w:hyperlink w:anchor=""><w:r><w:t>nowhere</w:t></w:r></w:hyperlink>
             <w:hyperlink w:anchor="_Ref7"><w:r><w:t>Section 7</w:t></w:r></w:hyperlink>
           </w:p>"#,
    );
    let doc = MarkupDocument::parse(&xml).unwrap();

    assert_eq!(doc.paragraphs[0].anchors, vec!["_Ref7"]);
}

#[test]
fn finds_body_inside_inline_package_part() {
    let xml = r#"<?xml version="1.0" standalone="yes"?>
<pkg:package xmlns:pkg="http://schemas.microsoft.com/office/2006/xmlPackage">
  <pkg:part pkg:name="/word/document.xml">
    <pkg:xmlData>
      <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
        <w:body><w:p><w:r><w:t>Hello World</w:t></w:r></w:p></w:body>
      </w:document>
    </pkg:xmlData>
  </pkg:part>
</pkg:package>"#;
    let doc = MarkupDocument::parse(xml).unwrap();

    assert_eq!(doc.source, BodySource::Direct);
    assert_eq!(doc.paragraphs[0].runs[0].text, "Hello World");
}

#[test]
fn parses_escaped_package_part() {
    let xml = r#"<pkg:package xmlns:pkg="http://schemas.microsoft.com/office/2006/xmlPackage">
  <pkg:part pkg:name="/word/styles.xml"><pkg:xmlData>&lt;styles/&gt;</pkg:xmlData></pkg:part>
  <pkg:part pkg:name="/word/document.xml"><pkg:xmlData><![CDATA[<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Escaped</w:t></w:r></w:p></w:body></w:document>]]></pkg:xmlData></pkg:part>
</pkg:package>"#;
    let doc = MarkupDocument::parse(xml).unwrap();

    assert_eq!(doc.source, BodySource::PackagePart);
    assert_eq!(doc.paragraphs[0].runs[0].text, "Escaped");
}

#[test]
fn missing_body_is_an_error() {
    let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;
    assert!(matches!(
        MarkupDocument::parse(xml),
        Err(MarkupError::MissingBody)
    ));
}

#[test]
fn malformed_xml_is_an_error() {
    assert!(matches!(
        MarkupDocument::parse("<w:document"),
        Err(MarkupError::Xml(_))
    ));
}
