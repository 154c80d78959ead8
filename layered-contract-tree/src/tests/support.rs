//! Small WordprocessingML builders for tests.

pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub fn document(paragraphs: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W,
        paragraphs.concat()
    )
}

/// The same body wrapped as a flattened package part.
pub fn flat_package(paragraphs: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<pkg:package xmlns:pkg="http://schemas.microsoft.com/office/2006/xmlPackage">
  <pkg:part pkg:name="/_rels/.rels" pkg:contentType="application/vnd.openxmlformats-package.relationships+xml">
    <pkg:xmlData><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/></pkg:xmlData>
  </pkg:part>
  <pkg:part pkg:name="/word/document.xml" pkg:contentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml">
    <pkg:xmlData><![CDATA[<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>]]></pkg:xmlData>
  </pkg:part>
</pkg:package>"#,
        W,
        paragraphs.concat()
    )
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn run(text: &str) -> String {
    format!(
        r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(text)
    )
}

pub fn bold(text: &str) -> String {
    format!(
        r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(text)
    )
}

pub fn struck(text: &str) -> String {
    format!(
        r#"<w:r><w:rPr><w:strike/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(text)
    )
}

pub fn deleted(text: &str) -> String {
    format!(
        r#"<w:del w:id="1" w:author="Reviewer"><w:r><w:delText xml:space="preserve">{}</w:delText></w:r></w:del>"#,
        escape(text)
    )
}

pub fn hyperlink(anchor: &str, text: &str) -> String {
    format!(r#"<w:hyperlink w:anchor="{}">{}</w:hyperlink>"#, anchor, run(text))
}

/// A paragraph built from pre-rendered runs.
pub fn p_runs(runs: &[String]) -> String {
    format!("<w:p>{}</w:p>", runs.concat())
}

pub fn p(text: &str) -> String {
    p_runs(&[run(text)])
}

pub fn styled(style: &str, runs: &[String]) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>{}</w:p>"#,
        style,
        runs.concat()
    )
}

pub fn numbered(level: u8, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="1"/></w:numPr></w:pPr>{}</w:p>"#,
        level,
        run(text)
    )
}

pub fn empty_p() -> String {
    "<w:p/>".to_string()
}
