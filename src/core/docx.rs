use crate::domain::model::{GuestRecord, LetterSpec, LetterStyle};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Builds one letter as a minimal WordprocessingML package: a bold salutation,
/// the configured header fields one paragraph each, a blank paragraph, then the
/// filled body one paragraph per line.
pub fn build_letter(record: &GuestRecord, spec: &LetterSpec, body: &str) -> Result<Vec<u8>> {
    let mut paragraphs = Vec::new();
    paragraphs.push(paragraph_xml(&spec.salutation, &spec.style, true));

    for field in &spec.header_fields {
        paragraphs.push(paragraph_xml(record.field(field), &spec.style, false));
    }

    paragraphs.push(paragraph_xml("", &spec.style, false));

    for line in body.lines() {
        paragraphs.push(paragraph_xml(line, &spec.style, false));
    }

    let document = document_xml(&paragraphs, &spec.style);
    package(&document)
}

fn package(document_xml: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file::<_, ()>("_rels/.rels", FileOptions::default())?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file::<_, ()>("word/document.xml", FileOptions::default())?;
    zip.write_all(document_xml.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn document_xml(paragraphs: &[String], style: &LetterStyle) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}{}</w:body></w:document>"#,
        paragraphs.concat(),
        section_xml(style),
    )
}

// US Letter page, margins from the style (inches, stored as twips).
fn section_xml(style: &LetterStyle) -> String {
    let m = &style.margins;
    format!(
        r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="0" w:footer="0" w:gutter="0"/></w:sectPr>"#,
        twips(m.top),
        twips(m.right),
        twips(m.bottom),
        twips(m.left),
    )
}

fn paragraph_xml(text: &str, style: &LetterStyle, bold: bool) -> String {
    if text.is_empty() {
        return "<w:p/>".to_string();
    }

    // Font size is stored in half-points.
    let sz = style.font_size_pt * 2;
    let bold_tag = if bold { "<w:b/>" } else { "" };
    format!(
        r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}"/>{bold}<w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#,
        font = xml_escape(&style.font_name),
        bold = bold_tag,
        sz = sz,
        text = xml_escape(text),
    )
}

fn twips(inches: f32) -> u32 {
    (inches * 1440.0).round() as u32
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
