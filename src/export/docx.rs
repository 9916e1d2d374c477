//! Minimal WordprocessingML package writer.

use super::document::{Block, ExportDocument};
use crate::error::ExportError;
use std::fmt::Write as _;
use std::io::{Cursor, Seek, Write};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_CLOSE: &str = "<w:sectPr/></w:body></w:document>";

// Run sizes in half-points.
const TITLE_SIZE: u32 = 32;
const HEADING_SIZE: u32 = 28;
const SUBHEADING_SIZE: u32 = 26;
const BODY_SIZE: u32 = 24;

/// Write `doc` as a `.docx` package into `writer`.
pub fn write_docx<W: Write + Seek>(doc: &ExportDocument, writer: W) -> Result<W, ExportError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = zip::ZipWriter::new(writer);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS.as_bytes())?;
    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(doc).as_bytes())?;

    Ok(zip.finish()?)
}

pub fn to_docx_bytes(doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
    Ok(write_docx(doc, Cursor::new(Vec::new()))?.into_inner())
}

/// Body of `word/document.xml`.
pub fn document_xml(doc: &ExportDocument) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    for block in &doc.blocks {
        match block {
            Block::Title(text) => {
                paragraph(&mut xml, Some("center"), &run(text, true, TITLE_SIZE));
            }
            Block::Heading(text) => paragraph(&mut xml, None, &run(text, true, HEADING_SIZE)),
            Block::Subheading(text) => {
                paragraph(&mut xml, None, &run(text, true, SUBHEADING_SIZE));
            }
            Block::Fields(fields) => {
                let mut runs = String::new();
                for (i, (label, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        runs.push_str("<w:r><w:tab/></w:r>");
                    }
                    runs.push_str(&run(&format!("{label}: "), true, BODY_SIZE));
                    runs.push_str(&run(value, false, BODY_SIZE));
                }
                paragraph(&mut xml, None, &runs);
            }
            Block::Label(text) => paragraph(&mut xml, None, &run(text, true, BODY_SIZE)),
            Block::Text(text) => {
                for line in text.split('\n') {
                    paragraph(&mut xml, None, &run(line.trim_end_matches('\r'), false, BODY_SIZE));
                }
            }
            Block::Bullet(text) => {
                paragraph(&mut xml, None, &run(&format!("• {text}"), false, BODY_SIZE));
            }
            Block::Table { header, rows } => table(&mut xml, header, rows),
        }
    }
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

fn paragraph(xml: &mut String, align: Option<&str>, runs: &str) {
    xml.push_str("<w:p>");
    if let Some(align) = align {
        let _ = write!(xml, r#"<w:pPr><w:jc w:val="{align}"/></w:pPr>"#);
    }
    xml.push_str(runs);
    xml.push_str("</w:p>");
}

fn run(text: &str, bold: bool, size: u32) -> String {
    let bold = if bold { "<w:b/>" } else { "" };
    format!(
        r#"<w:r><w:rPr>{bold}<w:sz w:val="{size}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(text)
    )
}

fn table(xml: &mut String, header: &[String; 2], rows: &[[String; 2]]) {
    xml.push_str(
        r#"<w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/><w:tblBorders><w:top w:val="single" w:sz="4"/><w:left w:val="single" w:sz="4"/><w:bottom w:val="single" w:sz="4"/><w:right w:val="single" w:sz="4"/><w:insideH w:val="single" w:sz="4"/><w:insideV w:val="single" w:sz="4"/></w:tblBorders></w:tblPr><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid>"#,
    );
    table_row(xml, header, true);
    for row in rows {
        table_row(xml, row, false);
    }
    xml.push_str("</w:tbl>");
}

fn table_row(xml: &mut String, cells: &[String; 2], bold: bool) {
    xml.push_str("<w:tr>");
    for (i, cell) in cells.iter().enumerate() {
        xml.push_str("<w:tc>");
        let align = (i == 1 && !bold).then_some("center");
        paragraph(xml, align, &run(cell, bold, BODY_SIZE));
        xml.push_str("</w:tc>");
    }
    xml.push_str("</w:tr>");
}

/// Escape markup characters and drop control characters XML 1.0 forbids.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
