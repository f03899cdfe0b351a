//! Synthetic letter templates for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use surat_core::LayoutVariant;
use surat_docx::TemplateDocument;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="NormalFont"><w:name w:val="Normal Font"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Listmenimbangs"><w:name w:val="List menimbangs"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Listnumberg"><w:name w:val="List numberg"/><w:basedOn w:val="Normal"/></w:style>
</w:styles>"#;

fn paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

fn cell(width: u32, text: &str) -> String {
    format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/></w:tcPr>{}</w:tc>"#,
        paragraph(text)
    )
}

fn row(widths: &[u32], texts: &[&str]) -> String {
    let cells: String = widths
        .iter()
        .zip(texts)
        .map(|(w, t)| cell(*w, t))
        .collect();
    format!("<w:tr>{cells}</w:tr>")
}

fn table(widths: &[u32], rows: &[Vec<&str>]) -> String {
    let grid: String = widths
        .iter()
        .map(|w| format!(r#"<w:gridCol w:w="{w}"/>"#))
        .collect();
    let rows: String = rows.iter().map(|texts| row(widths, texts)).collect();
    format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tblGrid>{grid}</w:tblGrid>{rows}</w:tbl>"#
    )
}

/// Roster column widths and header texts for a layout
fn roster_columns(layout: LayoutVariant) -> (Vec<u32>, Vec<&'static str>) {
    match layout {
        LayoutVariant::SeparateColumns => (
            vec![600, 2600, 2200, 2000, 2000],
            vec!["No", "Nama", "NIP", "Jabatan", "Satker"],
        ),
        LayoutVariant::NameIdCombined => (
            vec![600, 3600, 2600, 2600],
            vec!["No", "Nama / NIP", "Jabatan", "Satker"],
        ),
    }
}

/// `word/document.xml` of a letter template.
///
/// Layout: title paragraphs, a clause table with the `{{menimbang}}` and
/// `{{dasar_hukum}}` slots, the roster table (two header rows and one
/// sample row), then the closing paragraphs starting at "Untuk".
pub fn document_xml(layout: LayoutVariant) -> String {
    let clauses = table(
        &[2000, 7000],
        &[
            vec!["Menimbang", "{{menimbang}}"],
            vec!["Dasar", "{{dasar_hukum}}"],
        ],
    );
    let (widths, headers) = roster_columns(layout);
    let numbering: Vec<String> = (1..=headers.len()).map(|i| format!("({i})")).collect();
    let sample = vec!["contoh"; headers.len()];
    let roster = table(
        &widths,
        &[
            headers,
            numbering.iter().map(String::as_str).collect(),
            sample,
        ],
    );

    // Split token across runs, as Word tends to save it
    let title = r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Nomor: {{nomor_</w:t></w:r><w:r><w:t>surat_tugas}}</w:t></w:r></w:p>"#;

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}{title}{clauses}{}{roster}{}{}{}{}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body></w:document>"#,
        paragraph("SURAT TUGAS"),
        paragraph("Memberi tugas kepada:"),
        paragraph("Untuk: mengikuti {{NAMA_KEGIATAN}} TA {{TAHUN_ANGGARAN_KEGIATAN}}"),
        paragraph("pada {{HARI_PELAKSANAAN}}, {{TANGGAL_PELAKSANAAN}} di {{TEMPAT_PELAKSANAAN}}"),
        paragraph("{{KOTA}}, {{TANGGAL}}"),
        paragraph("Kepala Biro"),
    )
}

/// Zip the given entries into a `.docx`
pub fn package(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A complete template for `layout`
pub fn template(layout: LayoutVariant) -> Vec<u8> {
    let document = document_xml(layout);
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", RELS),
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", STYLES),
    ])
}

/// A template whose body holds only one table
pub fn template_without_roster() -> Vec<u8> {
    let document = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        table(&[2000, 7000], &[vec!["Menimbang", "{{menimbang}}"]])
    );
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", STYLES),
    ])
}

/// Raw text of one package entry
pub fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Re-open a generated artifact
pub fn reopen(docx: &[u8]) -> TemplateDocument {
    TemplateDocument::from_bytes(docx).unwrap()
}
