//! `.docx` package loading and saving.
//!
//! A DOCX file is a ZIP archive. The pipeline only edits
//! `word/document.xml`; every other entry is copied through byte for byte,
//! in its original order.

use crate::model::{Body, Table, W_BODY};
use crate::styles::StyleCatalog;
use crate::xml::{parse_document, write_document, XmlElement, XmlNode};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use surat_core::{Result, SuratError};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Position of the roster table among the body's top-level tables
const ROSTER_TABLE_INDEX: usize = 1;

#[inline]
fn package_error(e: impl std::fmt::Display) -> SuratError {
    SuratError::Package(e.to_string())
}

/// Roles of the template's top-level tables, fixed when the template is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableRoles {
    /// Index of the roster table, `None` if the template has fewer than two tables
    pub roster: Option<usize>,
    /// Number of top-level tables seen at load time
    pub table_count: usize,
}

impl TableRoles {
    /// Resolve roles from the body's table layout
    #[must_use]
    pub fn resolve(body: &Body) -> Self {
        let table_count = body.table_count();
        if table_count > ROSTER_TABLE_INDEX + 1 {
            log::warn!(
                "Template has {table_count} tables; using table {} as the roster",
                ROSTER_TABLE_INDEX + 1
            );
        }
        Self {
            roster: (table_count > ROSTER_TABLE_INDEX).then_some(ROSTER_TABLE_INDEX),
            table_count,
        }
    }
}

/// A raw package entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct PackagePart {
    name: String,
    data: Vec<u8>,
    is_dir: bool,
}

/// An editable letter template.
///
/// Owned by exactly one generation job: load, mutate, serialize, drop.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    parts: Vec<PackagePart>,
    /// `w:document` with its `w:body` child taken out
    root: XmlElement,
    body_index: usize,
    body: Body,
    styles: StyleCatalog,
    roles: TableRoles,
}

impl TemplateDocument {
    /// Read a template from a `.docx` file
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
            .map_err(|e| match e {
                SuratError::Package(msg) => {
                    SuratError::Package(format!("{}: {msg}", path.display()))
                }
                other => other,
            })
    }

    /// Read a template from `.docx` bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(package_error)?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(package_error)?;
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            parts.push(PackagePart {
                name: file.name().to_string(),
                data,
                is_dir: file.is_dir(),
            });
        }

        let document_xml = Self::part_text(&parts, DOCUMENT_PART)?
            .ok_or_else(|| package_error(format!("missing {DOCUMENT_PART}")))?;
        let mut root = parse_document(&document_xml)?;

        let body_index = root
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.name == W_BODY))
            .ok_or_else(|| SuratError::Xml(format!("{DOCUMENT_PART} has no {W_BODY}")))?;
        let body = match root.children.remove(body_index) {
            XmlNode::Element(e) => Body::from_element(e),
            _ => unreachable!("position matched an element"),
        };

        let styles = match Self::part_text(&parts, STYLES_PART)? {
            Some(xml) => StyleCatalog::parse(&xml)?,
            None => StyleCatalog::default(),
        };
        let roles = TableRoles::resolve(&body);

        Ok(Self {
            parts,
            root,
            body_index,
            body,
            styles,
            roles,
        })
    }

    fn part_text(parts: &[PackagePart], name: &str) -> Result<Option<String>> {
        parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| {
                String::from_utf8(p.data.clone())
                    .map_err(|e| SuratError::Xml(format!("{name}: {e}")))
            })
            .transpose()
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    #[inline]
    #[must_use]
    pub fn styles(&self) -> &StyleCatalog {
        &self.styles
    }

    #[inline]
    #[must_use]
    pub const fn roles(&self) -> TableRoles {
        self.roles
    }

    /// Names of all package entries, in archive order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// The roster table, or `StructuralTemplate` if the template has none
    pub fn roster_table_mut(&mut self) -> Result<&mut Table> {
        let index = self.roles.roster.ok_or_else(|| {
            SuratError::StructuralTemplate(format!(
                "template has {} table(s); the roster table (table {}) is missing",
                self.roles.table_count,
                ROSTER_TABLE_INDEX + 1
            ))
        })?;
        self.body.table_mut(index).ok_or_else(|| {
            SuratError::StructuralTemplate(format!("roster table {} no longer exists", index + 1))
        })
    }

    /// `word/document.xml` as it would be written now
    pub fn document_xml(&self) -> Result<Vec<u8>> {
        let mut root = self.root.clone();
        root.children.insert(
            self.body_index,
            XmlNode::Element(self.body.clone().into_element()),
        );
        write_document(&root)
    }

    /// Serialize the package to `.docx` bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let document_xml = self.document_xml()?;
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for part in &self.parts {
            if part.is_dir {
                zip.add_directory(part.name.as_str(), options)
                    .map_err(package_error)?;
                continue;
            }
            zip.start_file(part.name.as_str(), options)
                .map_err(package_error)?;
            let data = if part.name == DOCUMENT_PART {
                &document_xml
            } else {
                &part.data
            };
            zip.write_all(data)?;
        }
        let cursor = zip.finish().map_err(package_error)?;
        Ok(cursor.into_inner())
    }
}
