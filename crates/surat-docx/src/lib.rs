//! # Surat DOCX - Template Mutation Engine
//!
//! Fills an assignment letter template (`.docx`) from a letter payload:
//!
//! 1. [`PlaceholderSubstitutor`] - scalar tokens in body and table text
//! 2. [`ListInjector`] - "menimbang" / "dasar hukum" clause lists in a table cell
//! 3. [`TableRowBuilder`] - one roster row per attendee
//! 4. [`HeaderMarker`] - repeating roster header rows
//! 5. [`PageFlowController`] - keep the closing paragraphs together
//!
//! [`DocumentAssembler`] runs the stages in that order on a template
//! loaded fresh from a [`TemplateSource`] and hands the result to an
//! [`OutputSink`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use surat_core::{InputPayload, LayoutVariant};
//! use surat_docx::{AssemblyRequest, DirectoryTemplateSource, DocumentAssembler, FileSink};
//!
//! let assembler = DocumentAssembler::new(DirectoryTemplateSource::with_dir("templates"));
//! let payload = InputPayload::from_json(r#"{"kota": "Jakarta", "peserta": []}"#)?;
//! let request = AssemblyRequest::new(LayoutVariant::NameIdCombined, payload);
//! let report = assembler.assemble(&request, &mut FileSink::new("surat_tugas.docx"))?;
//! println!("{} rows, {} bytes", report.rows_written, report.artifact_size);
//! # Ok::<(), surat_core::SuratError>(())
//! ```

pub mod assembler;
pub mod header;
pub mod list;
pub mod model;
pub mod package;
pub mod page_flow;
pub mod roster;
pub mod source;
pub mod styles;
pub mod substitute;
pub mod xml;

pub use assembler::{AssemblyReport, AssemblyRequest, DocumentAssembler};
pub use header::HeaderMarker;
pub use list::ListInjector;
pub use model::{Block, Body, Cell, Paragraph, Row, Run, Table};
pub use package::{TableRoles, TemplateDocument};
pub use page_flow::PageFlowController;
pub use roster::TableRowBuilder;
pub use source::{
    DirectoryTemplateSource, FileSink, InMemoryTemplateSource, OutputSink, TemplateSource,
};
pub use styles::StyleCatalog;
pub use substitute::PlaceholderSubstitutor;
