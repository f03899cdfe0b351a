//! Error types for letter assembly.
//!
//! Only [`SuratError::TemplateNotFound`], [`SuratError::StructuralTemplate`]
//! and the I/O style variants ever reach a caller. [`SuratError::StyleNotFound`]
//! and [`SuratError::AlignmentApplication`] are produced internally and
//! absorbed by the stage that raised them.

use crate::layout::LayoutVariant;
use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur while assembling a letter.
///
/// # Examples
///
/// ```rust,ignore
/// use surat_core::SuratError;
///
/// match assembler.assemble(&request, &mut sink) {
///     Err(SuratError::TemplateNotFound { variant, path }) => {
///         eprintln!("No template for {variant}: {}", path.display());
///     }
///     Err(SuratError::StructuralTemplate(msg)) => eprintln!("Broken template: {msg}"),
///     Err(e) => eprintln!("Other error: {e}"),
///     Ok(report) => println!("{} rows written", report.rows_written),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SuratError {
    /// The template for a layout variant does not exist.
    #[error("Template not found for layout {variant}: {}", path.display())]
    TemplateNotFound {
        /// Layout that was requested
        variant: LayoutVariant,
        /// Location that was probed
        path: PathBuf,
    },

    /// The template lacks a structure the pipeline depends on
    /// (e.g. the roster table). Aborts the whole job.
    #[error("Structural template error: {0}")]
    StructuralTemplate(String),

    /// A named paragraph style is not defined by the template.
    ///
    /// Never surfaces from the assembler: callers fall back to an
    /// unstyled paragraph.
    #[error("Style not found: {0}")]
    StyleNotFound(String),

    /// Alignment could not be applied to a single table cell.
    ///
    /// Swallowed per cell by the roster builder.
    #[error("Alignment could not be applied: {0}")]
    AlignmentApplication(String),

    /// The `.docx` container could not be read or written.
    #[error("Package error: {0}")]
    Package(String),

    /// A document part is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error for input payloads.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Type alias for [`Result<T, SuratError>`].
pub type Result<T> = std::result::Result<T, SuratError>;
