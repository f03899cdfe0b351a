//! # Surat Core - Assignment Letter Domain Types
//!
//! Shared types for generating assignment letters ("surat tugas") from a
//! DOCX template:
//!
//! - [`AttendeeRecord`] and ID grouping for the roster table
//! - [`ClauseList`] / [`SlotStyle`] for the "menimbang" and "dasar hukum" lists
//! - [`PlaceholderMap`] for scalar token substitution
//! - [`wrap`](wrap::wrap), the hyphenating line wrapper for clause text
//! - [`GeneratorConfig`], loaded from TOML
//! - [`SuratError`], the error type used across the workspace
//!
//! The document mutation engine lives in the `surat-docx` crate.
//!
//! ## Example
//!
//! ```rust
//! use surat_core::{format_national_id, wrap::wrap, InputPayload};
//!
//! let payload = InputPayload::from_json(r#"{"kota": "Jakarta", "peserta": []}"#)?;
//! assert_eq!(payload.placeholders().get("{{KOTA}}"), Some("Jakarta"));
//!
//! assert_eq!(format_national_id("123456789012345678"), "12345678 901234 5 678");
//! assert_eq!(wrap("a b c", 3), "a b\nc");
//! # Ok::<(), surat_core::SuratError>(())
//! ```

pub mod clause;
pub mod config;
pub mod error;
pub mod layout;
pub mod payload;
pub mod placeholder;
pub mod record;
pub mod wrap;

pub use clause::{ClauseInput, ClauseList, SlotStyle};
pub use config::{GeneratorConfig, SlotConfig, TemplateConfig, WrapConfig};
pub use error::{Result, SuratError};
pub use layout::{CellAlignment, HorizontalAlignment, LayoutVariant, VerticalAlignment};
pub use payload::InputPayload;
pub use placeholder::PlaceholderMap;
pub use record::{format_national_id, AttendeeRecord};
