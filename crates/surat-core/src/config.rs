//! Generator configuration (`surat.toml`).
//!
//! Every table is optional; missing keys fall back to [`Default`]:
//!
//! ```toml
//! header_row_count = 2
//! keep_together_marker = "Untuk"
//! id_label = "ID. "
//!
//! [templates]
//! dir = "templates"
//! separate_columns = "surat_tugas_template.docx"
//! name_id_combined = "surat_tugas_template - Nama - NIP Combined.docx"
//!
//! [wrapping]
//! max_line_length = 52
//! layouts = ["name-id-combined"]
//!
//! [slots.menimbang]
//! token = "{{menimbang}}"
//! plain_style = "Normal Font"
//! numbered_style = "List menimbangs"
//! ```

use crate::clause::SlotStyle;
use crate::error::{Result, SuratError};
use crate::layout::LayoutVariant;
use crate::record::DEFAULT_ID_LABEL;
use crate::wrap::DEFAULT_MAX_LINE_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of roster header rows preserved by default
pub const DEFAULT_HEADER_ROW_COUNT: usize = 2;

/// Body text that starts the keep-together region by default
pub const DEFAULT_KEEP_TOGETHER_MARKER: &str = "Untuk";

/// Top-level configuration for letter generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Leading roster rows kept as headers (clamped to at least 1)
    pub header_row_count: usize,
    /// Body paragraph text from which paragraphs are kept together
    pub keep_together_marker: String,
    /// Text placed before the formatted ID in the combined name column
    pub id_label: String,
    pub templates: TemplateConfig,
    pub wrapping: WrapConfig,
    pub slots: SlotConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header_row_count: DEFAULT_HEADER_ROW_COUNT,
            keep_together_marker: DEFAULT_KEEP_TOGETHER_MARKER.to_string(),
            id_label: DEFAULT_ID_LABEL.to_string(),
            templates: TemplateConfig::default(),
            wrapping: WrapConfig::default(),
            slots: SlotConfig::default(),
        }
    }
}

/// Template file locations, one per layout variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: PathBuf,
    pub separate_columns: PathBuf,
    pub name_id_combined: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            separate_columns: PathBuf::from("surat_tugas_template.docx"),
            name_id_combined: PathBuf::from("surat_tugas_template - Nama - NIP Combined.docx"),
        }
    }
}

impl TemplateConfig {
    /// Full path of the template for `variant`
    #[must_use = "returns the template path"]
    pub fn path_for(&self, variant: LayoutVariant) -> PathBuf {
        let file = match variant {
            LayoutVariant::SeparateColumns => &self.separate_columns,
            LayoutVariant::NameIdCombined => &self.name_id_combined,
        };
        self.dir.join(file)
    }
}

/// Clause wrapping settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    pub max_line_length: usize,
    /// Layouts whose clause cells are narrow enough to need wrapping
    pub layouts: Vec<LayoutVariant>,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            layouts: vec![LayoutVariant::NameIdCombined],
        }
    }
}

impl WrapConfig {
    /// Wrap width for `variant`, or `None` when the layout is not wrapped
    #[inline]
    #[must_use]
    pub fn width_for(&self, variant: LayoutVariant) -> Option<usize> {
        self.layouts
            .contains(&variant)
            .then_some(self.max_line_length)
    }
}

/// Token and style names for both clause slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlotConfigFile")]
pub struct SlotConfig {
    pub menimbang: SlotStyle,
    pub dasar_hukum: SlotStyle,
}

/// On-disk form of [`SlotConfig`]: every key optional, merged over the
/// per-slot defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlotConfigFile {
    menimbang: SlotOverride,
    dasar_hukum: SlotOverride,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlotOverride {
    token: Option<String>,
    plain_style: Option<String>,
    numbered_style: Option<String>,
}

impl SlotOverride {
    fn merge_into(self, mut base: SlotStyle) -> SlotStyle {
        if let Some(token) = self.token {
            base.token = token;
        }
        if let Some(plain) = self.plain_style {
            base.plain_style = plain;
        }
        if let Some(numbered) = self.numbered_style {
            base.numbered_style = numbered;
        }
        base
    }
}

impl From<SlotConfigFile> for SlotConfig {
    fn from(file: SlotConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            menimbang: file.menimbang.merge_into(defaults.menimbang),
            dasar_hukum: file.dasar_hukum.merge_into(defaults.dasar_hukum),
        }
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            menimbang: SlotStyle::new("{{menimbang}}", "Normal Font", "List menimbangs"),
            dasar_hukum: SlotStyle::new("{{dasar_hukum}}", "Normal Font", "List numberg"),
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SuratError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            SuratError::Config(msg) => {
                SuratError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        log::debug!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Header row count with the lower bound of 1 applied
    #[inline]
    #[must_use]
    pub fn effective_header_rows(&self) -> usize {
        self.header_row_count.max(1)
    }
}
