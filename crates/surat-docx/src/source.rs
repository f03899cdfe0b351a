//! Where templates come from and where finished letters go.

use crate::package::TemplateDocument;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use surat_core::{LayoutVariant, Result, SuratError, TemplateConfig};

/// Supplies a fresh [`TemplateDocument`] per job
pub trait TemplateSource: Send + Sync {
    /// Load the template for `variant`.
    ///
    /// Every call returns a new, independent document.
    ///
    /// # Errors
    ///
    /// [`SuratError::TemplateNotFound`] if no template exists for `variant`.
    fn load(&self, variant: LayoutVariant) -> Result<TemplateDocument>;
}

/// One `.docx` file per layout under a template directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTemplateSource {
    config: TemplateConfig,
}

impl DirectoryTemplateSource {
    #[must_use]
    pub const fn new(config: TemplateConfig) -> Self {
        Self { config }
    }

    /// Same file names as [`TemplateConfig::default`], under `dir`
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(TemplateConfig {
            dir: dir.into(),
            ..TemplateConfig::default()
        })
    }

    #[must_use]
    pub fn path_for(&self, variant: LayoutVariant) -> PathBuf {
        self.config.path_for(variant)
    }
}

impl TemplateSource for DirectoryTemplateSource {
    fn load(&self, variant: LayoutVariant) -> Result<TemplateDocument> {
        let path = self.path_for(variant);
        if !path.is_file() {
            return Err(SuratError::TemplateNotFound { variant, path });
        }
        log::debug!("Loading template {}", path.display());
        TemplateDocument::open(&path)
    }
}

/// Templates held in memory, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: HashMap<LayoutVariant, Vec<u8>>,
}

impl InMemoryTemplateSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(mut self, variant: LayoutVariant, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(variant, bytes);
        self
    }

    pub fn insert(&mut self, variant: LayoutVariant, bytes: impl Into<Vec<u8>>) {
        self.templates.insert(variant, bytes.into());
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load(&self, variant: LayoutVariant) -> Result<TemplateDocument> {
        let bytes = self
            .templates
            .get(&variant)
            .ok_or_else(|| SuratError::TemplateNotFound {
                variant,
                path: PathBuf::from(format!("<memory:{variant}>")),
            })?;
        TemplateDocument::from_bytes(bytes)
    }
}

/// Receives the finished `.docx` bytes
pub trait OutputSink {
    fn write_artifact(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Collects the artifact in memory, replacing earlier contents
impl OutputSink for Vec<u8> {
    fn write_artifact(&mut self, bytes: &[u8]) -> Result<()> {
        self.clear();
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writes the artifact to a file.
///
/// Bytes go to a temporary file in the destination directory, which is then
/// renamed over `path`; a failed write leaves no partial file behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn write_artifact(&mut self, bytes: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
