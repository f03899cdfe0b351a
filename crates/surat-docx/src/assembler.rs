//! End-to-end letter assembly.

use crate::header::HeaderMarker;
use crate::list::ListInjector;
use crate::package::TemplateDocument;
use crate::page_flow::PageFlowController;
use crate::roster::TableRowBuilder;
use crate::source::{OutputSink, TemplateSource};
use crate::substitute::PlaceholderSubstitutor;
use surat_core::wrap::wrap;
use surat_core::{ClauseList, GeneratorConfig, InputPayload, LayoutVariant, Result, SlotStyle};

/// One letter to generate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyRequest {
    pub layout: LayoutVariant,
    pub payload: InputPayload,
}

impl AssemblyRequest {
    #[must_use]
    pub const fn new(layout: LayoutVariant, payload: InputPayload) -> Self {
        Self { layout, payload }
    }
}

/// What the pipeline did to the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyReport {
    /// Paragraphs rewritten by scalar substitution
    pub paragraphs_substituted: usize,
    /// Clause slots whose token was found
    pub slots_filled: usize,
    pub rows_written: usize,
    /// Header rows that gained the repeat flag
    pub header_rows_marked: usize,
    pub paragraphs_kept_together: usize,
    /// Size of the serialized `.docx`; 0 until serialized
    pub artifact_size: usize,
}

/// Runs the generation pipeline against templates from `S`.
///
/// Holds no per-job state; one assembler can serve any number of jobs,
/// each on its own freshly loaded template.
#[derive(Debug, Clone)]
pub struct DocumentAssembler<S> {
    source: S,
    config: GeneratorConfig,
}

impl<S: TemplateSource> DocumentAssembler<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, GeneratorConfig::default())
    }

    #[must_use]
    pub const fn with_config(source: S, config: GeneratorConfig) -> Self {
        Self { source, config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load the template and run every stage, without serializing.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` when the layout has no template, and
    /// `StructuralTemplate` when the template has no roster table.
    pub fn build(&self, request: &AssemblyRequest) -> Result<(TemplateDocument, AssemblyReport)> {
        let layout = request.layout;
        let payload = &request.payload;
        let header_rows = self.config.effective_header_rows();

        let mut document = self.source.load(layout)?;
        log::info!(
            "Loaded {layout} template: {} parts, {} tables",
            document.part_names().count(),
            document.roles().table_count
        );

        let mut report = AssemblyReport::default();

        let placeholders = payload.placeholders();
        report.paragraphs_substituted =
            PlaceholderSubstitutor::new(&placeholders).apply(document.body_mut());

        let slots = [
            (&self.config.slots.menimbang, payload.menimbang()),
            (&self.config.slots.dasar_hukum, payload.dasar_hukum()),
        ];
        for (slot, clauses) in slots {
            if self.inject_clauses(&mut document, layout, slot, &clauses) {
                report.slots_filled += 1;
            }
        }

        let table = document.roster_table_mut()?;
        report.rows_written = TableRowBuilder::new(layout, header_rows, &self.config.id_label)
            .apply(table, &payload.peserta);
        report.header_rows_marked = HeaderMarker::new(header_rows).apply(table);

        report.paragraphs_kept_together =
            PageFlowController::new(&self.config.keep_together_marker).apply(document.body_mut());

        Ok((document, report))
    }

    fn inject_clauses(
        &self,
        document: &mut TemplateDocument,
        layout: LayoutVariant,
        slot: &SlotStyle,
        clauses: &ClauseList,
    ) -> bool {
        let clauses = match self.config.wrapping.width_for(layout) {
            Some(width) => clauses.map(|clause| wrap(clause, width)),
            None => clauses.clone(),
        };
        ListInjector::new(&slot.token, &clauses, slot.style_for(clauses.len())).apply(document)
    }

    /// Build the letter and serialize it to `.docx` bytes
    pub fn render(&self, request: &AssemblyRequest) -> Result<(Vec<u8>, AssemblyReport)> {
        let (document, mut report) = self.build(request)?;
        let bytes = document.to_bytes()?;
        report.artifact_size = bytes.len();
        log::info!("Assembled {} letter: {} bytes", request.layout, bytes.len());
        Ok((bytes, report))
    }

    /// Build the letter and hand the finished artifact to `sink`.
    ///
    /// The sink is only called once the whole document has been built and
    /// serialized.
    pub fn assemble(
        &self,
        request: &AssemblyRequest,
        sink: &mut impl OutputSink,
    ) -> Result<AssemblyReport> {
        let (bytes, report) = self.render(request)?;
        sink.write_artifact(&bytes)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryTemplateSource;
    use surat_core::SuratError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_assembler_is_send_sync() {
        assert_send_sync::<DocumentAssembler<InMemoryTemplateSource>>();
    }

    #[test]
    fn test_missing_template_never_reaches_sink() {
        let assembler = DocumentAssembler::new(InMemoryTemplateSource::new());
        let mut sink = b"untouched".to_vec();
        let err = assembler
            .assemble(&AssemblyRequest::default(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, SuratError::TemplateNotFound { .. }));
        assert_eq!(sink, b"untouched");
    }
}
