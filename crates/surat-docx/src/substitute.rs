//! Scalar placeholder substitution.

use crate::model::{Body, Paragraph};
use surat_core::PlaceholderMap;

/// Replaces scalar tokens in body paragraphs and in the paragraphs of every
/// top-level table cell.
///
/// A paragraph containing at least one token is rewritten as a single
/// unformatted run; paragraphs without tokens are left untouched.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderSubstitutor<'a> {
    placeholders: &'a PlaceholderMap,
}

impl<'a> PlaceholderSubstitutor<'a> {
    #[inline]
    #[must_use]
    pub const fn new(placeholders: &'a PlaceholderMap) -> Self {
        Self { placeholders }
    }

    /// Substitute in place. Returns the number of paragraphs rewritten.
    pub fn apply(&self, body: &mut Body) -> usize {
        let mut rewritten = 0;
        for paragraph in body.paragraphs_mut() {
            rewritten += usize::from(self.rewrite(paragraph));
        }
        for table in body.tables_mut() {
            for row in table.rows_mut() {
                for cell in row.cells_mut() {
                    for paragraph in cell.paragraphs_mut() {
                        rewritten += usize::from(self.rewrite(paragraph));
                    }
                }
            }
        }
        log::debug!("Substituted placeholders in {rewritten} paragraphs");
        rewritten
    }

    fn rewrite(&self, paragraph: &mut Paragraph) -> bool {
        let text = paragraph.text();
        if !self.placeholders.matches(&text) {
            return false;
        }
        paragraph.replace_runs(&self.placeholders.apply(&text));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Body;
    use crate::xml::parse_document;

    fn body(xml: &str) -> Body {
        Body::from_element(parse_document(xml).unwrap())
    }

    fn map() -> PlaceholderMap {
        [("{{KOTA}}", "Jakarta"), ("{{TANGGAL}}", "1 Mei 2025")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_paragraph_without_token_untouched() {
        let mut body = body(
            r#"<w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Surat </w:t></w:r><w:r><w:t>Tugas</w:t></w:r></w:p></w:body>"#,
        );
        let before = body.clone();
        let map = map();
        assert_eq!(PlaceholderSubstitutor::new(&map).apply(&mut body), 0);
        assert_eq!(body, before);
    }

    #[test]
    fn test_token_split_across_runs_collapses() {
        let mut body = body(
            r#"<w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{{KO</w:t></w:r><w:r><w:t>TA}}, {{TANGGAL}}</w:t></w:r></w:p></w:body>"#,
        );
        let map = map();
        assert_eq!(PlaceholderSubstitutor::new(&map).apply(&mut body), 1);

        let paragraph = body.paragraphs().next().unwrap();
        assert_eq!(paragraph.run_count(), 1);
        assert_eq!(paragraph.text(), "Jakarta, 1 Mei 2025");
        assert!(paragraph.runs().next().unwrap().properties.is_none());
    }

    #[test]
    fn test_table_cells_are_substituted() {
        let mut body = body(
            r#"<w:body><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Di {{KOTA}}</w:t></w:r></w:p><w:p><w:r><w:t>tetap</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:body>"#,
        );
        let map = map();
        assert_eq!(PlaceholderSubstitutor::new(&map).apply(&mut body), 1);
        let cell = body.tables().next().unwrap().rows().next().unwrap().cells().next().unwrap();
        assert_eq!(cell.text(), "Di Jakarta\ntetap");
    }

    #[test]
    fn test_empty_value_removes_token() {
        let mut body = body(r#"<w:body><w:p><w:r><w:t>Nomor: {{KOTA}}</w:t></w:r></w:p></w:body>"#);
        let map: PlaceholderMap = [("{{KOTA}}", "")].into_iter().collect();
        PlaceholderSubstitutor::new(&map).apply(&mut body);
        assert_eq!(body.paragraphs().next().unwrap().text(), "Nomor: ");
    }
}
