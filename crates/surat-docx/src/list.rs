//! Clause list injection into a table cell.

use crate::model::{Block, Cell, Paragraph};
use crate::package::TemplateDocument;
use surat_core::ClauseList;

/// Replaces a placeholder token inside a table cell with one paragraph per
/// clause.
///
/// Only the first cell holding the token is filled. Body paragraphs are
/// never searched.
#[derive(Debug, Clone, Copy)]
pub struct ListInjector<'a> {
    token: &'a str,
    items: &'a ClauseList,
    style: &'a str,
}

impl<'a> ListInjector<'a> {
    #[inline]
    #[must_use]
    pub const fn new(token: &'a str, items: &'a ClauseList, style: &'a str) -> Self {
        Self {
            token,
            items,
            style,
        }
    }

    /// Fill the slot. Returns `false` if the token occurs in no cell.
    pub fn apply(&self, document: &mut TemplateDocument) -> bool {
        if self.token.is_empty() {
            return false;
        }
        let style_id = document
            .styles()
            .paragraph_style_id(self.style)
            .map(str::to_string);

        for table in document.body_mut().tables_mut() {
            for row in table.rows_mut() {
                for cell in row.cells_mut() {
                    let Some(index) = self.find_token(cell) else {
                        continue;
                    };
                    let style_id = match &style_id {
                        Ok(id) => Some(id.as_str()),
                        Err(e) => {
                            log::warn!("{e}; clauses for {} are left unstyled", self.token);
                            None
                        }
                    };
                    self.fill(cell, index, style_id);
                    log::debug!("Filled {} with {} clause(s)", self.token, self.items.len());
                    return true;
                }
            }
        }
        log::debug!("Token {} not found in any table cell", self.token);
        false
    }

    /// Index of the first cell paragraph with a run containing the token
    fn find_token(&self, cell: &Cell) -> Option<usize> {
        cell.content.iter().position(|block| match block {
            Block::Paragraph(p) => p.runs().any(|run| run.text().contains(self.token)),
            _ => false,
        })
    }

    fn fill(&self, cell: &mut Cell, index: usize, style_id: Option<&str>) {
        if let Some(Block::Paragraph(placeholder)) = cell.content.get_mut(index) {
            if let Some(run) = placeholder
                .runs_mut()
                .find(|run| run.text().contains(self.token))
            {
                let stripped = run.text().replace(self.token, "");
                run.set_text(&stripped);
            }
        }

        for item in self.items.items() {
            let mut paragraph = Paragraph::new();
            if let Some(id) = style_id {
                paragraph.set_style_id(id);
            }
            paragraph.push_run(item);
            cell.push_paragraph(paragraph);
        }

        // A cell must keep at least one paragraph
        if cell.paragraphs().count() > 1 {
            cell.content.remove(index);
        }
    }
}
