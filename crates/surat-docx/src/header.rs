//! Repeating header rows.

use crate::model::Table;
use surat_core::{CellAlignment, HorizontalAlignment};

/// Flags the leading rows of a table to repeat on every page and centers
/// their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMarker {
    header_rows: usize,
}

impl HeaderMarker {
    /// `header_rows` below 1 is treated as 1
    #[inline]
    #[must_use]
    pub fn new(header_rows: usize) -> Self {
        Self {
            header_rows: header_rows.max(1),
        }
    }

    /// Mark the header rows. Does nothing if the table is shorter than the
    /// header. Returns how many rows gained `w:tblHeader`.
    pub fn apply(&self, table: &mut Table) -> usize {
        if table.row_count() < self.header_rows {
            log::debug!(
                "Table has {} rows, fewer than {} header rows; headers left as is",
                table.row_count(),
                self.header_rows
            );
            return 0;
        }

        let mut marked = 0;
        for row in table.rows_mut().take(self.header_rows) {
            marked += usize::from(row.mark_repeating_header());
            for cell in row.cells_mut() {
                for paragraph in cell.paragraphs_mut() {
                    paragraph.set_alignment(HorizontalAlignment::Center);
                }
                cell.set_vertical_alignment(CellAlignment::CENTERED.vertical);
            }
        }
        marked
    }
}
