//! Roster table population.

use crate::model::{Cell, Row, Table};
use surat_core::{AttendeeRecord, LayoutVariant};

/// Rebuilds the data rows of the roster table, one row per attendee.
#[derive(Debug, Clone, Copy)]
pub struct TableRowBuilder<'a> {
    layout: LayoutVariant,
    header_rows: usize,
    id_label: &'a str,
}

impl<'a> TableRowBuilder<'a> {
    /// `header_rows` below 1 is treated as 1
    #[must_use]
    pub fn new(layout: LayoutVariant, header_rows: usize, id_label: &'a str) -> Self {
        Self {
            layout,
            header_rows: header_rows.max(1),
            id_label,
        }
    }

    /// Drop every row after the header rows and append one row per record.
    ///
    /// Returns the number of rows written.
    pub fn apply(&self, table: &mut Table, attendees: &[AttendeeRecord]) -> usize {
        table.truncate_rows(self.header_rows);

        let mut widths = table.grid_widths();
        if widths.is_empty() {
            let cells = table.rows().last().map_or(0, Row::cell_count);
            widths = vec![None; cells];
        }

        for (index, attendee) in attendees.iter().enumerate() {
            let values = attendee.roster_values(self.layout, index + 1, self.id_label);
            let mut row = Row::with_cells(
                widths
                    .iter()
                    .map(|width| Cell::empty(width.as_deref()))
                    .collect(),
            );
            for (column, (cell, value)) in row.cells_mut().zip(&values).enumerate() {
                cell.set_text(value);
                if let Err(e) = cell.apply_alignment(self.layout.column_alignment(column)) {
                    log::debug!("Row {}, column {column}: {e}", index + 1);
                }
            }
            table.push_row(row);
        }

        log::info!(
            "Wrote {} roster rows ({} layout)",
            attendees.len(),
            self.layout
        );
        attendees.len()
    }
}
