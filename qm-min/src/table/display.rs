// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::table::PrimeTable;
use std::fmt;

/// Displays the current state of a [`PrimeTable`]: a header of uncovered minterms, then one line
/// per row with an `X` wherever that row covers the minterm.
///
/// ```text
/// Table state 2:
///          1   9
/// --01     X | X |
/// -00-     X | X |
/// ```
#[derive(Clone, Debug)]
pub struct PrimeTableDisplay<'a> {
    table: &'a PrimeTable,
    label_index: usize,
}

impl<'a> PrimeTableDisplay<'a> {
    pub fn new(table: &'a PrimeTable) -> Self {
        Self {
            table,
            label_index: 0,
        }
    }

    /// Sets the number printed after `Table state`.
    pub fn with_label_index(mut self, label_index: usize) -> Self {
        self.label_index = label_index;
        self
    }
}

impl<'a> fmt::Display for PrimeTableDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Table state {}:", self.label_index)?;

        let uncovered: Vec<u32> = self.table.uncovered().collect();
        let pattern_width = self
            .table
            .rows()
            .map(|row| row.cube().width())
            .max()
            .unwrap_or(0)
            + 4;
        let cell_width = uncovered
            .iter()
            .map(|value| value.to_string().len())
            .max()
            .unwrap_or(1)
            + 1;

        write!(f, "{:pattern_width$}", "")?;
        for value in &uncovered {
            write!(f, "{:>cell_width$}  ", value)?;
        }
        writeln!(f)?;

        for row in self.table.rows() {
            write!(f, "{:pattern_width$}", row.cube().to_string())?;
            for value in &uncovered {
                let mark = if row.covers().contains(value) { "X" } else { "-" };
                write!(f, "{:>cell_width$} |", mark)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
