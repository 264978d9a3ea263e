// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    table::{PrimeTable, Selection},
    trace::TraceSink,
};
use itertools::Itertools;
use log::debug;

/// Reduces a [`PrimeTable`] until every minterm is covered.
///
/// Each cycle applies column dominance until it stops making progress, then tries row dominance
/// once. A cycle that selects nothing while minterms remain falls back to the first row in table
/// order. This always terminates, but the fallback is a heuristic: cyclic tables may end up with
/// a cover that isn't minimal.
#[derive(Clone, Debug)]
pub struct CoverSelector {
    table: PrimeTable,
    selections: Vec<Selection>,
}

impl CoverSelector {
    pub fn new(table: PrimeTable) -> Self {
        Self {
            table,
            selections: Vec::new(),
        }
    }

    #[inline]
    pub fn table(&self) -> &PrimeTable {
        &self.table
    }

    /// Runs the reduction to completion and returns the selections in the order they were made.
    ///
    /// A cube is never returned twice. Every selection takes its row out of the table, so the
    /// final dedup by cube is a safeguard and isn't expected to remove anything.
    pub fn run(mut self, trace: &mut dyn TraceSink) -> Vec<Selection> {
        trace.table(&self.table);

        while !self.table.is_covered() {
            let mut progress = false;
            while let Some(selection) = self.table.column_dominance() {
                self.record(selection, trace);
                progress = true;
            }
            if let Some(selection) = self.table.row_dominance() {
                self.record(selection, trace);
                progress = true;
            }

            if !progress {
                match self.table.select_first() {
                    Some(selection) => self.record(selection, trace),
                    // Every uncovered column has a row, so this isn't reachable.
                    None => break,
                }
            }
        }

        debug!(
            "cover complete: {} selections, {} rows left",
            self.selections.len(),
            self.table.row_count()
        );
        self.selections
            .into_iter()
            .unique_by(|selection| selection.implicant().cube().clone())
            .collect()
    }

    fn record(&mut self, selection: Selection, trace: &mut dyn TraceSink) {
        trace.selection(&selection);
        trace.table(&self.table);
        self.selections.push(selection);
    }
}
