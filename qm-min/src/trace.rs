// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic snapshots emitted while minimizing.
//!
//! A [`TraceSink`] is passed into a single minimization call and observes every generation, every
//! state of the coverage table and every selection. Sinks only observe: nothing they do affects
//! the result.

use crate::{
    cover::Generation,
    cube::Cube,
    table::{PrimeTable, Selection, SelectionRule},
};
use log::info;

/// Receives snapshots during minimization. All methods default to doing nothing.
pub trait TraceSink {
    /// Called once per generation, after its prime implicants have been flagged.
    fn generation(&mut self, _generation: &Generation) {}

    /// Called with the initial coverage table, and again after every selection.
    fn table(&mut self, _table: &PrimeTable) {}

    /// Called whenever a row is selected out of the coverage table.
    fn selection(&mut self, _selection: &Selection) {}
}

/// A sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {}

/// A sink that renders snapshots to the `log` facade at info level.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    group_prints: usize,
    table_prints: usize,
}

impl TraceSink for TraceLog {
    fn generation(&mut self, generation: &Generation) {
        info!(
            "\n{}",
            generation.display().with_label_index(self.group_prints)
        );
        self.group_prints += 1;
    }

    fn table(&mut self, table: &PrimeTable) {
        info!("\n{}", table.display().with_label_index(self.table_prints));
        self.table_prints += 1;
    }

    fn selection(&mut self, selection: &Selection) {
        info!("{}", selection);
    }
}

/// One recorded snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    Generation {
        index: usize,
        len: usize,
        primes: Vec<Cube>,
        rendered: String,
    },
    Table {
        index: usize,
        rows: Vec<Cube>,
        uncovered: Vec<u32>,
        rendered: String,
    },
    Selection {
        cube: Cube,
        rule: SelectionRule,
        removed: Vec<u32>,
    },
}

/// A sink that keeps every snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
    group_prints: usize,
    table_prints: usize,
}

impl TraceRecorder {
    #[inline]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[inline]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

impl TraceSink for TraceRecorder {
    fn generation(&mut self, generation: &Generation) {
        self.events.push(TraceEvent::Generation {
            index: self.group_prints,
            len: generation.len(),
            primes: generation.primes().map(|elem| elem.cube().clone()).collect(),
            rendered: generation
                .display()
                .with_label_index(self.group_prints)
                .to_string(),
        });
        self.group_prints += 1;
    }

    fn table(&mut self, table: &PrimeTable) {
        self.events.push(TraceEvent::Table {
            index: self.table_prints,
            rows: table.rows().map(|row| row.cube().clone()).collect(),
            uncovered: table.uncovered().collect(),
            rendered: table
                .display()
                .with_label_index(self.table_prints)
                .to_string(),
        });
        self.table_prints += 1;
    }

    fn selection(&mut self, selection: &Selection) {
        self.events.push(TraceEvent::Selection {
            cube: selection.implicant().cube().clone(),
            rule: selection.rule(),
            removed: selection.removed().to_vec(),
        });
    }
}
