// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod display;

pub use display::*;

use crate::{
    cover::{Implicant, PrimeSet},
    logic_function::LogicFunction,
};
use bitvec::prelude::*;
use log::debug;
use std::{collections::BTreeSet, fmt};

/// The prime implicant chart: rows are prime implicants, columns are the minterms that still need
/// to be covered.
///
/// Rows are kept in cube order. Don't-cares never appear as columns, even when a row covers them.
#[derive(Clone, Debug)]
pub struct PrimeTable {
    rows: Vec<TableRow>,
    /// Every column the table started with, ascending.
    columns: Vec<u32>,
    /// Indexed like `columns`.
    uncovered: BitVec,
}

#[derive(Clone, Debug)]
struct TableRow {
    implicant: Implicant,
    /// Indexed like `PrimeTable::columns`.
    marks: BitVec,
}

impl PrimeTable {
    pub fn new(primes: PrimeSet, function: &LogicFunction) -> Self {
        let columns: Vec<u32> = primes
            .iter()
            .flat_map(|prime| prime.covers().iter().copied())
            .filter(|&value| function.is_on(value))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = primes
            .into_iter()
            .map(|implicant| {
                let marks = columns
                    .iter()
                    .map(|column| implicant.covers().contains(column))
                    .collect();
                TableRow { implicant, marks }
            })
            .collect();
        let uncovered = bitvec![1; columns.len()];

        Self {
            rows,
            columns,
            uncovered,
        }
    }

    /// The minterms that still need to be covered, ascending.
    pub fn uncovered(&self) -> impl Iterator<Item = u32> + '_ {
        self.uncovered.iter_ones().map(move |ix| self.columns[ix])
    }

    #[inline]
    pub fn uncovered_count(&self) -> usize {
        self.uncovered.count_ones()
    }

    /// Returns true once every column has been covered.
    #[inline]
    pub fn is_covered(&self) -> bool {
        self.uncovered.not_any()
    }

    /// The remaining rows, in table order.
    pub fn rows(&self) -> impl Iterator<Item = &Implicant> + '_ {
        self.rows.iter().map(|row| &row.implicant)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn display(&self) -> PrimeTableDisplay<'_> {
        PrimeTableDisplay::new(self)
    }

    /// Scans uncovered columns in ascending order. The first column covered by exactly one row
    /// makes that row essential: it's removed along with every minterm it covers.
    ///
    /// At most one row is selected per call.
    pub fn column_dominance(&mut self) -> Option<Selection> {
        let essential = self.uncovered.iter_ones().find_map(|column| {
            let mut marking = self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.marks[column]);
            match (marking.next(), marking.next()) {
                (Some((row_ix, _)), None) => Some(row_ix),
                _ => None,
            }
        })?;
        Some(self.take_row(essential, SelectionRule::Column))
    }

    /// Scans rows in table order. The first row that covers exactly one uncovered minterm is
    /// selected and removed along with the minterms it covers.
    ///
    /// At most one row is selected per call.
    pub fn row_dominance(&mut self) -> Option<Selection> {
        let row_ix = self
            .rows
            .iter()
            .position(|row| self.uncovered_marks(row) == 1)?;
        Some(self.take_row(row_ix, SelectionRule::Row))
    }

    /// Selects the first remaining row. Used when neither dominance rule can make progress.
    ///
    /// Returns `None` if everything is already covered.
    pub fn select_first(&mut self) -> Option<Selection> {
        if self.rows.is_empty() || self.is_covered() {
            return None;
        }
        Some(self.take_row(0, SelectionRule::Fallback))
    }

    // ---
    // Helper methods
    // ---

    fn uncovered_marks(&self, row: &TableRow) -> usize {
        row.marks
            .iter_ones()
            .filter(|&column| self.uncovered[column])
            .count()
    }

    fn take_row(&mut self, row_ix: usize, rule: SelectionRule) -> Selection {
        let row = self.rows.remove(row_ix);
        let mut removed = Vec::new();
        for column in row.marks.iter_ones() {
            if self.uncovered[column] {
                self.uncovered.set(column, false);
                removed.push(self.columns[column]);
            }
        }

        debug!(
            "selected {} by {}, removed minterms {:?}",
            row.implicant.cube(),
            rule,
            removed
        );
        Selection {
            implicant: row.implicant,
            rule,
            removed,
        }
    }
}

/// A row taken out of the coverage table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    implicant: Implicant,
    rule: SelectionRule,
    removed: Vec<u32>,
}

impl Selection {
    #[inline]
    pub fn implicant(&self) -> &Implicant {
        &self.implicant
    }

    #[inline]
    pub fn rule(&self) -> SelectionRule {
        self.rule
    }

    /// The minterms this selection covered for the first time, ascending.
    #[inline]
    pub fn removed(&self) -> &[u32] {
        &self.removed
    }

    #[inline]
    pub fn into_implicant(self) -> Implicant {
        self.implicant
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.rule {
            SelectionRule::Column | SelectionRule::Row => write!(
                f,
                "prime implicant {} is essential, remove minterms",
                self.implicant.cube()
            )?,
            SelectionRule::Fallback => write!(
                f,
                "column and row dominance stuck, removing first implicant {}, remove minterms",
                self.implicant.cube()
            )?,
        }
        for value in &self.removed {
            write!(f, " {}", value)?;
        }
        write!(f, " with {}", self.rule)
    }
}

/// The rule that selected a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionRule {
    /// The row was the only one covering some minterm.
    Column,
    /// The row covered exactly one remaining minterm.
    Row,
    /// Neither rule applied, so the first row was taken.
    Fallback,
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Column => write!(f, "column dominance"),
            Self::Row => write!(f, "row dominance"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cover::Generation, minimize::MinimizeOptions, primes::MergeEngine, trace::NoTrace};

    fn table(function: &LogicFunction) -> PrimeTable {
        let primes = MergeEngine::new(MinimizeOptions::default())
            .prime_implicants(Generation::seed(function).unwrap(), &mut NoTrace)
            .unwrap();
        PrimeTable::new(primes, function)
    }

    fn pattern(selection: &Selection) -> String {
        selection.implicant().cube().to_string()
    }

    #[test]
    fn test_new_excludes_dont_cares() {
        let function = LogicFunction::new([2, 4, 6, 8, 10, 12, 32, 128], [3, 5], 8).unwrap();
        let table = table(&function);
        assert_eq!(
            table.uncovered().collect::<Vec<_>>(),
            vec![2, 4, 6, 8, 10, 12, 32, 128]
        );
        assert!(
            table.rows().any(|row| row.covers().contains(&3)),
            "some row still covers a don't-care"
        );
    }

    #[test]
    fn test_column_dominance() {
        let function = LogicFunction::new([0, 1, 2, 5, 7, 8, 9, 10, 13, 15], [], 4).unwrap();
        let mut table = table(&function);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.uncovered_count(), 10);

        // Column 2 is only covered by -0-0.
        let selection = table.column_dominance().unwrap();
        assert_eq!(pattern(&selection), "-0-0");
        assert_eq!(selection.rule(), SelectionRule::Column);
        assert_eq!(selection.removed(), &[0, 2, 8, 10]);
        assert_eq!(table.row_count(), 3);

        // Column 7 is only covered by -1-1.
        let selection = table.column_dominance().unwrap();
        assert_eq!(pattern(&selection), "-1-1");
        assert_eq!(table.uncovered().collect::<Vec<_>>(), vec![1, 9]);
        assert_eq!(table.uncovered_count(), 2);

        // 1 and 9 are both covered by --01 and -00-.
        assert!(table.column_dominance().is_none());
        assert!(table.row_dominance().is_none());

        let selection = table.select_first().unwrap();
        assert_eq!(pattern(&selection), "--01");
        assert_eq!(selection.rule(), SelectionRule::Fallback);
        assert!(table.is_covered());
        assert!(table.select_first().is_none());
    }

    #[test]
    fn test_row_dominance() {
        // Primes: 0-0 (0, 2), 01- (2, 3), -11 (3, 7), 1-1 (5, 7). Every minterm has two rows.
        let function = LogicFunction::new([0, 2, 3, 5, 7], [], 3).unwrap();
        let mut table = table(&function);
        assert_eq!(
            table.rows().map(|row| row.cube().to_string()).collect::<Vec<_>>(),
            vec!["-11", "0-0", "01-", "1-1"]
        );

        // 0 is only covered by 0-0, 5 only by 1-1.
        assert_eq!(pattern(&table.column_dominance().unwrap()), "0-0");
        assert_eq!(pattern(&table.column_dominance().unwrap()), "1-1");
        assert_eq!(table.uncovered().collect::<Vec<_>>(), vec![3]);

        // 3 is covered by both -11 and 01-, so only row dominance applies.
        assert!(table.column_dominance().is_none());
        let selection = table.row_dominance().unwrap();
        assert_eq!(pattern(&selection), "-11");
        assert_eq!(selection.rule(), SelectionRule::Row);
        assert_eq!(selection.removed(), &[3]);
        assert!(table.is_covered());
    }

    #[test]
    fn test_selection_display() {
        let function = LogicFunction::new([0, 1], [], 2).unwrap();
        let mut table = table(&function);
        let selection = table.column_dominance().unwrap();
        assert_eq!(
            selection.to_string(),
            "prime implicant 0- is essential, remove minterms 0 1 with column dominance"
        );
    }
}
