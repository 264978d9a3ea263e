// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cover::Generation;
use std::fmt;

/// Displays a generation as a group listing: one line per element with its cube, the values it
/// covers, and its prime flag.
///
/// ```text
/// Group 1:
///     Set 0:  -000|   0   8 |  0
///     Set 1:  00-0|   0   2 |  1
/// ```
#[derive(Clone, Debug)]
pub struct GenerationDisplay<'a> {
    generation: &'a Generation,
    label_index: usize,
}

impl<'a> GenerationDisplay<'a> {
    pub fn new(generation: &'a Generation) -> Self {
        Self {
            generation,
            label_index: generation.index(),
        }
    }

    /// Sets the number printed after `Group`. Defaults to the generation index.
    pub fn with_label_index(mut self, label_index: usize) -> Self {
        self.label_index = label_index;
        self
    }
}

impl<'a> fmt::Display for GenerationDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Group {}:", self.label_index)?;
        for (ix, elem) in self.generation.elements().iter().enumerate() {
            write!(f, "    Set{:2}:  {}| ", ix, elem.cube())?;
            for value in elem.covers() {
                write!(f, "{:3} ", value)?;
            }
            writeln!(f, "|{:3}", u8::from(elem.is_prime()))?;
        }
        Ok(())
    }
}
