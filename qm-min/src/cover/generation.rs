// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{GenerationDisplay, Implicant},
    errors::MinimizeError,
    logic_function::LogicFunction,
};
use bitvec::slice::BitSlice;

/// One round of merging: a set of distinct implicants that all have the same number of dashes.
///
/// Elements are kept sorted by cube, and no two elements share a cube.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    index: usize,
    elements: Vec<Implicant>,
}

impl Generation {
    /// Creates generation 0: one implicant per minterm and don't-care.
    pub fn seed(function: &LogicFunction) -> Result<Self, MinimizeError> {
        let width = function.variable_count();
        let elements = function
            .seed_values()
            .map(|value| Implicant::from_value(value, width))
            .collect::<Result<Vec<_>, _>>()?;
        // seed_values is ascending and duplicate-free, so this is already sorted by cube.
        Ok(Self { index: 0, elements })
    }

    /// Builds a generation out of merge candidates, collapsing duplicate cubes. The first
    /// candidate seen for a cube is kept.
    pub(crate) fn from_candidates(index: usize, mut candidates: Vec<Implicant>) -> Self {
        // sort_by is stable, and dedup_by keeps the earlier element.
        candidates.sort_by(|a, b| a.cube().cmp(b.cube()));
        candidates.dedup_by(|later, earlier| later.cube() == earlier.cube());
        Self {
            index,
            elements: candidates,
        }
    }

    /// The number of merge rounds that produced this generation. Every element has this many
    /// dashes.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn elements(&self) -> &[Implicant] {
        &self.elements
    }

    /// Returns the elements which are flagged as prime.
    pub fn primes(&self) -> impl Iterator<Item = &Implicant> + '_ {
        self.elements.iter().filter(|elem| elem.is_prime())
    }

    #[inline]
    pub fn display(&self) -> GenerationDisplay<'_> {
        GenerationDisplay::new(self)
    }

    /// Flags every element that didn't take part in any merge as prime.
    pub(crate) fn mark_primes(&mut self, merged: &BitSlice) {
        debug_assert_eq!(merged.len(), self.elements.len());
        for (elem, was_merged) in self.elements.iter_mut().zip(merged.iter().by_vals()) {
            elem.set_prime(!was_merged);
        }
    }

    /// Consumes the generation, returning its prime elements.
    pub(crate) fn into_primes(self) -> impl Iterator<Item = Implicant> {
        self.elements.into_iter().filter(|elem| elem.is_prime())
    }
}
