// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::Cube, errors::MinimizeError};
use std::collections::BTreeSet;

/// A cube together with the input values (minterms and don't-cares) merged into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Implicant {
    cube: Cube,
    covers: BTreeSet<u32>,
    is_prime: bool,
}

impl Implicant {
    /// Creates the implicant for a single input value.
    pub fn from_value(value: u32, width: usize) -> Result<Self, MinimizeError> {
        let cube = Cube::from_value(value, width)?;
        Ok(Self {
            cube,
            covers: BTreeSet::from([value]),
            is_prime: false,
        })
    }

    #[inline]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// The input values this implicant was built from, ascending.
    #[inline]
    pub fn covers(&self) -> &BTreeSet<u32> {
        &self.covers
    }

    #[inline]
    pub fn is_prime(&self) -> bool {
        self.is_prime
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.cube.degree()
    }

    /// Merges two implicants whose cubes are adjacent. The result covers the union of both
    /// covered sets.
    pub fn merge(&self, other: &Implicant) -> Option<Implicant> {
        let cube = self.cube.merge(&other.cube)?;
        let covers = self.covers.union(&other.covers).copied().collect();
        Some(Implicant {
            cube,
            covers,
            is_prime: false,
        })
    }

    #[inline]
    pub(crate) fn set_prime(&mut self, is_prime: bool) {
        self.is_prime = is_prime;
    }
}
