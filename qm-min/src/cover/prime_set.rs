// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Implicant, cube::Cube};
use std::collections::{btree_map, BTreeMap};

/// The prime implicants accumulated across all generations, keyed and ordered by cube.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrimeSet {
    elements: BTreeMap<Cube, Implicant>,
}

impl PrimeSet {
    /// Adds a prime implicant. Returns false if one with the same cube was already present, in
    /// which case the existing entry is kept.
    pub fn insert(&mut self, implicant: Implicant) -> bool {
        match self.elements.entry(implicant.cube().clone()) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(entry) => {
                entry.insert(implicant);
                true
            }
        }
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
    pub fn contains(&self, cube: &Cube) -> bool {
        self.elements.contains_key(cube)
    }

    /// Iterates over the primes in cube order.
    pub fn iter(&self) -> impl Iterator<Item = &Implicant> + '_ {
        self.elements.values()
    }
}

impl Extend<Implicant> for PrimeSet {
    fn extend<T: IntoIterator<Item = Implicant>>(&mut self, iter: T) {
        for implicant in iter {
            self.insert(implicant);
        }
    }
}

impl IntoIterator for PrimeSet {
    type Item = Implicant;
    type IntoIter = btree_map::IntoValues<Cube, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_values()
    }
}
