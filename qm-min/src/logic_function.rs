// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::check_width, errors::MinimizeError};
use std::collections::BTreeSet;

/// A single-output Boolean function given by its on-set and don't-care set.
///
/// Values present in both sets are treated as don't-cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicFunction {
    on_set: BTreeSet<u32>,
    dc_set: BTreeSet<u32>,
    variable_count: usize,
}

impl LogicFunction {
    /// Validates and creates a new function.
    ///
    /// Returns an error if `variable_count` is out of range, or if any value needs more than
    /// `variable_count` bits.
    pub fn new(
        on_set: impl IntoIterator<Item = u32>,
        dc_set: impl IntoIterator<Item = u32>,
        variable_count: usize,
    ) -> Result<Self, MinimizeError> {
        check_width(variable_count)?;

        let dc_set: BTreeSet<u32> = dc_set.into_iter().collect();
        let mut on_set: BTreeSet<u32> = on_set.into_iter().collect();
        if let Some(&value) = on_set
            .iter()
            .chain(&dc_set)
            .find(|&&value| u64::from(value) >> variable_count != 0)
        {
            return Err(MinimizeError::InvalidWidth {
                value,
                variable_count,
            });
        }

        on_set.retain(|value| !dc_set.contains(value));

        Ok(Self {
            on_set,
            dc_set,
            variable_count,
        })
    }

    /// The values that must be covered, with don't-cares removed.
    #[inline]
    pub fn on_set(&self) -> &BTreeSet<u32> {
        &self.on_set
    }

    #[inline]
    pub fn dc_set(&self) -> &BTreeSet<u32> {
        &self.dc_set
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Returns true if no value needs to be covered, i.e. this is the constant-0 function.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.on_set.is_empty()
    }

    /// All values that take part in merging: the on-set and the don't-cares, ascending.
    pub fn seed_values(&self) -> impl Iterator<Item = u32> + '_ {
        itertools::merge(&self.on_set, &self.dc_set).copied()
    }

    /// Returns true if `value` is in the on-set.
    #[inline]
    pub fn is_on(&self, value: u32) -> bool {
        self.on_set.contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let function = LogicFunction::new([1, 3, 5, 3], [5, 7], 3).unwrap();
        assert_eq!(function.on_set().iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(function.dc_set().iter().copied().collect::<Vec<_>>(), vec![5, 7]);
        assert_eq!(function.seed_values().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
        assert!(!function.is_zero());
        assert!(function.is_on(3));
        assert!(!function.is_on(5));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            LogicFunction::new([0, 8], [], 3),
            Err(MinimizeError::InvalidWidth {
                value: 8,
                variable_count: 3
            })
        );
        assert_eq!(
            LogicFunction::new([0], [16], 4),
            Err(MinimizeError::InvalidWidth {
                value: 16,
                variable_count: 4
            })
        );
        assert!(matches!(
            LogicFunction::new([0], [], 0),
            Err(MinimizeError::InvalidVariableCount { .. })
        ));
    }

    #[test]
    fn test_zero() {
        assert!(LogicFunction::new([], [], 2).unwrap().is_zero());
        assert!(LogicFunction::new([], [1, 2], 2).unwrap().is_zero());
        // Every minterm is also a don't-care.
        assert!(LogicFunction::new([1], [1], 2).unwrap().is_zero());
    }
}
