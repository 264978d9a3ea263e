// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::MinimizeError;
use arrayvec::ArrayVec;
use std::{borrow::Cow, fmt};

/// The largest supported number of variables. Each variable is rendered as a single letter.
pub const MAX_VARIABLES: usize = 26;

/// A ternary pattern over `{0, 1, -}`.
///
/// Position 0 is the most significant bit. `None` is a dash, which stands for both values of that
/// variable. Cubes order lexicographically with `-` < `0` < `1`, the same order their matrix
/// rendering sorts in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Cube {
    bits: ArrayVec<Option<bool>, MAX_VARIABLES>,
}

impl Cube {
    /// Creates a cube for a single value: its binary expansion, zero-padded to `width` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_min::cube::Cube;
    ///
    /// let cube = Cube::from_value(5, 4).unwrap();
    /// assert_eq!(cube.matrix_display().to_string(), "0101");
    /// ```
    ///
    /// Values that don't fit are rejected rather than truncated.
    ///
    /// ```
    /// use qm_min::{cube::Cube, errors::MinimizeError};
    ///
    /// assert_eq!(
    ///     Cube::from_value(16, 4),
    ///     Err(MinimizeError::InvalidWidth { value: 16, variable_count: 4 }),
    /// );
    /// ```
    pub fn from_value(value: u32, width: usize) -> Result<Self, MinimizeError> {
        check_width(width)?;
        if u64::from(value) >> width != 0 {
            return Err(MinimizeError::InvalidWidth {
                value,
                variable_count: width,
            });
        }

        let bits = (0..width)
            .rev()
            .map(|shift| Some((value >> shift) & 1 == 1))
            .collect();
        Ok(Self { bits })
    }

    /// Parses a pattern such as `"01-0"`.
    pub fn from_pattern(pattern: &str) -> Result<Self, MinimizeError> {
        let invalid = || MinimizeError::InvalidPattern {
            pattern: pattern.to_owned(),
        };

        let mut bits = ArrayVec::new();
        for ch in pattern.chars() {
            let bit = match ch {
                '0' => Some(false),
                '1' => Some(true),
                '-' => None,
                _ => return Err(invalid()),
            };
            bits.try_push(bit).map_err(|_| invalid())?;
        }
        if bits.is_empty() {
            return Err(invalid());
        }

        Ok(Self { bits })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn bits(&self) -> &[Option<bool>] {
        &self.bits
    }

    /// The number of dashes in this cube.
    pub fn degree(&self) -> usize {
        self.bits.iter().filter(|bit| bit.is_none()).count()
    }

    /// Returns the position at which `self` and `other` can be merged, if any.
    ///
    /// The cubes must differ in exactly one position, and both must have a value (not a dash)
    /// there. Every dash position must line up.
    pub fn merge_position(&self, other: &Cube) -> Option<usize> {
        if self.width() != other.width() {
            return None;
        }

        let mut position = None;
        for (ix, (&c, &d)) in self.bits.iter().zip(&other.bits).enumerate() {
            if c == d {
                continue;
            }
            match (c, d, position) {
                (Some(_), Some(_), None) => position = Some(ix),
                // A second difference, or a dash facing a value.
                _ => return None,
            }
        }
        position
    }

    /// Merges two adjacent cubes into the cube that covers both of them.
    ///
    /// ```
    /// use qm_min::cube::Cube;
    ///
    /// let a = Cube::from_pattern("0-01").unwrap();
    /// let b = Cube::from_pattern("0-11").unwrap();
    /// assert_eq!(a.merge(&b), Some(Cube::from_pattern("0--1").unwrap()));
    /// ```
    pub fn merge(&self, other: &Cube) -> Option<Cube> {
        self.merge_position(other).map(|ix| {
            let mut bits = self.bits.clone();
            bits[ix] = None;
            Cube { bits }
        })
    }

    /// Returns true if `value` is one of the values this cube expands to.
    pub fn contains_value(&self, value: u32) -> bool {
        if u64::from(value) >> self.width() != 0 {
            return false;
        }
        self.bits
            .iter()
            .rev()
            .enumerate()
            .all(|(shift, &bit)| match bit {
                Some(b) => ((value >> shift) & 1 == 1) == b,
                None => true,
            })
    }

    /// Expands every dash, returning the covered values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        let base = self
            .bits
            .iter()
            .fold(0_u32, |acc, &bit| (acc << 1) | u32::from(bit == Some(true)));
        // Least significant dash first, so that counting up yields ascending values.
        let dash_masks: ArrayVec<u32, MAX_VARIABLES> = self
            .bits
            .iter()
            .rev()
            .enumerate()
            .filter_map(|(shift, bit)| bit.is_none().then(|| 1_u32 << shift))
            .collect();

        (0..1_u32 << dash_masks.len()).map(move |ix| {
            dash_masks
                .iter()
                .enumerate()
                .fold(base, |acc, (k, &mask)| {
                    if (ix >> k) & 1 == 1 {
                        acc | mask
                    } else {
                        acc
                    }
                })
        })
    }

    #[inline]
    pub fn matrix_display(&self) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CubeAlgebraicDisplay<'_> {
        CubeAlgebraicDisplay::new(self)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.matrix_display())
    }
}

pub(crate) fn check_width(width: usize) -> Result<(), MinimizeError> {
    if width == 0 || width > MAX_VARIABLES {
        return Err(MinimizeError::InvalidVariableCount {
            variable_count: width,
            max: MAX_VARIABLES,
        });
    }
    Ok(())
}

/// Displays a cube as a pattern such as `01-0`.
pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    internal_separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            internal_separator: Cow::Borrowed(""),
        }
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.cube.width();
        for (ix, &bit) in self.cube.bits.iter().enumerate() {
            let ch = match bit {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", ch)?;
            if ix < width - 1 {
                write!(f, "{}", self.internal_separator)?;
            }
        }
        Ok(())
    }
}

/// Displays a cube as a product term such as `A'BD'`.
///
/// Only the last `variable_count` positions are rendered; any positions before them are padding.
/// Letters are assigned from `A` starting at the first rendered position. A dash contributes
/// nothing, so a cube made entirely of dashes renders as the empty string.
pub struct CubeAlgebraicDisplay<'a> {
    cube: &'a Cube,
    variable_count: usize,
}

impl<'a> CubeAlgebraicDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            variable_count: cube.width(),
        }
    }

    /// Sets the number of meaningful trailing positions. Values larger than the cube's width are
    /// clamped to it.
    pub fn with_variable_count(mut self, variable_count: usize) -> Self {
        self.variable_count = variable_count.min(self.cube.width());
        self
    }
}

impl<'a> fmt::Display for CubeAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let start = self.cube.width() - self.variable_count;
        for (letter_ix, &bit) in self.cube.bits[start..].iter().enumerate() {
            let symbol = VARIABLE_SYMBOLS[letter_ix];
            match bit {
                Some(true) => write!(f, "{}", symbol)?,
                Some(false) => write!(f, "{}{}", symbol, NEGATION_MARKER)?,
                None => {}
            }
        }
        Ok(())
    }
}

const NEGATION_MARKER: char = '\'';

const VARIABLE_SYMBOLS: [char; MAX_VARIABLES] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cube(pattern: &str) -> Cube {
        Cube::from_pattern(pattern).unwrap()
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Cube::from_value(0, 1).unwrap(), cube("0"));
        assert_eq!(Cube::from_value(10, 4).unwrap(), cube("1010"));
        assert_eq!(Cube::from_value(10, 6).unwrap(), cube("001010"));
        assert_eq!(
            Cube::from_value(5, 3).unwrap().bits(),
            &[Some(true), Some(false), Some(true)]
        );
        assert_eq!(cube("1-0").bits(), &[Some(true), None, Some(false)]);
        assert_eq!(
            Cube::from_value((1 << MAX_VARIABLES) - 1, MAX_VARIABLES)
                .unwrap()
                .degree(),
            0
        );
    }

    #[test]
    fn test_from_value_invalid() {
        assert_eq!(
            Cube::from_value(8, 3),
            Err(MinimizeError::InvalidWidth {
                value: 8,
                variable_count: 3
            })
        );
        assert!(matches!(
            Cube::from_value(0, 0),
            Err(MinimizeError::InvalidVariableCount { .. })
        ));
        assert!(matches!(
            Cube::from_value(0, MAX_VARIABLES + 1),
            Err(MinimizeError::InvalidVariableCount { .. })
        ));
    }

    #[test]
    fn test_from_pattern_invalid() {
        let too_long = "0".repeat(MAX_VARIABLES + 1);
        for pattern in ["", "01x", "0 1", too_long.as_str()] {
            assert!(
                matches!(
                    Cube::from_pattern(pattern),
                    Err(MinimizeError::InvalidPattern { .. })
                ),
                "pattern {:?} is rejected",
                pattern
            );
        }
    }

    #[test]
    fn test_merge_position() {
        assert_eq!(cube("0000").merge_position(&cube("0001")), Some(3));
        assert_eq!(cube("0100").merge_position(&cube("1100")), Some(0));
        assert_eq!(cube("0-00").merge_position(&cube("0-10")), Some(2));

        // Two differences.
        assert_eq!(cube("0000").merge_position(&cube("0011")), None);
        // Identical cubes don't merge.
        assert_eq!(cube("01-1").merge_position(&cube("01-1")), None);
        // Dash against a value.
        assert_eq!(cube("0-01").merge_position(&cube("0001")), None);
        assert_eq!(cube("0-01").merge_position(&cube("00-1")), None);
        // Width mismatch.
        assert_eq!(cube("01").merge_position(&cube("011")), None);
    }

    #[test]
    fn test_values() {
        assert_eq!(cube("0101").values().collect::<Vec<_>>(), vec![5]);
        assert_eq!(cube("-00-").values().collect::<Vec<_>>(), vec![0, 1, 8, 9]);
        assert_eq!(
            cube("--1").values().collect::<Vec<_>>(),
            vec![1, 3, 5, 7]
        );

        let c = cube("1-0-");
        for value in 0..16 {
            assert_eq!(
                c.contains_value(value),
                c.values().any(|v| v == value),
                "contains_value agrees with expansion for {}",
                value
            );
        }
        assert!(!c.contains_value(16 + 8));
    }

    #[test]
    fn test_ordering() {
        let mut cubes = vec![cube("10"), cube("-1"), cube("0-"), cube("1-"), cube("--")];
        cubes.sort();
        let rendered: Vec<_> = cubes.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["--", "-1", "0-", "1-", "10"]);
    }

    #[test]
    fn test_matrix_display() {
        let c = cube("1-0");
        assert_eq!(c.matrix_display().to_string(), "1-0");
        assert_eq!(
            c.matrix_display().with_internal_separator(" ").to_string(),
            "1 - 0"
        );
    }

    #[test]
    fn test_algebraic_display() {
        assert_eq!(cube("0101").algebraic_display().to_string(), "A'BC'D");
        assert_eq!(cube("-0-0").algebraic_display().to_string(), "B'D'");
        assert_eq!(cube("----").algebraic_display().to_string(), "");
        assert_eq!(cube("0").algebraic_display().to_string(), "A'");

        // Leading padding positions are skipped and lettering restarts at A.
        let padded = cube("00-1");
        assert_eq!(
            padded
                .algebraic_display()
                .with_variable_count(2)
                .to_string(),
            "B"
        );
        assert_eq!(
            padded
                .algebraic_display()
                .with_variable_count(3)
                .to_string(),
            "A'C"
        );
    }

    fn arb_cube_pair() -> impl Strategy<Value = (Cube, Cube)> {
        (1..=8_usize).prop_flat_map(|width| {
            let bits = prop::collection::vec(any::<Option<bool>>(), width);
            (bits.clone(), bits).prop_map(|(a, b)| {
                let a = Cube {
                    bits: a.into_iter().collect(),
                };
                let b = Cube {
                    bits: b.into_iter().collect(),
                };
                (a, b)
            })
        })
    }

    proptest! {
        #[test]
        fn proptest_merge_symmetric((a, b) in arb_cube_pair()) {
            prop_assert_eq!(a.merge(&b), b.merge(&a), "merge is symmetric");
            if let Some(merged) = a.merge(&b) {
                prop_assert_eq!(merged.degree(), a.degree() + 1);
                for value in a.values().chain(b.values()) {
                    prop_assert!(merged.contains_value(value));
                }
            }
        }

        #[test]
        fn proptest_algebraic_display_idempotent((a, _b) in arb_cube_pair()) {
            prop_assert_eq!(
                a.algebraic_display().to_string(),
                a.algebraic_display().to_string()
            );
        }
    }
}
