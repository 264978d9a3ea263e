// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors returned by minimization.
///
/// All input validation happens before any merging work starts, so an error never comes with a
/// partial result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    /// A minterm or don't-care does not fit in `variable_count` bits.
    #[error("value {value} does not fit in {variable_count} variables")]
    InvalidWidth { value: u32, variable_count: usize },

    /// The variable count is zero or larger than the supported maximum.
    #[error("variable count {variable_count} must be in range 1..={max}")]
    InvalidVariableCount { variable_count: usize, max: usize },

    /// A textual cube pattern contained something other than `0`, `1` or `-`.
    #[error("invalid cube pattern {pattern:?}")]
    InvalidPattern { pattern: String },

    /// Growing the buffer for a generation failed.
    #[error("allocation failed while merging generation {generation}")]
    AllocationFailure { generation: usize },

    /// The configured generation cap was reached before merging converged.
    #[error("merging did not converge within {generations} generations")]
    NonConvergent { generations: usize },
}
