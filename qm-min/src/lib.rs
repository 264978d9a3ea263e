// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-level logic minimization with the Quine-McCluskey method.
//!
//! Minterms and don't-cares are merged generation by generation into prime implicants, which are
//! then selected out of a coverage table using column and row dominance.
//!
//! ```
//! use qm_min::{LogicFunction, Minimizer};
//!
//! let function = LogicFunction::new([0, 1, 2, 5, 7, 8, 9, 10, 13, 15], [], 4).unwrap();
//! let expression = Minimizer::default().minimize(&function).unwrap();
//! assert_eq!(expression.term_strings(), vec!["B'D'", "BD", "C'D"]);
//! ```

pub mod cover;
pub mod cube;
pub mod errors;
pub mod expression;
pub mod logic_function;
pub mod minimize;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod select;
pub mod table;
pub mod trace;

pub use errors::MinimizeError;
pub use expression::{Expression, Term};
pub use logic_function::LogicFunction;
pub use minimize::{minimize, MinimizeOptions, Minimizer};
