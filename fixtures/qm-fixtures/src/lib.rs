// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned minimization problems and a seeded random problem generator.

mod all;
mod value_generator;

pub use all::*;
pub use value_generator::*;
