// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod display;
mod generation;
mod implicant;
mod prime_set;

pub use display::*;
pub use generation::*;
pub use implicant::*;
pub use prime_set::*;
