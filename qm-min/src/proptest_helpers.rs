// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::logic_function::LogicFunction;
use proptest::prelude::*;

const DEFAULT_MAX_VARIABLES: usize = 6;

impl Arbitrary for LogicFunction {
    /// The largest variable count to generate. Defaults to 6.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let max_variables = params.unwrap_or(DEFAULT_MAX_VARIABLES).max(1);
        (1..=max_variables)
            .prop_flat_map(|variable_count| {
                // One slot per value: 0..=2 is off, 3..=5 is on, 6 is a don't-care.
                let slots = prop::collection::vec(0_u8..7, 1 << variable_count);
                (Just(variable_count), slots)
            })
            .prop_map(|(variable_count, slots)| {
                let on_set = slot_values(&slots, |slot| (3..=5).contains(&slot));
                let dc_set = slot_values(&slots, |slot| slot == 6);
                LogicFunction::new(on_set, dc_set, variable_count)
                    .expect("generated values should fit in the variable count")
            })
            .boxed()
    }
}

fn slot_values(slots: &[u8], pred: impl Fn(u8) -> bool) -> Vec<u32> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, &slot)| pred(slot))
        .map(|(value, _)| value as u32)
        .collect()
}
