// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::value_generator::ValueGenerator;
use color_eyre::{eyre::eyre, Result};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use qm_min::LogicFunction;

/// A named minimization problem.
#[derive(Clone, Debug)]
pub struct Fixture {
    name: &'static str,
    description: &'static str,
    function: LogicFunction,
}

impl Fixture {
    fn new(
        name: &'static str,
        description: &'static str,
        minterms: impl IntoIterator<Item = u32>,
        dont_cares: impl IntoIterator<Item = u32>,
        variable_count: usize,
    ) -> Self {
        let function = LogicFunction::new(minterms, dont_cares, variable_count)
            .expect("canned fixtures are valid");
        Self {
            name,
            description,
            function,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[inline]
    pub fn function(&self) -> &LogicFunction {
        &self.function
    }
}

/// The seed used by the random fixture unless another one is given.
pub const DEFAULT_RANDOM_SEED: &str = "qm-min_random_6";

const RANDOM_VARIABLES: usize = 6;

pub struct AllFixtures {
    fixtures: Vec<Fixture>,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let fixtures = vec![
            Fixture::new(
                "textbook",
                "4-variable textbook example",
                [0, 1, 2, 5, 7, 8, 9, 10, 13, 15],
                [],
                4,
            ),
            Fixture::new(
                "dont-cares",
                "8-variable function with don't-care terms",
                [2, 4, 6, 8, 10, 12, 32, 128],
                [3, 5],
                8,
            ),
            Self::random(DEFAULT_RANDOM_SEED),
            Fixture::new(
                "stress",
                "every value of a 12-variable function",
                0..4096,
                [],
                12,
            ),
        ];
        Self { fixtures }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fixture> + '_ {
        self.fixtures.iter()
    }

    /// Looks up a canned fixture by name.
    pub fn fixture(&self, name: &str) -> Result<&Fixture> {
        self.fixtures
            .iter()
            .find(|fixture| fixture.name == name)
            .ok_or_else(|| eyre!("unknown fixture {:?}", name))
    }

    /// Generates a random 6-variable function. The same seed always gives the same function.
    pub fn random(seed: &str) -> Fixture {
        let mut value_gen = ValueGenerator::from_seed(seed);
        let function =
            value_gen.generate(any_with::<LogicFunction>(Some(RANDOM_VARIABLES)).prop_filter(
                "need the full variable count",
                |function| function.variable_count() == RANDOM_VARIABLES,
            ));
        Fixture {
            name: "random",
            description: "seeded random 6-variable function",
            function,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures() {
        let all = AllFixtures::get();
        assert_eq!(
            all.iter().map(|fixture| fixture.name()).collect::<Vec<_>>(),
            vec!["textbook", "dont-cares", "random", "stress"]
        );
        assert_eq!(all.fixture("stress").unwrap().function().on_set().len(), 4096);
        assert!(all.fixture("missing").is_err());
    }

    #[test]
    fn test_random_is_seeded() {
        let a = AllFixtures::random("seed");
        let b = AllFixtures::random("seed");
        assert_eq!(a.function(), b.function());
        assert_eq!(a.function().variable_count(), RANDOM_VARIABLES);
    }
}
