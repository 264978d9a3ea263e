// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Generates values from proptest strategies, deterministically for a given seed.
#[derive(Debug)]
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator whose output depends only on `seed`.
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Self {
        // ChaCha wants a 32-byte seed: hash the input four times with different keys.
        let mut seed_bytes = [0_u8; 32];
        for (key, chunk) in seed_bytes.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(key as u64);
            hasher.write(seed.as_ref());
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }

        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &seed_bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Generates one value from `strategy`.
    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("creating a new value tree should succeed")
            .current()
    }
}
