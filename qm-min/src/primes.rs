// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{Generation, Implicant, PrimeSet},
    errors::MinimizeError,
    minimize::MinimizeOptions,
    trace::TraceSink,
};
use bitvec::prelude::*;
use log::debug;
use std::{collections::TryReserveError, panic, thread, time::Instant};

/// Computes prime implicants by repeatedly merging adjacent cubes.
#[derive(Clone, Debug)]
pub struct MergeEngine {
    options: MinimizeOptions,
}

impl MergeEngine {
    pub fn new(options: MinimizeOptions) -> Self {
        Self { options }
    }

    /// Runs merge rounds starting from `seed` until a round produces no merged cubes, and returns
    /// every prime implicant found along the way.
    pub fn prime_implicants(
        &self,
        seed: Generation,
        trace: &mut dyn TraceSink,
    ) -> Result<PrimeSet, MinimizeError> {
        let mut primes = PrimeSet::default();
        let mut current = seed;

        loop {
            if let Some(max_generations) = self.options.max_generations() {
                if current.index() >= max_generations {
                    return Err(MinimizeError::NonConvergent {
                        generations: current.index(),
                    });
                }
            }

            let start = Instant::now();
            let next = self.merge_round(&mut current)?;
            debug!(
                "merging {} sets in generation {} took {:.2?}: {} merged, {} prime",
                current.len(),
                current.index(),
                start.elapsed(),
                next.len(),
                current.primes().count(),
            );
            trace.generation(&current);

            let terminal = next.is_empty();
            primes.extend(std::mem::replace(&mut current, next).into_primes());
            if terminal {
                return Ok(primes);
            }
        }
    }

    /// Merges every compatible pair in `generation`, flags the elements that merged with nothing
    /// as prime, and returns the next generation.
    ///
    /// The pair scan is split across the configured number of worker threads. Each worker keeps
    /// its own candidates; duplicates are collapsed once every worker is done.
    pub fn merge_round(&self, generation: &mut Generation) -> Result<Generation, MinimizeError> {
        let elements = generation.elements();
        let len = elements.len();
        let workers = self.worker_count(len);

        let scans: Vec<Result<PairScan, TryReserveError>> = if workers == 1 {
            vec![PairScan::run(elements, 0, 1)]
        } else {
            thread::scope(|scope| {
                let handles: Vec<_> = (0..workers)
                    .map(|start| scope.spawn(move || PairScan::run(elements, start, workers)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|payload| panic::resume_unwind(payload))
                    })
                    .collect()
            })
        };
        let index = generation.index();
        let allocation_failure = |_: TryReserveError| MinimizeError::AllocationFailure {
            generation: index,
        };
        let scans = scans
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(allocation_failure)?;

        let candidate_count = scans.iter().map(|scan| scan.candidates.len()).sum();
        let mut candidates = Vec::new();
        candidates
            .try_reserve_exact(candidate_count)
            .map_err(allocation_failure)?;
        let mut merged = bitvec![0; len];
        for scan in scans {
            for ix in scan.merged.iter_ones() {
                merged.set(ix, true);
            }
            candidates.extend(scan.candidates);
        }

        generation.mark_primes(&merged);
        Ok(Generation::from_candidates(
            generation.index() + 1,
            candidates,
        ))
    }

    fn worker_count(&self, len: usize) -> usize {
        if len < self.options.parallel_threshold() {
            1
        } else {
            self.options.workers().get().min(len).max(1)
        }
    }
}

/// The output of one worker: the merged cubes it found, and which elements took part in a merge.
struct PairScan {
    candidates: Vec<Implicant>,
    merged: BitVec,
}

impl PairScan {
    /// Compares element `i` against every later element, for `i` in `start, start + step, ...`.
    ///
    /// Rows near the start have the most pairs, so striding keeps the workers balanced. Growing the
    /// candidate buffer is fallible.
    fn run(elements: &[Implicant], start: usize, step: usize) -> Result<Self, TryReserveError> {
        let mut candidates = Vec::new();
        let mut merged = bitvec![0; elements.len()];

        for i in (start..elements.len()).step_by(step) {
            for j in (i + 1)..elements.len() {
                if let Some(implicant) = elements[i].merge(&elements[j]) {
                    merged.set(i, true);
                    merged.set(j, true);
                    candidates.try_reserve(1)?;
                    candidates.push(implicant);
                }
            }
        }

        Ok(Self { candidates, merged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cube::Cube, logic_function::LogicFunction, trace::NoTrace};
    use std::num::NonZeroUsize;
    use test_log::test;

    fn cubes<'a>(implicants: impl IntoIterator<Item = &'a Implicant>) -> Vec<String> {
        implicants
            .into_iter()
            .map(|elem| elem.cube().to_string())
            .collect()
    }

    fn textbook() -> LogicFunction {
        LogicFunction::new([0, 1, 2, 5, 7, 8, 9, 10, 13, 15], [], 4).unwrap()
    }

    #[test]
    fn test_merge_round() {
        let engine = MergeEngine::new(MinimizeOptions::default());
        let mut generation = Generation::seed(&textbook()).unwrap();
        let next = engine.merge_round(&mut generation).unwrap();

        assert_eq!(next.index(), 1);
        assert_eq!(
            cubes(next.elements()),
            vec![
                "-000", "-001", "-010", "-101", "-111", "0-01", "00-0", "000-", "01-1", "1-01",
                "10-0", "100-", "11-1",
            ]
        );
        assert_eq!(generation.primes().count(), 0, "every minterm merges");
        assert_eq!(
            next.elements()[0].covers().iter().copied().collect::<Vec<_>>(),
            vec![0, 8]
        );
    }

    #[test]
    fn test_prime_implicants() {
        let engine = MergeEngine::new(MinimizeOptions::default());
        let seed = Generation::seed(&textbook()).unwrap();
        let primes = engine.prime_implicants(seed, &mut NoTrace).unwrap();
        assert_eq!(cubes(primes.iter()), vec!["--01", "-0-0", "-00-", "-1-1"]);
        assert!(primes.iter().all(|prime| prime.is_prime()));
    }

    #[test]
    fn test_primes_across_generations() {
        // 0 and 1 merge, 7 is isolated, so primes come from generations 0 and 1.
        let function = LogicFunction::new([0, 1, 7], [], 3).unwrap();
        let engine = MergeEngine::new(MinimizeOptions::default());
        let primes = engine
            .prime_implicants(Generation::seed(&function).unwrap(), &mut NoTrace)
            .unwrap();
        assert_eq!(cubes(primes.iter()), vec!["00-", "111"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let function = LogicFunction::new((0..64).filter(|v| v % 3 != 0), [3, 9], 6).unwrap();
        let sequential = MergeEngine::new(
            MinimizeOptions::default().with_workers(NonZeroUsize::new(1).unwrap()),
        );
        let parallel = MergeEngine::new(
            MinimizeOptions::default()
                .with_workers(NonZeroUsize::new(4).unwrap())
                .with_parallel_threshold(0),
        );

        let a = sequential
            .prime_implicants(Generation::seed(&function).unwrap(), &mut NoTrace)
            .unwrap();
        let b = parallel
            .prime_implicants(Generation::seed(&function).unwrap(), &mut NoTrace)
            .unwrap();
        assert_eq!(a, b, "worker count does not change the primes");
    }

    #[test]
    fn test_pair_scan_strided() {
        let generation = Generation::seed(&textbook()).unwrap();
        let elements = generation.elements();
        let whole = PairScan::run(elements, 0, 1).unwrap();

        // Splitting the rows across three workers finds the same merges.
        let parts: Vec<_> = (0..3)
            .map(|start| PairScan::run(elements, start, 3).unwrap())
            .collect();
        let part_count: usize = parts.iter().map(|scan| scan.candidates.len()).sum();
        assert_eq!(part_count, whole.candidates.len());
        let mut merged = bitvec![0; elements.len()];
        for scan in &parts {
            for ix in scan.merged.iter_ones() {
                merged.set(ix, true);
            }
        }
        assert_eq!(merged, whole.merged);
        assert!(whole.merged.all(), "every minterm merges");
    }

    #[test]
    fn test_non_convergent() {
        let engine = MergeEngine::new(MinimizeOptions::default().with_max_generations(Some(2)));
        let seed = Generation::seed(&textbook()).unwrap();
        assert_eq!(
            engine.prime_implicants(seed, &mut NoTrace),
            Err(MinimizeError::NonConvergent { generations: 2 })
        );
    }

    #[test]
    fn test_single_minterm() {
        let function = LogicFunction::new([0], [], 1).unwrap();
        let engine = MergeEngine::new(MinimizeOptions::default());
        let primes = engine
            .prime_implicants(Generation::seed(&function).unwrap(), &mut NoTrace)
            .unwrap();
        assert_eq!(primes.len(), 1);
        assert!(primes.contains(&Cube::from_pattern("0").unwrap()));
    }
}
