// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::Generation,
    errors::MinimizeError,
    expression::Expression,
    logic_function::LogicFunction,
    primes::MergeEngine,
    select::CoverSelector,
    table::PrimeTable,
    trace::{NoTrace, TraceLog, TraceSink},
};
use log::debug;
use once_cell::sync::Lazy;
use std::{num::NonZeroUsize, thread};

static DEFAULT_WORKERS: Lazy<NonZeroUsize> =
    Lazy::new(|| thread::available_parallelism().unwrap_or(NonZeroUsize::MIN));

/// Generations with fewer elements than this are merged on the calling thread.
const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Options for a [`Minimizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimizeOptions {
    workers: NonZeroUsize,
    parallel_threshold: usize,
    max_generations: Option<usize>,
}

impl MinimizeOptions {
    /// Sets the number of worker threads used to compare pairs within a generation.
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the generation size below which merging stays on the calling thread.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Caps the number of merge rounds. Reaching the cap fails with
    /// [`MinimizeError::NonConvergent`].
    ///
    /// With `n` variables merging never takes more than `n + 1` rounds, so this only matters as an
    /// outer bound on work.
    pub fn with_max_generations(mut self, max_generations: Option<usize>) -> Self {
        self.max_generations = max_generations;
        self
    }

    #[inline]
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    #[inline]
    pub fn max_generations(&self) -> Option<usize> {
        self.max_generations
    }
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            workers: *DEFAULT_WORKERS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_generations: None,
        }
    }
}

/// Minimizes single-output functions into sum-of-products form.
#[derive(Clone, Debug, Default)]
pub struct Minimizer {
    options: MinimizeOptions,
}

impl Minimizer {
    pub fn new(options: MinimizeOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &MinimizeOptions {
        &self.options
    }

    #[inline]
    pub fn minimize(&self, function: &LogicFunction) -> Result<Expression, MinimizeError> {
        self.minimize_with_trace(function, &mut NoTrace)
    }

    /// Minimizes `function`, reporting every generation, table state and selection to `trace`.
    pub fn minimize_with_trace(
        &self,
        function: &LogicFunction,
        trace: &mut dyn TraceSink,
    ) -> Result<Expression, MinimizeError> {
        if function.is_zero() {
            debug!("no minterms to cover, returning the zero function");
            return Ok(Expression::Zero);
        }

        let seed = Generation::seed(function)?;
        debug!(
            "seeded {} values ({} minterms, {} don't-cares) over {} variables",
            seed.len(),
            function.on_set().len(),
            function.dc_set().len(),
            function.variable_count(),
        );

        let primes = MergeEngine::new(self.options).prime_implicants(seed, trace)?;
        debug!("found {} prime implicants", primes.len());

        let table = PrimeTable::new(primes, function);
        let selections = CoverSelector::new(table).run(trace);
        Ok(Expression::from_selections(
            selections,
            function.variable_count(),
        ))
    }
}

/// Minimizes the function with the given minterms and don't-cares.
///
/// With `trace_enabled`, every generation and table state is rendered through the `log` facade.
///
/// ```
/// use qm_min::minimize;
///
/// let expression = minimize(&[0, 1, 2, 5, 7, 8, 9, 10, 13, 15], &[], 4, false).unwrap();
/// assert_eq!(expression.to_string(), "B'D' + BD + C'D");
/// ```
pub fn minimize(
    minterms: &[u32],
    dont_cares: &[u32],
    variable_count: usize,
    trace_enabled: bool,
) -> Result<Expression, MinimizeError> {
    let function = LogicFunction::new(
        minterms.iter().copied(),
        dont_cares.iter().copied(),
        variable_count,
    )?;
    let minimizer = Minimizer::default();
    if trace_enabled {
        minimizer.minimize_with_trace(&function, &mut TraceLog::default())
    } else {
        minimizer.minimize(&function)
    }
}
