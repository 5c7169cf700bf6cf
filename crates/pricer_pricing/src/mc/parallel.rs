//! Rayon-based parallel path generator.
//!
//! Paths are split into fixed-size tasks of [`PATHS_PER_TASK`] consecutive
//! paths. Task `k` owns the disjoint slice of the matrix holding its paths
//! and a private stream seeded with `derive_stream_seed(seed, k)`. Because
//! the task boundaries do not depend on the worker count, a pinned seed
//! reproduces the matrix on any machine.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use super::error::SimulationError;
use super::matrix::PathMatrix;
use super::paths::GbmStep;
use crate::rng::PricerRng;

/// Number of consecutive paths simulated by one task.
pub const PATHS_PER_TASK: usize = 256;

/// Fork-join generator running on a dedicated rayon pool.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::SimulationParameters;
/// use pricer_pricing::mc::{GbmStep, ParallelGenerator, PathMatrix};
///
/// let params = SimulationParameters::builder()
///     .asset_price(100.0)
///     .strike_price(100.0)
///     .time_to_expiration(1.0)
///     .volatility(0.2)
///     .interest_rate(0.05)
///     .num_paths(1_000)
///     .num_steps(12)
///     .build()
///     .unwrap();
///
/// let mut matrix = PathMatrix::zeros(12, 1_000);
/// ParallelGenerator::with_threads(2)
///     .generate(&GbmStep::new(&params), 42, &mut matrix)
///     .unwrap();
/// assert!(matrix.as_slice().iter().all(|&s| s > 0.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParallelGenerator {
    threads: Option<usize>,
}

impl ParallelGenerator {
    /// Creates a generator using rayon's default worker count.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with exactly `threads` workers.
    #[inline]
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
        }
    }

    /// Creates a generator from an optional worker count.
    #[inline]
    pub fn from_threads(threads: Option<usize>) -> Self {
        Self { threads }
    }

    /// Returns the configured worker count (`None` = rayon default).
    #[inline]
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns the number of tasks `num_paths` is split into.
    #[inline]
    pub fn num_tasks(num_paths: usize) -> usize {
        num_paths.div_ceil(PATHS_PER_TASK)
    }

    /// Fills `matrix` concurrently.
    ///
    /// Nothing is observable until every task has finished.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::ParallelBackendUnavailable` if the thread
    /// pool cannot be built or was configured with zero workers. The matrix
    /// is untouched in that case.
    pub fn generate(
        &self,
        step: &GbmStep,
        seed: u64,
        matrix: &mut PathMatrix,
    ) -> Result<(), SimulationError> {
        let (num_steps, num_paths) = matrix.shape();

        // rayon reads 0 as "default"; an explicit zero means no workers at all
        if self.threads == Some(0) {
            return Err(SimulationError::ParallelBackendUnavailable(
                "thread pool configured with zero workers".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .thread_name(|i| format!("gbm-worker-{}", i))
            .build()
            .map_err(|e| SimulationError::ParallelBackendUnavailable(e.to_string()))?;

        debug!(
            num_paths,
            num_steps,
            seed,
            workers = pool.current_num_threads(),
            tasks = Self::num_tasks(num_paths),
            "parallel generation started"
        );

        let task_len = (PATHS_PER_TASK * num_steps).max(1);
        let path_len = num_steps.max(1);

        pool.install(|| {
            matrix
                .as_mut_slice()
                .par_chunks_mut(task_len)
                .enumerate()
                .for_each(|(task, chunk)| {
                    let mut rng = PricerRng::for_stream(seed, task as u64);
                    for path in chunk.chunks_exact_mut(path_len) {
                        step.evolve_path(&mut rng, path);
                    }
                });
        });

        Ok(())
    }
}
