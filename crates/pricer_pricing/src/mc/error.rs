//! Error types for the Monte Carlo engine.

use std::collections::TryReserveError;

use pricer_core::types::PricingError;
use thiserror::Error;

use super::export::ExportError;

/// Errors raised while running or reading a simulation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationError;
///
/// let err = SimulationError::NoResults;
/// assert!(err.to_string().contains("no results"));
/// ```
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Parameter validation or aggregation failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The rayon thread pool could not be created.
    #[error("Parallel backend unavailable: {0}")]
    ParallelBackendUnavailable(String),

    /// Path storage could not be allocated.
    #[error("Cannot allocate storage for {cells} simulated prices: {source}")]
    Allocation {
        /// Requested matrix cells.
        cells: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },

    /// Results were requested before a run completed.
    #[error("Simulation has no results: run it first")]
    NoResults,

    /// Writing the exported series failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}
