//! Simulation run lifecycle.
//!
//! ```text
//! Configured ──run──> Running ──> ResultsReady ──export_csv──> Exported
//!     ^                                │                           │
//!     └──────────────clear─────────────┴───────────────────────────┘
//! ```
//!
//! `run` on a simulation that already holds results clears it first, so a
//! rerun never mixes values from the previous one.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use pricer_core::types::{PricingError, SimulationParameters};
use pricer_models::analytical::analytic_prices;
use tracing::{debug, info, warn};

use super::aggregator::aggregate_for;
use super::downsample::{downsample, ExportSeries};
use super::error::SimulationError;
use super::export;
use super::matrix::{FinalPrices, PathMatrix};
use super::parallel::ParallelGenerator;
use super::paths::GbmStep;
use super::result::PricingResult;
use super::sequential::generate_sequential;
use crate::rng::entropy_seed;

/// Path generator selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExecutionMode {
    /// One random stream on the calling thread.
    Sequential,
    /// Fork-join over the rayon pool.
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "parallel" | "par" => Ok(Self::Parallel),
            other => Err(format!("unknown execution mode: {}", other)),
        }
    }
}

/// Lifecycle state of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// Storage allocated and zero-filled.
    Configured,
    /// A generator is filling the matrix.
    Running,
    /// Matrix and terminal prices are populated.
    ResultsReady,
    /// Results have been written to disk.
    Exported,
}

impl SimulationState {
    /// Returns `true` once a run has completed.
    #[inline]
    pub fn has_results(self) -> bool {
        matches!(self, Self::ResultsReady | Self::Exported)
    }
}

/// Summary of one completed run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunReport {
    /// Mode asked for.
    pub requested: ExecutionMode,
    /// Mode actually used (differs after a parallel fallback).
    pub executed: ExecutionMode,
    /// Base seed of the run.
    pub seed: u64,
    /// Wall-clock generation time.
    pub elapsed: Duration,
}

impl RunReport {
    /// Returns `true` if a parallel request ran sequentially.
    #[inline]
    pub fn fell_back(&self) -> bool {
        self.requested != self.executed
    }
}

/// One Monte Carlo pricing run and its storage.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::SimulationParameters;
/// use pricer_pricing::mc::{ExecutionMode, Simulation, SimulationState};
///
/// let params = SimulationParameters::builder()
///     .asset_price(100.0)
///     .strike_price(95.0)
///     .time_to_expiration(0.25)
///     .volatility(0.3)
///     .interest_rate(0.01)
///     .num_paths(200)
///     .num_steps(10)
///     .seed(3)
///     .build()
///     .unwrap();
///
/// let mut sim = Simulation::new(params).unwrap();
/// assert!(sim.pricing_result().is_err());
///
/// sim.run(ExecutionMode::Sequential).unwrap();
/// assert!(sim.pricing_result().is_ok());
///
/// sim.clear();
/// assert_eq!(sim.state(), SimulationState::Configured);
/// ```
#[derive(Debug)]
pub struct Simulation {
    params: SimulationParameters,
    step: GbmStep,
    matrix: PathMatrix,
    finals: FinalPrices,
    generator: ParallelGenerator,
    state: SimulationState,
}

impl Simulation {
    /// Allocates zeroed storage for `params`.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Allocation` if the path matrix or the
    /// terminal prices cannot be allocated.
    pub fn new(params: SimulationParameters) -> Result<Self, SimulationError> {
        if params.steps_capped() {
            warn!(
                requested = params.requested_steps(),
                used = params.num_steps(),
                "time steps capped"
            );
        }

        let allocation = |source| SimulationError::Allocation {
            cells: params.matrix_len(),
            source,
        };
        let matrix =
            PathMatrix::try_zeros(params.num_steps(), params.num_paths()).map_err(allocation)?;
        let finals = FinalPrices::try_zeros(params.num_paths()).map_err(allocation)?;

        Ok(Self {
            step: GbmStep::new(&params),
            matrix,
            finals,
            generator: ParallelGenerator::new(),
            state: SimulationState::Configured,
            params,
        })
    }

    /// Sets the parallel worker count (`None` = rayon default).
    #[must_use]
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.generator = ParallelGenerator::from_threads(threads);
        self
    }

    /// Returns the run parameters.
    #[inline]
    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Returns the path matrix (zero-filled until a run completes).
    #[inline]
    pub fn path_matrix(&self) -> &PathMatrix {
        &self.matrix
    }

    /// Returns the terminal prices (zero-filled until a run completes).
    #[inline]
    pub fn final_prices(&self) -> &FinalPrices {
        &self.finals
    }

    /// Generates every path with the requested generator.
    ///
    /// A parallel request falls back to the sequential generator when the
    /// thread pool cannot be built; the report records the mode used.
    ///
    /// # Errors
    ///
    /// Returns any generator error other than the parallel fallback case.
    pub fn run(&mut self, mode: ExecutionMode) -> Result<RunReport, SimulationError> {
        if self.state.has_results() {
            debug!("clearing previous results before rerun");
            self.clear();
        }

        let seed = self.params.seed().unwrap_or_else(entropy_seed);
        self.state = SimulationState::Running;
        let start = Instant::now();

        let executed = match self.generate(mode, seed) {
            Ok(executed) => executed,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        self.finals.copy_from_matrix(&self.matrix);
        let elapsed = start.elapsed();
        self.state = SimulationState::ResultsReady;

        info!(
            mode = %executed,
            num_paths = self.params.num_paths(),
            num_steps = self.params.num_steps(),
            seed,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "simulation completed"
        );

        Ok(RunReport {
            requested: mode,
            executed,
            seed,
            elapsed,
        })
    }

    fn generate(
        &mut self,
        mode: ExecutionMode,
        seed: u64,
    ) -> Result<ExecutionMode, SimulationError> {
        match mode {
            ExecutionMode::Sequential => {
                generate_sequential(&self.step, seed, &mut self.matrix);
                Ok(ExecutionMode::Sequential)
            }
            ExecutionMode::Parallel => {
                match self.generator.generate(&self.step, seed, &mut self.matrix) {
                    Ok(()) => Ok(ExecutionMode::Parallel),
                    Err(SimulationError::ParallelBackendUnavailable(reason)) => {
                        warn!(%reason, "parallel backend unavailable, running sequentially");
                        generate_sequential(&self.step, seed, &mut self.matrix);
                        Ok(ExecutionMode::Sequential)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Aggregates the terminal prices and pairs them with Black-Scholes.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::NoResults` before a run completes.
    pub fn pricing_result(&self) -> Result<PricingResult, SimulationError> {
        self.require_results()?;

        let mc = aggregate_for(&self.params, self.finals.as_slice())?;
        let analytic = analytic_prices(&self.params).map_err(PricingError::from)?;
        Ok(PricingResult::new(mc, analytic))
    }

    /// Downsamples the path matrix for export.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::NoResults` before a run completes.
    pub fn export_series(&self) -> Result<ExportSeries, SimulationError> {
        self.require_results()?;
        Ok(downsample(&self.matrix))
    }

    /// Writes the downsampled series to `path` and marks the run exported.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::NoResults` before a run completes, or
    /// `SimulationError::Export` if the file cannot be written.
    pub fn export_csv(&mut self, path: &Path) -> Result<ExportSeries, SimulationError> {
        let series = self.export_series()?;
        export::export_csv(&series, path)?;
        self.state = SimulationState::Exported;

        info!(
            path = %path.display(),
            columns = series.num_columns(),
            batch_size = series.batch_size(),
            "paths exported"
        );
        Ok(series)
    }

    /// Zero-fills the matrix and terminal prices and returns to `Configured`.
    pub fn clear(&mut self) {
        self.matrix.clear();
        self.finals.clear();
        self.state = SimulationState::Configured;
    }

    fn require_results(&self) -> Result<(), SimulationError> {
        if self.state.has_results() {
            Ok(())
        } else {
            Err(SimulationError::NoResults)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn params(seed: Option<u64>) -> SimulationParameters {
        SimulationParameters::builder()
            .asset_price(100.0)
            .strike_price(100.0)
            .time_to_expiration(1.0)
            .volatility(0.2)
            .interest_rate(0.05)
            .num_paths(300)
            .num_steps(12)
            .maybe_seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_is_configured_and_zeroed() {
        let sim = Simulation::new(params(Some(1))).unwrap();

        assert_eq!(sim.state(), SimulationState::Configured);
        assert_eq!(sim.path_matrix().shape(), (12, 300));
        assert!(sim.final_prices().as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_reads_require_results() {
        let sim = Simulation::new(params(Some(1))).unwrap();

        assert!(matches!(sim.pricing_result(), Err(SimulationError::NoResults)));
        assert!(matches!(sim.export_series(), Err(SimulationError::NoResults)));
    }

    #[test]
    fn test_run_populates_results() {
        let mut sim = Simulation::new(params(Some(1))).unwrap();
        let report = sim.run(ExecutionMode::Sequential).unwrap();

        assert_eq!(report.seed, 1);
        assert!(!report.fell_back());
        assert_eq!(sim.state(), SimulationState::ResultsReady);
        assert!(sim.final_prices().as_slice().iter().all(|&x| x > 0.0));
    }

    #[test]
    fn test_final_prices_match_last_row() {
        let mut sim = Simulation::new(params(Some(2))).unwrap();
        sim.run(ExecutionMode::Parallel).unwrap();

        let matrix = sim.path_matrix();
        for (i, &price) in sim.final_prices().as_slice().iter().enumerate() {
            assert_eq!(price, matrix.get(11, i));
        }
    }

    #[test]
    fn test_clear_zeroes_in_place() {
        let mut sim = Simulation::new(params(Some(3))).unwrap();
        sim.run(ExecutionMode::Sequential).unwrap();
        let ptr = sim.path_matrix().as_slice().as_ptr();

        sim.clear();

        assert_eq!(sim.state(), SimulationState::Configured);
        assert_eq!(sim.path_matrix().as_slice().as_ptr(), ptr);
        assert!(sim.path_matrix().as_slice().iter().all(|&x| x == 0.0));
        assert!(sim.final_prices().as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_entropy_seed_when_unpinned() {
        let mut sim = Simulation::new(params(None)).unwrap();
        let first = sim.run(ExecutionMode::Sequential).unwrap();
        let second = sim.run(ExecutionMode::Sequential).unwrap();

        assert_ne!(first.seed, second.seed);
    }

    #[test]
    fn test_execution_mode_parse() {
        assert_eq!(
            "Sequential".parse::<ExecutionMode>(),
            Ok(ExecutionMode::Sequential)
        );
        assert_eq!("par".parse::<ExecutionMode>(), Ok(ExecutionMode::Parallel));
        assert!("gpu".parse::<ExecutionMode>().is_err());
        assert_eq!(ExecutionMode::Parallel.to_string(), "parallel");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parallel_falls_back_to_sequential() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut sim = Simulation::new(params(Some(4)))
            .unwrap()
            .with_threads(Some(0));
        let report = tracing::subscriber::with_default(subscriber, || {
            sim.run(ExecutionMode::Parallel)
        })
        .unwrap();

        assert_eq!(report.requested, ExecutionMode::Parallel);
        assert_eq!(report.executed, ExecutionMode::Sequential);
        assert!(report.fell_back());
        assert_eq!(sim.state(), SimulationState::ResultsReady);

        let result = sim.pricing_result().unwrap();
        assert!(result.monte_carlo_call.is_finite() && result.monte_carlo_call > 0.0);
        assert!(result.monte_carlo_put.is_finite() && result.monte_carlo_put > 0.0);

        let mut reference = Simulation::new(params(Some(4))).unwrap();
        reference.run(ExecutionMode::Sequential).unwrap();
        assert_eq!(sim.path_matrix(), reference.path_matrix());

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("parallel backend unavailable"), "{}", text);
    }

    #[test]
    fn test_new_reports_allocation_failure() {
        let cells = isize::MAX as usize / std::mem::size_of::<f64>();
        let huge = SimulationParameters::builder()
            .asset_price(100.0)
            .strike_price(100.0)
            .time_to_expiration(1.0)
            .volatility(0.2)
            .interest_rate(0.05)
            .num_paths(cells / 1_000)
            .num_steps(1_000)
            .build()
            .unwrap();

        assert!(matches!(
            Simulation::new(huge),
            Err(SimulationError::Allocation { .. })
        ));
    }

    #[test]
    fn test_fell_back() {
        let report = RunReport {
            requested: ExecutionMode::Parallel,
            executed: ExecutionMode::Sequential,
            seed: 0,
            elapsed: Duration::ZERO,
        };
        assert!(report.fell_back());
    }
}
