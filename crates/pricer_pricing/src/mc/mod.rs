//! Monte Carlo engine for European options under GBM.
//!
//! This module provides:
//! - [`PathMatrix`] / [`FinalPrices`]: Simulation storage
//! - [`GbmStep`]: The exact log-space GBM recurrence
//! - [`generate_sequential`] / [`ParallelGenerator`]: Path generators
//! - [`aggregate`]: Discounted payoff estimates with standard errors
//! - [`downsample`]: Bounded-size series for export
//! - [`export_csv`]: Atomic CSV writer
//! - [`Simulation`]: Run lifecycle tying the pieces together
//!
//! # Architecture
//!
//! ```text
//! SimulationParameters ─┬─> generator ─> PathMatrix ─┬─> FinalPrices ─> aggregate ─┐
//!                       │                            └─> downsample ─> export_csv   │
//!                       └─> Black-Scholes ──────────────────────────────> PricingResult
//! ```
//!
//! # Example
//!
//! ```rust
//! use pricer_core::types::SimulationParameters;
//! use pricer_pricing::mc::{ExecutionMode, Simulation, SimulationState};
//!
//! let params = SimulationParameters::builder()
//!     .asset_price(100.0)
//!     .strike_price(100.0)
//!     .time_to_expiration(1.0)
//!     .volatility(0.2)
//!     .interest_rate(0.05)
//!     .num_paths(500)
//!     .num_steps(20)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! let mut sim = Simulation::new(params).unwrap();
//! let report = sim.run(ExecutionMode::Sequential).unwrap();
//!
//! assert_eq!(report.executed, ExecutionMode::Sequential);
//! assert_eq!(sim.state(), SimulationState::ResultsReady);
//! assert_eq!(sim.export_series().unwrap().num_rows(), 20);
//! ```

mod aggregator;
mod downsample;
mod error;
pub mod export;
mod matrix;
mod parallel;
mod paths;
mod result;
mod sequential;
mod simulation;

pub use aggregator::{aggregate, aggregate_for, MonteCarloPrices};
pub use downsample::{batch_size, downsample, target_lines, ExportSeries, SeriesLabel};
pub use error::SimulationError;
pub use export::{export_csv, write_csv, ExportError};
pub use matrix::{FinalPrices, PathMatrix};
pub use parallel::{ParallelGenerator, PATHS_PER_TASK};
pub use paths::GbmStep;
pub use result::PricingResult;
pub use sequential::generate_sequential;
pub use simulation::{ExecutionMode, RunReport, Simulation, SimulationState};
