//! Core simulation and error types.
//!
//! This module provides:
//! - `params`: [`SimulationParameters`] and its builder
//! - `error`: [`PricingError`] for parameter validation and aggregation failures

pub mod error;
pub mod params;

pub use error::PricingError;
pub use params::{SimulationParameters, SimulationParametersBuilder, MAX_LOG_SCALE, MAX_STEPS};
