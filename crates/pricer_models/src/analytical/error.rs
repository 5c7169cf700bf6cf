//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to analytical pricing models

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidExpiry`: Non-positive time to expiration
/// - `InvalidRate`: Non-finite interest rate
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive for Black-Scholes).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid time to expiration.
    #[error("Invalid time to expiration: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid interest rate (NaN or infinite).
    #[error("Invalid interest rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        let name = match err {
            AnalyticalError::InvalidSpot { .. } => "asset_price",
            AnalyticalError::InvalidStrike { .. } => "strike_price",
            AnalyticalError::InvalidVolatility { .. } => "volatility",
            AnalyticalError::InvalidExpiry { .. } => "time_to_expiration",
            AnalyticalError::InvalidRate { .. } => "interest_rate",
        };
        PricingError::invalid(name, err.to_string())
    }
}
