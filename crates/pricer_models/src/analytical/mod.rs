//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - Normal distribution functions built on the complementary error function
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports `f64` and `f32`
//! - **Numerical Stability**: Uses erfc-based CDF so the tails keep precision

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{analytic_prices, AnalyticPrices, BlackScholes};
pub use distributions::{erf, erfc, norm_cdf, norm_pdf};
pub use error::AnalyticalError;
