//! # Pricer Engine (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the simulation engine of the GBM pricer:
//! - Seeded random streams with deterministic per-task derivation ([`rng`])
//! - Sequential and rayon-parallel GBM path generation ([`mc`])
//! - Discounted payoff aggregation with standard errors
//! - Path downsampling and CSV export
//! - The [`mc::Simulation`] run lifecycle
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `SimulationParameters`, `PricingError`
//! - Layer 2 (pricer_models): Black-Scholes oracle for `PricingResult`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::SimulationParameters;
//! use pricer_pricing::mc::{ExecutionMode, Simulation};
//!
//! let params = SimulationParameters::builder()
//!     .asset_price(100.0)
//!     .strike_price(100.0)
//!     .time_to_expiration(1.0)
//!     .volatility(0.2)
//!     .interest_rate(0.05)
//!     .num_paths(2_000)
//!     .num_steps(50)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut sim = Simulation::new(params).unwrap();
//! sim.run(ExecutionMode::Parallel).unwrap();
//!
//! let result = sim.pricing_result().unwrap();
//! assert!((result.monte_carlo_call - result.analytic_call).abs() < 1.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mc;
pub mod rng;
