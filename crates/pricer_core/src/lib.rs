//! # pricer_core: Foundation Types for the GBM Monte Carlo Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - [`SimulationParameters`](types::SimulationParameters): the immutable,
//!   validated description of one simulation run
//! - [`PricingError`](types::PricingError): the error type shared by every
//!   layer above
//!
//! It has no dependencies on other pricer_* crates.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::SimulationParameters;
//!
//! let params = SimulationParameters::builder()
//!     .asset_price(100.0)
//!     .strike_price(100.0)
//!     .time_to_expiration(1.0)
//!     .volatility(0.2)
//!     .interest_rate(0.05)
//!     .num_paths(10_000)
//!     .num_steps(252)
//!     .build()
//!     .unwrap();
//!
//! assert!((params.dt() - 1.0 / 252.0).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`SimulationParameters`](types::SimulationParameters)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
