//! # Random Number Generation Infrastructure
//!
//! Random number generation for Monte Carlo simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators support seeding for deterministic sequences
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//! - **Isolation**: Parallel tasks never share a generator; each task owns a
//!   stream derived from the base seed and its task index
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{derive_stream_seed, PricerRng};
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//! let normal_value = rng.gen_normal();
//! assert!(normal_value.is_finite());
//!
//! // Independent stream for parallel task 3
//! let task_rng = PricerRng::for_stream(12345, 3);
//! assert_eq!(task_rng.seed(), derive_stream_seed(12345, 3));
//! ```

mod prng;

pub use prng::{derive_stream_seed, entropy_seed, PricerRng};
