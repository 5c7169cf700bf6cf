//! # Pricer Models (L2: Analytical Models)
//!
//! Closed-form valuation used to validate the Monte Carlo engine.
//!
//! This crate provides:
//! - The Black-Scholes model for European calls and puts
//! - Standard normal CDF/PDF and the error function
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: formulas work for any floating-point type
//! - **Pure functions**: analytic prices never touch simulation state

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
