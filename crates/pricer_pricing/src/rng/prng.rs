//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper that offers
//! reproducible random number generation with efficient batch operations,
//! and the seed derivation used to give every parallel task its own stream.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Monte Carlo simulation random number generator.
///
/// Provides seeded, reproducible standard normal variates.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let n: f64 = rng.gen_normal();
///
/// // Batch generation (zero allocation)
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed will always produce the same sequence of random numbers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    ///
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator owned by one parallel task.
    ///
    /// Equivalent to `from_seed(derive_stream_seed(base_seed, stream))`.
    #[inline]
    pub fn for_stream(base_seed: u64, stream: u64) -> Self {
        Self::from_seed(derive_stream_seed(base_seed, stream))
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Draws are taken in slice order, so filling one buffer of length `n`
    /// consumes the stream exactly as `n` calls to [`gen_normal`](Self::gen_normal).
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

/// Derives the seed of stream `stream` from a base seed.
///
/// Uses the SplitMix64 finaliser over `base_seed + (stream + 1) * γ`, so
/// neighbouring task indices map to well-separated seeds and stream 0 never
/// reuses the base seed itself.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::derive_stream_seed;
///
/// assert_eq!(derive_stream_seed(7, 0), derive_stream_seed(7, 0));
/// assert_ne!(derive_stream_seed(7, 0), derive_stream_seed(7, 1));
/// assert_ne!(derive_stream_seed(7, 0), 7);
/// ```
#[inline]
pub fn derive_stream_seed(base_seed: u64, stream: u64) -> u64 {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut z = base_seed.wrapping_add(stream.wrapping_add(1).wrapping_mul(GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draws a fresh base seed from the operating system entropy source.
#[inline]
pub fn entropy_seed() -> u64 {
    rand::random::<u64>()
}
