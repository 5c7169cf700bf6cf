//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path evolution
//! using the exact log-space formulation:
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - 0.5σ²)dt + σ√dt × Z)
//! ```

use pricer_core::types::SimulationParameters;

use crate::rng::PricerRng;

/// Precomputed GBM step constants.
///
/// # Model
///
/// The GBM model assumes asset prices follow:
/// ```text
/// dS = r S dt + σ S dW
/// ```
/// under the risk-neutral measure.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::SimulationParameters;
/// use pricer_pricing::mc::GbmStep;
/// use pricer_pricing::rng::PricerRng;
///
/// let params = SimulationParameters::builder()
///     .asset_price(100.0)
///     .strike_price(100.0)
///     .time_to_expiration(1.0)
///     .volatility(0.2)
///     .interest_rate(0.05)
///     .num_paths(1)
///     .num_steps(252)
///     .build()
///     .unwrap();
///
/// let step = GbmStep::new(&params);
/// let mut path = vec![0.0; 252];
/// step.evolve_path(&mut PricerRng::from_seed(1), &mut path);
/// assert!(path.iter().all(|&s| s > 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStep {
    /// Initial spot price (S₀).
    spot: f64,
    /// (r - 0.5σ²)dt
    drift_dt: f64,
    /// σ√dt
    vol_sqrt_dt: f64,
}

impl GbmStep {
    /// Precomputes the drift and diffusion terms for `params`.
    #[inline]
    pub fn new(params: &SimulationParameters) -> Self {
        let dt = params.dt();
        let vol = params.volatility();

        Self {
            spot: params.asset_price(),
            drift_dt: (params.interest_rate() - 0.5 * vol * vol) * dt,
            vol_sqrt_dt: vol * dt.sqrt(),
        }
    }

    /// Returns the initial spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Advances `current` by one step with shock `z`.
    #[inline]
    pub fn next_price(&self, current: f64, z: f64) -> f64 {
        current * (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }

    /// Simulates one trajectory into `out`, one normal draw per step.
    ///
    /// `out[j]` receives S_{j+1}. The shocks are drawn into `out` first and
    /// transformed in place, so no scratch buffer is needed.
    #[inline]
    pub fn evolve_path(&self, rng: &mut PricerRng, out: &mut [f64]) {
        rng.fill_normal(out);

        let mut current = self.spot;
        for cell in out.iter_mut() {
            current = self.next_price(current, *cell);
            *cell = current;
        }
    }
}
