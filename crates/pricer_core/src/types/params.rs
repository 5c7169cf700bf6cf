//! Simulation parameters.
//!
//! [`SimulationParameters`] is the immutable input of one simulation run.
//! Instances are only obtainable through [`SimulationParametersBuilder`],
//! which rejects every value that would make the GBM recurrence produce
//! NaN or infinity.

use super::error::PricingError;

/// Maximum number of time steps per path.
///
/// Larger requests are capped rather than rejected.
pub const MAX_STEPS: usize = 1000;

/// Largest accepted natural log of any simulated price, growth factor or
/// discount factor. Squared payoffs must still fit in an `f64`.
pub const MAX_LOG_SCALE: f64 = 350.0;

/// Standard deviations of the terminal log-price covered by the scale check.
const TAIL_SIGMAS: f64 = 8.0;

/// Market and algorithm inputs for a Monte Carlo run.
///
/// # Invariants
///
/// - `asset_price > 0`, `strike_price > 0`
/// - `time_to_expiration > 0`, `volatility > 0`
/// - `interest_rate` finite
/// - `|r·T|`, `8·σ·√T` and `ln(max(S, K)) + |r·T| + 8·σ·√T` at most [`MAX_LOG_SCALE`]
/// - `1 <= num_paths`, `1 <= num_steps <= MAX_STEPS`
/// - the path matrix fits in `isize::MAX` bytes
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::SimulationParameters;
///
/// let params = SimulationParameters::builder()
///     .asset_price(100.0)
///     .strike_price(105.0)
///     .time_to_expiration(0.5)
///     .volatility(0.25)
///     .interest_rate(0.03)
///     .num_paths(1_000)
///     .num_steps(5_000)
///     .build()
///     .unwrap();
///
/// // Step count is capped
/// assert_eq!(params.num_steps(), 1000);
/// assert_eq!(params.requested_steps(), 5000);
/// assert!(params.steps_capped());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationParameters {
    asset_price: f64,
    strike_price: f64,
    time_to_expiration: f64,
    volatility: f64,
    interest_rate: f64,
    num_paths: usize,
    num_steps: usize,
    requested_steps: usize,
    seed: Option<u64>,
}

impl SimulationParameters {
    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Returns the current asset price (S₀).
    #[inline]
    pub fn asset_price(&self) -> f64 {
        self.asset_price
    }

    /// Returns the strike price (K).
    #[inline]
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Returns the time to expiration in years (T).
    #[inline]
    pub fn time_to_expiration(&self) -> f64 {
        self.time_to_expiration
    }

    /// Returns the annualised volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the annualised risk-free rate (r).
    #[inline]
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// Returns the number of simulated paths (N).
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Returns the number of time steps per path (M), after capping.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the step count originally asked for.
    #[inline]
    pub fn requested_steps(&self) -> usize {
        self.requested_steps
    }

    /// Returns `true` if the requested step count exceeded [`MAX_STEPS`].
    #[inline]
    pub fn steps_capped(&self) -> bool {
        self.requested_steps != self.num_steps
    }

    /// Returns the pinned base seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the time step `dt = T / M`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.time_to_expiration / self.num_steps as f64
    }

    /// Returns the discount factor `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.interest_rate * self.time_to_expiration).exp()
    }

    /// Returns the number of cells in the M × N path matrix.
    #[inline]
    pub fn matrix_len(&self) -> usize {
        // Overflow is rejected at build time.
        self.num_paths * self.num_steps
    }

    /// Returns a copy with a different pinned seed.
    ///
    /// Seeds do not affect validity, so no re-validation is needed.
    #[must_use]
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` naming the first field that
    /// violates its constraint.
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("asset_price", self.asset_price)?;
        positive("strike_price", self.strike_price)?;
        positive("time_to_expiration", self.time_to_expiration)?;
        positive("volatility", self.volatility)?;

        if !self.interest_rate.is_finite() {
            return Err(PricingError::invalid(
                "interest_rate",
                format!("must be finite, got {}", self.interest_rate),
            ));
        }
        if self.num_paths == 0 {
            return Err(PricingError::invalid("num_paths", "must be at least 1, got 0"));
        }
        if self.num_steps == 0 || self.num_steps > MAX_STEPS {
            return Err(PricingError::invalid(
                "num_steps",
                format!("must be in range [1, {}], got {}", MAX_STEPS, self.num_steps),
            ));
        }
        self.validate_scale()?;

        let fits = self
            .num_paths
            .checked_mul(self.num_steps)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<f64>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(PricingError::invalid(
                "num_paths",
                format!(
                    "{} paths x {} steps exceeds addressable memory",
                    self.num_paths, self.num_steps
                ),
            ));
        }

        let dt = self.dt();
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(PricingError::invalid(
                "time_to_expiration",
                format!("time step must be positive, got dt = {}", dt),
            ));
        }
        Ok(())
    }

    fn validate_scale(&self) -> Result<(), PricingError> {
        let growth = (self.interest_rate * self.time_to_expiration).abs();
        if growth > MAX_LOG_SCALE {
            return Err(PricingError::invalid(
                "interest_rate",
                format!(
                    "|r·T| = {} exceeds {}; growth and discount factors would overflow",
                    growth, MAX_LOG_SCALE
                ),
            ));
        }

        let diffusion = TAIL_SIGMAS * self.volatility * self.time_to_expiration.sqrt();
        if diffusion > MAX_LOG_SCALE {
            return Err(PricingError::invalid(
                "volatility",
                format!(
                    "σ·√T = {} is too large; simulated prices would overflow",
                    self.volatility * self.time_to_expiration.sqrt()
                ),
            ));
        }

        let scale = self.asset_price.max(self.strike_price).ln() + growth + diffusion;
        if scale > MAX_LOG_SCALE {
            let name = if self.asset_price >= self.strike_price {
                "asset_price"
            } else {
                "strike_price"
            };
            return Err(PricingError::invalid(
                name,
                format!(
                    "price scale too large: ln(max(S, K)) + |r·T| + 8·σ·√T = {} exceeds {}",
                    scale, MAX_LOG_SCALE
                ),
            ));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

/// Builder for [`SimulationParameters`].
///
/// All seven market/algorithm inputs are required; the seed is optional.
/// `build` caps `num_steps` at [`MAX_STEPS`] and validates the result.
#[derive(Clone, Debug, Default)]
pub struct SimulationParametersBuilder {
    asset_price: Option<f64>,
    strike_price: Option<f64>,
    time_to_expiration: Option<f64>,
    volatility: Option<f64>,
    interest_rate: Option<f64>,
    num_paths: Option<usize>,
    num_steps: Option<usize>,
    seed: Option<u64>,
}

impl SimulationParametersBuilder {
    /// Sets the current asset price.
    #[inline]
    pub fn asset_price(mut self, value: f64) -> Self {
        self.asset_price = Some(value);
        self
    }

    /// Sets the strike price.
    #[inline]
    pub fn strike_price(mut self, value: f64) -> Self {
        self.strike_price = Some(value);
        self
    }

    /// Sets the time to expiration in years.
    #[inline]
    pub fn time_to_expiration(mut self, value: f64) -> Self {
        self.time_to_expiration = Some(value);
        self
    }

    /// Sets the volatility as a decimal (0.2 for 20%).
    #[inline]
    pub fn volatility(mut self, value: f64) -> Self {
        self.volatility = Some(value);
        self
    }

    /// Sets the risk-free rate as a decimal (0.05 for 5%).
    #[inline]
    pub fn interest_rate(mut self, value: f64) -> Self {
        self.interest_rate = Some(value);
        self
    }

    /// Sets the number of simulated paths.
    #[inline]
    pub fn num_paths(mut self, value: usize) -> Self {
        self.num_paths = Some(value);
        self
    }

    /// Sets the number of time steps per path (capped at [`MAX_STEPS`]).
    #[inline]
    pub fn num_steps(mut self, value: usize) -> Self {
        self.num_steps = Some(value);
        self
    }

    /// Pins the base seed for reproducible runs.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the pinned base seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if a field is missing or
    /// out of range.
    pub fn build(self) -> Result<SimulationParameters, PricingError> {
        let requested_steps = required("num_steps", self.num_steps)?;

        let params = SimulationParameters {
            asset_price: required("asset_price", self.asset_price)?,
            strike_price: required("strike_price", self.strike_price)?,
            time_to_expiration: required("time_to_expiration", self.time_to_expiration)?,
            volatility: required("volatility", self.volatility)?,
            interest_rate: required("interest_rate", self.interest_rate)?,
            num_paths: required("num_paths", self.num_paths)?,
            num_steps: requested_steps.min(MAX_STEPS),
            requested_steps,
            seed: self.seed,
        };

        params.validate()?;
        Ok(params)
    }
}

fn required<T>(name: &'static str, value: Option<T>) -> Result<T, PricingError> {
    value.ok_or_else(|| PricingError::invalid(name, "must be specified"))
}
