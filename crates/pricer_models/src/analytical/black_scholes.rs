//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options. It is the ground truth the Monte Carlo engine is
//! checked against.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::types::SimulationParameters;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

/// Analytic call and put prices for one strike and expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticPrices<T> {
    /// European call price.
    pub call: T,
    /// European put price.
    pub put: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot is not positive and finite
    /// - `AnalyticalError::InvalidVolatility` if volatility is not positive and finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Callers must pass `expiry > 0`; [`prices`](Self::prices) enforces it.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::one() / (T::one() + T::one());
        let vol_sqrt_t = self.volatility * expiry.sqrt();

        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0);
    /// assert!((price - 10.4506).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_put(100.0, 1.0);
    /// assert!((price - 5.5735).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// Computes both prices after validating strike and expiry.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike is not positive and finite
    /// - `AnalyticalError::InvalidExpiry` if expiry is not positive and finite
    pub fn prices(&self, strike: T, expiry: T) -> Result<AnalyticPrices<T>, AnalyticalError> {
        let zero = T::zero();

        if !(strike > zero && strike.is_finite()) {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(expiry > zero && expiry.is_finite()) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(AnalyticPrices {
            call: self.price_call(strike, expiry),
            put: self.price_put(strike, expiry),
        })
    }
}

impl BlackScholes<f64> {
    /// Builds the model from simulation parameters.
    ///
    /// # Errors
    /// Propagates the constructor's validation errors.
    pub fn from_params(params: &SimulationParameters) -> Result<Self, AnalyticalError> {
        Self::new(
            params.asset_price(),
            params.interest_rate(),
            params.volatility(),
        )
    }
}

/// Prices the call and put described by `params` in closed form.
///
/// # Examples
/// ```
/// use pricer_core::types::SimulationParameters;
/// use pricer_models::analytical::analytic_prices;
///
/// let params = SimulationParameters::builder()
///     .asset_price(100.0)
///     .strike_price(100.0)
///     .time_to_expiration(1.0)
///     .volatility(0.2)
///     .interest_rate(0.05)
///     .num_paths(1)
///     .num_steps(1)
///     .build()
///     .unwrap();
///
/// let prices = analytic_prices(&params).unwrap();
/// assert!((prices.call - 10.4506).abs() < 1e-3);
/// assert!((prices.put - 5.5735).abs() < 1e-3);
/// ```
pub fn analytic_prices(
    params: &SimulationParameters,
) -> Result<AnalyticPrices<f64>, AnalyticalError> {
    BlackScholes::from_params(params)?.prices(params.strike_price(), params.time_to_expiration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot() {
        assert!(matches!(
            BlackScholes::new(0.0_f64, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            BlackScholes::new(f64::NAN, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
    }

    #[test]
    fn test_new_invalid_volatility() {
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.05, -0.2),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0_f64, -0.01, 0.2).is_ok());
    }

    #[test]
    fn test_new_rejects_non_finite_inputs() {
        assert!(matches!(
            BlackScholes::new(f64::INFINITY, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, f64::NAN, 0.2),
            Err(AnalyticalError::InvalidRate { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, f64::INFINITY, 0.2),
            Err(AnalyticalError::InvalidRate { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.05, f64::INFINITY),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_prices_rejects_non_finite_strike_and_expiry() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert!(matches!(
            bs.prices(f64::INFINITY, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            bs.prices(100.0, f64::NAN),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_atm() {
        // ATM: d1 = (r + σ²/2)√T/σ = (0.05 + 0.02) / 0.2 = 0.35
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.35, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_moneyness_sign() {
        let itm = BlackScholes::new(150.0_f64, 0.05, 0.2).unwrap();
        assert!(itm.d1(100.0, 1.0) > 1.0);

        let otm = BlackScholes::new(50.0_f64, 0.05, 0.2).unwrap();
        assert!(otm.d1(100.0, 1.0) < -1.0);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, r=0.05, σ=0.2, T=1
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_put_price_reference_value() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_call_increases_with_volatility() {
        let low = BlackScholes::new(100.0_f64, 0.03, 0.1).unwrap();
        let high = BlackScholes::new(100.0_f64, 0.03, 0.4).unwrap();
        assert!(high.price_call(110.0, 0.5) > low.price_call(110.0, 0.5));
    }

    #[test]
    fn test_deep_itm_call() {
        let bs = BlackScholes::new(200.0_f64, 0.05, 0.2).unwrap();
        let intrinsic = 200.0 - 100.0 * (-0.05_f64).exp();
        assert!(bs.price_call(100.0, 1.0) >= intrinsic - 0.01);
    }

    #[test]
    fn test_deep_otm_call() {
        let bs = BlackScholes::new(50.0_f64, 0.05, 0.2).unwrap();
        assert!(bs.price_call(100.0, 1.0) < 0.01);
    }

    #[test]
    fn test_put_call_parity_various_strikes() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = bs.price_call(strike, 1.0);
            let put = bs.price_put(strike, 1.0);
            let forward = 100.0 - strike * (-0.05_f64).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_prices_validation() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert!(matches!(
            bs.prices(0.0, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            bs.prices(100.0, 0.0),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));

        let prices = bs.prices(100.0, 1.0).unwrap();
        assert_eq!(prices.call, bs.price_call(100.0, 1.0));
        assert_eq!(prices.put, bs.price_put(100.0, 1.0));
    }

    #[test]
    fn test_analytic_prices_from_params() {
        let params = SimulationParameters::builder()
            .asset_price(100.0)
            .strike_price(100.0)
            .time_to_expiration(1.0)
            .volatility(0.2)
            .interest_rate(0.05)
            .num_paths(10)
            .num_steps(10)
            .build()
            .unwrap();

        let prices = analytic_prices(&params).unwrap();
        assert_relative_eq!(prices.call, 10.4506, epsilon = 1e-3);
        assert_relative_eq!(prices.put, 5.5735, epsilon = 1e-3);
    }

    proptest! {
        #[test]
        fn prop_prices_within_no_arbitrage_bounds(
            spot in 1.0f64..500.0,
            strike in 1.0f64..500.0,
            rate in -0.02f64..0.15,
            vol in 0.01f64..1.5,
            expiry in 0.01f64..10.0,
        ) {
            let bs = BlackScholes::new(spot, rate, vol).unwrap();
            let prices = bs.prices(strike, expiry).unwrap();
            let df = (-rate * expiry).exp();
            let tol = 1e-6 * spot.max(strike);

            // max(S - K·DF, 0) <= C <= S
            prop_assert!(prices.call >= (spot - strike * df).max(0.0) - tol);
            prop_assert!(prices.call <= spot + tol);
            // max(K·DF - S, 0) <= P <= K·DF
            prop_assert!(prices.put >= (strike * df - spot).max(0.0) - tol);
            prop_assert!(prices.put <= strike * df + tol);
        }
    }
}
