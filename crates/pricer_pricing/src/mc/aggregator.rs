//! Discounted payoff aggregation.
//!
//! call = e^(−rT) · mean(max(S_T − K, 0))
//! put  = e^(−rT) · mean(max(K − S_T, 0))

use pricer_core::types::{PricingError, SimulationParameters};

/// Monte Carlo price estimates with their standard errors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MonteCarloPrices {
    /// Discounted mean call payoff.
    pub call: f64,
    /// Discounted mean put payoff.
    pub put: f64,
    /// Standard error of `call`.
    pub call_std_error: f64,
    /// Standard error of `put`.
    pub put_std_error: f64,
}

/// Aggregates terminal prices into call and put estimates.
///
/// Standard errors use the unbiased (n − 1) variance and are 0 for a
/// single path.
///
/// # Errors
///
/// Returns `PricingError::EmptyInput` if `final_prices` is empty.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::aggregate;
///
/// // Undiscounted: payoffs are [0, 10] for the call and [10, 0] for the put.
/// let prices = aggregate(&[90.0, 110.0], 100.0, 1.0).unwrap();
/// assert_eq!(prices.call, 5.0);
/// assert_eq!(prices.put, 5.0);
///
/// assert!(aggregate(&[], 100.0, 1.0).is_err());
/// ```
pub fn aggregate(
    final_prices: &[f64],
    strike: f64,
    discount_factor: f64,
) -> Result<MonteCarloPrices, PricingError> {
    if final_prices.is_empty() {
        return Err(PricingError::empty("no terminal prices to average"));
    }

    let call = PayoffStats::collect(final_prices.iter().map(|&s| (s - strike).max(0.0)));
    let put = PayoffStats::collect(final_prices.iter().map(|&s| (strike - s).max(0.0)));

    Ok(MonteCarloPrices {
        call: discount_factor * call.mean,
        put: discount_factor * put.mean,
        call_std_error: discount_factor * call.std_error,
        put_std_error: discount_factor * put.std_error,
    })
}

/// [`aggregate`] with strike and discount factor taken from `params`.
///
/// # Errors
///
/// Returns `PricingError::EmptyInput` if `final_prices` is empty.
pub fn aggregate_for(
    params: &SimulationParameters,
    final_prices: &[f64],
) -> Result<MonteCarloPrices, PricingError> {
    aggregate(final_prices, params.strike_price(), params.discount_factor())
}

struct PayoffStats {
    mean: f64,
    std_error: f64,
}

impl PayoffStats {
    fn collect<I>(payoffs: I) -> Self
    where
        I: Iterator<Item = f64> + Clone,
    {
        let mut n = 0usize;
        let mut sum = 0.0;
        for payoff in payoffs.clone() {
            sum += payoff;
            n += 1;
        }
        let mean = sum / n as f64;

        let std_error = if n > 1 {
            let sum_sq: f64 = payoffs.map(|p| (p - mean) * (p - mean)).sum();
            let variance = sum_sq / (n - 1) as f64;
            (variance / n as f64).sqrt()
        } else {
            0.0
        };

        Self { mean, std_error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            aggregate(&[], 100.0, 0.95),
            Err(PricingError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_discounting() {
        let prices = aggregate(&[120.0], 100.0, 0.9).unwrap();
        assert_relative_eq!(prices.call, 18.0, epsilon = 1e-12);
        assert_eq!(prices.put, 0.0);
    }

    #[test]
    fn test_single_path_has_zero_std_error() {
        let prices = aggregate(&[120.0], 100.0, 1.0).unwrap();
        assert_eq!(prices.call_std_error, 0.0);
        assert_eq!(prices.put_std_error, 0.0);
    }

    #[test]
    fn test_std_error_unbiased() {
        // Call payoffs [0, 10, 20]: mean 10, sample variance 100, se = 10/√3
        let prices = aggregate(&[100.0, 110.0, 120.0], 100.0, 1.0).unwrap();
        assert_relative_eq!(prices.call, 10.0, epsilon = 1e-12);
        assert_relative_eq!(prices.call_std_error, 10.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(prices.put, 0.0);
        assert_eq!(prices.put_std_error, 0.0);
    }

    #[test]
    fn test_undiscounted_parity() {
        // mean(max(S-K,0)) - mean(max(K-S,0)) = mean(S) - K
        let finals = [80.0, 95.0, 101.0, 130.0, 99.5];
        let prices = aggregate(&finals, 100.0, 1.0).unwrap();
        let mean_s = finals.iter().sum::<f64>() / finals.len() as f64;
        assert_relative_eq!(prices.call - prices.put, mean_s - 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_for_params() {
        let params = SimulationParameters::builder()
            .asset_price(100.0)
            .strike_price(100.0)
            .time_to_expiration(1.0)
            .volatility(0.2)
            .interest_rate(0.05)
            .num_paths(2)
            .num_steps(1)
            .build()
            .unwrap();

        let prices = aggregate_for(&params, &[110.0, 90.0]).unwrap();
        assert_relative_eq!(prices.call, 5.0 * (-0.05_f64).exp(), epsilon = 1e-12);
    }
}
