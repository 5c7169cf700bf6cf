//! Pricing result combining the Monte Carlo estimate with the analytic oracle.

use pricer_models::analytical::AnalyticPrices;

use super::aggregator::MonteCarloPrices;

/// z-score of a two-sided 95% confidence interval.
const Z_95: f64 = 1.96;

/// Monte Carlo and Black-Scholes prices for one run.
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::AnalyticPrices;
/// use pricer_pricing::mc::{MonteCarloPrices, PricingResult};
///
/// let mc = MonteCarloPrices { call: 10.5, put: 5.5, call_std_error: 0.1, put_std_error: 0.05 };
/// let bs = AnalyticPrices { call: 10.45, put: 5.57 };
/// let result = PricingResult::new(mc, bs);
///
/// assert!((result.call_error() - 0.05).abs() < 1e-12);
/// assert!((result.confidence_95().0 - 0.196).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    /// Monte Carlo call estimate.
    pub monte_carlo_call: f64,
    /// Monte Carlo put estimate.
    pub monte_carlo_put: f64,
    /// Black-Scholes call price.
    pub analytic_call: f64,
    /// Black-Scholes put price.
    pub analytic_put: f64,
    /// Standard error of the call estimate.
    pub call_std_error: f64,
    /// Standard error of the put estimate.
    pub put_std_error: f64,
}

impl PricingResult {
    /// Combines a Monte Carlo estimate with the analytic prices.
    pub fn new(mc: MonteCarloPrices, analytic: AnalyticPrices<f64>) -> Self {
        Self {
            monte_carlo_call: mc.call,
            monte_carlo_put: mc.put,
            analytic_call: analytic.call,
            analytic_put: analytic.put,
            call_std_error: mc.call_std_error,
            put_std_error: mc.put_std_error,
        }
    }

    /// Monte Carlo minus analytic call price.
    #[inline]
    pub fn call_error(&self) -> f64 {
        self.monte_carlo_call - self.analytic_call
    }

    /// Monte Carlo minus analytic put price.
    #[inline]
    pub fn put_error(&self) -> f64 {
        self.monte_carlo_put - self.analytic_put
    }

    /// 95% confidence half-widths `(call, put)`.
    #[inline]
    pub fn confidence_95(&self) -> (f64, f64) {
        (Z_95 * self.call_std_error, Z_95 * self.put_std_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_signed() {
        let result = PricingResult::new(
            MonteCarloPrices {
                call: 10.0,
                put: 6.0,
                call_std_error: 0.2,
                put_std_error: 0.1,
            },
            AnalyticPrices {
                call: 10.5,
                put: 5.5,
            },
        );

        assert_eq!(result.call_error(), -0.5);
        assert_eq!(result.put_error(), 0.5);
        let (call_ci, put_ci) = result.confidence_95();
        assert!((call_ci - 0.392).abs() < 1e-12);
        assert!((put_ci - 0.196).abs() < 1e-12);
    }
}
