//! Standard normal distribution functions.
//!
//! This module provides:
//! - `erfc` / `erf`: Complementary error function and error function
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! All functions are generic over `T: Float`.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Chebyshev coefficients of the erfc fit, lowest order first.
const ERFC_COEFFS: [f64; 10] = [
    -1.265_512_23,
    1.000_023_68,
    0.374_091_96,
    0.096_784_18,
    -0.186_288_06,
    0.278_868_07,
    -1.135_203_98,
    1.488_515_87,
    -0.822_152_23,
    0.170_872_77,
];

#[inline]
fn constant<T: Float>(value: f64) -> T {
    // Every constant here is representable in f32 and f64.
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function.
///
/// Uses a Chebyshev fit with fractional error below 1.2e-7 for all x.
///
/// # Mathematical Definition
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::erfc;
///
/// assert!((erfc(0.0_f64) - 1.0).abs() < 1e-7);
/// assert!((erfc(-1.0_f64) + erfc(1.0_f64) - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn erfc<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    // t = 1 / (1 + |x|/2)
    let t = one / (one + constant::<T>(0.5) * abs_x);

    // Horner's method, highest order first
    let poly = ERFC_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &c| acc * t + constant(c));

    let erfc_abs = t * (-abs_x * abs_x + poly).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        constant::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Error function, erf(x) = 1 - erfc(x).
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    T::one() - erfc(x)
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2)·(1 + erf(x/√2)) = (1/2)·erfc(-x/√2)
///
/// The erfc form is evaluated so that Φ keeps relative precision deep in
/// the lower tail, where `1 + erf` would cancel.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = constant::<T>(SQRT_2);
    constant::<T>(0.5) * erfc(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// let pdf_0 = norm_pdf(0.0_f64);
/// assert!((pdf_0 - 0.3989422804).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let exponent = -constant::<T>(0.5) * x * x;
    constant::<T>(FRAC_1_SQRT_2PI) * exponent.exp()
}
