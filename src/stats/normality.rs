//! Shapiro-Wilk normality check.
//!
//! The t-tests assume approximately normal data (or normal differences for
//! the paired test). This check is advisory: it never changes which test is
//! run.
//!
//! # Algorithm
//!
//! Royston (1992, 1995), Algorithm AS R94:
//! 1. Coefficients from expected normal order statistics (Blom approximation)
//! 2. W = (Σ aᵢ x₍ᵢ₎)² / Σ (xᵢ - x̄)²
//! 3. Transform W to a z-score and take the upper normal tail
//!
//! # References
//!
//! - Shapiro & Wilk (1965). "An analysis of variance test for normality".
//! - Royston (1995). "Remark AS R94: A remark on Algorithm AS 181".

use super::distribution::{normal_cdf, normal_quantile};
use crate::error::{Result, TcalcError};
use serde::Serialize;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Smallest sample the check supports.
pub const MIN_SAMPLE: usize = 3;
/// Largest sample the Royston approximation is valid for.
pub const MAX_SAMPLE: usize = 5000;

/// Result of the Shapiro-Wilk normality test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapiroWilkResult {
    /// The W statistic (0 < W ≤ 1). Values close to 1 suggest normality.
    pub w: f64,
    /// The p-value. Small values reject the null hypothesis of normality.
    pub pvalue: f64,
}

impl ShapiroWilkResult {
    /// True when normality cannot be rejected at `alpha` (`pvalue > alpha`).
    #[must_use]
    pub fn looks_normal(&self, alpha: f64) -> bool {
        self.pvalue > alpha
    }
}

// Royston polynomial coefficients (AS R94)
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Horner evaluation of c[0] + c[1]x + c[2]x² + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Shapiro-Wilk test: H₀: the data is normally distributed.
///
/// # Errors
///
/// - `InvalidInput` when n is outside [3, 5000] or data is non-finite
/// - `ZeroVariance` when every observation is identical
///
/// # Examples
///
/// ```
/// use tcalc::stats::shapiro_wilk;
///
/// let data = [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
/// let r = shapiro_wilk(&data).expect("valid sample");
/// assert!(r.w > 0.9);
/// assert!(r.looks_normal(0.05));
/// ```
pub fn shapiro_wilk(data: &[f64]) -> Result<ShapiroWilkResult> {
    let n = data.len();
    if n < MIN_SAMPLE {
        return Err(TcalcError::insufficient_data(
            "Shapiro-Wilk test",
            MIN_SAMPLE,
            n,
        ));
    }
    if n > MAX_SAMPLE {
        return Err(TcalcError::invalid_input(
            "Shapiro-Wilk test",
            format!("supports at most {MAX_SAMPLE} observations, got {n}"),
        ));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(TcalcError::invalid_input(
            "Shapiro-Wilk test",
            "observations must be finite",
        ));
    }

    let mut x = data.to_vec();
    x.sort_by(f64::total_cmp);

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    if x[n - 1] == x[0] || ss == 0.0 {
        return Err(TcalcError::zero_variance("Shapiro-Wilk sample"));
    }

    if n == 3 {
        // a = [√½, 0, -√½]; exact p = 1 - (6/π)·acos(√W)
        let numerator = FRAC_1_SQRT_2 * (x[2] - x[0]);
        let w = (numerator * numerator / ss).clamp(0.75, 1.0);
        let pvalue = (1.0 - (6.0 / PI) * w.sqrt().acos()).clamp(0.0, 1.0);
        return Ok(ShapiroWilkResult { w, pvalue });
    }

    let a = coefficients(n)?;
    let nn2 = n / 2;
    let sa: f64 = (0..nn2).map(|i| a[i] * (x[n - 1 - i] - x[i])).sum();
    let w = (sa * sa / ss).min(1.0);

    Ok(ShapiroWilkResult {
        w,
        pvalue: pvalue(w, n).clamp(0.0, 1.0),
    })
}

/// Royston's approximation of the Shapiro-Wilk coefficients (first half).
fn coefficients(n: usize) -> Result<Vec<f64>> {
    let nn2 = n / 2;
    let nf = n as f64;

    // Blom scores for the lower half of the order statistics (negative)
    let m: Vec<f64> = (0..nn2)
        .map(|i| normal_quantile((i as f64 + 1.0 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; nn2];

    let (corrected, fac_sq, one_minus) = if n <= 5 {
        (1, summ2 - 2.0 * m[0].powi(2), 1.0 - 2.0 * a1.powi(2))
    } else {
        let a2 = poly(&C2, rsn) - m[1] / ssumm2;
        a[1] = a2;
        (
            2,
            summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2),
            1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2),
        )
    };
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(TcalcError::invalid_input(
            "Shapiro-Wilk test",
            "coefficient approximation failed",
        ));
    }
    let fac = (fac_sq / one_minus).sqrt();

    a[0] = a1;
    for i in corrected..nn2 {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

fn pvalue(w: f64, n: usize) -> f64 {
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let nf = n as f64;

    let z = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        (y2 - poly(&C3, nf)) / poly(&C4, nf).exp()
    } else {
        let ln_n = nf.ln();
        (y - poly(&C5, ln_n)) / poly(&C6, ln_n).exp()
    };
    1.0 - normal_cdf(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_data_looks_normal() {
        let data = [10.0, 12.0, 9.0, 11.0, 13.0, 8.0, 14.0, 10.0, 12.0, 11.0];
        let r = shapiro_wilk(&data).expect("valid");
        assert!(r.w > 0.9 && r.w <= 1.0, "W = {}", r.w);
        assert!(r.looks_normal(0.05), "p = {}", r.pvalue);
    }

    #[test]
    fn test_skewed_data_rejected() {
        let data = [1.0, 1.0, 1.1, 1.2, 1.0, 1.3, 1.1, 1.0, 40.0, 95.0, 1.2, 1.1];
        let r = shapiro_wilk(&data).expect("valid");
        assert!(r.w < 0.7, "W = {}", r.w);
        assert!(!r.looks_normal(0.05), "p = {}", r.pvalue);
    }

    #[test]
    fn test_three_points_exact() {
        // Equally spaced: W = 1, p = 1
        let r = shapiro_wilk(&[1.0, 2.0, 3.0]).expect("valid");
        assert!((r.w - 1.0).abs() < 1e-12);
        assert!((r.pvalue - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_sample_rejected() {
        let err = shapiro_wilk(&[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_constant_sample() {
        assert!(matches!(
            shapiro_wilk(&[2.0, 2.0, 2.0, 2.0]),
            Err(TcalcError::ZeroVariance { .. })
        ));
    }

    #[test]
    fn test_coefficients_normalized() {
        // Σ aᵢ² over both halves is 1 by construction
        for n in [4, 5, 6, 11, 12, 50] {
            let a = coefficients(n).expect("valid");
            let total = 2.0 * a.iter().map(|v| v * v).sum::<f64>();
            assert!((total - 1.0).abs() < 1e-6, "n = {n}, Σa² = {total}");
        }
    }

    #[test]
    fn test_poly_horner() {
        assert_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }
}
