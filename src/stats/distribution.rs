//! Distribution primitives used by the tests.
//!
//! Thin wrappers over `statrs` that validate parameters up front and turn
//! construction failures into [`TcalcError::Distribution`] instead of panics.

use crate::error::{Result, TcalcError};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use statrs::function::erf;
use std::f64::consts::SQRT_2;

fn students_t(df: f64) -> Result<StudentsT> {
    if !(df.is_finite() && df > 0.0) {
        return Err(TcalcError::distribution(format!(
            "Student's t requires df > 0, got {df}"
        )));
    }
    StudentsT::new(0.0, 1.0, df).map_err(TcalcError::distribution)
}

/// Two-tailed p-value `2 * P(T > |t|)` for Student's t with `df` degrees of freedom.
///
/// # Examples
///
/// ```
/// use tcalc::stats::distribution::t_two_tailed_pvalue;
///
/// let p = t_two_tailed_pvalue(0.0, 9.0).expect("valid df");
/// assert!((p - 1.0).abs() < 1e-12);
/// ```
pub fn t_two_tailed_pvalue(t: f64, df: f64) -> Result<f64> {
    let dist = students_t(df)?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Student's t CDF `P(T <= t)`.
pub fn t_cdf(t: f64, df: f64) -> Result<f64> {
    Ok(students_t(df)?.cdf(t))
}

/// Student's t quantile (inverse CDF) at probability `p`.
///
/// # Errors
///
/// Fails when `p` is outside the open interval (0, 1) or `df <= 0`.
pub fn t_quantile(p: f64, df: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(TcalcError::invalid_input(
            "t quantile",
            format!("probability must be in (0, 1), got {p}"),
        ));
    }
    Ok(students_t(df)?.inverse_cdf(p))
}

/// Upper-tail probability `P(F > f)` for the F distribution.
pub fn f_survival(f: f64, d1: f64, d2: f64) -> Result<f64> {
    if f.is_infinite() && f > 0.0 {
        return Ok(0.0);
    }
    if f <= 0.0 {
        return Ok(1.0);
    }
    let dist = FisherSnedecor::new(d1, d2).map_err(TcalcError::distribution)?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

/// Standard normal CDF.
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erf::erfc(-z / SQRT_2)
}

/// Standard normal quantile.
#[must_use]
pub fn normal_quantile(p: f64) -> f64 {
    SQRT_2 * erf::erf_inv(2.0 * p - 1.0)
}
