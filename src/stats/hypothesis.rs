//! Student's t-tests.
//!
//! Implements the three classical t-tests for comparing means.
//!
//! - **One-sample**: sample mean against a hypothesized population mean
//! - **Two-sample independent**: pooled (Student) or Welch
//! - **Paired**: one-sample test on per-pair differences
//!
//! All p-values returned here are two-tailed; one-tailed values are derived
//! by [`crate::tail::adjust_pvalue`].
//!
//! # Example
//!
//! ```
//! use tcalc::stats::hypothesis::ttest_ind;
//!
//! let group1 = vec![2.3, 2.5, 2.7, 2.9, 3.1];
//! let group2 = vec![3.2, 3.4, 3.6, 3.8, 4.0];
//!
//! let result = ttest_ind(&group1, &group2, true).expect("valid t-test inputs");
//! assert_eq!(result.df, 8.0);
//! assert!(result.pvalue < 0.05);
//! ```

use super::distribution::t_two_tailed_pvalue;
use super::DescriptiveStats;
use crate::error::{Result, TcalcError};
use serde::Serialize;
use tracing::{debug, trace};

/// Result of a t-test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestResult {
    /// t-statistic
    pub statistic: f64,

    /// p-value (two-tailed)
    pub pvalue: f64,

    /// Degrees of freedom (fractional for Welch)
    pub df: f64,

    /// Point estimate the interval is built around: the sample mean for the
    /// one-sample test, the mean difference otherwise
    pub estimate: f64,

    /// Numerator of the t-statistic (`estimate - mu0` for one-sample)
    pub mean_diff: f64,

    /// Standard error of the estimate
    pub std_error: f64,

    /// Standard deviation that standardizes the effect size
    pub effect_sd: f64,

    /// Pooled variance used (`None` for one-sample and paired tests)
    pub equal_var: Option<bool>,
}

fn validate(sample: &[f64], context: &str) -> Result<()> {
    if sample.is_empty() {
        return Err(TcalcError::empty_input(context));
    }
    if sample.len() < 2 {
        return Err(TcalcError::insufficient_data(context, 2, sample.len()));
    }
    if let Some(bad) = sample.iter().find(|x| !x.is_finite()) {
        return Err(TcalcError::invalid_input(
            context,
            format!("observations must be finite, got {bad}"),
        ));
    }
    Ok(())
}

/// Relative spread below which a sample counts as constant.
///
/// Identical values that are not exactly representable (0.1, 0.3 - 0.2)
/// leave rounding-level variance of a few ulps of the data's magnitude.
const SPREAD_RTOL: f64 = 64.0 * f64::EPSILON;

/// Largest absolute value in a sample (0 for an empty one).
fn max_abs(sample: &[f64]) -> f64 {
    sample.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// `true` when `sd` is indistinguishable from rounding noise on data of
/// magnitude `scale`.
fn negligible_spread(sd: f64, scale: f64) -> bool {
    sd <= SPREAD_RTOL * scale
}

/// Mean and Bessel-corrected variance of an already validated sample.
fn mean_var(sample: &[f64]) -> Result<(f64, f64)> {
    let stats = DescriptiveStats::new(sample);
    Ok((stats.mean()?, stats.variance()?))
}

/// One-sample t-test: Tests if sample mean differs from population mean.
///
/// H₀: μ = `population_mean`
/// H₁: μ ≠ `population_mean`
///
/// # Errors
///
/// - `InvalidInput` when the sample is empty, has fewer than 2 observations,
///   or contains non-finite values
/// - `ZeroVariance` when all observations are identical
pub fn ttest_1samp(sample: &[f64], population_mean: f64) -> Result<TTestResult> {
    one_sample_impl(
        sample,
        population_mean,
        max_abs(sample),
        "one-sample t-test",
        "sample",
    )
}

/// `scale` is the magnitude of the raw data, which for paired tests is
/// larger than that of the differences.
fn one_sample_impl(
    sample: &[f64],
    population_mean: f64,
    scale: f64,
    context: &str,
    spread_context: &str,
) -> Result<TTestResult> {
    validate(sample, context)?;
    if !population_mean.is_finite() {
        return Err(TcalcError::invalid_input(
            context,
            format!("hypothesized mean must be finite, got {population_mean}"),
        ));
    }

    let n = sample.len();
    let (sample_mean, variance) = mean_var(sample)?;
    let std = variance.sqrt();
    if negligible_spread(std, scale) {
        return Err(TcalcError::zero_variance(spread_context));
    }

    // t = (x̄ - μ₀) / (s / √n)
    let se = std / (n as f64).sqrt();
    let mean_diff = sample_mean - population_mean;
    let t_stat = mean_diff / se;
    let df = (n - 1) as f64;
    let pvalue = t_two_tailed_pvalue(t_stat, df)?;

    trace!(n, mean = sample_mean, std, se, "one-sample moments");

    Ok(TTestResult {
        statistic: t_stat,
        pvalue,
        df,
        estimate: sample_mean,
        mean_diff,
        std_error: se,
        effect_sd: std,
        equal_var: None,
    })
}

/// Independent two-sample t-test: Tests if two independent samples have different means.
///
/// H₀: μ₁ = μ₂
/// H₁: μ₁ ≠ μ₂
///
/// # Arguments
///
/// * `sample1` - First sample
/// * `sample2` - Second sample
/// * `equal_var` - Assume equal variances (pooled t-test) or not (Welch's t-test)
///
/// # Errors
///
/// - `InvalidInput` when either sample has fewer than 2 finite observations
/// - `ZeroVariance` when both groups are constant (up to rounding)
pub fn ttest_ind(sample1: &[f64], sample2: &[f64], equal_var: bool) -> Result<TTestResult> {
    validate(sample1, "two-sample t-test (group 1)")?;
    validate(sample2, "two-sample t-test (group 2)")?;

    let n1 = sample1.len() as f64;
    let n2 = sample2.len() as f64;
    let (mean1, var1) = mean_var(sample1)?;
    let (mean2, var2) = mean_var(sample2)?;
    let mean_diff = mean1 - mean2;
    let both_constant = negligible_spread(var1.sqrt(), max_abs(sample1))
        && negligible_spread(var2.sqrt(), max_abs(sample2));

    let (se, df, effect_sd) = if equal_var {
        // Pooled t-test (Student's t-test)
        let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0);
        let pooled_sd = pooled_var.sqrt();
        if both_constant || pooled_sd == 0.0 {
            return Err(TcalcError::zero_variance("pooled standard deviation"));
        }
        let se = pooled_sd * (1.0 / n1 + 1.0 / n2).sqrt();
        (se, n1 + n2 - 2.0, pooled_sd)
    } else {
        let a = var1 / n1;
        let b = var2 / n2;
        let se = (a + b).sqrt();
        if both_constant || se == 0.0 {
            return Err(TcalcError::zero_variance("Welch standard error"));
        }
        (
            se,
            welch_df(var1, var2, n1, n2),
            ((var1 + var2) / 2.0).sqrt(),
        )
    };

    let t_stat = mean_diff / se;
    let pvalue = t_two_tailed_pvalue(t_stat, df)?;

    debug!(
        equal_var,
        mean1, mean2, var1, var2, df, "two-sample t-test computed"
    );

    Ok(TTestResult {
        statistic: t_stat,
        pvalue,
        df,
        estimate: mean_diff,
        mean_diff,
        std_error: se,
        effect_sd,
        equal_var: Some(equal_var),
    })
}

/// Welch–Satterthwaite degrees of freedom from two sample variances.
///
/// df = (s1²/n1 + s2²/n2)² / [ (s1²/n1)²/(n1−1) + (s2²/n2)²/(n2−1) ]
#[must_use]
pub fn welch_df(var1: f64, var2: f64, n1: f64, n2: f64) -> f64 {
    let a = var1 / n1;
    let b = var2 / n2;
    let numerator = (a + b).powi(2);
    let denominator = a.powi(2) / (n1 - 1.0) + b.powi(2) / (n2 - 1.0);
    numerator / denominator
}

/// Paired t-test: Tests if paired samples have different means.
///
/// H₀: `μ_diff` = 0
/// H₁: `μ_diff` ≠ 0
///
/// # Errors
///
/// - `InvalidInput` when lengths differ or fewer than 2 pairs are given
/// - `ZeroVariance` when every difference is identical
pub fn ttest_rel(sample1: &[f64], sample2: &[f64]) -> Result<TTestResult> {
    if sample1.len() != sample2.len() {
        return Err(TcalcError::invalid_input(
            "paired t-test",
            format!(
                "samples must have equal length, got {} and {}",
                sample1.len(),
                sample2.len()
            ),
        ));
    }

    let diffs = differences(sample1, sample2);
    let scale = max_abs(sample1).max(max_abs(sample2));
    one_sample_impl(&diffs, 0.0, scale, "paired t-test", "paired differences")
}

/// Per-pair differences `x_i - y_i` (truncated to the shorter input).
#[must_use]
pub fn differences(sample1: &[f64], sample2: &[f64]) -> Vec<f64> {
    sample1
        .iter()
        .zip(sample2.iter())
        .map(|(&x1, &x2)| x1 - x2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttest_1samp_reference_data() {
        let data = [10.0, 12.0, 9.0, 11.0, 13.0, 8.0, 14.0, 10.0, 12.0, 11.0];
        let r = ttest_1samp(&data, 10.0).expect("valid input");
        // mean 11, s = sqrt(30/9), se = s / sqrt(10), t = sqrt(3)
        assert!((r.statistic - 3.0_f64.sqrt()).abs() < 1e-10, "t = {}", r.statistic);
        assert_eq!(r.df, 9.0);
        // scipy.stats.ttest_1samp -> p = 0.11730
        assert!((r.pvalue - 0.117_30).abs() < 1e-4, "p = {}", r.pvalue);
        assert_eq!(r.estimate, 11.0);
        assert_eq!(r.mean_diff, 1.0);
    }

    #[test]
    fn test_ttest_1samp_too_small() {
        let err = ttest_1samp(&[1.0], 0.0).unwrap_err();
        assert!(matches!(err, TcalcError::InvalidInput { .. }));
        let err = ttest_1samp(&[], 0.0).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_ttest_1samp_constant_sample() {
        let err = ttest_1samp(&[4.0, 4.0, 4.0], 3.0).unwrap_err();
        assert!(matches!(err, TcalcError::ZeroVariance { .. }));
    }

    #[test]
    fn test_ttest_1samp_constant_inexact_values() {
        // 0.1 has no exact binary form; the mean picks up a rounding error
        let err = ttest_1samp(&[0.1, 0.1, 0.1], 0.0).unwrap_err();
        assert_eq!(err, TcalcError::zero_variance("sample"));
        let err = ttest_1samp(&[1e-9 / 3.0; 7], 0.0).unwrap_err();
        assert!(matches!(err, TcalcError::ZeroVariance { .. }));
    }

    #[test]
    fn test_ttest_1samp_tiny_scale_is_not_constant() {
        let data = [1.0e-12, 1.2e-12, 0.9e-12, 1.1e-12];
        let r = ttest_1samp(&data, 0.0).expect("real spread at small scale");
        assert!(r.statistic.is_finite() && r.statistic > 0.0);
    }

    #[test]
    fn test_ttest_1samp_non_finite() {
        assert!(ttest_1samp(&[1.0, f64::NAN, 3.0], 0.0).is_err());
        assert!(ttest_1samp(&[1.0, 2.0, 3.0], f64::INFINITY).is_err());
    }

    #[test]
    fn test_ttest_ind_pooled_known_value() {
        let a = [2.3, 2.5, 2.7, 2.9, 3.1];
        let b = [3.2, 3.4, 3.6, 3.8, 4.0];
        let r = ttest_ind(&a, &b, true).expect("valid");
        // equal spreads (var 0.1), mean diff -0.9, se = sqrt(0.1 * 0.4) = 0.2
        assert!((r.statistic + 4.5).abs() < 1e-10, "t = {}", r.statistic);
        assert_eq!(r.df, 8.0);
        assert_eq!(r.equal_var, Some(true));
        assert!((r.effect_sd - 0.1_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_ttest_ind_welch_df() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
        let r = ttest_ind(&a, &b, false).expect("valid");
        let expected = welch_df(2.5, 466.666_666_666_666_7, 5.0, 7.0);
        assert!((r.df - expected).abs() < 1e-9);
        assert!(r.df > 0.0 && r.df <= 10.0);
        assert_eq!(r.equal_var, Some(false));
    }

    #[test]
    fn test_welch_equals_pooled_for_equal_sizes_and_variances() {
        // n1 = n2 and s1 = s2 -> Welch df = 2n - 2
        let df = welch_df(4.0, 4.0, 10.0, 10.0);
        assert!((df - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_ttest_ind_zero_pooled_variance() {
        let err = ttest_ind(&[1.0, 1.0], &[2.0, 2.0], true).unwrap_err();
        assert!(matches!(err, TcalcError::ZeroVariance { .. }));
        let err = ttest_ind(&[1.0, 1.0], &[2.0, 2.0], false).unwrap_err();
        assert!(matches!(err, TcalcError::ZeroVariance { .. }));
    }

    #[test]
    fn test_ttest_ind_constant_inexact_groups() {
        let a = [0.1, 0.1, 0.1];
        let b = [0.7, 0.7, 0.7, 0.7];
        let err = ttest_ind(&a, &b, true).unwrap_err();
        assert_eq!(err, TcalcError::zero_variance("pooled standard deviation"));
        let err = ttest_ind(&a, &b, false).unwrap_err();
        assert_eq!(err, TcalcError::zero_variance("Welch standard error"));
    }

    #[test]
    fn test_ttest_ind_small_group() {
        let err = ttest_ind(&[1.0], &[2.0, 3.0], true).unwrap_err();
        assert!(err.to_string().contains("group 1"));
    }

    #[test]
    fn test_ttest_rel_matches_one_sample_on_differences() {
        let before = [200.0, 190.0, 210.0, 220.0, 205.0];
        let after = [195.0, 185.0, 200.0, 212.0, 204.0];
        let diffs = differences(&before, &after);
        let paired = ttest_rel(&before, &after).expect("valid");
        let single = ttest_1samp(&diffs, 0.0).expect("valid");
        assert_eq!(paired.statistic, single.statistic);
        assert_eq!(paired.df, 4.0);
        assert_eq!(paired.pvalue, single.pvalue);
    }

    #[test]
    fn test_ttest_rel_length_mismatch() {
        let err = ttest_rel(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("equal length"));
    }

    #[test]
    fn test_ttest_rel_constant_differences() {
        let g1 = [5.0, 6.0, 7.0, 8.0, 9.0];
        let g2 = [4.0, 5.0, 6.0, 7.0, 8.0];
        let err = ttest_rel(&g1, &g2).unwrap_err();
        assert_eq!(err, TcalcError::zero_variance("paired differences"));
    }

    #[test]
    fn test_ttest_rel_constant_inexact_shift() {
        // every difference is 0.1 up to rounding
        let g1 = [0.3, 0.6, 0.9, 1.2];
        let g2 = [0.2, 0.5, 0.8, 1.1];
        let err = ttest_rel(&g1, &g2).unwrap_err();
        assert_eq!(err, TcalcError::zero_variance("paired differences"));
    }
}
