//! Variance-equality check (Levene's test, median-centered).
//!
//! Uses absolute deviations from each group's median (the Brown-Forsythe
//! variant), which keeps the test robust to non-normal data, then runs a
//! one-way ANOVA on those deviations.
//!
//! # References
//!
//! - Levene (1960). "Robust tests for equality of variances".
//! - Brown & Forsythe (1974). "Robust tests for the equality of variances".

use super::distribution::f_survival;
use super::DescriptiveStats;
use crate::error::{Result, TcalcError};
use serde::Serialize;
use tracing::debug;

/// Default p-value threshold at or above which variances are treated as equal.
pub const DEFAULT_EQUAL_VARIANCE_THRESHOLD: f64 = 0.05;

/// Result of Levene's test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeveneResult {
    /// W statistic (F-distributed under H₀)
    pub statistic: f64,
    /// p-value for H₀: all group variances are equal
    pub pvalue: f64,
    /// Numerator degrees of freedom (k - 1)
    pub df_between: f64,
    /// Denominator degrees of freedom (N - k)
    pub df_within: f64,
}

impl LeveneResult {
    /// Decision rule: variances are treated as equal when `pvalue >= threshold`.
    #[must_use]
    pub fn equal_variance(&self, threshold: f64) -> bool {
        self.pvalue >= threshold
    }
}

/// Levene's test (median-centered) for two samples.
///
/// # Errors
///
/// Returns `InvalidInput` if either group has fewer than 2 observations or
/// contains non-finite values.
///
/// # Examples
///
/// ```
/// use tcalc::stats::levene;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [6.0, 7.0, 8.0, 9.0, 10.0];
/// let r = levene(&a, &b).expect("valid groups");
/// assert!(r.statistic.abs() < 1e-12);
/// assert!(r.equal_variance(0.05));
/// ```
pub fn levene(sample1: &[f64], sample2: &[f64]) -> Result<LeveneResult> {
    levene_groups(&[sample1, sample2])
}

/// Levene's test (median-centered) for any number of groups (k >= 2).
pub fn levene_groups(groups: &[&[f64]]) -> Result<LeveneResult> {
    let k = groups.len();
    if k < 2 {
        return Err(TcalcError::invalid_input(
            "Levene's test",
            format!("requires at least 2 groups, got {k}"),
        ));
    }
    for (i, g) in groups.iter().enumerate() {
        if g.len() < 2 {
            return Err(TcalcError::insufficient_data(
                &format!("Levene's test (group {})", i + 1),
                2,
                g.len(),
            ));
        }
        if g.iter().any(|v| !v.is_finite()) {
            return Err(TcalcError::invalid_input(
                "Levene's test",
                format!("group {} contains non-finite values", i + 1),
            ));
        }
    }

    // z_ij = |x_ij - median_i|
    let mut z_groups = Vec::with_capacity(k);
    for g in groups {
        let median = DescriptiveStats::new(g).median()?;
        z_groups.push(g.iter().map(|&x| (x - median).abs()).collect::<Vec<f64>>());
    }

    let n_total: usize = z_groups.iter().map(Vec::len).sum();
    let z_means: Vec<f64> = z_groups
        .iter()
        .map(|z| z.iter().sum::<f64>() / z.len() as f64)
        .collect();
    let grand_mean = z_groups.iter().flatten().sum::<f64>() / n_total as f64;

    let ss_between: f64 = z_groups
        .iter()
        .zip(&z_means)
        .map(|(z, &m)| z.len() as f64 * (m - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = z_groups
        .iter()
        .zip(&z_means)
        .map(|(z, &m)| z.iter().map(|&v| (v - m).powi(2)).sum::<f64>())
        .sum();

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;

    // Degenerate spread: every deviation equals its group mean. The cutoff
    // is relative to Σz², like W itself.
    let sum_sq: f64 = z_groups.iter().flatten().map(|v| v * v).sum();
    let tolerance = n_total as f64 * f64::EPSILON * sum_sq;
    let (statistic, pvalue) = if ss_within <= tolerance {
        if ss_between <= tolerance {
            (0.0, 1.0)
        } else {
            (f64::INFINITY, 0.0)
        }
    } else {
        let w = (df_within / df_between) * (ss_between / ss_within);
        (w, f_survival(w, df_between, df_within)?)
    };

    debug!(statistic, pvalue, df_between, df_within, "Levene's test");

    Ok(LeveneResult {
        statistic,
        pvalue,
        df_between,
        df_within,
    })
}
