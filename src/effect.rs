//! Effect size and confidence intervals.
//!
//! Cohen's d standardizes a mean difference by a standard deviation chosen
//! by the caller:
//!
//! | test | sd |
//! |------|----|
//! | one-sample | sample sd |
//! | paired | sd of the differences |
//! | two-sample, pooled | pooled sd |
//! | two-sample, Welch | √((s₁² + s₂²) / 2) |

use crate::error::{Result, TcalcError};
use crate::spec::Tail;
use crate::stats::distribution::t_quantile;
use serde::Serialize;
use std::fmt;

/// Cohen's d = `mean_diff / sd`.
///
/// # Errors
///
/// `ZeroVariance` when `sd` is zero, negative or not finite.
///
/// # Examples
///
/// ```
/// use tcalc::effect::cohens_d;
///
/// assert_eq!(cohens_d(1.5, 3.0).expect("positive sd"), 0.5);
/// assert!(cohens_d(1.0, 0.0).is_err());
/// ```
pub fn cohens_d(mean_diff: f64, sd: f64) -> Result<f64> {
    if !(sd > 0.0 && sd.is_finite()) {
        return Err(TcalcError::zero_variance("effect size standard deviation"));
    }
    Ok(mean_diff / sd)
}

/// Conventional magnitude buckets for |d|.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeLabel {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectSizeLabel {
    /// Bucket |d|: `< 0.2` negligible, `< 0.5` small, `< 0.8` medium, else large.
    #[must_use]
    pub fn from_d(d: f64) -> Self {
        let magnitude = d.abs();
        if magnitude < 0.2 {
            EffectSizeLabel::Negligible
        } else if magnitude < 0.5 {
            EffectSizeLabel::Small
        } else if magnitude < 0.8 {
            EffectSizeLabel::Medium
        } else {
            EffectSizeLabel::Large
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectSizeLabel::Negligible => "negligible",
            EffectSizeLabel::Small => "small",
            EffectSizeLabel::Medium => "medium",
            EffectSizeLabel::Large => "large",
        }
    }
}

impl fmt::Display for EffectSizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Critical t value for the given tail.
///
/// Two-tailed: quantile at 1 − α/2. One-tailed: quantile at 1 − α.
///
/// # Errors
///
/// `InvalidInput` for alpha outside (0, 1); `Distribution` for a
/// non-positive df.
pub fn critical_t(tail: Tail, alpha: f64, df: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(TcalcError::invalid_input(
            "critical value",
            format!("alpha must be in (0, 1), got {alpha}"),
        ));
    }
    let p = match tail {
        Tail::TwoTailed => 1.0 - alpha / 2.0,
        Tail::OneTailed(_) => 1.0 - alpha,
    };
    t_quantile(p, df)
}

/// Symmetric interval `point ± margin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Interval `[point − critical_t·se, point + critical_t·se]`.
    ///
    /// ```
    /// use tcalc::effect::ConfidenceInterval;
    ///
    /// let ci = ConfidenceInterval::around(10.0, 2.0, 0.5);
    /// assert_eq!((ci.lower, ci.upper), (9.0, 11.0));
    /// assert!(ci.contains(10.0));
    /// ```
    #[must_use]
    pub fn around(point: f64, critical_t: f64, standard_error: f64) -> Self {
        let margin = (critical_t * standard_error).abs();
        Self {
            lower: point - margin,
            upper: point + margin,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}
