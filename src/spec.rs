//! Test specification: tail, direction and significance level.
//!
//! Free-form tokens are parsed once, here, into closed enums. Everything
//! downstream matches on the enums and never re-validates strings.

use crate::error::{Result, TcalcError};
use crate::stats::levene::DEFAULT_EQUAL_VARIANCE_THRESHOLD;
use crate::tail::adjust_pvalue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Whether the alternative hypothesis is one- or two-sided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    OneTailed,
    TwoTailed,
}

impl TestType {
    /// Canonical token.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::OneTailed => "one-tailed",
            TestType::TwoTailed => "two-tailed",
        }
    }
}

impl FromStr for TestType {
    type Err = TcalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one-tailed" => Ok(TestType::OneTailed),
            "two-tailed" => Ok(TestType::TwoTailed),
            _ => Err(TcalcError::InvalidTestType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claimed direction of a one-tailed alternative.
///
/// `Greater` means the first mean (or the sample mean) exceeds the second
/// (or the hypothesized mean).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Greater,
    Less,
}

impl Direction {
    /// Canonical token.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Greater => "greater",
            Direction::Less => "less",
        }
    }
}

impl FromStr for Direction {
    type Err = TcalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greater" => Ok(Direction::Greater),
            "less" => Ok(Direction::Less),
            _ => Err(TcalcError::InvalidDirection(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tail of the test. A direction exists exactly when the test is one-tailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tail {
    TwoTailed,
    OneTailed(Direction),
}

impl Tail {
    /// Build a tail from a test type and an optional direction.
    ///
    /// # Errors
    ///
    /// `InvalidDirection` when a one-tailed test has no direction, or a
    /// two-tailed test is given one.
    pub fn new(test_type: TestType, direction: Option<Direction>) -> Result<Self> {
        match (test_type, direction) {
            (TestType::TwoTailed, None) => Ok(Tail::TwoTailed),
            (TestType::OneTailed, Some(d)) => Ok(Tail::OneTailed(d)),
            (TestType::OneTailed, None) => Err(TcalcError::InvalidDirection(
                "<missing> (one-tailed tests need a direction)".to_string(),
            )),
            (TestType::TwoTailed, Some(d)) => Err(TcalcError::InvalidDirection(format!(
                "{d} (two-tailed tests take no direction)"
            ))),
        }
    }

    /// The test type of this tail.
    #[must_use]
    pub fn test_type(&self) -> TestType {
        match self {
            Tail::TwoTailed => TestType::TwoTailed,
            Tail::OneTailed(_) => TestType::OneTailed,
        }
    }

    /// The direction, present only for one-tailed tests.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Tail::TwoTailed => None,
            Tail::OneTailed(d) => Some(*d),
        }
    }
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tail::TwoTailed => f.write_str("two-tailed"),
            Tail::OneTailed(d) => write!(f, "one-tailed ({d})"),
        }
    }
}

/// What to test and at which significance level.
///
/// # Examples
///
/// ```
/// use tcalc::spec::{Direction, Tail, TestSpec};
///
/// let spec = TestSpec::one_tailed(Direction::Greater).with_alpha(0.01).expect("valid alpha");
/// assert_eq!(spec.tail(), Tail::OneTailed(Direction::Greater));
/// assert_eq!(spec.alpha(), 0.01);
/// assert_eq!(spec.confidence_level(), 0.99);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestSpec {
    tail: Tail,
    alpha: f64,
}

impl Default for TestSpec {
    fn default() -> Self {
        Self {
            tail: Tail::TwoTailed,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl TestSpec {
    /// Create a spec, validating alpha against the tail.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when alpha is outside (0, 1), or when a one-tailed
    /// alpha is 0.5 or more (the one-sided critical value would be negative).
    pub fn new(tail: Tail, alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TcalcError::invalid_input(
                "alpha",
                format!("significance level must be in (0, 1), got {alpha}"),
            ));
        }
        if matches!(tail, Tail::OneTailed(_)) && alpha >= 0.5 {
            return Err(TcalcError::invalid_input(
                "alpha",
                format!("one-tailed significance level must be below 0.5, got {alpha}"),
            ));
        }
        Ok(Self { tail, alpha })
    }

    /// Two-tailed spec at the default alpha.
    #[must_use]
    pub fn two_tailed() -> Self {
        Self::default()
    }

    /// One-tailed spec at the default alpha.
    #[must_use]
    pub fn one_tailed(direction: Direction) -> Self {
        Self {
            tail: Tail::OneTailed(direction),
            alpha: DEFAULT_ALPHA,
        }
    }

    /// Parse from boundary tokens, e.g. `("one-tailed", Some("less"), 0.05)`.
    ///
    /// # Errors
    ///
    /// `InvalidTestType`, `InvalidDirection` or `InvalidInput` (alpha).
    pub fn parse(test_type: &str, direction: Option<&str>, alpha: f64) -> Result<Self> {
        let test_type: TestType = test_type.parse()?;
        let direction = direction.map(str::parse::<Direction>).transpose()?;
        Self::new(Tail::new(test_type, direction)?, alpha)
    }

    /// Replace alpha, re-validating.
    pub fn with_alpha(self, alpha: f64) -> Result<Self> {
        Self::new(self.tail, alpha)
    }

    #[must_use]
    pub fn tail(&self) -> Tail {
        self.tail
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// 1 − α.
    #[must_use]
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    /// Final p-value for this spec from a two-tailed p-value and signed t.
    #[must_use]
    pub fn finalize_pvalue(&self, p_two_tailed: f64, t_statistic: f64) -> f64 {
        match self.tail {
            Tail::TwoTailed => p_two_tailed,
            Tail::OneTailed(direction) => adjust_pvalue(p_two_tailed, t_statistic, direction),
        }
    }
}

/// Analysis settings that are not part of the hypothesis itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Levene p-value at or above which variances are pooled
    pub levene_threshold: f64,
    /// Run the Shapiro-Wilk check on each sample (or the differences)
    pub check_normality: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            levene_threshold: DEFAULT_EQUAL_VARIANCE_THRESHOLD,
            check_normality: false,
        }
    }
}

impl AnalysisConfig {
    /// Set the Levene threshold.
    #[must_use]
    pub fn with_levene_threshold(mut self, threshold: f64) -> Self {
        self.levene_threshold = threshold;
        self
    }

    /// Enable or disable the normality check.
    #[must_use]
    pub fn with_normality_check(mut self, enabled: bool) -> Self {
        self.check_normality = enabled;
        self
    }
}
