//! Test procedures: one per t-test variant.
//!
//! Each procedure sequences the pieces in the same order:
//!
//! 1. validate sizes (two-sample: run the variance-equality check)
//! 2. run the t-test engine for the two-tailed p-value
//! 3. adjust the p-value when the test is one-tailed
//! 4. compute the critical t, confidence interval and effect size
//! 5. decide: reject H₀ iff `p_value < alpha`
//!
//! The result is a [`TestReport`]: a [`TestResult`] plus labelled summary
//! lines ready for display.
//!
//! # Example
//!
//! ```
//! use tcalc::prelude::*;
//!
//! let sample = Sample::new(vec![10.0, 12.0, 9.0, 11.0, 13.0, 8.0, 14.0, 10.0, 12.0, 11.0])
//!     .expect("finite data");
//! let report = one_sample(&sample, 10.0, &TestSpec::default()).expect("valid test");
//!
//! assert_eq!(report.result.degrees_of_freedom, 9.0);
//! assert!(!report.result.reject_null);
//! ```

use crate::effect::{cohens_d, critical_t, ConfidenceInterval, EffectSizeLabel};
use crate::error::{Result, TcalcError};
use crate::sample::Sample;
use crate::spec::{AnalysisConfig, Tail, TestSpec};
use crate::stats::hypothesis::{differences, ttest_1samp, ttest_ind, ttest_rel, TTestResult};
use crate::stats::levene::{levene, LeveneResult};
use crate::stats::normality::{shapiro_wilk, ShapiroWilkResult, MIN_SAMPLE};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Which t-test produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TestKind {
    OneSample { hypothesized_mean: f64 },
    TwoSample,
    Paired,
}

impl TestKind {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            TestKind::OneSample { .. } => "One-Sample T-Test",
            TestKind::TwoSample => "Two-Sample Independent T-Test",
            TestKind::Paired => "Paired T-Test",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Complete outcome of one t-test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub kind: TestKind,
    pub t_statistic: f64,
    /// n − 1, n₁ + n₂ − 2, or the (fractional) Welch df
    pub degrees_of_freedom: f64,
    /// Final p-value for the requested tail
    pub p_value: f64,
    pub p_value_two_tailed: f64,
    /// Non-negative; applies as ±critical_t for two-tailed tests
    pub critical_t: f64,
    pub confidence_interval: ConfidenceInterval,
    /// 1 − α
    pub confidence_level: f64,
    /// Sample mean (one-sample) or mean difference
    pub point_estimate: f64,
    pub standard_error: f64,
    /// Cohen's d
    pub effect_size: f64,
    pub effect_size_label: EffectSizeLabel,
    /// Set only for the two-sample test
    pub equal_variance_assumed: Option<bool>,
    pub variance_check: Option<LeveneResult>,
    pub alpha: f64,
    pub tail: Tail,
    pub reject_null: bool,
}

/// Shapiro-Wilk outcome for one of the analysed samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityCheck {
    /// Which data was checked ("sample", "group 1", "differences", ...)
    pub label: String,
    pub result: ShapiroWilkResult,
    pub looks_normal: bool,
}

/// One labelled line of the human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl SummaryLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A [`TestResult`] plus the lines a presenter shows for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub result: TestResult,
    pub summary: Vec<SummaryLine>,
    /// Empty unless [`AnalysisConfig::check_normality`] is set
    pub normality: Vec<NormalityCheck>,
}

impl TestReport {
    /// "Reject the null hypothesis." or "Fail to reject the null hypothesis."
    #[must_use]
    pub fn conclusion(&self) -> &'static str {
        if self.result.reject_null {
            "Reject the null hypothesis."
        } else {
            "Fail to reject the null hypothesis."
        }
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.result.kind)?;
        let width = self
            .summary
            .iter()
            .map(|line| line.label.len())
            .max()
            .unwrap_or(0);
        for line in &self.summary {
            writeln!(f, "{:<width$}  {}", format!("{}:", line.label), line.value, width = width + 1)?;
        }
        for check in &self.normality {
            writeln!(
                f,
                "Shapiro-Wilk ({}): W = {:.3}, p = {:.4}",
                check.label, check.result.w, check.result.pvalue
            )?;
        }
        write!(f, "{}", self.conclusion())
    }
}

/// One-sample t-test of `sample` against `hypothesized_mean`.
///
/// # Errors
///
/// - `InvalidInput` for fewer than 2 observations or a non-finite mean
/// - `ZeroVariance` when every observation is identical
pub fn one_sample(sample: &Sample, hypothesized_mean: f64, spec: &TestSpec) -> Result<TestReport> {
    one_sample_with_config(sample, hypothesized_mean, spec, &AnalysisConfig::default())
}

/// [`one_sample`] with explicit analysis settings.
pub fn one_sample_with_config(
    sample: &Sample,
    hypothesized_mean: f64,
    spec: &TestSpec,
    config: &AnalysisConfig,
) -> Result<TestReport> {
    let raw = ttest_1samp(sample, hypothesized_mean)?;
    let result = finish(TestKind::OneSample { hypothesized_mean }, &raw, spec, None)?;

    let mut summary = vec![
        SummaryLine::new("Sample Size", sample.len().to_string()),
        SummaryLine::new("Sample Mean", format!("{:.3}", raw.estimate)),
        SummaryLine::new("Standard Deviation", format!("{:.3}", raw.effect_sd)),
        SummaryLine::new("Standard Error", format!("{:.3}", raw.std_error)),
        SummaryLine::new("Population Mean (H0)", format!("{hypothesized_mean}")),
    ];
    summary.extend(common_lines(&result, "Mean"));

    let normality = if config.check_normality {
        normality_checks(&[("sample", sample.as_slice())])
    } else {
        Vec::new()
    };
    Ok(TestReport {
        result,
        summary,
        normality,
    })
}

/// Two-sample independent t-test.
///
/// Levene's test decides between the pooled and the Welch variant.
///
/// # Errors
///
/// - `InvalidInput` when either group has fewer than 2 observations
/// - `ZeroVariance` when the chosen standard error is zero
pub fn two_sample(group1: &Sample, group2: &Sample, spec: &TestSpec) -> Result<TestReport> {
    two_sample_with_config(group1, group2, spec, &AnalysisConfig::default())
}

/// [`two_sample`] with explicit analysis settings.
pub fn two_sample_with_config(
    group1: &Sample,
    group2: &Sample,
    spec: &TestSpec,
    config: &AnalysisConfig,
) -> Result<TestReport> {
    for (label, group) in [("group 1", group1), ("group 2", group2)] {
        if group.len() < 2 {
            return Err(TcalcError::insufficient_data(
                &format!("two-sample t-test ({label})"),
                2,
                group.len(),
            ));
        }
    }

    let variance_check = levene(group1, group2)?;
    let equal_var = variance_check.equal_variance(config.levene_threshold);
    debug!(
        levene_p = variance_check.pvalue,
        threshold = config.levene_threshold,
        equal_var,
        "variance-equality decision"
    );

    let raw = ttest_ind(group1, group2, equal_var)?;
    let result = finish(TestKind::TwoSample, &raw, spec, Some(variance_check))?;

    let mut summary = vec![
        SummaryLine::new("Group 1 Mean", format!("{:.3}", group1.stats().mean()?)),
        SummaryLine::new("Group 2 Mean", format!("{:.3}", group2.stats().mean()?)),
        SummaryLine::new("Mean Difference", format!("{:.3}", raw.mean_diff)),
        SummaryLine::new(
            "Levene's Test",
            format!(
                "W = {:.3}, p = {:.4}",
                variance_check.statistic, variance_check.pvalue
            ),
        ),
        SummaryLine::new(
            "Equal Variances Assumed?",
            if equal_var { "Yes" } else { "No" },
        ),
    ];
    summary.extend(common_lines(&result, "Mean Difference"));

    let normality = if config.check_normality {
        normality_checks(&[("group 1", group1.as_slice()), ("group 2", group2.as_slice())])
    } else {
        Vec::new()
    };
    Ok(TestReport {
        result,
        summary,
        normality,
    })
}

/// Paired t-test on per-pair differences `group1[i] - group2[i]`.
///
/// # Errors
///
/// - `InvalidInput` when the groups differ in length or hold fewer than 2 pairs
/// - `ZeroVariance` when every difference is identical
pub fn paired(group1: &Sample, group2: &Sample, spec: &TestSpec) -> Result<TestReport> {
    paired_with_config(group1, group2, spec, &AnalysisConfig::default())
}

/// [`paired`] with explicit analysis settings.
pub fn paired_with_config(
    group1: &Sample,
    group2: &Sample,
    spec: &TestSpec,
    config: &AnalysisConfig,
) -> Result<TestReport> {
    let raw = ttest_rel(group1, group2)?;
    let result = finish(TestKind::Paired, &raw, spec, None)?;

    let mut summary = vec![
        SummaryLine::new("Number of Pairs", group1.len().to_string()),
        SummaryLine::new("Group 1 Mean", format!("{:.3}", group1.stats().mean()?)),
        SummaryLine::new("Group 2 Mean", format!("{:.3}", group2.stats().mean()?)),
        SummaryLine::new("Mean Difference", format!("{:.3}", raw.mean_diff)),
        SummaryLine::new(
            "Standard Deviation of Differences",
            format!("{:.3}", raw.effect_sd),
        ),
    ];
    summary.extend(common_lines(&result, "Mean Difference"));

    let normality = if config.check_normality {
        let diffs = differences(group1, group2);
        normality_checks(&[("differences", diffs.as_slice())])
    } else {
        Vec::new()
    };
    Ok(TestReport {
        result,
        summary,
        normality,
    })
}

/// Steps 3 to 5, shared by every variant.
fn finish(
    kind: TestKind,
    raw: &TTestResult,
    spec: &TestSpec,
    variance_check: Option<LeveneResult>,
) -> Result<TestResult> {
    let tail = spec.tail();
    let alpha = spec.alpha();
    let p_value = spec.finalize_pvalue(raw.pvalue, raw.statistic);
    let critical = critical_t(tail, alpha, raw.df)?;
    let confidence_interval = ConfidenceInterval::around(raw.estimate, critical, raw.std_error);
    let effect_size = cohens_d(raw.mean_diff, raw.effect_sd)?;
    let reject_null = p_value < alpha;

    debug!(
        %kind,
        t = raw.statistic,
        df = raw.df,
        p_value,
        reject_null,
        "test finished"
    );

    Ok(TestResult {
        kind,
        t_statistic: raw.statistic,
        degrees_of_freedom: raw.df,
        p_value,
        p_value_two_tailed: raw.pvalue,
        critical_t: critical,
        confidence_interval,
        confidence_level: spec.confidence_level(),
        point_estimate: raw.estimate,
        standard_error: raw.std_error,
        effect_size,
        effect_size_label: EffectSizeLabel::from_d(effect_size),
        equal_variance_assumed: raw.equal_var,
        variance_check,
        alpha,
        tail,
        reject_null,
    })
}

fn common_lines(result: &TestResult, estimate_name: &str) -> Vec<SummaryLine> {
    let critical = match result.tail {
        Tail::TwoTailed => format!("±{:.3}", result.critical_t),
        Tail::OneTailed(_) => format!("{:.3}", result.critical_t),
    };
    vec![
        SummaryLine::new("Test", result.tail.to_string()),
        SummaryLine::new("t-statistic", format!("{:.3}", result.t_statistic)),
        SummaryLine::new(
            "Degrees of Freedom",
            format_df(result.degrees_of_freedom),
        ),
        SummaryLine::new("p-value", format!("{:.4}", result.p_value)),
        SummaryLine::new("Critical t-value", critical),
        SummaryLine::new(
            format!(
                "{}% CI for {estimate_name}",
                format_percent(result.confidence_level)
            ),
            format!(
                "[{:.3}, {:.3}]",
                result.confidence_interval.lower, result.confidence_interval.upper
            ),
        ),
        SummaryLine::new("Cohen's d (effect size)", format!("{:.3}", result.effect_size)),
        SummaryLine::new(
            "Effect size interpretation",
            result.effect_size_label.to_string(),
        ),
        SummaryLine::new("Significance level", format!("{}", result.alpha)),
    ]
}

/// Whole-number df print without decimals; Welch df keeps three.
fn format_df(df: f64) -> String {
    if df.fract() == 0.0 {
        format!("{df:.0}")
    } else {
        format!("{df:.3}")
    }
}

/// 0.95 -> "95", 0.975 -> "97.5"
fn format_percent(level: f64) -> String {
    let pct = (level * 1000.0).round() / 10.0;
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        format!("{pct:.1}")
    }
}

fn normality_checks(samples: &[(&str, &[f64])]) -> Vec<NormalityCheck> {
    let mut checks = Vec::with_capacity(samples.len());
    for &(label, data) in samples {
        if data.len() < MIN_SAMPLE {
            warn!(label, n = data.len(), "sample too small for normality check");
            continue;
        }
        match shapiro_wilk(data) {
            Ok(result) => checks.push(NormalityCheck {
                label: label.to_string(),
                looks_normal: result.looks_normal(0.05),
                result,
            }),
            Err(err) => warn!(label, %err, "normality check skipped"),
        }
    }
    checks
}
