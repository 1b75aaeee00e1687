//! Describe command: descriptive summary and normality check.

use crate::error::Result;
use crate::output;
use serde::Serialize;
use tcalc::stats::normality::MIN_SAMPLE;
use tcalc::stats::{shapiro_wilk, FiveNumberSummary, ShapiroWilkResult, Summary};
use tcalc::Sample;
use tracing::warn;

/// Describe result for JSON output
#[derive(Serialize)]
struct DescribeReport {
    summary: Summary,
    five_number: FiveNumberSummary,
    iqr: f64,
    /// `None` when the sample is too small or constant
    normality: Option<ShapiroWilkResult>,
}

/// Run the describe command
pub(crate) fn run(data: Vec<f64>, alpha: f64, json: bool, quiet: bool) -> Result<()> {
    let sample = Sample::new(data)?;
    let stats = sample.stats();
    let summary = stats.summary()?;
    let five_number = stats.five_number_summary()?;
    let iqr = stats.iqr()?;

    let normality = if sample.len() < MIN_SAMPLE {
        None
    } else {
        match shapiro_wilk(&sample) {
            Ok(r) => Some(r),
            Err(err) => {
                warn!(%err, "normality check skipped");
                None
            }
        }
    };

    if json {
        return output::json(&DescribeReport {
            summary,
            five_number,
            iqr,
            normality,
        });
    }
    if quiet {
        return Ok(());
    }

    output::section("Descriptive Statistics");
    output::kv("Count", summary.count);
    output::kv("Mean", format!("{:.3}", summary.mean));
    output::kv("Median", format!("{:.3}", summary.median));
    output::kv("Standard Deviation", format!("{:.3}", summary.std_dev));
    output::kv("Variance", format!("{:.3}", summary.variance));
    output::kv("Minimum", format!("{:.3}", summary.min));
    output::kv("Maximum", format!("{:.3}", summary.max));
    output::kv("25th Percentile", format!("{:.3}", summary.p25));
    output::kv("75th Percentile", format!("{:.3}", summary.p75));
    output::kv("IQR", format!("{iqr:.3}"));

    output::section("Normality Check");
    match normality {
        None => output::warning("Sample size too small or constant; normality test skipped."),
        Some(r) => {
            output::kv("Shapiro-Wilk W", format!("{:.3}", r.w));
            output::kv("p-value", output::format_p(r.pvalue));
            if r.looks_normal(alpha) {
                output::success(&format!("Data appears to be normally distributed (p > {alpha})"));
            } else {
                output::fail(&format!("Data may not be normally distributed (p <= {alpha})"));
                output::info("Consider a larger sample or a non-parametric test if n is small.");
            }
        }
    }
    Ok(())
}
