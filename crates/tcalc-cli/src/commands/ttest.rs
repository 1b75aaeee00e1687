//! One-sample, two-sample and paired test commands.

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::output;
use crate::synth::{synthesize, GroupSummary, GROUP1_SEED, GROUP2_SEED};
use tcalc::procedure::{one_sample_with_config, paired_with_config, two_sample_with_config};
use tcalc::{Sample, TestReport};
use tracing::info;

/// How the two-sample groups were supplied.
pub(crate) enum TwoSampleInput {
    Raw { group1: Vec<f64>, group2: Vec<f64> },
    Summary(Vec<String>),
}

/// Run the one-sample command
pub(crate) fn run_one_sample(
    data: Vec<f64>,
    mu: f64,
    settings: &Settings,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let sample = Sample::new(data)?;
    let report = one_sample_with_config(&sample, mu, &settings.spec, &settings.analysis)?;
    emit(&report, json, quiet)
}

/// Run the two-sample command
pub(crate) fn run_two_sample(
    input: TwoSampleInput,
    settings: &Settings,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let (group1, group2) = match input {
        TwoSampleInput::Raw { group1, group2 } => (Sample::new(group1)?, Sample::new(group2)?),
        TwoSampleInput::Summary(specs) => {
            let [first, second] = specs.as_slice() else {
                return Err(CliError::Parse(format!(
                    "--summary must be given exactly twice, got {}",
                    specs.len()
                )));
            };
            let first: GroupSummary = first.parse()?;
            let second: GroupSummary = second.parse()?;
            info!(
                seed1 = GROUP1_SEED,
                seed2 = GROUP2_SEED,
                "synthesizing samples from summary statistics"
            );
            if !quiet && !json {
                output::warning(
                    "samples are synthesized from summary statistics; results describe the drawn samples",
                );
            }
            (
                synthesize(&first, GROUP1_SEED)?,
                synthesize(&second, GROUP2_SEED)?,
            )
        }
    };
    let report = two_sample_with_config(&group1, &group2, &settings.spec, &settings.analysis)?;
    emit(&report, json, quiet)
}

/// Run the paired command
pub(crate) fn run_paired(
    group1: Vec<f64>,
    group2: Vec<f64>,
    settings: &Settings,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let group1 = Sample::new(group1)?;
    let group2 = Sample::new(group2)?;
    let report = paired_with_config(&group1, &group2, &settings.spec, &settings.analysis)?;
    emit(&report, json, quiet)
}

fn emit(report: &TestReport, json: bool, quiet: bool) -> Result<()> {
    if json {
        return output::json(report);
    }
    if quiet {
        return Ok(());
    }

    output::section(report.result.kind.title());
    for line in &report.summary {
        output::kv(&line.label, &line.value);
    }

    for check in &report.normality {
        let msg = format!(
            "Shapiro-Wilk ({}): W = {:.3}, p = {}",
            check.label,
            check.result.w,
            output::format_p(check.result.pvalue)
        );
        if check.looks_normal {
            output::success(&msg);
        } else {
            output::warning(&format!("{msg}; data may not be normally distributed"));
        }
    }

    println!();
    if report.result.reject_null {
        output::success(report.conclusion());
    } else {
        output::info(report.conclusion());
    }
    Ok(())
}
