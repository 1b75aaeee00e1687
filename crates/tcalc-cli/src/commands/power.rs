//! Power command: probability of detecting an effect of a given size.

use crate::error::Result;
use crate::output;
use serde::Serialize;
use tcalc::stats::ttest_power;

/// Power result for JSON output
#[derive(Serialize)]
struct PowerReport {
    effect_size: f64,
    n: usize,
    alpha: f64,
    power: f64,
}

/// Run the power command
pub(crate) fn run(effect_size: f64, n: usize, alpha: f64, json: bool, quiet: bool) -> Result<()> {
    let power = ttest_power(effect_size, n, alpha)?;

    if json {
        return output::json(&PowerReport {
            effect_size,
            n,
            alpha,
            power,
        });
    }
    if quiet {
        return Ok(());
    }

    output::section("T-Test Power (two-sided)");
    output::kv("Effect size (d)", effect_size);
    output::kv("Sample size", n);
    output::kv("Significance level", alpha);
    output::kv("Power", format!("{power:.4}"));
    if power >= 0.8 {
        output::success("Power meets the conventional 0.8 target");
    } else {
        output::warning("Power is below the conventional 0.8 target");
    }
    Ok(())
}
