//! tcalc - Student's t-test calculator
//!
//! Usage:
//!   tcalc one-sample --data 10,12,9,11,13 --mu 10          # One-sample test
//!   tcalc two-sample --group1 1,2,3 --group2 4,5,6         # Independent groups
//!   tcalc two-sample --summary 30,50,5 --summary 30,55,5   # From n,mean,sd
//!   tcalc paired --group1 5,6,8 --group2 4,6,6             # Before/after pairs
//!   tcalc describe --data 1,2,3,4,5                        # Summary + Shapiro-Wilk
//!   tcalc power --effect-size 0.5 --n 30                   # Power of a t-test
//!
//! Global flags such as `--tail one-tailed --direction greater --alpha 0.01`
//! apply to every test command.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;
mod synth;

use commands::ttest::TwoSampleInput;
use commands::{describe, power, ttest};
use config::{FlagOverrides, Settings};

/// tcalc - Student's t-test calculator
///
/// One-sample, two-sample (pooled or Welch) and paired t-tests with
/// confidence intervals and Cohen's d.
#[derive(Parser)]
#[command(name = "tcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Significance level in (0, 1) [default: 0.05]
    #[arg(long, global = true)]
    alpha: Option<f64>,

    /// Test type: one-tailed or two-tailed [default: two-tailed]
    #[arg(long, global = true, value_name = "TYPE")]
    tail: Option<String>,

    /// Direction for one-tailed tests: greater or less
    #[arg(long, global = true)]
    direction: Option<String>,

    /// Run Shapiro-Wilk on the tested data
    #[arg(long, global = true)]
    diagnostics: bool,

    /// JSON file with default settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a sample mean against a hypothesized population mean
    OneSample {
        /// Observations (comma-separated)
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        data: Vec<f64>,

        /// Hypothesized population mean
        #[arg(long, allow_negative_numbers = true)]
        mu: f64,
    },

    /// Compare the means of two independent groups
    TwoSample {
        /// First group (comma-separated)
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            required_unless_present = "summary",
            conflicts_with = "summary"
        )]
        group1: Vec<f64>,

        /// Second group (comma-separated)
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            required_unless_present = "summary",
            conflicts_with = "summary"
        )]
        group2: Vec<f64>,

        /// Draw each group from n,mean,sd (give twice; seeds 42 and 24)
        #[arg(long, value_name = "N,MEAN,SD", allow_hyphen_values = true)]
        summary: Vec<String>,
    },

    /// Compare paired observations (before/after)
    Paired {
        /// First measurement of each pair (comma-separated)
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        group1: Vec<f64>,

        /// Second measurement of each pair (comma-separated)
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        group2: Vec<f64>,
    },

    /// Descriptive statistics and a normality check
    Describe {
        /// Observations (comma-separated)
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        data: Vec<f64>,
    },

    /// Power of a two-sided one-sample or paired t-test
    Power {
        /// Cohen's d under the alternative
        #[arg(long, allow_negative_numbers = true)]
        effect_size: f64,

        /// Sample size (number of pairs for a paired test)
        #[arg(long)]
        n: usize,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> error::Result<()> {
    let flags = FlagOverrides {
        alpha: cli.alpha,
        tail: cli.tail,
        direction: cli.direction,
        diagnostics: cli.diagnostics,
        config: cli.config,
    };
    let settings = Settings::resolve(&flags)?;
    let (json, quiet) = (cli.json, cli.quiet);

    match cli.command {
        Commands::OneSample { data, mu } => ttest::run_one_sample(data, mu, &settings, json, quiet),

        Commands::TwoSample {
            group1,
            group2,
            summary,
        } => {
            let input = if summary.is_empty() {
                TwoSampleInput::Raw { group1, group2 }
            } else {
                TwoSampleInput::Summary(summary)
            };
            ttest::run_two_sample(input, &settings, json, quiet)
        }

        Commands::Paired { group1, group2 } => {
            ttest::run_paired(group1, group2, &settings, json, quiet)
        }

        Commands::Describe { data } => describe::run(data, settings.spec.alpha(), json, quiet),

        Commands::Power { effect_size, n } => {
            power::run(effect_size, n, settings.spec.alpha(), json, quiet)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            e.exit_code()
        }
    }
}
