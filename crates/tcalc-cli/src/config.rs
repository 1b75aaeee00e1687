//! Run settings: optional JSON config file overridden by command-line flags.
//!
//! ```json
//! {
//!   "alpha": 0.01,
//!   "tail": "one-tailed",
//!   "direction": "greater",
//!   "levene_threshold": 0.1,
//!   "diagnostics": true
//! }
//! ```

use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tcalc::spec::DEFAULT_ALPHA;
use tcalc::{AnalysisConfig, Direction, Tail, TestSpec, TestType};
use tracing::debug;

/// Contents of a `--config` file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) alpha: Option<f64>,
    pub(crate) tail: Option<TestType>,
    pub(crate) direction: Option<Direction>,
    pub(crate) levene_threshold: Option<f64>,
    pub(crate) diagnostics: Option<bool>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }
}

/// Hypothesis settings given on the command line.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlagOverrides {
    pub(crate) alpha: Option<f64>,
    pub(crate) tail: Option<String>,
    pub(crate) direction: Option<String>,
    pub(crate) diagnostics: bool,
    pub(crate) config: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub(crate) spec: TestSpec,
    pub(crate) analysis: AnalysisConfig,
}

impl Settings {
    /// Merge defaults, the config file (if any) and flags, in that order.
    pub(crate) fn resolve(flags: &FlagOverrides) -> Result<Self> {
        let file = match &flags.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(&file, flags)
    }

    fn merge(file: &FileConfig, flags: &FlagOverrides) -> Result<Self> {
        let test_type = match &flags.tail {
            Some(token) => token.parse::<TestType>()?,
            None => file.tail.unwrap_or(TestType::TwoTailed),
        };
        let direction = match &flags.direction {
            Some(token) => Some(token.parse::<Direction>()?),
            None => file.direction,
        };
        // A file-level direction only applies to one-tailed runs.
        let direction = match test_type {
            TestType::TwoTailed if flags.direction.is_none() => None,
            _ => direction,
        };

        let alpha = flags.alpha.or(file.alpha).unwrap_or(DEFAULT_ALPHA);
        let spec = TestSpec::new(Tail::new(test_type, direction)?, alpha)?;

        let mut analysis = AnalysisConfig::default()
            .with_normality_check(flags.diagnostics || file.diagnostics.unwrap_or(false));
        if let Some(threshold) = file.levene_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(CliError::Parse(format!(
                    "levene_threshold must be in [0, 1], got {threshold}"
                )));
            }
            analysis = analysis.with_levene_threshold(threshold);
        }

        Ok(Self { spec, analysis })
    }
}
