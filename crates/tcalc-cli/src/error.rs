//! Error types for tcalc-cli

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// The statistics core rejected the input
    #[error(transparent)]
    Stats(#[from] tcalc::TcalcError),

    /// A command-line value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Config file is missing or malformed
    #[error("Config error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::Stats(_) => ExitCode::from(1),
            Self::Parse(_) => ExitCode::from(4),
            Self::Config { .. } => ExitCode::from(3),
            Self::Json(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
        }
    }
}
