//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use tcalc::prelude::*;
//! ```

pub use crate::effect::{cohens_d, ConfidenceInterval, EffectSizeLabel};
pub use crate::error::{Result, TcalcError};
pub use crate::procedure::{
    one_sample, one_sample_with_config, paired, paired_with_config, two_sample,
    two_sample_with_config, TestKind, TestReport, TestResult,
};
pub use crate::sample::Sample;
pub use crate::spec::{AnalysisConfig, Direction, Tail, TestSpec, TestType};
pub use crate::stats::DescriptiveStats;
