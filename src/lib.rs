//! tcalc: Student's t-test calculator in pure Rust.
//!
//! tcalc computes the three classical t-tests (one-sample, two-sample
//! independent, paired) from raw samples and reports the t-statistic,
//! degrees of freedom, one- or two-tailed p-value, critical value,
//! confidence interval and Cohen's d.
//!
//! # Quick Start
//!
//! ```
//! use tcalc::prelude::*;
//!
//! let before = Sample::new(vec![200.0, 190.0, 210.0, 220.0, 205.0]).unwrap();
//! let after = Sample::new(vec![195.0, 185.0, 200.0, 212.0, 204.0]).unwrap();
//!
//! // H₁: scores drop after treatment (before − after > 0)
//! let spec = TestSpec::one_tailed(Direction::Greater);
//! let report = paired(&before, &after, &spec).unwrap();
//!
//! assert_eq!(report.result.degrees_of_freedom, 4.0);
//! assert!(report.result.reject_null);
//! println!("{report}");
//! ```
//!
//! # Modules
//!
//! - [`sample`]: Validated, immutable samples
//! - [`spec`]: Tail, direction and significance level
//! - [`stats`]: Descriptive statistics, t-test engine, Levene, Shapiro-Wilk, power
//! - [`tail`]: One-tailed p-value adjustment
//! - [`effect`]: Cohen's d, critical values and confidence intervals
//! - [`procedure`]: End-to-end test procedures producing a [`TestReport`]

pub mod effect;
pub mod error;
pub mod prelude;
pub mod procedure;
pub mod sample;
pub mod spec;
pub mod stats;
pub mod tail;

pub use error::{Result, TcalcError};
pub use procedure::{TestReport, TestResult};
pub use sample::Sample;
pub use spec::{AnalysisConfig, Direction, Tail, TestSpec, TestType};
