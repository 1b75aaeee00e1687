//! Validated, immutable sample of observations.

use crate::error::{Result, TcalcError};
use crate::stats::DescriptiveStats;
use serde::Serialize;
use std::ops::Deref;

/// A non-empty sequence of finite observations.
///
/// Once built the data can only be read, as a slice.
///
/// # Examples
///
/// ```
/// use tcalc::Sample;
///
/// let sample = Sample::new(vec![1.0, 2.0, 3.0]).expect("finite, non-empty");
/// assert_eq!(sample.len(), 3);
/// assert!(Sample::new(vec![]).is_err());
/// assert!(Sample::new(vec![1.0, f64::NAN]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample(Vec<f64>);

impl Sample {
    /// Validate and wrap observations.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the data is empty or contains NaN or infinity.
    pub fn new(data: Vec<f64>) -> Result<Self> {
        if data.is_empty() {
            return Err(TcalcError::empty_input("sample"));
        }
        if let Some((i, bad)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(TcalcError::invalid_input(
                "sample",
                format!("observation {} is not finite ({bad})", i + 1),
            ));
        }
        Ok(Self(data))
    }

    /// Observations in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Descriptive statistics over this sample.
    #[must_use]
    pub fn stats(&self) -> DescriptiveStats<'_> {
        DescriptiveStats::new(&self.0)
    }
}

impl Deref for Sample {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = TcalcError;

    fn try_from(data: Vec<f64>) -> Result<Self> {
        Self::new(data)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = TcalcError;

    fn try_from(data: &[f64]) -> Result<Self> {
        Self::new(data.to_vec())
    }
}
