//! Descriptive statistics and the statistical tests built on them.
//!
//! - Mean, variance and standard deviation (Bessel-corrected)
//! - Quantiles and percentiles using the R-7 method (Hyndman & Fan 1996),
//!   the same linear interpolation `NumPy` uses by default
//! - Five-number summary and IQR
//! - Hypothesis testing: one-sample, two-sample and paired t-tests
//! - Levene/Brown-Forsythe variance-equality check
//! - Shapiro-Wilk normality check and t-test power
//!
//! # Examples
//!
//! ```
//! use tcalc::stats::DescriptiveStats;
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(&data);
//!
//! assert_eq!(stats.quantile(0.5).expect("median should be computable for valid data"), 3.0);
//! assert_eq!(stats.quantile(0.0).expect("min quantile should be computable for valid data"), 1.0);
//! assert_eq!(stats.quantile(1.0).expect("max quantile should be computable for valid data"), 5.0);
//! ```

pub mod distribution;
pub mod hypothesis;
pub mod levene;
pub mod normality;
pub mod power;

pub use hypothesis::{ttest_1samp, ttest_ind, ttest_rel, TTestResult};
pub use levene::{levene, LeveneResult};
pub use normality::{shapiro_wilk, ShapiroWilkResult};
pub use power::ttest_power;

use crate::error::{Result, TcalcError};
use serde::Serialize;

/// Descriptive statistics computed on a slice of f64 values.
///
/// Borrows the data; nothing is copied until an order statistic is needed.
#[derive(Debug, Clone, Copy)]
pub struct DescriptiveStats<'a> {
    data: &'a [f64],
}

/// Five-number summary: minimum, Q1, median, Q3, maximum.
///
/// This is the foundation for box plots and outlier detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Full descriptive summary of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of observations
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (denominator n - 1)
    pub std_dev: f64,
    /// Sample variance (denominator n - 1)
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    /// 25th percentile
    pub p25: f64,
    /// 75th percentile
    pub p75: f64,
}

impl<'a> DescriptiveStats<'a> {
    /// Create a new `DescriptiveStats` view over `data`.
    ///
    /// # Examples
    /// ```
    /// use tcalc::stats::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::new(&[1.0, 2.0, 3.0]);
    /// assert_eq!(stats.len(), 3);
    /// ```
    #[must_use]
    pub fn new(data: &'a [f64]) -> Self {
        Self { data }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Arithmetic mean.
    ///
    /// # Errors
    /// Returns error if the data is empty.
    pub fn mean(&self) -> Result<f64> {
        if self.data.is_empty() {
            return Err(TcalcError::empty_input("mean"));
        }
        Ok(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Sample variance with Bessel's correction (denominator n - 1).
    ///
    /// # Errors
    /// Returns error if fewer than 2 observations are available.
    pub fn variance(&self) -> Result<f64> {
        let n = self.data.len();
        if n < 2 {
            return Err(TcalcError::insufficient_data("variance", 2, n));
        }
        let mean = self.mean()?;
        let ss = self.data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
        Ok(ss / (n - 1) as f64)
    }

    /// Sample standard deviation (denominator n - 1).
    ///
    /// # Errors
    /// Returns error if fewer than 2 observations are available.
    pub fn std_dev(&self) -> Result<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Smallest observation.
    pub fn min(&self) -> Result<f64> {
        self.data
            .iter()
            .copied()
            .min_by(f64::total_cmp)
            .ok_or_else(|| TcalcError::empty_input("min"))
    }

    /// Largest observation.
    pub fn max(&self) -> Result<f64> {
        self.data
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .ok_or_else(|| TcalcError::empty_input("max"))
    }

    /// Compute quantile using linear interpolation (R-7 method).
    ///
    /// Uses `select_nth_unstable_by` for O(n) average-case selection
    /// instead of a full sort.
    ///
    /// # Arguments
    /// * `q` - Quantile value in [0, 1]
    ///
    /// # Errors
    /// Returns error if:
    /// - Data is empty
    /// - Quantile q is not in [0, 1]
    ///
    /// # Examples
    /// ```
    /// use tcalc::stats::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::new(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(stats.quantile(0.5).expect("valid"), 2.5);
    /// ```
    pub fn quantile(&self, q: f64) -> Result<f64> {
        if self.data.is_empty() {
            return Err(TcalcError::empty_input("quantile"));
        }
        if !(0.0..=1.0).contains(&q) {
            return Err(TcalcError::invalid_input(
                "quantile",
                format!("quantile must be in [0, 1], got {q}"),
            ));
        }

        let n = self.data.len();
        if n == 1 {
            return Ok(self.data[0]);
        }

        // R-7: h = (n - 1) * q, 0-indexed position in the sorted data
        let h = (n - 1) as f64 * q;
        let h_floor = h.floor() as usize;
        let h_ceil = h.ceil() as usize;

        let mut working = self.data.to_vec();
        working.select_nth_unstable_by(h_floor, f64::total_cmp);
        let lower = working[h_floor];
        if h_floor == h_ceil {
            return Ok(lower);
        }

        // Everything right of h_floor is >= lower, so the ceil element is
        // the minimum of that partition.
        let upper = working[h_floor + 1..]
            .iter()
            .copied()
            .min_by(f64::total_cmp)
            .unwrap_or(lower);

        Ok(lower + (h - h_floor as f64) * (upper - lower))
    }

    /// Median (0.5 quantile).
    pub fn median(&self) -> Result<f64> {
        self.quantile(0.5)
    }

    /// Compute multiple percentiles efficiently (single sort).
    ///
    /// # Arguments
    /// * `percentiles` - Slice of percentile values (0-100)
    ///
    /// # Returns
    /// Vector of percentile values in the same order as input
    ///
    /// # Examples
    /// ```
    /// use tcalc::stats::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::new(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// let p = stats.percentiles(&[25.0, 50.0, 75.0]).expect("percentiles should be computable for valid data");
    /// assert_eq!(p, vec![2.0, 3.0, 4.0]);
    /// ```
    pub fn percentiles(&self, percentiles: &[f64]) -> Result<Vec<f64>> {
        if self.data.is_empty() {
            return Err(TcalcError::empty_input("percentiles"));
        }
        if let Some(&bad) = percentiles.iter().find(|p| !(0.0..=100.0).contains(*p)) {
            return Err(TcalcError::invalid_input(
                "percentiles",
                format!("percentile must be in [0, 100], got {bad}"),
            ));
        }

        let mut sorted = self.data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();

        Ok(percentiles
            .iter()
            .map(|&p| {
                let h = (n - 1) as f64 * (p / 100.0);
                let h_floor = h.floor() as usize;
                let h_ceil = h.ceil() as usize;
                if h_floor == h_ceil {
                    sorted[h_floor]
                } else {
                    let fraction = h - h_floor as f64;
                    sorted[h_floor] + fraction * (sorted[h_ceil] - sorted[h_floor])
                }
            })
            .collect())
    }

    /// Compute five-number summary: min, Q1, median, Q3, max.
    ///
    /// # Examples
    /// ```
    /// use tcalc::stats::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::new(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// let summary = stats.five_number_summary().expect("five-number summary should be computable for valid data");
    ///
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.q1, 2.0);
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!(summary.q3, 4.0);
    /// assert_eq!(summary.max, 5.0);
    /// ```
    pub fn five_number_summary(&self) -> Result<FiveNumberSummary> {
        let values = self.percentiles(&[0.0, 25.0, 50.0, 75.0, 100.0])?;
        Ok(FiveNumberSummary {
            min: values[0],
            q1: values[1],
            median: values[2],
            q3: values[3],
            max: values[4],
        })
    }

    /// Compute interquartile range (IQR = Q3 - Q1).
    pub fn iqr(&self) -> Result<f64> {
        let summary = self.five_number_summary()?;
        Ok(summary.q3 - summary.q1)
    }

    /// Full descriptive summary.
    ///
    /// # Errors
    /// Returns error if fewer than 2 observations are available (the
    /// standard deviation is undefined).
    pub fn summary(&self) -> Result<Summary> {
        let variance = self.variance()?;
        let five = self.five_number_summary()?;
        Ok(Summary {
            count: self.data.len(),
            mean: self.mean()?,
            median: five.median,
            std_dev: variance.sqrt(),
            variance,
            min: five.min,
            max: five.max,
            p25: five.q1,
            p75: five.q3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_empty() {
        let stats = DescriptiveStats::new(&[]);
        assert!(stats.quantile(0.5).is_err());
    }

    #[test]
    fn test_quantile_single_element() {
        let data = [42.0];
        let stats = DescriptiveStats::new(&data);
        for q in [0.0, 0.5, 1.0] {
            assert_eq!(
                stats
                    .quantile(q)
                    .expect("quantile should succeed for single element"),
                42.0
            );
        }
    }

    #[test]
    fn test_quantile_two_elements() {
        let data = [1.0, 2.0];
        let stats = DescriptiveStats::new(&data);
        assert_eq!(stats.quantile(0.0).expect("valid"), 1.0);
        assert_eq!(stats.quantile(0.5).expect("valid"), 1.5);
        assert_eq!(stats.quantile(1.0).expect("valid"), 2.0);
    }

    #[test]
    fn test_quantile_unsorted_interpolation() {
        let data = [9.0, 1.0, 7.0, 3.0, 5.0, 2.0];
        let stats = DescriptiveStats::new(&data);
        // sorted: 1 2 3 5 7 9, h = 5 * 0.3 = 1.5 -> 2.5
        let q = stats.quantile(0.3).expect("valid");
        assert!((q - 2.5).abs() < 1e-12, "q = {q}");
    }

    #[test]
    fn test_quantile_out_of_range() {
        let data = [1.0, 2.0];
        let stats = DescriptiveStats::new(&data);
        assert!(stats.quantile(-0.1).is_err());
        assert!(stats.quantile(1.1).is_err());
    }

    #[test]
    fn test_percentiles_match_quantile() {
        let data = [10.0, 12.0, 9.0, 11.0, 13.0, 8.0, 14.0, 10.0, 12.0, 11.0];
        let stats = DescriptiveStats::new(&data);
        let p = stats.percentiles(&[25.0, 75.0]).expect("valid");
        assert!((p[0] - stats.quantile(0.25).expect("valid")).abs() < 1e-12);
        assert!((p[1] - stats.quantile(0.75).expect("valid")).abs() < 1e-12);
        // numpy.percentile gives 10.0 and 12.0
        assert!((p[0] - 10.0).abs() < 1e-12);
        assert!((p[1] - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentiles_rejects_out_of_range() {
        let data = [1.0, 2.0];
        assert!(DescriptiveStats::new(&data).percentiles(&[101.0]).is_err());
    }

    #[test]
    fn test_mean_variance_std() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = DescriptiveStats::new(&data);
        assert!((stats.mean().expect("valid") - 5.0).abs() < 1e-12);
        // population variance 4, sample variance 32/7
        assert!((stats.variance().expect("valid") - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev().expect("valid") - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_variance_requires_two() {
        let data = [3.0];
        let err = DescriptiveStats::new(&data).variance().unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_min_max() {
        let data = [3.0, -1.0, 8.5];
        let stats = DescriptiveStats::new(&data);
        assert_eq!(stats.min().expect("valid"), -1.0);
        assert_eq!(stats.max().expect("valid"), 8.5);
        assert!(DescriptiveStats::new(&[]).min().is_err());
    }

    #[test]
    fn test_iqr() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(DescriptiveStats::new(&data).iqr().expect("valid"), 2.0);
    }

    #[test]
    fn test_summary() {
        let data = [10.0, 12.0, 9.0, 11.0, 13.0, 8.0, 14.0, 10.0, 12.0, 11.0];
        let s = DescriptiveStats::new(&data).summary().expect("valid");
        assert_eq!(s.count, 10);
        assert!((s.mean - 11.0).abs() < 1e-12);
        assert!((s.median - 11.0).abs() < 1e-12);
        assert!((s.variance - 30.0 / 9.0).abs() < 1e-12);
        assert_eq!(s.min, 8.0);
        assert_eq!(s.max, 14.0);
    }
}

#[cfg(test)]
#[path = "tests_descriptive_contract.rs"]
mod tests_descriptive_contract;

#[cfg(test)]
#[path = "tests_hypothesis_contract.rs"]
mod tests_hypothesis_contract;
