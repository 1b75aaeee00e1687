//! One-tailed p-value adjustment.
//!
//! Every test computes a two-tailed p-value first. A one-tailed p-value is
//! half of it when the t-statistic points in the claimed direction, and the
//! complement of that half otherwise.

use crate::spec::Direction;
use tracing::debug;

/// Convert a two-tailed p-value into a one-tailed p-value.
///
/// - `Greater`: `p2 / 2` if `t > 0`, else `1 - p2 / 2`
/// - `Less`: `p2 / 2` if `t < 0`, else `1 - p2 / 2`
///
/// # Examples
///
/// ```
/// use tcalc::spec::Direction;
/// use tcalc::tail::adjust_pvalue;
///
/// assert_eq!(adjust_pvalue(0.04, 2.1, Direction::Greater), 0.02);
/// assert!((adjust_pvalue(0.04, 2.1, Direction::Less) - 0.98).abs() < 1e-12);
/// ```
#[must_use]
pub fn adjust_pvalue(p_two_tailed: f64, t_statistic: f64, direction: Direction) -> f64 {
    let half = p_two_tailed / 2.0;
    let agrees = match direction {
        Direction::Greater => t_statistic > 0.0,
        Direction::Less => t_statistic < 0.0,
    };
    let p = if agrees { half } else { 1.0 - half };
    debug!(%direction, t_statistic, p_two_tailed, p, "one-tailed adjustment");
    p.clamp(0.0, 1.0)
}
