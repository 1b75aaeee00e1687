// =========================================================================
// FALSIFY-DS: descriptive statistics contract
//
// Each test names the property it tries to break. A failure message starts
// with "FALSIFIED" and the property id.
//
// References:
//   - Hyndman & Fan (1996) "Sample Quantiles in Statistical Packages"
// =========================================================================

use super::*;

/// FALSIFY-DS-001: Median of sorted data is correct
#[test]
fn falsify_ds_001_median_correct() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let median = DescriptiveStats::new(&data).median().expect("valid median");

    assert!(
        (median - 3.0).abs() < 1e-12,
        "FALSIFIED DS-001: median={median}, expected 3.0"
    );
}

/// FALSIFY-DS-002: Min and max quantiles are the extremes
#[test]
fn falsify_ds_002_extreme_quantiles() {
    let data = [5.0, 1.0, 3.0, 2.0, 4.0];
    let stats = DescriptiveStats::new(&data);
    let min = stats.quantile(0.0).expect("valid quantile");
    let max = stats.quantile(1.0).expect("valid quantile");

    assert!(
        min == 1.0 && max == 5.0,
        "FALSIFIED DS-002: quantile(0)={min}, quantile(1)={max}"
    );
}

/// FALSIFY-DS-003: Variance is shift-invariant
#[test]
fn falsify_ds_003_variance_shift_invariant() {
    let data = [3.1, 4.7, 2.2, 5.9, 4.4];
    let shifted: Vec<f64> = data.iter().map(|x| x + 1000.0).collect();
    let v1 = DescriptiveStats::new(&data).variance().expect("valid");
    let v2 = DescriptiveStats::new(&shifted).variance().expect("valid");

    assert!(
        (v1 - v2).abs() < 1e-9,
        "FALSIFIED DS-003: var={v1}, shifted var={v2}"
    );
}

/// FALSIFY-DS-004: Quantile ordering: Q1 <= median <= Q3
#[test]
fn falsify_ds_004_quantile_ordering() {
    let data = [10.0, 2.0, 8.0, 4.0, 6.0, 1.0, 9.0, 3.0, 7.0, 5.0];
    let stats = DescriptiveStats::new(&data);

    let q1 = stats.quantile(0.25).expect("Q1");
    let median = stats.quantile(0.50).expect("median");
    let q3 = stats.quantile(0.75).expect("Q3");

    assert!(
        q1 <= median && median <= q3,
        "FALSIFIED DS-004: Q1={q1}, median={median}, Q3={q3} ordering violated"
    );
}

mod ds_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// FALSIFY-DS-004-prop: Quantile ordering Q1 <= median <= Q3 for random data
        #[test]
        fn falsify_ds_004_prop_quantile_ordering(
            data in prop::collection::vec(-100.0f64..100.0, 5..30),
        ) {
            let stats = DescriptiveStats::new(&data);

            let q1 = stats.quantile(0.25).expect("Q1");
            let median = stats.quantile(0.50).expect("median");
            let q3 = stats.quantile(0.75).expect("Q3");

            prop_assert!(
                q1 <= median + 1e-12 && median <= q3 + 1e-12,
                "FALSIFIED DS-004-prop: Q1={}, med={}, Q3={}",
                q1, median, q3
            );
        }

        /// FALSIFY-DS-005-prop: quantile() and percentiles() agree
        #[test]
        fn falsify_ds_005_prop_quantile_matches_percentiles(
            data in prop::collection::vec(-100.0f64..100.0, 1..40),
            q in 0.0f64..=1.0,
        ) {
            let stats = DescriptiveStats::new(&data);
            let a = stats.quantile(q).expect("quantile");
            let b = stats.percentiles(&[q * 100.0]).expect("percentile")[0];

            prop_assert!(
                (a - b).abs() < 1e-9,
                "FALSIFIED DS-005-prop: quantile={} percentile={} (q={})",
                a, b, q
            );
        }

        /// FALSIFY-DS-006-prop: Variance is non-negative
        #[test]
        fn falsify_ds_006_prop_variance_non_negative(
            data in prop::collection::vec(-1e3f64..1e3, 2..40),
        ) {
            let var = DescriptiveStats::new(&data).variance().expect("variance");
            prop_assert!(var >= 0.0, "FALSIFIED DS-006-prop: variance={}", var);
        }
    }
}
