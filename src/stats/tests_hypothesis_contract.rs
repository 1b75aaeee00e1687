// =========================================================================
// FALSIFY-HT: t-test engine contract
//
// Each test names the property it tries to break. A failure message starts
// with "FALSIFIED" and the property id.
//
// References:
//   - Student (1908) "The Probable Error of a Mean"
//   - Welch (1947) "The generalization of Student's problem when several
//     different population variances are involved"
// =========================================================================

use super::hypothesis::welch_df;
use super::*;
use proptest::prelude::*;

/// FALSIFY-HT-001: One-sample p-value is in [0, 1]
#[test]
fn falsify_ht_001_ttest_pvalue_bounded() {
    let sample = [2.0, 2.5, 3.0, 3.5, 4.0];
    let result = ttest_1samp(&sample, 3.3).expect("valid input");

    assert!(
        (0.0..=1.0).contains(&result.pvalue),
        "FALSIFIED HT-001: p-value={} outside [0,1]",
        result.pvalue
    );
}

/// FALSIFY-HT-002: Two-sample test detects a clear difference
#[test]
fn falsify_ht_002_ttest_ind_detects_difference() {
    let group1 = [1.0, 1.1, 1.2, 0.9, 1.0, 1.1, 0.95, 1.05];
    let group2 = [5.0, 5.1, 5.2, 4.9, 5.0, 5.1, 4.95, 5.05];

    for equal_var in [true, false] {
        let result = ttest_ind(&group1, &group2, equal_var).expect("valid input");
        assert!(
            result.pvalue < 0.05,
            "FALSIFIED HT-002: p-value={} >= 0.05 for clearly different groups (equal_var={equal_var})",
            result.pvalue
        );
    }
}

/// FALSIFY-HT-003: Sample mean equal to mu gives t = 0 and p = 1
#[test]
fn falsify_ht_003_null_mean_gives_unit_pvalue() {
    let sample = [10.0, 12.0, 11.5, 13.0, 8.5];
    let result = ttest_1samp(&sample, 11.0).expect("valid input");

    assert!(
        result.statistic.abs() < 1e-12,
        "FALSIFIED HT-003: t={} for mean equal to mu",
        result.statistic
    );
    assert!(
        (result.pvalue - 1.0).abs() < 1e-9,
        "FALSIFIED HT-003: p={} for t=0",
        result.pvalue
    );
}

/// FALSIFY-HT-004: Swapping groups negates t and keeps p
#[test]
fn falsify_ht_004_swap_antisymmetric() {
    let a = [3.1, 2.9, 3.4, 3.8, 2.7, 3.3];
    let b = [4.0, 3.6, 4.4, 4.1, 3.9];
    let ab = ttest_ind(&a, &b, false).expect("valid input");
    let ba = ttest_ind(&b, &a, false).expect("valid input");

    assert!(
        (ab.statistic + ba.statistic).abs() < 1e-12,
        "FALSIFIED HT-004: t(a,b)={} vs t(b,a)={}",
        ab.statistic,
        ba.statistic
    );
    assert!((ab.pvalue - ba.pvalue).abs() < 1e-12);
    assert!((ab.df - ba.df).abs() < 1e-9);
}

/// FALSIFY-HT-005: Paired test equals one-sample test on differences
#[test]
fn falsify_ht_005_paired_is_one_sample_on_differences() {
    let x = [12.0, 15.5, 9.0, 14.0, 11.0, 13.5];
    let y = [11.0, 14.0, 9.5, 12.0, 10.0, 12.5];
    let diffs = hypothesis::differences(&x, &y);
    let paired = ttest_rel(&x, &y).expect("valid input");
    let single = ttest_1samp(&diffs, 0.0).expect("valid input");

    assert_eq!(
        paired.statistic, single.statistic,
        "FALSIFIED HT-005: paired t differs from one-sample t on differences"
    );
    assert_eq!(paired.df, single.df);
}

proptest! {
    /// FALSIFY-HT-006-prop: Welch df lies in (0, n1 + n2 - 2]
    #[test]
    fn falsify_ht_006_prop_welch_df_bounded(
        var1 in 1e-3f64..1e3,
        var2 in 1e-3f64..1e3,
        n1 in 2usize..60,
        n2 in 2usize..60,
    ) {
        let df = welch_df(var1, var2, n1 as f64, n2 as f64);
        let pooled = (n1 + n2 - 2) as f64;
        prop_assert!(df > 0.0, "FALSIFIED HT-006: df={df} <= 0");
        prop_assert!(
            df <= pooled + 1e-9,
            "FALSIFIED HT-006: df={df} > pooled df {pooled}"
        );
    }

    /// FALSIFY-HT-007-prop: One-sample df is exactly n - 1
    #[test]
    fn falsify_ht_007_prop_one_sample_df(
        data in proptest::collection::vec(-1e3f64..1e3, 2..40)
    ) {
        prop_assume!(data.iter().any(|&v| v != data[0]));
        let result = ttest_1samp(&data, 0.0).expect("non-constant sample");
        prop_assert_eq!(result.df, (data.len() - 1) as f64);
    }
}
