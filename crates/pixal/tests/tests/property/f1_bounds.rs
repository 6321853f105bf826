//! Property tests: F1 stays in [0, 1] and hits its bounds exactly where
//! expected.

use pixal_data::RowMask;
use pixal_induction::{AnomalyScore, ScoreFunction, F1};
use pixal_tests::arb_mask_pair;
use proptest::prelude::*;

proptest! {
    #[test]
    fn f1_is_bounded((mask, target) in arb_mask_pair()) {
        let f1 = F1.score(&mask, &target, None);
        prop_assert!((0.0..=1.0).contains(&f1));
    }

    #[test]
    fn f1_is_one_on_exact_match((mask, _) in arb_mask_pair()) {
        prop_assume!(mask.any());
        prop_assert_eq!(F1.score(&mask, &mask, None), 1.0);
    }

    #[test]
    fn f1_is_zero_when_disjoint((mask, other) in arb_mask_pair()) {
        let target = other.and_not(&mask);
        prop_assume!(mask.any() || target.any());
        prop_assert_eq!(F1.score(&mask, &target, None), 0.0);
    }

    #[test]
    fn f1_below_one_when_masks_differ((mask, target) in arb_mask_pair()) {
        prop_assume!(mask != target);
        prop_assert!(F1.score(&mask, &target, None) < 1.0);
    }

    /// Restricting to active rows keeps the bounds.
    #[test]
    fn f1_bounded_on_active_rows((mask, target) in arb_mask_pair()) {
        let active: RowMask = (0..mask.len()).map(|i| i % 3 != 0).collect();
        let f1 = F1.score(&mask, &target, Some(&active));
        prop_assert!((0.0..=1.0).contains(&f1));
    }

    #[test]
    fn anomaly_is_finite_and_positive((mask, target) in arb_mask_pair()) {
        let s = AnomalyScore::new().score(&mask, &target, None);
        prop_assert!(s.is_finite());
        prop_assert!(s > 0.0);
    }
}
