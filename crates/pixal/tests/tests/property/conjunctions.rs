//! Property tests: an exhaustive two-clause search reaches every useful
//! pair of atomics, whether or not either atomic was accepted on its own.

use pixal_induction::{Predicate, SearchParams, SearchState};
use pixal_tests::arb_fixture;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_refining_pair_is_visited(fixture in arb_fixture(), breadth_first in any::<bool>()) {
        let engine = fixture.engine();
        let params = SearchParams {
            max_accepted: usize::MAX,
            max_steps: None,
            max_clauses: 2,
            breadth_first,
        };
        let mut state = SearchState::new();
        engine.search(&mut state, None, &params).unwrap();
        prop_assert!(state.frontier().is_empty());

        let atomics: Vec<_> = fixture.table.iter().collect();
        for (i, x) in atomics.iter().enumerate() {
            for y in &atomics[i + 1..] {
                if x.attribute == y.attribute {
                    continue;
                }
                let pair = Predicate::from_atomic(x).conjoin(y).unwrap();
                let refines = pair.mask().any()
                    && (pair.mask() != &x.mask || pair.mask() != &y.mask);
                if refines {
                    prop_assert!(state.is_known(pair.clauses()), "{} never visited", pair);
                }
            }
        }
    }
}
