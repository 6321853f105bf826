//! Property tests: a search split over several calls, or over a
//! serialized snapshot, accepts what one uninterrupted call accepts.

use pixal_induction::{ClauseMap, SearchParams, SearchSnapshot, SearchState};
use pixal_tests::arb_fixture;
use proptest::prelude::*;

fn keys(state: &SearchState) -> Vec<(ClauseMap, f64)> {
    state
        .accepted()
        .iter()
        .map(|p| (p.predicate.clauses().clone(), p.score))
        .collect()
}

fn params(max_accepted: usize, max_clauses: usize, breadth_first: bool) -> SearchParams {
    SearchParams {
        max_accepted,
        max_steps: None,
        max_clauses,
        breadth_first,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Two calls with max_accepted = 1 equal one call with max_accepted = 2.
    #[test]
    fn split_search_matches_single_call(
        fixture in arb_fixture(),
        max_clauses in 1usize..=3,
        breadth_first in any::<bool>(),
    ) {
        let engine = fixture.engine();
        let seeds = fixture.table.seeded(&fixture.target);
        prop_assume!(!seeds.is_empty());

        let mut whole = SearchState::new();
        engine.search(&mut whole, Some(&seeds), &params(2, max_clauses, breadth_first)).unwrap();

        let mut split = SearchState::new();
        engine.search(&mut split, Some(&seeds), &params(1, max_clauses, breadth_first)).unwrap();
        engine.search(&mut split, None, &params(1, max_clauses, breadth_first)).unwrap();

        prop_assert_eq!(keys(&split), keys(&whole));
        let (split, whole) = (split.snapshot(), whole.snapshot());
        prop_assert_eq!(split.frontier, whole.frontier);
        prop_assert_eq!(split.rejected, whole.rejected);
        prop_assert_eq!(split.next_seq, whole.next_seq);
    }

    /// Resuming from a JSON snapshot continues exactly where the live state would.
    #[test]
    fn snapshot_resume_matches_live_state(fixture in arb_fixture(), max_clauses in 1usize..=3) {
        let engine = fixture.engine();
        let seeds = fixture.table.seeded(&fixture.target);

        let mut live = SearchState::new();
        engine.search(&mut live, Some(&seeds), &params(1, max_clauses, false)).unwrap();

        let carried: Vec<_> = live.accepted().iter().map(|p| p.id).collect();
        let json = live.snapshot().to_json().unwrap();
        let snapshot = SearchSnapshot::from_json(&json).unwrap();
        let mut restored = SearchState::restore(snapshot, &fixture.dataset, &fixture.dtypes).unwrap();

        engine.search(&mut live, None, &params(2, max_clauses, false)).unwrap();
        engine.search(&mut restored, None, &params(2, max_clauses, false)).unwrap();

        prop_assert_eq!(keys(&restored), keys(&live));
        let prefix: Vec<_> = restored.accepted().iter().take(carried.len()).map(|p| p.id).collect();
        prop_assert_eq!(prefix, carried);
    }
}
