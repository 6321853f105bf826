//! Property tests: a fresh search is a pure function of its inputs.

use pixal_induction::{ClauseMap, SearchParams, SearchState};
use pixal_tests::{arb_fixture, arb_params, Fixture};
use proptest::prelude::*;

fn run(fixture: &Fixture, params: &SearchParams) -> Vec<(ClauseMap, f64)> {
    let engine = fixture.engine();
    let seeds = fixture.table.seeded(&fixture.target);
    let mut state = SearchState::new();
    engine.search(&mut state, Some(&seeds), params).unwrap();
    state
        .accepted()
        .iter()
        .map(|p| (p.predicate.clauses().clone(), p.score))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Repeated fresh searches accept the same predicates in the same order.
    #[test]
    fn repeated_searches_agree(fixture in arb_fixture(), params in arb_params()) {
        let first = run(&fixture, &params);
        let second = run(&fixture, &params);
        prop_assert_eq!(first, second);
    }

    /// Determinism holds for both frontier orderings independently.
    #[test]
    fn both_orderings_are_deterministic(fixture in arb_fixture()) {
        for breadth_first in [false, true] {
            let params = SearchParams {
                max_accepted: 4,
                max_steps: Some(200),
                max_clauses: 2,
                breadth_first,
            };
            prop_assert_eq!(run(&fixture, &params), run(&fixture, &params));
        }
    }
}
