//! Property tests: equal clause maps are one candidate, and the search
//! never holds a predicate in two places or an empty predicate anywhere.

use std::collections::HashSet;

use pixal_induction::{Predicate, SearchState};
use pixal_tests::{arb_fixture, arb_params};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Construction order does not affect equality, hashing or masks.
    #[test]
    fn construction_order_is_irrelevant(fixture in arb_fixture()) {
        let amount = fixture.table.candidates("amount");
        let tree = fixture.table.candidates("tree");
        prop_assume!(!amount.is_empty() && !tree.is_empty());

        let a = Predicate::from_atomic(&amount[0]).conjoin(&tree[0]).unwrap();
        let b = Predicate::from_atomic(&tree[0]).conjoin(&amount[0]).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.mask(), b.mask());
        prop_assert_eq!(a.attributes(), vec!["amount", "tree"]);

        let set: HashSet<Predicate> = [a, b].into_iter().collect();
        prop_assert_eq!(set.len(), 1);
    }

    /// Frontier, accepted and rejected are pairwise disjoint, free of
    /// duplicates and of empty predicates.
    #[test]
    fn search_sets_are_disjoint(fixture in arb_fixture(), params in arb_params()) {
        let engine = fixture.engine();
        let mut state = SearchState::new();
        engine.search(&mut state, None, &params).unwrap();

        let frontier: Vec<_> = state.frontier().iter().map(|e| e.predicate.clauses().clone()).collect();
        let accepted: Vec<_> = state.accepted().iter().map(|p| p.predicate.clauses().clone()).collect();
        let rejected = state.rejected();

        let frontier_set: HashSet<_> = frontier.iter().cloned().collect();
        let accepted_set: HashSet<_> = accepted.iter().cloned().collect();
        prop_assert_eq!(frontier_set.len(), frontier.len());
        prop_assert_eq!(accepted_set.len(), accepted.len());

        for key in &accepted_set {
            prop_assert!(!frontier_set.contains(key));
            prop_assert!(!rejected.contains(key));
        }
        for key in &frontier_set {
            prop_assert!(!rejected.contains(key));
        }

        prop_assert!(frontier.iter().chain(&accepted).chain(rejected).all(|c| !c.is_empty()));
        prop_assert!(state.frontier().iter().all(|e| e.predicate.mask().any()));
    }

    /// Every accepted predicate beats all earlier acceptances with at most
    /// as many clauses.
    #[test]
    fn acceptances_strictly_improve(fixture in arb_fixture(), params in arb_params()) {
        let engine = fixture.engine();
        let mut state = SearchState::new();
        engine.search(&mut state, None, &params).unwrap();

        let accepted = state.accepted();
        for (i, later) in accepted.iter().enumerate() {
            prop_assert!(later.score > 0.0);
            for earlier in &accepted[..i] {
                if earlier.predicate.clause_count() <= later.predicate.clause_count() {
                    prop_assert!(later.score > earlier.score);
                }
            }
            prop_assert!(later.predicate.clause_count() <= params.max_clauses);
        }
    }
}
