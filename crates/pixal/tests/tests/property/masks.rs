//! Property tests: predicate masks match row-wise evaluation and only
//! shrink under conjunction.

use pixal_induction::Predicate;
use pixal_tests::arb_fixture;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A row is in a predicate's mask iff it satisfies every clause.
    #[test]
    fn mask_matches_rowwise_evaluation(fixture in arb_fixture()) {
        let atomics: Vec<_> = fixture.table.iter().collect();
        for (i, a) in atomics.iter().enumerate() {
            for b in &atomics[i + 1..] {
                let Ok(p) = Predicate::from_atomic(a).conjoin(b) else { continue };
                for row in 0..fixture.dataset.row_count() {
                    let expected = p.clauses().iter().all(|(attr, c)| {
                        c.matches(fixture.dataset.value(row, attr).unwrap())
                    });
                    prop_assert_eq!(p.mask().get(row), expected);
                }

                let rebuilt = Predicate::new(p.clauses().clone(), &fixture.dataset, &fixture.dtypes).unwrap();
                prop_assert_eq!(rebuilt.mask(), p.mask());
            }
        }
    }

    /// Conjoining one more atomic never increases the selected row count.
    #[test]
    fn conjunction_is_monotonic(fixture in arb_fixture()) {
        for base in fixture.table.iter() {
            let parent = Predicate::from_atomic(base);
            for atomic in fixture.table.iter() {
                if let Ok(child) = parent.conjoin(atomic) {
                    prop_assert!(child.mask().count() <= parent.mask().count());
                    prop_assert!(child.mask().is_subset(parent.mask()));
                }
            }
        }
    }

    /// Atomics of one attribute are disjoint and the row index points at the
    /// atomic containing the row.
    #[test]
    fn row_index_agrees_with_masks(fixture in arb_fixture()) {
        for attribute in fixture.table.attributes() {
            let candidates = fixture.table.candidates(attribute);
            for row in 0..fixture.dataset.row_count() {
                let hits: Vec<usize> = candidates
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| a.mask.get(row))
                    .map(|(i, _)| i)
                    .collect();
                prop_assert!(hits.len() <= 1);
                prop_assert_eq!(fixture.table.row_index(attribute, row), hits.first().copied());
            }
        }
    }
}
