//! Scenario: `x = 0..9`, selection {5, 6, 7}, five bins of width 2.

use pixal_data::Constraint;
use pixal_induction::{ScoreKind, SearchParams, SearchState, StopReason};
use pixal_tests::numeric_scenario;

#[test]
fn best_first_reaches_covering_range_with_one_clause() {
    let fixture = numeric_scenario();
    let engine = fixture.engine();
    let seeds = fixture.table.seeded(&fixture.target);
    let rendered: Vec<String> = seeds.iter().map(|a| a.constraint.to_string()).collect();
    assert_eq!(rendered, vec!["[4, 5]", "[6, 7]"]);

    let mut state = SearchState::new();
    let params = SearchParams {
        max_accepted: 2,
        max_clauses: 1,
        ..SearchParams::default()
    };
    let outcome = engine.search(&mut state, Some(&seeds), &params).unwrap();
    assert_eq!(outcome.summary().unwrap().stop_reason, StopReason::AcceptLimit);

    let last = state.last_accepted().unwrap();
    assert_eq!(last.predicate.constraint("x"), Some(&Constraint::range(4.0, 7.0)));
    assert_eq!(last.predicate.mask().iter_ones().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
    assert!(last.score >= 0.85);
    assert!((last.score - 6.0 / 7.0).abs() < 1e-12);

    let history: Vec<String> = state.accepted().iter().map(|p| p.predicate.name()).collect();
    assert_eq!(history, vec!["x in [6, 7]", "x in [4, 7]"]);
}

#[test]
fn breadth_first_reaches_the_same_rule_later() {
    let fixture = numeric_scenario();
    let engine = fixture.engine();
    let seeds = fixture.table.seeded(&fixture.target);
    let mut state = SearchState::new();
    let params = SearchParams {
        max_accepted: 3,
        max_clauses: 1,
        breadth_first: true,
        ..SearchParams::default()
    };
    engine.search(&mut state, Some(&seeds), &params).unwrap();

    let history: Vec<String> = state.accepted().iter().map(|p| p.predicate.name()).collect();
    assert_eq!(history, vec!["x in [4, 5]", "x in [6, 7]", "x in [4, 7]"]);
    assert!(state.best().unwrap().score >= 0.85);
}

#[test]
fn anomaly_prefers_the_tightest_enriched_range() {
    let fixture = numeric_scenario();
    let engine = fixture.engine_with(ScoreKind::Anomaly);
    let seeds = fixture.table.seeded(&fixture.target);
    let mut state = SearchState::new();
    let params = SearchParams {
        max_accepted: 2,
        max_clauses: 1,
        ..SearchParams::default()
    };
    let outcome = engine.search(&mut state, Some(&seeds), &params).unwrap();

    assert_eq!(outcome.summary().unwrap().stop_reason, StopReason::FrontierExhausted);
    assert_eq!(state.accepted().len(), 1);
    let best = state.best().unwrap();
    assert_eq!(best.predicate.constraint("x"), Some(&Constraint::range(6.0, 7.0)));
    assert!((best.score - 2.25).abs() < 1e-12);
}
