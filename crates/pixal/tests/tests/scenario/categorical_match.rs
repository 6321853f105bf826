//! Scenario: the selection is exactly the `color = red` rows.

use pixal_data::Constraint;
use pixal_induction::{SearchParams, SearchPhase, SearchState};
use pixal_tests::color_scenario;

#[test]
fn exact_categorical_rule_in_one_step() {
    let fixture = color_scenario();
    let engine = fixture.engine();
    let seeds = fixture.table.seeded(&fixture.target);
    let mut state = SearchState::new();

    let outcome = engine
        .search(&mut state, Some(&seeds), &SearchParams::default())
        .unwrap();

    assert_eq!(outcome.summary().unwrap().steps, 1);
    let accepted = state.last_accepted().unwrap();
    assert_eq!(accepted.score, 1.0);
    assert_eq!(accepted.predicate.clause_count(), 1);
    assert_eq!(accepted.predicate.constraint("color"), Some(&Constraint::values(["red"])));
    assert_eq!(
        serde_json::to_string(accepted.predicate.clauses()).unwrap(),
        r#"{"color":{"values":["red"]}}"#
    );
    assert_eq!(state.phase(), SearchPhase::Expanding);
}

#[test]
fn perfect_rule_blocks_further_acceptance_at_same_size() {
    let fixture = color_scenario();
    let engine = fixture.engine();
    let mut state = SearchState::new();
    let params = SearchParams {
        max_accepted: 10,
        max_clauses: 2,
        ..SearchParams::default()
    };
    engine.search(&mut state, None, &params).unwrap();

    assert_eq!(state.accepted().len(), 1);
    assert_eq!(state.phase(), SearchPhase::Exhausted);
    assert_eq!(engine.score(&state.accepted()[0].predicate), 1.0);
}
