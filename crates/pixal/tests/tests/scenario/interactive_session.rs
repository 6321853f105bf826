//! Scenario: several interactive rounds through the service entry points,
//! with the state persisted as JSON between rounds.

use pixal_data::{Constraint, Dataset, Dtypes, Value};
use pixal_induction::{
    induce, score_batch, score_clauses, ClauseMap, InduceRequest, InduceResponse, ProposedRule,
    ScoreKind,
};

fn wine() -> (Dataset, Dtypes) {
    let alcohol = [9.1, 9.4, 9.8, 10.2, 10.6, 11.0, 11.4, 11.9, 12.3, 12.8, 13.1, 13.6];
    let color = ["white", "red", "white", "red", "white", "red", "red", "red", "white", "white", "red", "white"];
    let quality = [4, 5, 5, 6, 5, 7, 7, 8, 6, 5, 7, 6];
    let dataset = Dataset::new(vec![
        ("alcohol", alcohol.iter().map(|v| Value::from(*v)).collect()),
        ("color", color.iter().map(|v| Value::from(*v)).collect()),
        ("quality", quality.iter().map(|v| Value::from(*v)).collect()),
    ])
    .unwrap();
    let dtypes = pixal_data::infer_dtypes(&dataset);
    (dataset, dtypes)
}

fn round(dataset: &Dataset, dtypes: &Dtypes, body: &str) -> InduceResponse {
    let request: InduceRequest = serde_json::from_str(body).unwrap();
    let response = induce(dataset, dtypes, &request).unwrap();
    let json = serde_json::to_string(&response).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn rounds_accumulate_rules() {
    let (dataset, dtypes) = wine();
    let selection = r#"[5, 6, 7, 10]"#;

    let first = round(
        &dataset,
        &dtypes,
        &format!(r#"{{"selected_ids":{},"config":{{"bins":4}}}}"#, selection),
    );
    assert_eq!(first.accepted.len(), 1);
    assert!(first.state.started);

    let state = serde_json::to_string(&first.state).unwrap();
    let second = round(
        &dataset,
        &dtypes,
        &format!(
            r#"{{"selected_ids":{},"state":{},"config":{{"bins":4,"search":{{"max_accepted":3}}}}}}"#,
            selection, state
        ),
    );
    assert!(second.accepted.len() > first.accepted.len());
    assert_eq!(second.accepted[0].clauses, first.accepted[0].clauses);
    let scores: Vec<f64> = second.accepted.iter().map(|r| r.score).collect();
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    assert_eq!(second.last_accepted.as_ref(), second.accepted.last());
}

#[test]
fn externally_proposed_rules_are_scored() {
    let (dataset, dtypes) = wine();
    let selected = [5, 6, 7, 10];

    let clauses: ClauseMap = serde_json::from_str(r#"{"color":{"values":["red"]}}"#).unwrap();
    let red = score_clauses(&dataset, &dtypes, &selected, None, clauses, ScoreKind::F1).unwrap();
    // red rows: 1, 3, 5, 6, 7, 10 -> precision 4/6, recall 1.
    assert!((red - 0.8).abs() < 1e-12);

    let rules = vec![
        ProposedRule {
            id: "high-alcohol-red".into(),
            clauses: ClauseMap::from([
                ("alcohol".to_string(), Constraint::range(10.8, 13.2)),
                ("color".to_string(), Constraint::values(["red"])),
            ]),
        },
        ProposedRule {
            id: "white".into(),
            clauses: ClauseMap::from([("color".to_string(), Constraint::values(["white"]))]),
        },
    ];
    let scores = score_batch(&dataset, &dtypes, &selected, None, &rules, ScoreKind::F1).unwrap();
    assert_eq!(scores[0].id, "high-alcohol-red");
    assert_eq!(scores[0].score, 1.0);
    assert_eq!(scores[1].score, 0.0);
}
