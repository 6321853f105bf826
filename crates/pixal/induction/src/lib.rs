//! # pixal-induction
//!
//! Interactive predicate induction: given the rows an analyst selected,
//! find short conjunctive rules (`alcohol in [9.5, 11.2] and color in {red}`)
//! that separate the selection from the rest of the data.
//!
//! ## Architecture
//!
//! ```text
//!   InduceRequest { selected_ids, comparison_ids, state, config }
//!          │
//!          ▼
//!   ┌──────────────┐   seeded()   ┌───────────────────────────┐
//!   │ AtomicTable  │─────────────►│  PredicateInduction       │
//!   │ (pixal-data) │              │  ┌─────────┐ ┌─────────┐  │
//!   └──────────────┘              │  │ Scorer  │ │ expand  │  │
//!                                 │  │ F1 /    │ │ widen / │  │
//!                                 │  │ Anomaly │ │ conjoin │  │
//!                                 │  └─────────┘ └─────────┘  │
//!                                 └─────────────┬─────────────┘
//!                                               │ mutates
//!                                               ▼
//!                                 SearchState { frontier, accepted, rejected }
//!                                               │ snapshot()
//!                                               ▼
//!                                 InduceResponse { accepted, state }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pixal_data::{Dataset, Dtype, Dtypes, Value};
//! use pixal_induction::{induce, InduceRequest};
//!
//! let dataset = Dataset::new(vec![("x", (0..10).map(Value::from).collect())]).unwrap();
//! let dtypes = Dtypes::from([("x".to_string(), Dtype::Numeric)]);
//!
//! let mut request = InduceRequest {
//!     selected_ids: vec![5, 6, 7],
//!     ..InduceRequest::default()
//! };
//! request.config.bins = 5;
//! request.config.search.max_accepted = 2;
//! request.config.search.max_clauses = 1;
//!
//! let response = induce(&dataset, &dtypes, &request).unwrap();
//! let best = response.last_accepted.unwrap();
//! assert_eq!(best.name, "x in [4, 7]");
//! ```

#![deny(unsafe_code)]

pub mod clauses;
pub mod config;
pub mod engine;
pub mod error;
pub mod predicate;
pub mod score;
pub mod service;
pub mod state;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use clauses::{parse_clause_query, parse_constraint, retain_known, ClauseMap};
pub use config::{InductionConfig, SearchParams, DEFAULT_MAX_ACCEPTED, DEFAULT_MAX_CLAUSES};
pub use engine::{PredicateInduction, SearchOutcome, SearchSummary, StopReason};
pub use error::{InductionError, InductionResult};
pub use predicate::Predicate;
pub use score::{AnomalyScore, Confusion, ScoreFunction, ScoreKind, Scorer, F1};
pub use service::{
    induce, induce_with_table, score_batch, score_clauses, InduceRequest, InduceResponse,
    ProposedRule, RuleResult, RuleScore,
};
pub use state::{
    AcceptedRecord, FrontierEntry, FrontierRecord, ScoredPredicate, SearchPhase, SearchSnapshot,
    SearchState,
};
