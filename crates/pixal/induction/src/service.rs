//! In-process entry points for an interactive front end.
//!
//! Each call takes row ids and plain serializable values, and returns
//! clause maps, scores and a `SearchSnapshot` for the caller to persist and
//! send back on the next interaction.

use pixal_data::{AtomicTable, Dataset, Dtypes, RowMask};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::clauses::{retain_known, ClauseMap};
use crate::config::InductionConfig;
use crate::engine::{PredicateInduction, SearchOutcome, SearchSummary};
use crate::error::InductionResult;
use crate::predicate::Predicate;
use crate::score::{ScoreKind, Scorer};
use crate::state::{ScoredPredicate, SearchSnapshot, SearchState};

// ── Types ────────────────────────────────────────────────────────────────

/// One round of interactive induction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InduceRequest {
    /// Rows the analyst selected (the target).
    pub selected_ids: Vec<usize>,
    /// Rows to compare against. Scoring is restricted to selected ∪
    /// comparison when present.
    pub comparison_ids: Option<Vec<usize>>,
    /// State returned by the previous round, if any.
    pub state: Option<SearchSnapshot>,
    pub config: InductionConfig,
}

/// An accepted rule as returned to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Stable for the life of the session.
    pub id: Uuid,
    pub clauses: ClauseMap,
    /// Readable rendering, e.g. `x in [4, 7]`.
    pub name: String,
    pub score: f64,
}

impl RuleResult {
    fn from_scored(scored: &ScoredPredicate) -> Self {
        Self {
            id: scored.id,
            clauses: scored.predicate.clauses().clone(),
            name: scored.predicate.name(),
            score: scored.score,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InduceResponse {
    /// Every rule accepted so far in this session, in discovery order.
    pub accepted: Vec<RuleResult>,
    pub last_accepted: Option<RuleResult>,
    /// `None` when there was nothing to seed the search with.
    pub summary: Option<SearchSummary>,
    pub state: SearchSnapshot,
}

/// A rule proposed from outside the search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposedRule {
    pub id: String,
    pub clauses: ClauseMap,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleScore {
    pub id: String,
    pub score: f64,
}

// ── Operations ───────────────────────────────────────────────────────────

/// Build the atomic table for `request.config.bins` and run one round.
pub fn induce(dataset: &Dataset, dtypes: &Dtypes, request: &InduceRequest) -> InductionResult<InduceResponse> {
    request.config.validate()?;
    let table = AtomicTable::build(dataset, dtypes, request.config.bins)?;
    induce_with_table(dataset, dtypes, &table, request)
}

/// Run one round against a prebuilt atomic table.
///
/// A fresh session is seeded with the atomics covering at least one
/// selected row; a started one resumes from its snapshot.
pub fn induce_with_table(
    dataset: &Dataset,
    dtypes: &Dtypes,
    table: &AtomicTable,
    request: &InduceRequest,
) -> InductionResult<InduceResponse> {
    request.config.validate()?;
    let scorer = build_scorer(
        dataset.row_count(),
        &request.selected_ids,
        request.comparison_ids.as_deref(),
        request.config.score,
    )?;

    let mut state = match &request.state {
        Some(snapshot) => SearchState::restore(snapshot.clone(), dataset, dtypes)?,
        None => SearchState::new(),
    };

    let seeds = if state.is_started() {
        None
    } else {
        Some(table.seeded(scorer.target()))
    };
    let engine = PredicateInduction::new(dataset, table, scorer);
    let outcome = engine.search(&mut state, seeds.as_deref(), &request.config.search)?;

    let summary = match outcome {
        SearchOutcome::Finished(summary) => Some(summary),
        SearchOutcome::EmptyCandidateSpace => None,
    };
    let accepted: Vec<RuleResult> = state.accepted().iter().map(RuleResult::from_scored).collect();
    info!(
        selected = request.selected_ids.len(),
        accepted = accepted.len(),
        found = summary.is_some(),
        "induction round complete"
    );

    Ok(InduceResponse {
        last_accepted: accepted.last().cloned(),
        accepted,
        summary,
        state: state.snapshot(),
    })
}

/// Score a single externally supplied rule.
///
/// Every clause must name a column with a dtype.
pub fn score_clauses(
    dataset: &Dataset,
    dtypes: &Dtypes,
    selected_ids: &[usize],
    comparison_ids: Option<&[usize]>,
    clauses: ClauseMap,
    kind: ScoreKind,
) -> InductionResult<f64> {
    let scorer = build_scorer(dataset.row_count(), selected_ids, comparison_ids, kind)?;
    let predicate = Predicate::new(clauses, dataset, dtypes)?;
    Ok(scorer.score(&predicate))
}

/// Score several rules against the same selection.
///
/// Clauses on attributes without a dtype are dropped first; a rule left
/// with no clauses is an error.
pub fn score_batch(
    dataset: &Dataset,
    dtypes: &Dtypes,
    selected_ids: &[usize],
    comparison_ids: Option<&[usize]>,
    rules: &[ProposedRule],
    kind: ScoreKind,
) -> InductionResult<Vec<RuleScore>> {
    let scorer = build_scorer(dataset.row_count(), selected_ids, comparison_ids, kind)?;
    rules
        .iter()
        .map(|rule| {
            let clauses = retain_known(rule.clauses.clone(), dtypes);
            let predicate = Predicate::new(clauses, dataset, dtypes)?;
            Ok(RuleScore {
                id: rule.id.clone(),
                score: scorer.score(&predicate),
            })
        })
        .collect()
}

fn build_scorer(
    row_count: usize,
    selected_ids: &[usize],
    comparison_ids: Option<&[usize]>,
    kind: ScoreKind,
) -> InductionResult<Scorer> {
    let target = RowMask::from_indices(row_count, selected_ids.iter().copied())?;
    let active = comparison_ids
        .map(|ids| RowMask::from_indices(row_count, ids.iter().copied()))
        .transpose()?
        .map(|comparison| comparison.or(&target));
    Scorer::new(target, active, kind.build())
}
