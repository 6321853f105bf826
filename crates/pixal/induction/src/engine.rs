//! Predicate induction engine.
//!
//! Best-first (or breadth-first) search over conjunctive predicates:
//!
//! ```text
//!   seed ──► frontier ──pop──► score > best at ≤ clauses? ──no──► rejected
//!                 ▲                       │ yes                      │
//!                 │                       ▼                          │
//!                 ├──── children ◄──── accepted                      │
//!                 │   (widen a clause, conjoin an atomic)            │
//!                 └──────────────── conjoin an atomic ◄──────────────┘
//! ```
//!
//! The engine is stateless between calls: everything that must survive a
//! call lives in the caller's `SearchState`. Scores stored in a resumed state
//! are recomputed with this engine's scorer first, so a session may change
//! its selection or objective between calls.

use pixal_data::{AtomicPredicate, AtomicTable, Constraint, Dataset, Dtype};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::SearchParams;
use crate::error::InductionResult;
use crate::predicate::Predicate;
use crate::score::Scorer;
use crate::state::SearchState;

/// Why a `search` call returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    AcceptLimit,
    StepLimit,
    FrontierExhausted,
}

/// Work done by one `search` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Frontier pops.
    pub steps: usize,
    /// Predicates accepted during this call.
    pub accepted: usize,
    pub stop_reason: StopReason,
}

/// Result of a `search` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Finished(SearchSummary),
    /// A fresh search had nothing to seed from. The state is left untouched.
    EmptyCandidateSpace,
}

impl SearchOutcome {
    pub fn summary(&self) -> Option<&SearchSummary> {
        match self {
            SearchOutcome::Finished(summary) => Some(summary),
            SearchOutcome::EmptyCandidateSpace => None,
        }
    }
}

/// Search engine bound to one dataset, atomic table and scorer.
///
/// Holds no mutable state; one engine can drive any number of
/// `SearchState`s, from several threads.
#[derive(Debug)]
pub struct PredicateInduction<'a> {
    dataset: &'a Dataset,
    table: &'a AtomicTable,
    scorer: Scorer,
}

impl<'a> PredicateInduction<'a> {
    pub fn new(dataset: &'a Dataset, table: &'a AtomicTable, scorer: Scorer) -> Self {
        Self {
            dataset,
            table,
            scorer,
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn table(&self) -> &AtomicTable {
        self.table
    }

    /// Score a predicate against this engine's target and active rows.
    pub fn score(&self, predicate: &Predicate) -> f64 {
        self.scorer.score(predicate)
    }

    /// Run the search until an accept or step limit is hit or the frontier
    /// empties.
    ///
    /// On a fresh state the frontier is seeded from `initial_candidates`,
    /// or from every atomic in the table when none are given. On a started
    /// state the call re-scores what the state holds against this engine's
    /// scorer and resumes; any `initial_candidates` are merged into the
    /// frontier unless already known.
    pub fn search(
        &self,
        state: &mut SearchState,
        initial_candidates: Option<&[&AtomicPredicate]>,
        params: &SearchParams,
    ) -> InductionResult<SearchOutcome> {
        params.validate()?;

        if !state.is_started() {
            let seeds: Vec<&AtomicPredicate> = match initial_candidates {
                Some(candidates) => candidates.to_vec(),
                None => self.table.iter().collect(),
            };
            let seeded = self.seed(state, &seeds);
            if seeded == 0 {
                warn!(scorer = %self.scorer.name(), "no atomic predicates to seed the search");
                return Ok(SearchOutcome::EmptyCandidateSpace);
            }
            state.mark_started();
            debug!(seeded, "search seeded");
        } else {
            let changed = state.rescore(|predicate| self.scorer.score(predicate));
            if changed > 0 {
                debug!(changed, scorer = %self.scorer.name(), "stored scores refreshed");
            }
            if let Some(candidates) = initial_candidates {
                let merged = self.seed(state, candidates);
                debug!(merged, "candidates merged into frontier");
            }
        }

        let mut steps = 0;
        let mut accepted = 0;
        let stop_reason = loop {
            if accepted >= params.max_accepted {
                break StopReason::AcceptLimit;
            }
            if params.max_steps.is_some_and(|max| steps >= max) {
                break StopReason::StepLimit;
            }
            let Some(entry) = state.pop(params.breadth_first) else {
                break StopReason::FrontierExhausted;
            };
            steps += 1;

            let clause_count = entry.predicate.clause_count();
            let threshold = state.best_score_up_to(clause_count);
            trace!(
                step = steps,
                predicate = %entry.predicate,
                score = entry.score,
                threshold,
                "candidate popped"
            );

            let accept = entry.score > threshold;
            let children = self.expand(&entry.predicate, params.max_clauses, accept)?;
            if accept {
                debug!(
                    predicate = %entry.predicate,
                    score = entry.score,
                    clauses = clause_count,
                    "predicate accepted"
                );
                state.accept(entry.predicate, entry.score);
                accepted += 1;
            } else {
                state.reject(entry.predicate);
            }
            for child in children {
                let score = self.scorer.score(&child);
                state.push(child, score);
            }
        };

        info!(
            steps,
            accepted,
            total_accepted = state.accepted().len(),
            frontier = state.frontier().len(),
            stop_reason = ?stop_reason,
            "search finished"
        );

        Ok(SearchOutcome::Finished(SearchSummary {
            steps,
            accepted,
            stop_reason,
        }))
    }

    fn seed(&self, state: &mut SearchState, atomics: &[&AtomicPredicate]) -> usize {
        atomics
            .iter()
            .filter(|atomic| atomic.mask.any())
            .map(|atomic| Predicate::from_atomic(atomic))
            .filter_map(|predicate| {
                let score = self.scorer.score(&predicate);
                state.push(predicate, score).then_some(())
            })
            .count()
    }

    /// Children of a popped predicate. Below the clause limit every popped
    /// predicate gets one conjunction per atomic on an unconstrained
    /// attribute; accepted ones also get each clause widened by one
    /// neighbouring atomic. Children that select nothing or exactly the
    /// parent's rows are dropped.
    fn expand(
        &self,
        parent: &Predicate,
        max_clauses: usize,
        widen: bool,
    ) -> InductionResult<Vec<Predicate>> {
        let mut children = Vec::new();

        if widen {
            for attribute in parent.attributes() {
                for atomic in self.widening_candidates(parent, attribute) {
                    children.push(parent.widen(atomic, self.dataset)?);
                }
            }
        }

        if parent.clause_count() < max_clauses {
            for attribute in self.table.attributes() {
                if parent.constrains(attribute) {
                    continue;
                }
                for atomic in self.table.candidates(attribute) {
                    children.push(parent.conjoin(atomic)?);
                }
            }
        }

        children.retain(|child| child.mask().any() && child.mask() != parent.mask());
        Ok(children)
    }

    fn widening_candidates(&self, parent: &Predicate, attribute: &str) -> Vec<&'a AtomicPredicate> {
        let table: &'a AtomicTable = self.table;
        match (table.dtype(attribute), parent.constraint(attribute)) {
            (Some(Dtype::Numeric), Some(Constraint::Range(interval))) => {
                table.neighbors(attribute, interval)
            }
            (Some(Dtype::Categorical), Some(Constraint::Values { values })) => table
                .candidates(attribute)
                .iter()
                .filter(|atomic| match &atomic.constraint {
                    Constraint::Values { values: extra } => !extra.is_subset(values),
                    Constraint::Range(_) => false,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
