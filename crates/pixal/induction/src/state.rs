//! Search state: frontier, accepted and rejected predicates.
//!
//! The state is a plain value owned by the caller and threaded through
//! successive `search` calls; the engine keeps nothing between calls. For
//! storage between requests it converts to a `SearchSnapshot` (clause maps
//! and scores only) and is rebuilt with `SearchState::restore`.
//!
//! Stored scores belong to whichever target and objective produced them. A
//! resumed search refreshes them with `SearchState::rescore` before popping.

use std::collections::{BTreeSet, HashSet};

use pixal_data::{Dataset, Dtypes};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clauses::ClauseMap;
use crate::error::InductionResult;
use crate::predicate::Predicate;

/// A not-yet-evaluated candidate with the score it was queued with.
#[derive(Clone, Debug)]
pub struct FrontierEntry {
    pub predicate: Predicate,
    pub score: f64,
    /// Insertion sequence number, unique per state.
    pub seq: u64,
}

/// An accepted predicate and its score.
#[derive(Clone, Debug)]
pub struct ScoredPredicate {
    /// Assigned on acceptance and kept across snapshots.
    pub id: Uuid,
    pub predicate: Predicate,
    pub score: f64,
}

/// Lifecycle of a search state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search started yet.
    Fresh,
    /// Started, frontier non-empty.
    Expanding,
    /// Started, frontier empty. Further calls do nothing.
    Exhausted,
}

/// Frontier, accepted list and rejected set of one search session.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    frontier: Vec<FrontierEntry>,
    accepted: Vec<ScoredPredicate>,
    rejected: BTreeSet<ClauseMap>,
    started: bool,
    next_seq: u64,
    frontier_keys: HashSet<ClauseMap>,
    accepted_keys: HashSet<ClauseMap>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> SearchPhase {
        if !self.started {
            SearchPhase::Fresh
        } else if self.frontier.is_empty() {
            SearchPhase::Exhausted
        } else {
            SearchPhase::Expanding
        }
    }

    pub fn frontier(&self) -> &[FrontierEntry] {
        &self.frontier
    }

    /// Accepted predicates in discovery order.
    pub fn accepted(&self) -> &[ScoredPredicate] {
        &self.accepted
    }

    /// Canonical keys of rejected predicates.
    pub fn rejected(&self) -> &BTreeSet<ClauseMap> {
        &self.rejected
    }

    /// The most recently accepted predicate.
    pub fn last_accepted(&self) -> Option<&ScoredPredicate> {
        self.accepted.last()
    }

    /// Highest-scoring accepted predicate; ties go to the earliest.
    pub fn best(&self) -> Option<&ScoredPredicate> {
        self.accepted.iter().fold(None, |best, p| match best {
            Some(b) if b.score >= p.score => Some(b),
            _ => Some(p),
        })
    }

    /// Whether a predicate with this key is queued, accepted or rejected.
    pub fn is_known(&self, key: &ClauseMap) -> bool {
        self.frontier_keys.contains(key)
            || self.accepted_keys.contains(key)
            || self.rejected.contains(key)
    }

    pub(crate) fn mark_started(&mut self) {
        self.started = true;
    }

    /// Queue a candidate unless it is already known. Returns whether it was queued.
    pub(crate) fn push(&mut self, predicate: Predicate, score: f64) -> bool {
        if self.is_known(predicate.clauses()) {
            return false;
        }
        self.frontier_keys.insert(predicate.clauses().clone());
        self.frontier.push(FrontierEntry {
            predicate,
            score,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        true
    }

    /// Remove the next candidate.
    ///
    /// Breadth-first: fewest clauses, then earliest insertion. Best-first:
    /// highest score, then fewest clauses, then earliest insertion.
    pub(crate) fn pop(&mut self, breadth_first: bool) -> Option<FrontierEntry> {
        let idx = if breadth_first {
            self.frontier
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| (e.predicate.clause_count(), e.seq))
                .map(|(i, _)| i)?
        } else {
            self.frontier
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    a.score
                        .total_cmp(&b.score)
                        .then(b.predicate.clause_count().cmp(&a.predicate.clause_count()))
                        .then(b.seq.cmp(&a.seq))
                })
                .map(|(i, _)| i)?
        };
        let entry = self.frontier.swap_remove(idx);
        self.frontier_keys.remove(entry.predicate.clauses());
        Some(entry)
    }

    /// Best accepted score among predicates with at most `clauses` clauses.
    /// Zero when there is none.
    pub(crate) fn best_score_up_to(&self, clauses: usize) -> f64 {
        self.accepted
            .iter()
            .filter(|p| p.predicate.clause_count() <= clauses)
            .map(|p| p.score)
            .fold(0.0, f64::max)
    }

    pub(crate) fn accept(&mut self, predicate: Predicate, score: f64) {
        self.accept_with_id(Uuid::new_v4(), predicate, score);
    }

    fn accept_with_id(&mut self, id: Uuid, predicate: Predicate, score: f64) {
        self.accepted_keys.insert(predicate.clauses().clone());
        self.accepted.push(ScoredPredicate {
            id,
            predicate,
            score,
        });
    }

    /// Recompute every accepted and queued score. Returns how many changed.
    pub(crate) fn rescore(&mut self, score: impl Fn(&Predicate) -> f64) -> usize {
        let mut changed = 0;
        let accepted = self.accepted.iter_mut().map(|p| (&p.predicate, &mut p.score));
        let queued = self.frontier.iter_mut().map(|e| (&e.predicate, &mut e.score));
        for (predicate, stored) in accepted.chain(queued) {
            let fresh = score(predicate);
            if fresh.to_bits() != stored.to_bits() {
                *stored = fresh;
                changed += 1;
            }
        }
        changed
    }

    pub(crate) fn reject(&mut self, predicate: Predicate) {
        self.rejected.insert(predicate.into_clauses());
    }

    /// Serializable form without masks.
    pub fn snapshot(&self) -> SearchSnapshot {
        let mut frontier: Vec<FrontierRecord> = self
            .frontier
            .iter()
            .map(|e| FrontierRecord {
                clauses: e.predicate.clauses().clone(),
                score: e.score,
                seq: e.seq,
            })
            .collect();
        frontier.sort_by_key(|r| r.seq);

        SearchSnapshot {
            started: self.started,
            next_seq: self.next_seq,
            frontier,
            accepted: self
                .accepted
                .iter()
                .map(|p| AcceptedRecord {
                    id: p.id,
                    clauses: p.predicate.clauses().clone(),
                    score: p.score,
                })
                .collect(),
            rejected: self.rejected.iter().cloned().collect(),
        }
    }

    /// Rebuild a state from a snapshot, recomputing masks from the dataset.
    pub fn restore(snapshot: SearchSnapshot, dataset: &Dataset, dtypes: &Dtypes) -> InductionResult<Self> {
        let mut state = SearchState {
            started: snapshot.started,
            next_seq: snapshot.next_seq,
            rejected: snapshot.rejected.into_iter().collect(),
            ..SearchState::default()
        };
        for record in snapshot.accepted {
            let predicate = Predicate::new(record.clauses, dataset, dtypes)?;
            state.accept_with_id(record.id, predicate, record.score);
        }
        for record in snapshot.frontier {
            let predicate = Predicate::new(record.clauses, dataset, dtypes)?;
            state.frontier_keys.insert(predicate.clauses().clone());
            state.next_seq = state.next_seq.max(record.seq + 1);
            state.frontier.push(FrontierEntry {
                predicate,
                score: record.score,
                seq: record.seq,
            });
        }
        Ok(state)
    }
}

// ── Snapshot ─────────────────────────────────────────────────────────────

/// Queued candidate in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrontierRecord {
    pub clauses: ClauseMap,
    pub score: f64,
    pub seq: u64,
}

/// Accepted predicate in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcceptedRecord {
    /// Snapshots written without ids get a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub clauses: ClauseMap,
    pub score: f64,
}

/// Mask-free, serializable search state for persistence between requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub started: bool,
    pub next_seq: u64,
    pub frontier: Vec<FrontierRecord>,
    pub accepted: Vec<AcceptedRecord>,
    pub rejected: Vec<ClauseMap>,
}

impl SearchSnapshot {
    pub fn to_json(&self) -> InductionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> InductionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
