//! Score functions.
//!
//! Provides:
//! - `ScoreFunction` trait: `(mask, target, active) -> f64`
//! - `F1`: classification fit of the predicate against the selection
//! - `AnomalyScore`: smoothed enrichment of the positive rate inside the
//!   predicate relative to a reference population
//! - `Scorer`: a score function bound to one target/active configuration
//!
//! Degenerate inputs (empty masks, zero denominators) produce defined
//! values, never `NaN`, so candidates are always totally ordered.

use pixal_data::RowMask;
use serde::{Deserialize, Serialize};

use crate::error::{InductionError, InductionResult};
use crate::predicate::Predicate;

// ── Trait ────────────────────────────────────────────────────────────────

/// Objective mapping a predicate mask to a real-valued score.
pub trait ScoreFunction: Send + Sync {
    /// Score `mask` against `target`, restricted to `active` rows when given.
    fn score(&self, mask: &RowMask, target: &RowMask, active: Option<&RowMask>) -> f64;

    /// Name of the objective (for logging).
    fn name(&self) -> &str;
}

// ── Confusion counts ─────────────────────────────────────────────────────

/// Confusion counts of a predicate mask against a target over the active rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Confusion {
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tn: usize,
}

impl Confusion {
    pub fn from_masks(mask: &RowMask, target: &RowMask, active: Option<&RowMask>) -> Self {
        let (selected, positives, total, tp) = match active {
            Some(active) => (
                mask.intersection_count(active),
                target.intersection_count(active),
                active.count(),
                mask.intersection_count_within(target, active),
            ),
            None => (mask.count(), target.count(), mask.len(), mask.intersection_count(target)),
        };
        let fp = selected - tp;
        let fn_ = positives - tp;
        Self {
            tp,
            fp,
            fn_,
            tn: total - tp - fp - fn_,
        }
    }

    /// `tp / (tp + fp)`, 0 when nothing is selected.
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// `tp / (tp + fn)`, 0 when there are no positives.
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

// ── 1. F1 ────────────────────────────────────────────────────────────────

/// Harmonic mean of precision and recall. Always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct F1;

impl ScoreFunction for F1 {
    fn score(&self, mask: &RowMask, target: &RowMask, active: Option<&RowMask>) -> f64 {
        let c = Confusion::from_masks(mask, target, active);
        let (p, r) = (c.precision(), c.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    fn name(&self) -> &str {
        "f1"
    }
}

// ── 2. Anomaly ───────────────────────────────────────────────────────────

/// Ratio of the smoothed positive rate inside the predicate to the smoothed
/// positive rate of a reference population.
///
/// `((tp + a) / (n + 2a)) / ((pos_ref + a) / (n_ref + 2a))` with pseudo-count
/// `a` (default 1). The reference population is the supplied reference
/// rows, else the active rows, else every row. Always finite and positive.
#[derive(Clone, Debug)]
pub struct AnomalyScore {
    /// Pseudo-count added to positives and negatives.
    pub prior: f64,
    /// Explicit reference rows.
    pub reference: Option<RowMask>,
}

impl AnomalyScore {
    pub fn new() -> Self {
        Self {
            prior: 1.0,
            reference: None,
        }
    }

    pub fn with_reference(reference: RowMask) -> Self {
        Self {
            prior: 1.0,
            reference: Some(reference),
        }
    }

    fn smoothed_rate(&self, positives: usize, total: usize) -> f64 {
        (positives as f64 + self.prior) / (total as f64 + 2.0 * self.prior)
    }
}

impl Default for AnomalyScore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreFunction for AnomalyScore {
    fn score(&self, mask: &RowMask, target: &RowMask, active: Option<&RowMask>) -> f64 {
        let inside = Confusion::from_masks(mask, target, active);
        let rate_in = self.smoothed_rate(inside.tp, inside.tp + inside.fp);

        let rate_ref = match (&self.reference, active) {
            (Some(reference), _) => {
                self.smoothed_rate(target.intersection_count(reference), reference.count())
            }
            (None, Some(active)) => {
                self.smoothed_rate(target.intersection_count(active), active.count())
            }
            (None, None) => self.smoothed_rate(target.count(), target.len()),
        };
        rate_in / rate_ref
    }

    fn name(&self) -> &str {
        "anomaly"
    }
}

// ── Selection ────────────────────────────────────────────────────────────

/// Which objective to use, selected once per engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    #[default]
    F1,
    Anomaly,
}

impl ScoreKind {
    pub fn build(self) -> Box<dyn ScoreFunction> {
        match self {
            ScoreKind::F1 => Box::new(F1),
            ScoreKind::Anomaly => Box::new(AnomalyScore::new()),
        }
    }
}

impl std::str::FromStr for ScoreKind {
    type Err = InductionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f1" => Ok(ScoreKind::F1),
            "anomaly" | "bayes_factor" => Ok(ScoreKind::Anomaly),
            other => Err(InductionError::InvalidConfig(format!(
                "unknown score function: {}",
                other
            ))),
        }
    }
}

// ── Scorer ───────────────────────────────────────────────────────────────

/// A score function bound to a target mask and optional active rows.
pub struct Scorer {
    target: RowMask,
    active: Option<RowMask>,
    score_fn: Box<dyn ScoreFunction>,
}

impl Scorer {
    pub fn new(
        target: RowMask,
        active: Option<RowMask>,
        score_fn: Box<dyn ScoreFunction>,
    ) -> InductionResult<Self> {
        if let Some(active) = &active {
            if active.len() != target.len() {
                return Err(pixal_data::DataError::MaskLengthMismatch {
                    expected: target.len(),
                    got: active.len(),
                }
                .into());
            }
        }
        Ok(Self {
            target,
            active,
            score_fn,
        })
    }

    pub fn target(&self) -> &RowMask {
        &self.target
    }

    pub fn active(&self) -> Option<&RowMask> {
        self.active.as_ref()
    }

    pub fn name(&self) -> &str {
        self.score_fn.name()
    }

    pub fn score_mask(&self, mask: &RowMask) -> f64 {
        self.score_fn.score(mask, &self.target, self.active.as_ref())
    }

    pub fn score(&self, predicate: &Predicate) -> f64 {
        self.score_mask(predicate.mask())
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("score_fn", &self.score_fn.name())
            .field("positives", &self.target.count())
            .field("active", &self.active.as_ref().map(RowMask::count))
            .finish()
    }
}
