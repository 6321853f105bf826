//! Compound predicates.
//!
//! A `Predicate` is an immutable conjunction of per-attribute constraints.
//! Its canonical form is the attribute-sorted clause map, which alone
//! defines equality and hashing; the row masks are derived once at
//! construction and cached for the predicate's lifetime.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use pixal_data::{AtomicPredicate, Constraint, Dataset, Dtype, Dtypes, RowMask};

use crate::clauses::ClauseMap;
use crate::error::{InductionError, InductionResult};

/// Conjunction of constraints over distinct attributes. Never empty.
#[derive(Clone, Debug)]
pub struct Predicate {
    clauses: ClauseMap,
    clause_masks: BTreeMap<String, RowMask>,
    mask: RowMask,
}

impl Predicate {
    /// Build a predicate from a clause map, validating every clause against
    /// `dtypes` and computing masks from `dataset`.
    pub fn new(clauses: ClauseMap, dataset: &Dataset, dtypes: &Dtypes) -> InductionResult<Self> {
        if clauses.is_empty() {
            return Err(InductionError::EmptyPredicate);
        }

        let mut clause_masks = BTreeMap::new();
        for (attribute, constraint) in &clauses {
            let dtype = dtypes
                .get(attribute)
                .copied()
                .ok_or_else(|| pixal_data::DataError::UnknownColumn(attribute.clone()))?;
            check_kind(attribute, dtype, constraint)?;
            constraint.validate(attribute)?;
            let column = dataset.column(attribute)?;
            clause_masks.insert(attribute.clone(), constraint.mask(column));
        }

        Ok(Self::from_parts(clauses, clause_masks))
    }

    /// One-clause predicate wrapping an atomic predicate.
    pub fn from_atomic(atomic: &AtomicPredicate) -> Self {
        let clauses = ClauseMap::from([(atomic.attribute.clone(), atomic.constraint.clone())]);
        let clause_masks = BTreeMap::from([(atomic.attribute.clone(), atomic.mask.clone())]);
        Self::from_parts(clauses, clause_masks)
    }

    fn from_parts(clauses: ClauseMap, clause_masks: BTreeMap<String, RowMask>) -> Self {
        let mask = and_all(clause_masks.values()).expect("predicate has at least one clause");
        Self {
            clauses,
            clause_masks,
            mask,
        }
    }

    /// Rows satisfying every clause.
    pub fn mask(&self) -> &RowMask {
        &self.mask
    }

    /// Constrained attribute names, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        self.clauses.keys().map(String::as_str).collect()
    }

    pub fn clauses(&self) -> &ClauseMap {
        &self.clauses
    }

    pub fn into_clauses(self) -> ClauseMap {
        self.clauses
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn constrains(&self, attribute: &str) -> bool {
        self.clauses.contains_key(attribute)
    }

    pub fn constraint(&self, attribute: &str) -> Option<&Constraint> {
        self.clauses.get(attribute)
    }

    /// Rows satisfying the clause on `attribute` alone.
    pub fn clause_mask(&self, attribute: &str) -> Option<&RowMask> {
        self.clause_masks.get(attribute)
    }

    /// Rows satisfying every clause except the one on `attribute`.
    ///
    /// With a single clause this is every row.
    pub fn mask_without(&self, attribute: &str) -> RowMask {
        and_all(
            self.clause_masks
                .iter()
                .filter(|(name, _)| name.as_str() != attribute)
                .map(|(_, m)| m),
        )
        .unwrap_or_else(|| RowMask::all(self.mask.len()))
    }

    /// Add a clause on a new attribute.
    pub fn conjoin(&self, atomic: &AtomicPredicate) -> InductionResult<Predicate> {
        if self.constrains(&atomic.attribute) {
            return Err(InductionError::DuplicateAttribute(atomic.attribute.clone()));
        }
        let mut clauses = self.clauses.clone();
        clauses.insert(atomic.attribute.clone(), atomic.constraint.clone());
        let mut clause_masks = self.clause_masks.clone();
        clause_masks.insert(atomic.attribute.clone(), atomic.mask.clone());

        Ok(Self {
            clauses,
            clause_masks,
            mask: self.mask.and(&atomic.mask),
        })
    }

    /// Merge an atomic into the existing clause on its attribute: interval
    /// hull for ranges, set union for values. The clause count is unchanged.
    pub fn widen(&self, atomic: &AtomicPredicate, dataset: &Dataset) -> InductionResult<Predicate> {
        let current = self
            .constraint(&atomic.attribute)
            .ok_or_else(|| InductionError::MissingAttribute(atomic.attribute.clone()))?;
        let merged = current.merge(&atomic.constraint).ok_or_else(|| {
            InductionError::Data(pixal_data::DataError::MalformedConstraint {
                attribute: atomic.attribute.clone(),
                reason: "cannot merge a range with a value set".into(),
            })
        })?;

        let column = dataset.column(&atomic.attribute)?;
        let mut clauses = self.clauses.clone();
        let mut clause_masks = self.clause_masks.clone();
        clause_masks.insert(atomic.attribute.clone(), merged.mask(column));
        clauses.insert(atomic.attribute.clone(), merged);

        Ok(Self::from_parts(clauses, clause_masks))
    }

    /// Human-readable rendering, e.g. `alcohol in [9.5, 11.2] and color in {red}`.
    pub fn name(&self) -> String {
        self.clauses
            .iter()
            .map(|(attribute, constraint)| format!("{} in {}", attribute, constraint))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

fn check_kind(attribute: &str, dtype: Dtype, constraint: &Constraint) -> InductionResult<()> {
    let fits = match dtype {
        Dtype::Numeric => constraint.is_range(),
        Dtype::Categorical | Dtype::Binary => !constraint.is_range(),
    };
    if fits {
        Ok(())
    } else {
        Err(InductionError::ConstraintKindMismatch {
            attribute: attribute.to_string(),
            dtype,
        })
    }
}

fn and_all<'a>(mut masks: impl Iterator<Item = &'a RowMask>) -> Option<RowMask> {
    let mut acc = masks.next()?.clone();
    for m in masks {
        acc.and_assign(m);
    }
    Some(acc)
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.clauses == other.clauses
    }
}

impl Eq for Predicate {}

impl Hash for Predicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.clauses.hash(state);
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
