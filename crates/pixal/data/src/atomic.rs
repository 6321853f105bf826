//! Atomic predicate generation.
//!
//! For every attribute with a dtype, enumerates the single-attribute
//! constraints the search may use and records, per row, which of them the
//! row falls into.
//!
//! ## Candidates per dtype
//!
//! ```text
//!   Numeric      ──► Bins (equal width) ──► one [min, max] per non-empty bin,
//!                                           bounds = observed values in the bin
//!   Categorical  ──► one {value} per distinct non-missing value
//!   Binary       ──► one {value} per distinct non-missing value (two at most)
//! ```
//!
//! Atomics of one attribute are disjoint, so every row maps to at most one
//! atomic per attribute. The table is immutable once built and can be read
//! by any number of search sessions at the same time.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::binning::Bins;
use crate::constraint::{Constraint, Interval};
use crate::dataset::Dataset;
use crate::dtype::{Dtype, Dtypes};
use crate::error::{DataError, DataResult};
use crate::mask::RowMask;
use crate::value::Value;

/// A single-attribute constraint together with the rows it selects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicPredicate {
    pub attribute: String,
    pub constraint: Constraint,
    pub mask: RowMask,
}

/// Candidates generated for one attribute.
#[derive(Clone, Debug)]
pub struct AttributeCandidates {
    pub dtype: Dtype,
    /// Ordered: ascending bins for numeric, ascending values otherwise.
    pub atomics: Vec<AtomicPredicate>,
    /// For each row, the index into `atomics` it falls into.
    pub row_index: Vec<Option<usize>>,
}

/// Atomic predicates for every attribute of a dataset.
#[derive(Clone, Debug)]
pub struct AtomicTable {
    attributes: BTreeMap<String, AttributeCandidates>,
    row_count: usize,
}

impl AtomicTable {
    /// Generate candidates for every column listed in `dtypes`.
    ///
    /// Numeric columns are split into `bins` equal-width bins. A numeric
    /// column holding a single distinct value yields one degenerate
    /// `[v, v]` atomic; one with no numeric values yields none.
    pub fn build(dataset: &Dataset, dtypes: &Dtypes, bins: usize) -> DataResult<Self> {
        if bins == 0 {
            return Err(DataError::InvalidBinCount {
                column: String::new(),
                bins,
                distinct: 0,
            });
        }

        let mut attributes = BTreeMap::new();
        for (name, dtype) in dtypes {
            let column = dataset.column(name)?;
            let candidates = match dtype {
                Dtype::Numeric => numeric_candidates(name, column, bins)?,
                Dtype::Categorical | Dtype::Binary => value_candidates(name, *dtype, column),
            };
            debug!(
                attribute = %name,
                dtype = %dtype,
                atomics = candidates.atomics.len(),
                "atomic predicates generated"
            );
            attributes.insert(name.clone(), candidates);
        }

        Ok(Self {
            attributes,
            row_count: dataset.row_count(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Attribute names, sorted.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeCandidates> {
        self.attributes.get(name)
    }

    pub fn dtype(&self, name: &str) -> Option<Dtype> {
        self.attributes.get(name).map(|c| c.dtype)
    }

    pub fn candidates(&self, name: &str) -> &[AtomicPredicate] {
        self.attributes
            .get(name)
            .map(|c| c.atomics.as_slice())
            .unwrap_or(&[])
    }

    /// Index of the atomic of `attribute` that `row` falls into.
    pub fn row_index(&self, attribute: &str, row: usize) -> Option<usize> {
        self.attributes
            .get(attribute)
            .and_then(|c| c.row_index.get(row).copied().flatten())
    }

    /// Every atomic, ordered by attribute then index.
    pub fn iter(&self) -> impl Iterator<Item = &AtomicPredicate> {
        self.attributes.values().flat_map(|c| c.atomics.iter())
    }

    pub fn len(&self) -> usize {
        self.attributes.values().map(|c| c.atomics.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomics covering at least one seed row, ordered by attribute then index.
    pub fn seeded(&self, seed_rows: &RowMask) -> Vec<&AtomicPredicate> {
        if seed_rows.len() != self.row_count {
            panic!(
                "{}",
                DataError::MaskLengthMismatch {
                    expected: self.row_count,
                    got: seed_rows.len(),
                }
            );
        }
        let mut seeds = Vec::new();
        for candidates in self.attributes.values() {
            let hit: BTreeSet<usize> = seed_rows
                .iter_ones()
                .filter_map(|row| candidates.row_index[row])
                .collect();
            seeds.extend(hit.into_iter().map(|i| &candidates.atomics[i]));
        }
        seeds
    }

    /// Numeric atomics directly below and above `range` on `attribute`.
    pub fn neighbors(&self, attribute: &str, range: &Interval) -> Vec<&AtomicPredicate> {
        let atomics = self.candidates(attribute);
        let bounds = |a: &AtomicPredicate| a.constraint.as_interval().copied();

        let below = atomics.partition_point(|a| bounds(a).is_some_and(|b| b.max < range.min));
        let above = atomics.partition_point(|a| bounds(a).is_some_and(|b| b.min <= range.max));

        let mut out = Vec::with_capacity(2);
        if below > 0 {
            out.push(&atomics[below - 1]);
        }
        if above < atomics.len() {
            out.push(&atomics[above]);
        }
        out
    }
}

fn numeric_candidates(name: &str, column: &[Value], bins: usize) -> DataResult<AttributeCandidates> {
    let fitted = match Bins::fit(name, column, bins) {
        Ok(fitted) => Some(fitted),
        Err(DataError::InvalidBinCount { distinct, .. }) if distinct < 2 => None,
        Err(e) => return Err(e),
    };

    // Observed bounds per bin, then compact the non-empty bins.
    let raw_index: Vec<Option<usize>> = column
        .iter()
        .map(|v| {
            let x = v.as_number()?;
            match &fitted {
                Some(b) => b.bin_of(x),
                None => Some(0),
            }
        })
        .collect();
    let slots = fitted.as_ref().map(|b| b.count).unwrap_or(1);
    let mut observed: Vec<Option<Interval>> = vec![None; slots];
    for (value, idx) in column.iter().zip(&raw_index) {
        if let (Some(x), Some(i)) = (value.as_number(), idx) {
            observed[*i] = Some(match observed[*i] {
                Some(iv) => iv.hull(&Interval::new(x, x)),
                None => Interval::new(x, x),
            });
        }
    }

    let mut compact = vec![None; slots];
    let mut intervals = Vec::new();
    for (slot, iv) in observed.iter().enumerate() {
        if let Some(iv) = iv {
            compact[slot] = Some(intervals.len());
            intervals.push(*iv);
        }
    }
    let row_index: Vec<Option<usize>> = raw_index
        .iter()
        .map(|idx| idx.and_then(|i| compact[i]))
        .collect();

    let atomics = intervals
        .into_iter()
        .enumerate()
        .map(|(i, iv)| AtomicPredicate {
            attribute: name.to_string(),
            constraint: Constraint::Range(iv),
            mask: row_index.iter().map(|r| *r == Some(i)).collect(),
        })
        .collect();

    Ok(AttributeCandidates {
        dtype: Dtype::Numeric,
        atomics,
        row_index,
    })
}

fn value_candidates(name: &str, dtype: Dtype, column: &[Value]) -> AttributeCandidates {
    let distinct: BTreeSet<&Value> = column.iter().filter(|v| !v.is_missing()).collect();
    let positions: BTreeMap<&Value, usize> =
        distinct.iter().enumerate().map(|(i, v)| (*v, i)).collect();
    let row_index: Vec<Option<usize>> = column.iter().map(|v| positions.get(v).copied()).collect();

    let atomics = distinct
        .iter()
        .enumerate()
        .map(|(i, v)| AtomicPredicate {
            attribute: name.to_string(),
            constraint: Constraint::values([(*v).clone()]),
            mask: row_index.iter().map(|r| *r == Some(i)).collect(),
        })
        .collect();

    AttributeCandidates {
        dtype,
        atomics,
        row_index,
    }
}
