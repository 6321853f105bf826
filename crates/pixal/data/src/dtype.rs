//! Column dtype classification.
//!
//! Every downstream component branches on the closed `Dtype` variant to pick
//! a discretization: numeric columns are binned into ranges, categorical and
//! binary columns enumerate their observed values.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::value::Value;

/// A numeric-looking column needs more than this many distinct values to be
/// binned; below it, each value is treated as a category.
pub const NUMERIC_MIN_DISTINCT: usize = 5;

/// Discretization strategy for a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Numeric,
    Categorical,
    Binary,
}

impl Dtype {
    /// Whether constraints on this dtype are closed intervals.
    pub fn is_numeric(self) -> bool {
        matches!(self, Dtype::Numeric)
    }
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dtype::Numeric => write!(f, "numeric"),
            Dtype::Categorical => write!(f, "categorical"),
            Dtype::Binary => write!(f, "binary"),
        }
    }
}

impl std::str::FromStr for Dtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Dtype::Numeric),
            "categorical" => Ok(Dtype::Categorical),
            "binary" => Ok(Dtype::Binary),
            other => Err(format!("unknown dtype: {}", other)),
        }
    }
}

/// Column name to dtype. Ordered so iteration is deterministic.
pub type Dtypes = BTreeMap<String, Dtype>;

/// Classify a single column.
///
/// Binary if exactly two distinct non-missing values; numeric if every
/// non-missing value coerces to a number and there are more than
/// `NUMERIC_MIN_DISTINCT` distinct values; categorical otherwise.
pub fn classify(values: &[Value]) -> Dtype {
    let distinct: BTreeSet<&Value> = values.iter().filter(|v| !v.is_missing()).collect();
    if distinct.len() == 2 {
        return Dtype::Binary;
    }

    let numbers: Option<BTreeSet<u64>> = distinct
        .iter()
        .map(|v| v.as_number().map(|n| n.to_bits()))
        .collect();
    match numbers {
        Some(numbers) if numbers.len() > NUMERIC_MIN_DISTINCT => Dtype::Numeric,
        _ => Dtype::Categorical,
    }
}

/// Classify every column of a dataset.
pub fn infer_dtypes(dataset: &Dataset) -> Dtypes {
    dataset
        .columns()
        .iter()
        .map(|c| (c.name.clone(), classify(&c.values)))
        .collect()
}
