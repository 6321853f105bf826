//! Single-attribute constraints.
//!
//! Numeric attributes are constrained to a closed interval, categorical and
//! binary attributes to a non-empty set of allowed values. The serialized
//! forms are the clause shapes exchanged with callers:
//! `{"min": .., "max": ..}` and `{"values": [..]}`.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::mask::RowMask;
use crate::value::{canonical_zero, Value};

/// Closed numeric interval `[min, max]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: canonical_zero(min),
            max: canonical_zero(max),
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    fn canonical(&self) -> Interval {
        Interval::new(self.min, self.max)
    }

    /// Smallest interval covering both.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval::new(self.min.min(other.min), self.max.max(other.max))
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Interval {}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.canonical(), other.canonical());
        a.min.total_cmp(&b.min).then(a.max.total_cmp(&b.max))
    }
}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let iv = self.canonical();
        iv.min.to_bits().hash(state);
        iv.max.to_bits().hash(state);
    }
}

/// Constraint on one attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Constraint {
    Range(Interval),
    Values { values: BTreeSet<Value> },
}

impl Constraint {
    pub fn range(min: f64, max: f64) -> Self {
        Constraint::Range(Interval::new(min, max))
    }

    pub fn values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Constraint::Values {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Constraint::Range(_))
    }

    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Constraint::Range(interval) => Some(interval),
            Constraint::Values { .. } => None,
        }
    }

    /// Check the well-formedness invariants: finite `min <= max`, or a
    /// non-empty set without missing values.
    pub fn validate(&self, attribute: &str) -> DataResult<()> {
        match self {
            Constraint::Range(Interval { min, max }) => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(DataError::malformed(attribute, "bounds must be finite"));
                }
                if min > max {
                    return Err(DataError::malformed(
                        attribute,
                        format!("min {} > max {}", min, max),
                    ));
                }
            }
            Constraint::Values { values } => {
                if values.is_empty() {
                    return Err(DataError::malformed(attribute, "empty value set"));
                }
                if values.iter().any(Value::is_missing) {
                    return Err(DataError::malformed(attribute, "missing is not a value"));
                }
            }
        }
        Ok(())
    }

    /// Whether a single cell satisfies the constraint. Missing cells never do.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Constraint::Range(interval) => {
                value.as_number().is_some_and(|x| interval.contains(x))
            }
            Constraint::Values { values } => !value.is_missing() && values.contains(value),
        }
    }

    /// Mask of the rows of `column` satisfying the constraint.
    pub fn mask(&self, column: &[Value]) -> RowMask {
        column.iter().map(|v| self.matches(v)).collect()
    }

    /// Union of two constraints of the same kind: interval hull or set union.
    pub fn merge(&self, other: &Constraint) -> Option<Constraint> {
        match (self, other) {
            (Constraint::Range(a), Constraint::Range(b)) => Some(Constraint::Range(a.hull(b))),
            (Constraint::Values { values: a }, Constraint::Values { values: b }) => {
                Some(Constraint::Values {
                    values: a.union(b).cloned().collect(),
                })
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Range(iv) => {
                let iv = iv.canonical();
                write!(f, "[{}, {}]", iv.min, iv.max)
            }
            Constraint::Values { values } => {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}
