//! Clause maps: the serializable form of a predicate.
//!
//! ```text
//!   { "alcohol": { "min": 9.5, "max": 11.2 },
//!     "color":   { "values": ["red"] } }
//! ```
//!
//! Also parses the compact query-string forms used when a rule is proposed
//! by hand: `"min,max"` for numeric attributes and `"a|b|c"` for
//! categorical ones.

use std::collections::BTreeMap;

use pixal_data::{Constraint, DataError, Dtype, Dtypes, Value};

use crate::error::InductionResult;

/// Attribute to constraint, sorted by attribute. Canonical predicate key.
pub type ClauseMap = BTreeMap<String, Constraint>;

/// Parse a single clause value for an attribute of the given dtype.
///
/// Numeric: `"min,max"` or a single `"v"` meaning `[v, v]`.
/// Categorical/binary: `|`-separated values; tokens that parse as numbers
/// become numeric values, everything else text.
pub fn parse_constraint(attribute: &str, text: &str, dtype: Dtype) -> InductionResult<Constraint> {
    let constraint = match dtype {
        Dtype::Numeric => {
            let bounds: Vec<f64> = text
                .split(',')
                .map(|t| t.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|e| DataError::MalformedConstraint {
                    attribute: attribute.to_string(),
                    reason: format!("{:?} is not a numeric range: {}", text, e),
                })?;
            match bounds.as_slice() {
                [v] => Constraint::range(*v, *v),
                [min, max] => Constraint::range(*min, *max),
                _ => {
                    return Err(DataError::MalformedConstraint {
                        attribute: attribute.to_string(),
                        reason: format!("expected \"min,max\", got {:?}", text),
                    }
                    .into())
                }
            }
        }
        Dtype::Categorical | Dtype::Binary => Constraint::values(
            text.split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(parse_token),
        ),
    };
    constraint.validate(attribute)?;
    Ok(constraint)
}

fn parse_token(token: &str) -> Value {
    match token.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(token.to_string()),
    }
}

/// Build a clause map from string parameters, ignoring keys that are not
/// dataset columns (e.g. `dataset`, `selected_ids`).
pub fn parse_clause_query(
    params: &BTreeMap<String, String>,
    dtypes: &Dtypes,
) -> InductionResult<ClauseMap> {
    params
        .iter()
        .filter_map(|(k, v)| dtypes.get(k).map(|dtype| (k, v, *dtype)))
        .map(|(k, v, dtype)| Ok((k.clone(), parse_constraint(k, v, dtype)?)))
        .collect()
}

/// Drop clauses on attributes without a dtype.
pub fn retain_known(clauses: ClauseMap, dtypes: &Dtypes) -> ClauseMap {
    clauses
        .into_iter()
        .filter(|(attribute, _)| dtypes.contains_key(attribute))
        .collect()
}
