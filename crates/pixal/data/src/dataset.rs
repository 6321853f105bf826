//! Read-only tabular dataset.
//!
//! Rows are addressed by position (the stable row id); columns by name.
//! Nothing in the search core mutates a dataset after construction, so a
//! single instance can be shared by any number of concurrent sessions.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{DataError, DataResult};
use crate::value::Value;

/// A named column of cell values.
#[derive(Clone, Debug)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Columnar, immutable table.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    positions: HashMap<String, usize>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from named columns.
    ///
    /// All columns must have the same length and distinct names.
    pub fn new<N: Into<String>>(columns: Vec<(N, Vec<Value>)>) -> DataResult<Self> {
        let mut dataset = Dataset::default();
        for (i, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if i == 0 {
                dataset.row_count = values.len();
            } else if values.len() != dataset.row_count {
                return Err(DataError::ColumnLengthMismatch {
                    column: name,
                    expected: dataset.row_count,
                    got: values.len(),
                });
            }
            if dataset.positions.contains_key(&name) {
                return Err(DataError::DuplicateColumn(name));
            }
            dataset.positions.insert(name.clone(), dataset.columns.len());
            dataset.columns.push(Column { name, values });
        }
        Ok(dataset)
    }

    /// Build a dataset from row records (`column -> value` per row).
    ///
    /// Columns are the sorted union of all record keys; a key absent from a
    /// record is read as `Null`.
    pub fn from_records(records: &[BTreeMap<String, Value>]) -> DataResult<Self> {
        let names: BTreeSet<&String> = records.iter().flat_map(|r| r.keys()).collect();
        let columns = names
            .into_iter()
            .map(|name| {
                let values = records
                    .iter()
                    .map(|r| r.get(name).cloned().unwrap_or_default())
                    .collect();
                (name.clone(), values)
            })
            .collect();
        Self::new(columns)
    }

    /// Parse a JSON array of row objects.
    pub fn from_json_records(json: &str) -> DataResult<Self> {
        let records: Vec<BTreeMap<String, Value>> = serde_json::from_str(json)
            .map_err(|e| DataError::InvalidRecords(e.to_string()))?;
        Self::from_records(&records)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in construction order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn column(&self, name: &str) -> DataResult<&[Value]> {
        self.positions
            .get(name)
            .map(|&i| self.columns[i].values.as_slice())
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    pub fn value(&self, row: usize, column: &str) -> DataResult<&Value> {
        let values = self.column(column)?;
        values.get(row).ok_or(DataError::RowOutOfRange {
            row,
            len: self.row_count,
        })
    }
}
