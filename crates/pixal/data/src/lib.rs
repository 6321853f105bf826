//! # pixal-data
//!
//! Tabular data layer for PIXAL predicate induction.
//!
//! Holds everything the search reads but never writes: the dataset, column
//! dtypes, row masks, and the table of atomic (single-attribute) predicates
//! generated from binned numeric columns and categorical values.
//!
//! ## Architecture
//!
//! ```text
//!   Dataset ──► infer_dtypes() ──► Dtypes
//!      │                             │
//!      └──────────────┬──────────────┘
//!                     ▼
//!               AtomicTable::build(bins)
//!                     │  numeric: Bins ──► [min, max] per bin
//!                     │  categorical/binary: {value} per value
//!                     ▼
//!            AtomicPredicate { attribute, constraint, mask: RowMask }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pixal_data::{infer_dtypes, AtomicTable, Dataset, RowMask, Value};
//!
//! let dataset = Dataset::new(vec![("x", (0..10).map(Value::from).collect())]).unwrap();
//! let dtypes = infer_dtypes(&dataset);
//! let table = AtomicTable::build(&dataset, &dtypes, 5).unwrap();
//!
//! let selected = RowMask::from_indices(10, [5, 6, 7]).unwrap();
//! assert_eq!(table.seeded(&selected).len(), 2);
//! ```

#![deny(unsafe_code)]

pub mod atomic;
pub mod binning;
pub mod constraint;
pub mod dataset;
pub mod dtype;
pub mod error;
pub mod mask;
pub mod value;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use atomic::{AtomicPredicate, AtomicTable, AttributeCandidates};
pub use binning::{Bins, DEFAULT_BIN_COUNT};
pub use constraint::{Constraint, Interval};
pub use dataset::{Column, Dataset};
pub use dtype::{classify, infer_dtypes, Dtype, Dtypes, NUMERIC_MIN_DISTINCT};
pub use error::{DataError, DataResult};
pub use mask::RowMask;
pub use value::Value;
