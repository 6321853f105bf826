//! Equal-width binning of numeric columns.
//!
//! `k` bins cover `[min, max]`. Bin `i` is `[lo_i, lo_i + width)`; the last
//! bin is closed on the right so the maximum-valued row always lands in a
//! bin.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::value::Value;

/// Default number of bins per numeric column.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Fitted equal-width bins for one numeric column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bins {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Bins {
    /// Fit `bins` equal-width bins over the observed range of `values`.
    ///
    /// Fails with `InvalidBinCount` when `bins == 0` or the column has fewer
    /// than two distinct numeric values.
    pub fn fit(column: &str, values: &[Value], bins: usize) -> DataResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for n in values.iter().filter_map(Value::as_number) {
            min = min.min(n);
            max = max.max(n);
        }
        let distinct = if min > max {
            0
        } else if min == max {
            1
        } else {
            2
        };
        if bins == 0 || distinct < 2 {
            let distinct = values
                .iter()
                .filter_map(Value::as_number)
                .map(f64::to_bits)
                .collect::<std::collections::BTreeSet<_>>()
                .len();
            return Err(DataError::InvalidBinCount {
                column: column.to_string(),
                bins,
                distinct,
            });
        }
        Ok(Self {
            min,
            max,
            count: bins,
        })
    }

    pub fn width(&self) -> f64 {
        (self.max - self.min) / self.count as f64
    }

    /// Bin boundaries as `(lo, hi)` pairs; only the last `hi` is inclusive.
    pub fn intervals(&self) -> Vec<(f64, f64)> {
        let width = self.width();
        (0..self.count)
            .map(|i| {
                let lo = self.min + width * i as f64;
                let hi = if i + 1 == self.count {
                    self.max
                } else {
                    self.min + width * (i + 1) as f64
                };
                (lo, hi)
            })
            .collect()
    }

    /// Index of the bin containing `x`, or `None` outside `[min, max]`.
    pub fn bin_of(&self, x: f64) -> Option<usize> {
        if x.is_nan() || x < self.min || x > self.max {
            return None;
        }
        let idx = ((x - self.min) / self.width()).floor() as usize;
        Some(idx.min(self.count - 1))
    }
}
