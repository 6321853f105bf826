//! Dense row masks.
//!
//! A `RowMask` is a fixed-length bit vector whose bit `i` says whether row `i`
//! of a dataset is selected. Target sets, comparison sets, atomic predicates
//! and compound predicates all share this representation, so composing them
//! is a word-wise AND over `len / 64` words.
//!
//! Combining masks of different lengths is a contract violation and panics.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

const WORD_BITS: usize = 64;

/// Fixed-length bit vector over dataset rows.
///
/// Bits past `len` in the last word are always zero.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MaskParts")]
pub struct RowMask {
    words: Vec<u64>,
    len: usize,
}

/// Unchecked wire form of a `RowMask`.
#[derive(Deserialize)]
struct MaskParts {
    words: Vec<u64>,
    len: usize,
}

impl TryFrom<MaskParts> for RowMask {
    type Error = DataError;

    fn try_from(parts: MaskParts) -> DataResult<Self> {
        let expected = parts.len.div_ceil(WORD_BITS);
        if parts.words.len() != expected {
            return Err(DataError::MaskLengthMismatch {
                expected,
                got: parts.words.len(),
            });
        }
        let mask = Self {
            words: parts.words,
            len: parts.len,
        };
        let mut cleared = mask.clone();
        cleared.clear_tail();
        if cleared != mask {
            return Err(DataError::InvalidMask(format!(
                "bits set past row {}",
                mask.len
            )));
        }
        Ok(mask)
    }
}

impl RowMask {
    /// Mask of `len` rows with nothing selected.
    pub fn none(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Mask of `len` rows with every row selected.
    pub fn all(len: usize) -> Self {
        let mut mask = Self {
            words: vec![u64::MAX; len.div_ceil(WORD_BITS)],
            len,
        };
        mask.clear_tail();
        mask
    }

    pub fn from_bools(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }

    /// Mask selecting the given row ids.
    pub fn from_indices(len: usize, rows: impl IntoIterator<Item = usize>) -> DataResult<Self> {
        let mut mask = Self::none(len);
        for row in rows {
            if row >= len {
                return Err(DataError::RowOutOfRange { row, len });
            }
            mask.set(row, true);
        }
        Ok(mask)
    }

    /// Number of rows covered (selected or not).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, row: usize) -> bool {
        assert!(row < self.len, "row {} out of range for mask of {}", row, self.len);
        self.words[row / WORD_BITS] & (1 << (row % WORD_BITS)) != 0
    }

    pub fn set(&mut self, row: usize, selected: bool) {
        assert!(row < self.len, "row {} out of range for mask of {}", row, self.len);
        let bit = 1u64 << (row % WORD_BITS);
        if selected {
            self.words[row / WORD_BITS] |= bit;
        } else {
            self.words[row / WORD_BITS] &= !bit;
        }
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|w| *w != 0)
    }

    pub fn and(&self, other: &RowMask) -> RowMask {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn or(&self, other: &RowMask) -> RowMask {
        self.zip_with(other, |a, b| a | b)
    }

    pub fn and_not(&self, other: &RowMask) -> RowMask {
        self.zip_with(other, |a, b| a & !b)
    }

    pub fn not(&self) -> RowMask {
        let mut mask = Self {
            words: self.words.iter().map(|w| !w).collect(),
            len: self.len,
        };
        mask.clear_tail();
        mask
    }

    /// In-place intersection.
    pub fn and_assign(&mut self, other: &RowMask) {
        self.check_len(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }

    /// `|self ∧ other|` without allocating.
    pub fn intersection_count(&self, other: &RowMask) -> usize {
        self.check_len(other);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// `|self ∧ other ∧ within|` without allocating.
    pub fn intersection_count_within(&self, other: &RowMask, within: &RowMask) -> usize {
        self.check_len(other);
        self.check_len(within);
        self.words
            .iter()
            .zip(&other.words)
            .zip(&within.words)
            .map(|((a, b), c)| (a & b & c).count_ones() as usize)
            .sum()
    }

    /// Whether every selected row of `self` is also selected in `other`.
    pub fn is_subset(&self, other: &RowMask) -> bool {
        self.check_len(other);
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & !b == 0)
    }

    /// Ids of the selected rows, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(wi * WORD_BITS + bit)
            })
        })
    }

    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    fn zip_with(&self, other: &RowMask, f: impl Fn(u64, u64) -> u64) -> RowMask {
        self.check_len(other);
        let mut mask = RowMask {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| f(*a, *b))
                .collect(),
            len: self.len,
        };
        mask.clear_tail();
        mask
    }

    fn check_len(&self, other: &RowMask) {
        assert_eq!(
            self.len, other.len,
            "row mask length mismatch: {} vs {}",
            self.len, other.len
        );
    }

    fn clear_tail(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

impl FromIterator<bool> for RowMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in iter {
            if len % WORD_BITS == 0 {
                words.push(0);
            }
            if bit {
                if let Some(last) = words.last_mut() {
                    *last |= 1 << (len % WORD_BITS);
                }
            }
            len += 1;
        }
        Self { words, len }
    }
}

impl std::fmt::Debug for RowMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowMask")
            .field("len", &self.len)
            .field("selected", &self.iter_ones().collect::<Vec<_>>())
            .finish()
    }
}
