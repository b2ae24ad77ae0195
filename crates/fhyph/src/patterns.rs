#![forbid(unsafe_code)]

//! Pattern store: pattern string → packed interletter values.
//!
//! Real pattern sets reuse a small number of value strings thousands of
//! times (`"0100"`, `"00200"`, …), so while building, a memo table maps
//! each distinct value string to the offset it was first packed at. The
//! memo is dropped by [`PatternStoreBuilder::freeze`].

use fhyph_tree::{PackedValues, TernaryTree};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{LoadError, Result};

type DigitBuf = SmallVec<[u8; 16]>;

/// Mutable pattern store used while declarations are arriving.
#[derive(Debug, Default)]
pub struct PatternStoreBuilder {
    tree: TernaryTree,
    values: PackedValues,
    memo: FxHashMap<Box<[u8]>, u32>,
}

impl PatternStoreBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `pattern` with one digit per letter gap.
    ///
    /// `values` must hold exactly `pattern.chars().count() + 1` ASCII
    /// digits. A repeated pattern replaces the earlier values.
    pub fn insert(&mut self, pattern: &str, values: &str) -> Result<()> {
        let digits = parse_values(pattern, values)?;
        let offset = match self.memo.get(digits.as_slice()) {
            Some(&offset) => offset,
            None => {
                let offset = self.values.pack(&digits);
                self.memo.insert(digits.to_vec().into_boxed_slice(), offset);
                offset
            }
        };
        self.tree.insert(pattern, offset);
        Ok(())
    }

    /// Number of distinct patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of distinct value strings packed so far.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.memo.len()
    }

    /// Compact into the read-only store.
    #[must_use]
    pub fn freeze(self) -> PatternStore {
        let Self {
            mut tree,
            mut values,
            memo: _,
        } = self;
        tree.trim_to_size();
        values.trim_to_size();
        PatternStore { tree, values }
    }
}

fn parse_values(pattern: &str, values: &str) -> Result<DigitBuf> {
    if pattern.is_empty() {
        return Err(LoadError::EmptyPattern);
    }
    if pattern.contains('\0') {
        return Err(LoadError::ReservedChar {
            key: pattern.to_string(),
        });
    }
    let expected = pattern.chars().count() + 1;
    let found = values.chars().count();
    if found != expected {
        return Err(LoadError::PatternLength {
            pattern: pattern.to_string(),
            expected,
            found,
        });
    }
    values
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => Ok(d as u8),
            None => Err(LoadError::InvalidDigit {
                pattern: pattern.to_string(),
                digit: c,
            }),
        })
        .collect()
}

/// Frozen pattern store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternStore {
    tree: TernaryTree,
    values: PackedValues,
}

impl PatternStore {
    /// Max-fold the values of every pattern matching at `word[start..]`
    /// into `levels`, where `levels[start + j]` receives digit `j`.
    #[inline]
    pub fn apply_at(&self, word: &[char], start: usize, levels: &mut [u8]) {
        for m in self.tree.prefix_matches(word, start) {
            for (j, digit) in self.values.digits(m.value).enumerate() {
                if let Some(level) = levels.get_mut(start + j) {
                    *level = (*level).max(digit);
                }
            }
        }
    }

    /// Values stored for exactly `pattern`.
    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<Vec<u8>> {
        self.tree.find(pattern).map(|offset| self.values.unpack(offset))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    #[must_use]
    pub fn value_bytes(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn validate(&self) -> bool {
        self.tree.validate() && self.values.validate()
    }
}
