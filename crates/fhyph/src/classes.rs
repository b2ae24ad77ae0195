#![forbid(unsafe_code)]

//! Character classes: which characters count as letters, and which letter
//! each one folds to.
//!
//! A class is declared as a string whose first char is the representative,
//! e.g. `"aAáÁ"`. Patterns and exceptions are written in representatives,
//! and words are folded through this table before matching. A character in
//! no class is not a letter.

use fhyph_tree::TernaryTree;

use crate::engine::WORD_MARKER;
use crate::error::{LoadError, Result};

/// Letter → class representative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct CharClasses {
    map: TernaryTree,
}

impl CharClasses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every char of `group` to its first char. An empty group is a
    /// no-op; redeclaring a char moves it to the new class. NUL and
    /// [`WORD_MARKER`] cannot be letters.
    pub fn add_class(&mut self, group: &str) -> Result<()> {
        if group.contains(['\0', WORD_MARKER]) {
            return Err(LoadError::ReservedChar {
                key: group.to_string(),
            });
        }
        let Some(representative) = group.chars().next() else {
            return Ok(());
        };
        for c in group.chars() {
            self.map.insert_chars(&[c], representative as u32);
        }
        Ok(())
    }

    /// Representative of `c`, or `None` when `c` is not a letter.
    #[inline]
    #[must_use]
    pub fn normalize(&self, c: char) -> Option<char> {
        self.map.find_chars(&[c]).and_then(char::from_u32)
    }

    /// Number of chars with a class.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn trim_to_size(&mut self) {
        self.map.trim_to_size();
    }

    pub(crate) fn validate(&self) -> bool {
        self.map.validate()
    }
}
