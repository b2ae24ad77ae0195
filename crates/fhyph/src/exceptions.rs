#![forbid(unsafe_code)]

//! Exception dictionary: words whose breaks are listed rather than derived.
//!
//! An entry stores the lengths of the letter runs between permitted breaks,
//! so `as-so-ciate` is `associate → [2, 2, 5]`.

use rustc_hash::FxHashMap;

use crate::error::{LoadError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ExceptionDictionary {
    entries: FxHashMap<String, Box<[u32]>>,
}

impl ExceptionDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the segments for `word`.
    pub fn insert(&mut self, word: &str, segments: &[u32]) -> Result<()> {
        if word.contains('\0') {
            return Err(LoadError::ReservedChar {
                key: word.to_string(),
            });
        }
        self.entries.insert(word.to_string(), segments.into());
        Ok(())
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<&[u32]> {
        self.entries.get(word).map(|segments| &**segments)
    }

    /// Break offsets of `word`: running sums of its segment lengths.
    #[must_use]
    pub fn breaks(&self, word: &str) -> Option<impl Iterator<Item = usize> + '_> {
        let segments = self.get(word)?;
        Some(segments.iter().scan(0usize, |sum, &len| {
            *sum += len as usize;
            Some(*sum)
        }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn trim_to_size(&mut self) {
        self.entries.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_are_running_sums() {
        let mut dict = ExceptionDictionary::new();
        dict.insert("associate", &[2, 2, 5]).unwrap();
        let breaks: Vec<usize> = dict.breaks("associate").unwrap().collect();
        assert_eq!(breaks, vec![2, 4, 9]);
    }

    #[test]
    fn unknown_word_has_no_entry() {
        let dict = ExceptionDictionary::new();
        assert!(dict.breaks("table").is_none());
    }

    #[test]
    fn reinsert_replaces() {
        let mut dict = ExceptionDictionary::new();
        dict.insert("present", &[3, 4]).unwrap();
        dict.insert("present", &[7]).unwrap();
        assert_eq!(dict.get("present"), Some(&[7][..]));
        assert_eq!(dict.len(), 1);
    }
}
