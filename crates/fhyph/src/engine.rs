#![forbid(unsafe_code)]

//! Query phase: Liang's algorithm over the frozen stores.
//!
//! # Algorithm
//!
//! ```text
//! word → fold through classes → letter run (strip leading non-letters,
//!        stop at the first non-letter after a letter)
//!      → exception hit?  yes: running sums of segment lengths
//!                        no:  ".run." → every pattern matching at every
//!                             start → max per gap → odd gap = break
//!      → keep breaks in [remain, len - push], shift by stripped prefix
//! ```
//!
//! A [`Hyphenator`] never changes after [`freeze`](crate::HyphenatorBuilder::freeze);
//! queries only allocate call-local scratch, so one engine can serve any
//! number of threads.

use std::fmt;

use smallvec::{SmallVec, smallvec};

use crate::builder::HyphenatorBuilder;
use crate::classes::CharClasses;
use crate::exceptions::ExceptionDictionary;
use crate::patterns::PatternStore;

/// Boundary marker placed before and after the letter run.
pub const WORD_MARKER: char = '.';

/// Minimum letters before the first break.
pub const LEFT_HYPHEN_MIN: usize = 2;
/// Minimum letters after the last break.
pub const RIGHT_HYPHEN_MIN: usize = 3;

/// How many letters must stay on each side of a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyphenationLimits {
    /// Letters that must remain before the first break.
    pub remain: usize,
    /// Letters that must be pushed past the last break.
    pub push: usize,
}

impl HyphenationLimits {
    #[must_use]
    pub const fn new(remain: usize, push: usize) -> Self {
        Self { remain, push }
    }
}

impl Default for HyphenationLimits {
    fn default() -> Self {
        Self::new(LEFT_HYPHEN_MIN, RIGHT_HYPHEN_MIN)
    }
}

/// Break points found in one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyphenation<'w> {
    word: &'w str,
    points: SmallVec<[usize; 8]>,
}

impl<'w> Hyphenation<'w> {
    /// The word as passed to the query, including any stripped characters.
    #[must_use]
    pub fn word(&self) -> &'w str {
        self.word
    }

    /// Char offsets into [`word`](Self::word) where a break is allowed,
    /// strictly ascending.
    #[must_use]
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    /// The word cut at every break point.
    #[must_use]
    pub fn segments(&self) -> Vec<&'w str> {
        let mut out = Vec::with_capacity(self.points.len() + 1);
        let mut points = self.points.iter().copied().peekable();
        let mut last = 0;
        for (index, (byte, _)) in self.word.char_indices().enumerate() {
            if points.peek() == Some(&index) {
                out.push(&self.word[last..byte]);
                last = byte;
                points.next();
            }
        }
        out.push(&self.word[last..]);
        out
    }

    /// The word with `hyphen` inserted at every break point.
    #[must_use]
    pub fn to_hyphenated(&self, hyphen: &str) -> String {
        self.segments().join(hyphen)
    }
}

impl fmt::Display for Hyphenation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().into_iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Sizes of a frozen engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize))]
pub struct EngineStats {
    pub patterns: usize,
    pub pattern_nodes: usize,
    pub value_bytes: usize,
    pub classes: usize,
    pub exceptions: usize,
}

/// Frozen hyphenation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyphenator {
    classes: CharClasses,
    patterns: PatternStore,
    exceptions: ExceptionDictionary,
}

impl Hyphenator {
    #[must_use]
    pub fn builder() -> HyphenatorBuilder {
        HyphenatorBuilder::new()
    }

    pub(crate) fn from_parts(
        classes: CharClasses,
        patterns: PatternStore,
        exceptions: ExceptionDictionary,
    ) -> Self {
        Self {
            classes,
            patterns,
            exceptions,
        }
    }

    /// Find the break points of `word`.
    ///
    /// `remain` and `push` are the letters that must stay before the first
    /// and after the last break; values below 1 count as 1. Returns `None`
    /// when the letter run is too short or no break qualifies.
    #[must_use]
    pub fn hyphenate<'w>(
        &self,
        word: &'w str,
        remain: usize,
        push: usize,
    ) -> Option<Hyphenation<'w>> {
        let remain = remain.max(1);
        let push = push.max(1);

        // letters[0] is the leading marker; the run itself starts at 1.
        let mut letters: SmallVec<[char; 32]> = smallvec![WORD_MARKER];
        let mut skipped = 0usize;
        for c in word.chars() {
            match self.classes.normalize(c) {
                Some(folded) => letters.push(folded),
                None if letters.len() == 1 => skipped += 1,
                None => break,
            }
        }

        let len = letters.len() - 1;
        if len < remain.saturating_add(push) {
            return None;
        }
        let last = len - push;

        let mut points: SmallVec<[usize; 8]> = SmallVec::new();
        let exception = if self.exceptions.is_empty() {
            None
        } else {
            let run: String = letters[1..].iter().collect();
            self.exceptions.breaks(&run).map(|breaks| {
                for k in breaks.filter(|k| (remain..=last).contains(k)) {
                    if points.last().is_none_or(|&p| p < k + skipped) {
                        points.push(k + skipped);
                    }
                }
            })
        };

        if exception.is_some() {
            tracing::trace!(message = "hyphenate.exception", word, points = points.len());
        } else {
            letters.push(WORD_MARKER);
            let mut levels: SmallVec<[u8; 64]> = smallvec![0; len + 3];
            for start in 0..=len {
                self.patterns.apply_at(&letters, start, &mut levels);
            }
            // levels[k + 1] is the gap before letter k of the run.
            points.extend(
                (remain..=last)
                    .filter(|&k| levels[k + 1] & 1 == 1)
                    .map(|k| k + skipped),
            );
        }

        if points.is_empty() {
            return None;
        }
        Some(Hyphenation { word, points })
    }

    /// [`hyphenate`](Self::hyphenate) with limits bundled.
    #[must_use]
    pub fn hyphenate_with<'w>(
        &self,
        word: &'w str,
        limits: HyphenationLimits,
    ) -> Option<Hyphenation<'w>> {
        self.hyphenate(word, limits.remain, limits.push)
    }

    /// Class representative of `c`, or `None` if `c` is not a letter.
    #[must_use]
    pub fn normalize(&self, c: char) -> Option<char> {
        self.classes.normalize(c)
    }

    /// Value digits stored for exactly `pattern`.
    #[must_use]
    pub fn find_pattern(&self, pattern: &str) -> Option<Vec<u8>> {
        self.patterns.get(pattern)
    }

    /// Segment lengths stored for an exception word.
    #[must_use]
    pub fn exception(&self, word: &str) -> Option<&[u32]> {
        self.exceptions.get(word)
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            patterns: self.patterns.len(),
            pattern_nodes: self.patterns.node_count(),
            value_bytes: self.patterns.value_bytes(),
            classes: self.classes.len(),
            exceptions: self.exceptions.len(),
        }
    }

    #[cfg_attr(not(feature = "persistence"), allow(dead_code))]
    pub(crate) fn validate(&self) -> bool {
        self.classes.validate() && self.patterns.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Classes `aA` … `zZ`.
    fn latin(builder: &mut HyphenatorBuilder) {
        for c in 'a'..='z' {
            let group: String = [c, c.to_ascii_uppercase()].iter().collect();
            builder.add_class(&group).unwrap();
        }
    }

    fn engine(patterns: &[(&str, &str)], exceptions: &[(&str, &[u32])]) -> Hyphenator {
        let mut builder = Hyphenator::builder();
        latin(&mut builder);
        for &(p, v) in patterns {
            builder.add_pattern(p, v).unwrap();
        }
        for &(w, s) in exceptions {
            builder.add_exception(w, s).unwrap();
        }
        builder.freeze()
    }

    /// The textbook "hyphenation" pattern set.
    fn hyphenation_patterns() -> Hyphenator {
        engine(
            &[
                ("hyph", "00300"),
                ("hen", "0020"),
                ("hena", "00004"),
                ("henat", "000500"),
                ("na", "100"),
                ("nat", "0200"),
                ("tio", "1000"),
                ("io", "200"),
                ("on", "020"),
            ],
            &[],
        )
    }

    fn points(h: Option<Hyphenation<'_>>) -> Vec<usize> {
        h.map(|h| h.points().to_vec()).unwrap_or_default()
    }

    // -- Pattern path --

    #[test]
    fn hyphenation_splits_as_hy_phen_ation() {
        let engine = hyphenation_patterns();
        let h = engine.hyphenate("hyphenation", 2, 3).unwrap();
        assert_eq!(h.points(), &[2, 6]);
        assert_eq!(h.to_string(), "hy-phen-ation");
    }

    #[test]
    fn uppercase_folds_through_classes() {
        let engine = hyphenation_patterns();
        assert_eq!(points(engine.hyphenate("HYPHENATION", 2, 3)), vec![2, 6]);
        let h = engine.hyphenate("Hyphenation", 2, 3).unwrap();
        assert_eq!(h.to_hyphenated("\u{ad}"), "Hy\u{ad}phen\u{ad}ation");
    }

    #[test]
    fn margins_filter_points() {
        let engine = engine(&[("abcdefgh", "011111110")], &[]);
        assert_eq!(points(engine.hyphenate("abcdefgh", 1, 1)), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(points(engine.hyphenate("abcdefgh", 3, 4)), vec![3, 4]);
    }

    #[test]
    fn even_levels_never_break() {
        let engine = engine(&[("abcdef", "0222220")], &[]);
        assert_eq!(engine.hyphenate("abcdef", 1, 1), None);
    }

    #[test]
    fn later_lower_match_does_not_lower_earlier_value() {
        // "ab" sets the a|b gap to 3, then "bc" (matched later) offers 2.
        let engine = engine(&[("ab", "030"), ("bc", "200")], &[]);
        assert_eq!(points(engine.hyphenate("abcd", 1, 1)), vec![1]);
    }

    #[test]
    fn later_higher_match_raises_value() {
        let engine = engine(&[("ab", "020"), ("bc", "300")], &[]);
        assert_eq!(points(engine.hyphenate("abcd", 1, 1)), vec![1]);
    }

    #[test]
    fn word_markers_anchor_patterns() {
        let engine = engine(&[(".ab", "0010"), ("d.", "100")], &[]);
        // ".ab" only at the start, "d." only at the end.
        assert_eq!(points(engine.hyphenate("abcd", 1, 1)), vec![1, 3]);
        assert_eq!(engine.hyphenate("cabd", 1, 1).map(|h| h.points().to_vec()), Some(vec![3]));
    }

    // -- Exceptions --

    #[test]
    fn exception_overrides_patterns() {
        let engine = engine(&[("a", "11"), ("b", "11")], &[("abababab", &[4, 4])]);
        assert_eq!(points(engine.hyphenate("abababab", 1, 1)), vec![4]);
        assert_eq!(points(engine.hyphenate("babababa", 1, 1)), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn exception_is_matched_after_folding() {
        let engine = engine(&[], &[("table", &[2, 3])]);
        assert_eq!(points(engine.hyphenate("TABLE", 2, 3)), vec![2]);
    }

    #[test]
    fn exception_without_qualifying_break_is_none() {
        let engine = engine(&[("e", "11")], &[("present", &[7])]);
        assert_eq!(engine.hyphenate("present", 2, 3), None);
    }

    #[test]
    fn exception_zero_segments_do_not_duplicate() {
        let engine = engine(&[], &[("abcdef", &[2, 0, 2, 2])]);
        assert_eq!(points(engine.hyphenate("abcdef", 1, 1)), vec![2, 4]);
    }

    // -- Normalization edges --

    #[test]
    fn too_short_is_none() {
        let engine = engine(&[("a", "11"), ("b", "11")], &[]);
        assert_eq!(engine.hyphenate("ab", 2, 2), None);
        assert_eq!(engine.hyphenate("", 1, 1), None);
    }

    #[test]
    fn zero_limits_count_as_one() {
        let engine = engine(&[("ab", "111")], &[]);
        assert_eq!(points(engine.hyphenate("ab", 0, 0)), vec![1]);
    }

    #[test]
    fn huge_limits_are_none() {
        let engine = hyphenation_patterns();
        assert_eq!(engine.hyphenate("hyphenation", usize::MAX, 3), None);
        assert_eq!(engine.hyphenate("hyphenation", 2, usize::MAX), None);
        assert_eq!(engine.hyphenate("hyphenation", usize::MAX, usize::MAX), None);
    }

    #[test]
    fn long_word_spills_scratch() {
        let engine = engine(&[("ab", "010")], &[]);
        let word = "ab".repeat(50);
        let h = engine.hyphenate(&word, 1, 1).unwrap();
        assert_eq!(h.points().len(), 50);
        assert!(h.points().iter().all(|&p| p % 2 == 1));
    }

    #[test]
    fn leading_non_letters_shift_points() {
        let engine = hyphenation_patterns();
        let h = engine.hyphenate("«hyphenation»", 2, 3).unwrap();
        assert_eq!(h.points(), &[3, 7]);
        assert_eq!(h.word(), "«hyphenation»");
        assert_eq!(h.segments(), vec!["«hy", "phen", "ation»"]);
    }

    #[test]
    fn interior_non_letter_ends_the_run() {
        let engine = engine(&[("a", "11"), ("b", "11"), ("c", "11")], &[]);
        let h = engine.hyphenate("abab'cccccc", 1, 1).unwrap();
        assert_eq!(h.points(), &[1, 2, 3]);
        assert!(h.points().iter().all(|&p| p < 4));
    }

    #[test]
    fn undeclared_letters_are_not_letters() {
        let mut builder = Hyphenator::builder();
        builder.add_class("aA").unwrap();
        builder.add_pattern("a", "11").unwrap();
        let engine = builder.freeze();
        assert_eq!(engine.hyphenate("bbb", 1, 1), None);
        assert_eq!(points(engine.hyphenate("xaaax", 1, 1)), vec![2, 3]);
    }

    #[test]
    fn word_marker_cannot_become_a_letter() {
        let mut builder = Hyphenator::builder();
        assert!(builder.add_class(".").is_err());
        builder.add_class("aA").unwrap();
        builder.add_class("bB").unwrap();
        builder.add_pattern(".a", "001").unwrap();
        let engine = builder.freeze();
        // '.' ends the run, so ".a" never matches mid-word.
        assert_eq!(engine.hyphenate("bb.abb", 1, 1), None);
        assert_eq!(points(engine.hyphenate("abb", 1, 1)), vec![1]);
    }

    #[test]
    fn segments_respect_multibyte_chars() {
        let h = Hyphenation {
            word: "naïve",
            points: smallvec![2],
        };
        assert_eq!(h.segments(), vec!["na", "ïve"]);
        assert_eq!(h.to_string(), "na-ïve");
    }

    #[test]
    fn default_limits_match_tex() {
        assert_eq!(HyphenationLimits::default(), HyphenationLimits::new(2, 3));
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Hyphenator>();
    }
}
