#![forbid(unsafe_code)]

//! Build phase: accumulate declarations, then [`freeze`](HyphenatorBuilder::freeze)
//! into an immutable [`Hyphenator`].

use crate::classes::CharClasses;
use crate::declaration::Declaration;
use crate::engine::Hyphenator;
use crate::error::Result;
use crate::exceptions::ExceptionDictionary;
use crate::patterns::PatternStoreBuilder;

/// Collects classes, patterns and exceptions in any order.
///
/// Redeclaring a key replaces the earlier value. A rejected declaration
/// leaves the builder unchanged.
#[derive(Debug, Default)]
pub struct HyphenatorBuilder {
    classes: CharClasses,
    patterns: PatternStoreBuilder,
    exceptions: ExceptionDictionary,
}

impl HyphenatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class of equivalent letters; the first char represents it.
    pub fn add_class(&mut self, group: &str) -> Result<()> {
        self.classes.add_class(group)
    }

    /// Declare a pattern with `pattern.chars().count() + 1` value digits.
    pub fn add_pattern(&mut self, pattern: &str, values: &str) -> Result<()> {
        self.patterns.insert(pattern, values)
    }

    /// Declare the letter runs between the permitted breaks of `word`.
    pub fn add_exception(&mut self, word: &str, segments: &[u32]) -> Result<()> {
        self.exceptions.insert(word, segments)
    }

    pub fn apply(&mut self, declaration: Declaration) -> Result<()> {
        match declaration {
            Declaration::Class(group) => self.add_class(&group),
            Declaration::Pattern { pattern, values } => self.add_pattern(&pattern, &values),
            Declaration::Exception { word, segments } => self.add_exception(&word, &segments),
        }
    }

    /// Apply declarations in order, stopping at the first rejected one.
    pub fn extend<I>(&mut self, declarations: I) -> Result<()>
    where
        I: IntoIterator<Item = Declaration>,
    {
        declarations
            .into_iter()
            .try_for_each(|declaration| self.apply(declaration))
    }

    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Compact everything and hand out the read-only engine.
    #[must_use]
    pub fn freeze(self) -> Hyphenator {
        let Self {
            mut classes,
            patterns,
            mut exceptions,
        } = self;
        let distinct_values = patterns.distinct_values();

        classes.trim_to_size();
        exceptions.trim_to_size();
        let patterns = patterns.freeze();

        tracing::debug!(
            message = "hyphenator.freeze",
            patterns = patterns.len(),
            distinct_values,
            nodes = patterns.node_count(),
            value_bytes = patterns.value_bytes(),
            classes = classes.len(),
            exceptions = exceptions.len(),
        );
        Hyphenator::from_parts(classes, patterns, exceptions)
    }
}
