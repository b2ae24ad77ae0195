#![forbid(unsafe_code)]

//! Liang hyphenation over a compact ternary search tree.
//!
//! An engine is built once from declarations (character classes, patterns
//! with interletter values, exception words), frozen, and then queried for
//! the points where a word may be broken with a hyphen.
//!
//! # Example
//!
//! ```
//! use fhyph::Hyphenator;
//!
//! let engine = Hyphenator::from_source(
//!     r"\patterns{ hy3ph he2n hena4 hen5at 1na n2at 1tio 2io o2n }",
//! )?;
//! let h = engine.hyphenate("hyphenation", 2, 3).expect("has breaks");
//! assert_eq!(h.points(), &[2, 6]);
//! assert_eq!(h.to_string(), "hy-phen-ation");
//! # Ok::<(), fhyph::LoadError>(())
//! ```
//!
//! # Building by hand
//!
//! ```
//! use fhyph::Hyphenator;
//!
//! let mut builder = Hyphenator::builder();
//! builder.add_class("aA")?;
//! builder.add_class("bB")?;
//! builder.add_pattern("ab", "010")?;
//! builder.add_exception("abba", &[2, 2])?;
//! let engine = builder.freeze();
//!
//! assert_eq!(engine.hyphenate("ABAB", 1, 1).unwrap().points(), &[1, 3]);
//! assert_eq!(engine.hyphenate("abba", 1, 1).unwrap().points(), &[2]);
//! # Ok::<(), fhyph::LoadError>(())
//! ```

pub mod builder;
pub mod classes;
pub mod declaration;
pub mod engine;
pub mod error;
pub mod exceptions;
pub mod patterns;
#[cfg(feature = "persistence")]
pub mod persist;
pub mod source;

pub use builder::HyphenatorBuilder;
pub use classes::CharClasses;
pub use declaration::Declaration;
pub use engine::{
    EngineStats, Hyphenation, HyphenationLimits, Hyphenator, LEFT_HYPHEN_MIN, RIGHT_HYPHEN_MIN,
    WORD_MARKER,
};
pub use error::{LoadError, Result};
pub use exceptions::ExceptionDictionary;
pub use patterns::{PatternStore, PatternStoreBuilder};
pub use source::{parse_declarations, read_declarations};

/// Source text of the bundled English sample.
pub const ENGLISH_MINI_SOURCE: &str = include_str!("../data/hyph-en-mini.tex");

/// Engine for the bundled English sample: a small slice of the TeX
/// English patterns plus a handful of exception words.
pub fn english_mini() -> Result<Hyphenator> {
    Hyphenator::from_source(ENGLISH_MINI_SOURCE)
}
