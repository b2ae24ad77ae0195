#![forbid(unsafe_code)]

//! Storage primitives for frankenhyph: a compact ternary search tree and
//! the nibble-packed value space that pattern digits live in.
//!
//! Both are arena structures addressed by plain `u32` ids and offsets, so
//! a frozen tree is a handful of flat vectors that can be shared across
//! threads and serialized as-is.

pub mod packed;
pub mod ternary;

pub use packed::{Digits, MAX_DIGIT, PackedValues};
pub use ternary::{PrefixMatch, PrefixMatches, TernaryTree};
