#![forbid(unsafe_code)]

//! Compiled dictionaries: a frozen [`Hyphenator`] as a JSON blob.
//!
//! The blob is an envelope `{ "format": "fhyph", "version": 1, "engine": … }`.
//! Reloading checks the envelope and the tree structure, so a truncated or
//! hand-edited blob fails with [`LoadError::Format`] instead of panicking
//! on a later query.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::Hyphenator;
use crate::error::{LoadError, Result};

const FORMAT: &str = "fhyph";
const VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: &'a str,
    version: u32,
    engine: &'a Hyphenator,
}

#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    engine: Hyphenator,
}

impl Hyphenator {
    /// Serialize the engine.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let envelope = EnvelopeRef {
            format: FORMAT,
            version: VERSION,
            engine: self,
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    /// Reload an engine written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope: Envelope = serde_json::from_slice(bytes)?;
        if envelope.format != FORMAT {
            return Err(LoadError::format(format!(
                "unknown format {:?}",
                envelope.format
            )));
        }
        if envelope.version != VERSION {
            return Err(LoadError::format(format!(
                "unsupported version {} (expected {VERSION})",
                envelope.version
            )));
        }
        if !envelope.engine.validate() {
            return Err(LoadError::format("corrupt tree"));
        }
        Ok(envelope.engine)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("compiled.load", path = %path.display()).entered();
        let bytes = std::fs::read(path)?;
        let engine = Self::from_bytes(&bytes)?;
        tracing::debug!(
            message = "compiled.loaded",
            bytes = bytes.len(),
            patterns = engine.stats().patterns,
        );
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hyphenator {
        Hyphenator::from_source(
            "\\patterns{ hy3ph he2n hena4 hen5at 1na n2at 1tio 2io o2n }\n\\hyphenation{ ta-ble }",
        )
        .unwrap()
    }

    #[test]
    fn reload_answers_identically() {
        let engine = sample();
        let bytes = engine.to_bytes().unwrap();
        let reloaded = Hyphenator::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded, engine);
        for word in ["hyphenation", "Hyphenation", "table", "nation", "x"] {
            assert_eq!(reloaded.hyphenate(word, 2, 3), engine.hyphenate(word, 2, 3));
        }
    }

    #[test]
    fn wrong_format_is_rejected() {
        let bytes = br#"{"format":"other","version":1,"engine":{}}"#;
        assert!(matches!(
            Hyphenator::from_bytes(bytes),
            Err(LoadError::Json(_) | LoadError::Format { .. })
        ));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let engine = sample();
        let mut value: serde_json::Value = serde_json::from_slice(&engine.to_bytes().unwrap()).unwrap();
        value["version"] = serde_json::json!(99);
        let bytes = serde_json::to_vec(&value).unwrap();
        let err = Hyphenator::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, LoadError::Format { .. }), "{err}");
    }

    #[test]
    fn corrupt_tree_is_rejected() {
        let engine = sample();
        let mut value: serde_json::Value = serde_json::from_slice(&engine.to_bytes().unwrap()).unwrap();
        value["engine"]["patterns"]["tree"]["high"][1] = serde_json::json!(100_000);
        let bytes = serde_json::to_vec(&value).unwrap();
        let err = Hyphenator::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, LoadError::Format { .. }), "{err}");
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            Hyphenator::from_bytes(b"not json"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.fhyph");
        let engine = sample();
        engine.save(&path).unwrap();
        assert_eq!(Hyphenator::load(&path).unwrap(), engine);
    }
}
