#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Args;
use fhyph::Hyphenator;

use crate::error::{CliError, Result};

/// Where the dictionary comes from: exactly one of a pattern file or a
/// compiled blob.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct EngineArgs {
    /// TeX-style pattern file.
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Dictionary written by `fhyph compile`.
    #[arg(long, value_name = "BLOB")]
    pub compiled: Option<PathBuf>,
}

impl EngineArgs {
    pub fn load(&self) -> Result<Hyphenator> {
        let engine = match (&self.patterns, &self.compiled) {
            (Some(path), _) => Hyphenator::from_path(path)?,
            (None, Some(path)) => Hyphenator::load(path)?,
            (None, None) => {
                return Err(CliError::invalid(
                    "one of --patterns or --compiled is required",
                ));
            }
        };
        let stats = engine.stats();
        tracing::info!(
            message = "engine.ready",
            patterns = stats.patterns,
            classes = stats.classes,
            exceptions = stats.exceptions,
        );
        Ok(engine)
    }
}
