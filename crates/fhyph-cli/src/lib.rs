#![forbid(unsafe_code)]

//! `fhyph` command-line tool.

pub mod cli;
pub mod compile;
pub mod engine;
pub mod error;
pub mod hyphenate;
pub mod logging;
pub mod lookup;
pub mod stats;

pub use cli::{Cli, Commands, run, run_from_env, run_with};
pub use error::{CliError, Result};
