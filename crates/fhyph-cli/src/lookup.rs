#![forbid(unsafe_code)]

use std::io::Write;

use clap::Args;
use fhyph::Declaration;

use crate::engine::EngineArgs;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Pattern letters, e.g. `hyph` or `.ex`; TeX digits are ignored.
    pub pattern: String,
}

/// Strip TeX digits so `hy3ph` looks up `hyph`.
fn letters_of(pattern: &str) -> Option<String> {
    match Declaration::tex_pattern(pattern)? {
        Declaration::Pattern { pattern, .. } => Some(pattern),
        _ => None,
    }
}

/// Interleave nonzero digits with the letters: `hyph` + `00300` → `hy3ph`.
fn tex_notation(pattern: &str, digits: &[u8]) -> String {
    let mut out = String::with_capacity(pattern.len() + digits.len());
    let mut digits = digits.iter();
    let digit = |d: Option<&u8>| d.copied().filter(|&d| d > 0).map(|d| char::from(b'0' + d));
    for c in pattern.chars() {
        out.extend(digit(digits.next()));
        out.push(c);
    }
    out.extend(digit(digits.next()));
    out
}

pub fn run_lookup(args: LookupArgs, mut out: impl Write) -> Result<()> {
    let pattern = letters_of(&args.pattern)
        .ok_or_else(|| CliError::invalid(format!("not a pattern: {:?}", args.pattern)))?;
    let engine = args.engine.load()?;
    let digits = engine
        .find_pattern(&pattern)
        .ok_or_else(|| CliError::PatternNotFound {
            pattern: pattern.clone(),
        })?;
    let values: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    writeln!(out, "{}\t{values}", tex_notation(&pattern, &digits))?;
    Ok(())
}
