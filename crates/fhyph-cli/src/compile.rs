#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use fhyph::Hyphenator;

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct CompileArgs {
    /// TeX-style pattern file to compile.
    #[arg(long, value_name = "FILE")]
    pub patterns: PathBuf,

    /// Where to write the compiled dictionary.
    #[arg(long, short = 'o', value_name = "BLOB")]
    pub output: PathBuf,
}

pub fn run_compile(args: CompileArgs, mut out: impl Write) -> Result<()> {
    let engine = Hyphenator::from_path(&args.patterns)?;
    let bytes = engine.to_bytes()?;
    std::fs::write(&args.output, &bytes)?;

    let stats = engine.stats();
    tracing::info!(
        message = "compile.written",
        path = %args.output.display(),
        bytes = bytes.len(),
    );
    writeln!(
        out,
        "compiled {} patterns, {} exceptions into {} ({} bytes)",
        stats.patterns,
        stats.exceptions,
        args.output.display(),
        bytes.len()
    )?;
    Ok(())
}
