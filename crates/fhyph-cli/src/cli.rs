#![forbid(unsafe_code)]

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};

use crate::compile::{CompileArgs, run_compile};
use crate::error::Result;
use crate::hyphenate::{HyphenateArgs, run_hyphenate};
use crate::logging::{self, LogLevel};
use crate::lookup::{LookupArgs, run_lookup};
use crate::stats::{StatsArgs, run_stats};

#[derive(Debug, Parser)]
#[command(
    name = "fhyph",
    about = "Liang hyphenation from TeX pattern files",
    version
)]
pub struct Cli {
    /// Log verbosity on stderr; FHYPH_LOG overrides it.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print words with their break points marked.
    Hyphenate(HyphenateArgs),

    /// Compile a pattern file into a dictionary blob.
    Compile(CompileArgs),

    /// Print dictionary sizes.
    Stats(StatsArgs),

    /// Show the values stored for one pattern.
    Lookup(LookupArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_json)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with(cli, stdin.lock(), stdout.lock())
}

/// Dispatch with explicit streams.
pub fn run_with(cli: Cli, input: impl BufRead, out: impl Write) -> Result<()> {
    match cli.command {
        Commands::Hyphenate(args) => run_hyphenate(args, input, out),
        Commands::Compile(args) => run_compile(args, out),
        Commands::Stats(args) => run_stats(args, out),
        Commands::Lookup(args) => run_lookup(args, out),
    }
}
