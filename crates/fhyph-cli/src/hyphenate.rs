#![forbid(unsafe_code)]

use std::io::{BufRead, Write};

use clap::Args;
use fhyph::{HyphenationLimits, Hyphenator, LEFT_HYPHEN_MIN, RIGHT_HYPHEN_MIN};
use serde::Serialize;

use crate::engine::EngineArgs;
use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct HyphenateArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Letters that must stay before the first break.
    #[arg(long, default_value_t = LEFT_HYPHEN_MIN)]
    pub remain: usize,

    /// Letters that must follow the last break.
    #[arg(long, default_value_t = RIGHT_HYPHEN_MIN)]
    pub push: usize,

    /// Text inserted at each break.
    #[arg(long, default_value = "-")]
    pub hyphen: String,

    /// One JSON object per word instead of plain text.
    #[arg(long)]
    pub json: bool,

    /// Words to hyphenate; read one per line from stdin when empty.
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HyphenatedWord<'a> {
    pub word: &'a str,
    pub points: Vec<usize>,
    pub hyphenated: String,
}

fn hyphenate_one<'a>(
    engine: &Hyphenator,
    word: &'a str,
    limits: HyphenationLimits,
    hyphen: &str,
) -> HyphenatedWord<'a> {
    match engine.hyphenate_with(word, limits) {
        Some(h) => HyphenatedWord {
            word,
            points: h.points().to_vec(),
            hyphenated: h.to_hyphenated(hyphen),
        },
        None => HyphenatedWord {
            word,
            points: Vec::new(),
            hyphenated: word.to_string(),
        },
    }
}

fn emit(out: &mut impl Write, record: &HyphenatedWord<'_>, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", record.hyphenated)?;
    }
    Ok(())
}

pub fn run_hyphenate(args: HyphenateArgs, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let engine = args.engine.load()?;
    let limits = HyphenationLimits::new(args.remain, args.push);

    if args.words.is_empty() {
        for line in input.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            emit(&mut out, &hyphenate_one(&engine, word, limits, &args.hyphen), args.json)?;
        }
    } else {
        for word in &args.words {
            emit(&mut out, &hyphenate_one(&engine, word, limits, &args.hyphen), args.json)?;
        }
    }
    out.flush()?;
    Ok(())
}
