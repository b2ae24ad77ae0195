#![forbid(unsafe_code)]

use std::io::Write;

use clap::Args;
use fhyph::EngineStats;

use crate::engine::EngineArgs;
use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[arg(long)]
    pub json: bool,
}

fn render_text(stats: &EngineStats) -> String {
    format!(
        "patterns       {}\npattern nodes  {}\nvalue bytes    {}\nclasses        {}\nexceptions     {}\n",
        stats.patterns, stats.pattern_nodes, stats.value_bytes, stats.classes, stats.exceptions
    )
}

pub fn run_stats(args: StatsArgs, mut out: impl Write) -> Result<()> {
    let stats = args.engine.load()?.stats();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &stats)?;
        writeln!(out)?;
    } else {
        out.write_all(render_text(&stats).as_bytes())?;
    }
    Ok(())
}
