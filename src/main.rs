// src/main.rs
use anyhow::Result;
use clap::Parser;
use quizdeck::cli::args::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    quizdeck::init_logging(args.verbose)?;

    quizdeck::run(args)
}
