// src/bin/backs.rs
use anyhow::Result;
use clap::Parser;
use quizdeck::cli::args::BacksArgs;

fn main() -> Result<()> {
    let args = BacksArgs::parse();

    quizdeck::init_logging(args.verbose)?;

    quizdeck::run_backs(args)
}
