// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Questions document (YAML, or TOML with a .toml extension)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print curiosity footers on the cards
    #[arg(short = 'c', long, alias = "include_curiosity")]
    pub include_curiosity: bool,

    /// Keep the authored option order
    #[arg(long, conflicts_with = "seed")]
    pub no_shuffle: bool,

    /// Seed for a reproducible option order
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Directory for the generated PDF (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write the generated LaTeX source to this path
    #[arg(long, value_name = "PATH")]
    pub tex: Option<PathBuf>,

    /// Print the LaTeX document instead of compiling it
    #[arg(long, conflicts_with = "json")]
    pub dry_run: bool,

    /// Print the cards as JSON instead of compiling them
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments of the card backs generator.
#[derive(Parser, Debug)]
#[command(name = "quizdeck-backs", author, version, about = "Print a sheet of card backs from an image", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct BacksArgs {
    /// Image printed on every card back
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Directory for the generated PDF (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
