// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use application::{BuildStep, DeckBuilder, QuestionLoader, ShuffleMode};
use infrastructure::{Config, PdfLatexCompiler};
use ports::{LatexPresenter, RenderOptions};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;
use crate::cli::args::{Args, BacksArgs};

/// Install the global subscriber; `-v` raises quizdeck's own level.
pub fn init_logging(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("quizdeck={}", filter).parse()?),
        )
        .init();
    Ok(())
}

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting quizdeck with arguments");

    let mut config = Config::locate(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    debug!(?config, "Effective configuration");

    let shuffle = match (config.render.shuffle, config.render.seed) {
        (false, _) => ShuffleMode::Off,
        (true, Some(seed)) => ShuffleMode::Seeded(seed),
        (true, None) => ShuffleMode::Random,
    };
    let builder = deck_builder(&config).with_shuffle(shuffle);
    let output_dir = config.output.dir.clone().unwrap_or_else(|| PathBuf::from("."));

    info!(file = %args.file.display(), "Building deck");
    let report = builder.build_with(&args.file, &output_dir, |cards, document| -> Result<BuildStep> {
        if args.json {
            println!("{}", serde_json::to_string_pretty(cards)?);
            return Ok(BuildStep::Stop);
        }

        if let Some(tex_path) = &args.tex {
            std::fs::write(tex_path, document)
                .with_context(|| format!("Failed to write LaTeX source to {}", tex_path.display()))?;
            info!(path = %tex_path.display(), "Wrote LaTeX source");
        }

        if args.dry_run {
            print!("{document}");
            return Ok(BuildStep::Stop);
        }

        prepare_output_dir(&output_dir)?;
        Ok(BuildStep::Compile)
    })?;

    if let Some(report) = report {
        println!("{}", report.output_path.display());
    }
    Ok(())
}

pub fn run_backs(args: BacksArgs) -> Result<()> {
    debug!(?args, "Starting quizdeck-backs with arguments");

    let mut config = Config::locate(args.config.as_deref())?;
    if let Some(dir) = &args.output_dir {
        config.output.dir = Some(dir.clone());
    }

    let builder = deck_builder(&config);
    let output_dir = config.output.dir.unwrap_or_else(|| PathBuf::from("."));
    prepare_output_dir(&output_dir)?;
    let output_path = builder.build_backs(&args.image, &output_dir)?;

    println!("{}", output_path.display());
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if args.include_curiosity {
        config.render.include_curiosity = true;
    }
    if args.no_shuffle {
        config.render.shuffle = false;
    }
    if let Some(seed) = args.seed {
        config.render.shuffle = true;
        config.render.seed = Some(seed);
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = Some(dir.clone());
    }
}

fn deck_builder(config: &Config) -> DeckBuilder<PdfLatexCompiler> {
    let loader = QuestionLoader::new()
        .with_labels(&config.labels.true_label, &config.labels.false_label);
    let presenter = LatexPresenter::new(RenderOptions {
        include_curiosity: config.render.include_curiosity,
        cards_per_row: config.render.cards_per_row,
    });
    let compiler = PdfLatexCompiler::new(&config.compiler.program)
        .with_args(config.compiler.args.clone())
        .with_timeout(config.compiler.timeout());

    DeckBuilder::new(loader, presenter, compiler)
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}
