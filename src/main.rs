//! outline-weave: outline/manuscript reconciliation and dataset building.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use outline_weave::batch::{self, BatchSummary, Case, CLAUSE_FILE, SENTENCE_FILE, SNIPPET_FILE};
use outline_weave::config::Config;
use outline_weave::input::read_source;
use outline_weave::samples::HistoryMode;
use outline_weave::segment::{ChatSegmenter, ChatSettings, RetryingSegmenter};
use outline_weave::{reconcile, Result};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

#[derive(Parser)]
#[command(name = "outline-weave")]
#[command(
    about = "Fill a heading outline with the verbatim prose of its manuscript",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./outline-weave.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Heading syntax: atx or commonmark
    #[arg(long, global = true)]
    syntax: Option<String>,

    /// Debug verbosity, repeat for more (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Populate outlines with manuscript content
    Reconcile {
        /// Outline markdown of a single pair
        #[arg(long, requires = "manuscript", conflicts_with = "root")]
        outline: Option<PathBuf>,
        /// Manuscript markdown of a single pair
        #[arg(long, requires = "outline")]
        manuscript: Option<PathBuf>,
        /// Output JSON for a single pair (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Dataset root holding case directories
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Split manuscripts into sentence and clause lists
    Split {
        /// Dataset root holding case directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Segment reconciled contents into semantic snippets
    Snippets {
        /// Dataset root holding case directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Chat model name
        #[arg(long)]
        model: Option<String>,
        /// API key for the chat endpoint
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: String,
        /// Base URL of the chat endpoint
        #[arg(long, env = "OPENAI_BASE_URL")]
        base_url: Option<String>,
    },
    /// Build training samples from split fragments
    Samples {
        /// Dataset root holding case directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Hint ratios, comma separated
        #[arg(long, value_delimiter = ',')]
        ratios: Vec<f64>,
    },
    /// Reconcile, split and build sentence/clause samples in one go
    All {
        /// Dataset root holding case directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let mut cfg = cli
        .config
        .as_deref()
        .map_or_else(Config::load, Config::load_from);
    if let Some(syntax) = cli.syntax {
        cfg.heading_syntax = syntax;
    }

    if let Err(e) = run(cli.command, cfg) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn report(stage: &str, summary: BatchSummary) {
    info!(
        "{stage}: {} cases processed, {} failed",
        summary.processed, summary.failed
    );
    if summary.failed > 0 {
        eprintln!(
            "{stage}: {} of {} cases failed",
            summary.failed,
            summary.processed + summary.failed
        );
    }
}

fn run(command: Command, mut cfg: Config) -> Result<()> {
    match command {
        Command::Reconcile {
            outline: Some(outline),
            manuscript: Some(manuscript),
            output,
            ..
        } => reconcile_pair(&outline, &manuscript, output.as_deref(), &cfg),
        Command::Reconcile { root, .. } => {
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            reconcile_root(&root, &cfg)
        }
        Command::Split { root } => {
            let cases = batch::find_cases(&root, &cfg.case_pattern)?;
            report(
                "split",
                batch::run_cases(&cases, |case| batch::split_case(case, &cfg)),
            );
            Ok(())
        }
        Command::Snippets {
            root,
            model,
            api_key,
            base_url,
        } => {
            let settings = ChatSettings {
                base_url: base_url.unwrap_or_else(|| cfg.base_url.clone()),
                api_key,
                model: model.unwrap_or_else(|| cfg.model.clone()),
            };
            let segmenter = RetryingSegmenter::new(
                ChatSegmenter::new(settings),
                cfg.max_retries,
                cfg.retry_base_delay(),
            );
            let cases = batch::find_cases(&root, &cfg.case_pattern)?;
            report(
                "snippets",
                batch::run_cases(&cases, |case| {
                    batch::snippet_case(case, &cfg, &segmenter).map(|_| ())
                }),
            );
            Ok(())
        }
        Command::Samples { root, ratios } => {
            if !ratios.is_empty() {
                cfg.ratios = ratios;
            }
            let cases = batch::find_cases(&root, &cfg.case_pattern)?;
            build_all_samples(&root, &cases, &cfg)
        }
        Command::All { root } => {
            reconcile_root(&root, &cfg)?;
            let cases = batch::find_cases(&root, &cfg.case_pattern)?;
            report(
                "split",
                batch::run_cases(&cases, |case| batch::split_case(case, &cfg)),
            );
            build_all_samples(&root, &cases, &cfg)
        }
    }
}

fn reconcile_pair(
    outline: &Path,
    manuscript: &Path,
    output: Option<&Path>,
    cfg: &Config,
) -> Result<()> {
    let format = batch::configured_format(cfg)?;
    let outline = read_source(outline)?;
    let manuscript = read_source(manuscript)?;
    let result = reconcile(&outline, &manuscript, format.as_ref(), &cfg.stop_heading)?;
    match output {
        Some(path) => batch::write_json(path, &result.tree),
        None => {
            println!("{}", serde_json::to_string_pretty(&result.tree)?);
            Ok(())
        }
    }
}

fn reconcile_root(root: &Path, cfg: &Config) -> Result<()> {
    let format = batch::configured_format(cfg)?;
    let cases: Vec<Case> = batch::find_cases(root, &cfg.case_pattern)?;
    report(
        "reconcile",
        batch::run_cases(&cases, |case| {
            batch::reconcile_case(case, cfg, format.as_ref()).map(|_| ())
        }),
    );
    Ok(())
}

fn build_all_samples(root: &Path, cases: &[Case], cfg: &Config) -> Result<()> {
    let sources = [
        (SENTENCE_FILE, "sentence", HistoryMode::Cumulative),
        (CLAUSE_FILE, "clause", HistoryMode::Cumulative),
        (SNIPPET_FILE, "snippet", HistoryMode::Located),
    ];
    for (file, kind, mode) in sources {
        let present = cases.iter().any(|case| case.dir.join(file).exists());
        if !present {
            info!("{kind}: no {file} in any case, skipping");
            continue;
        }
        batch::collect_samples(root, cases, cfg, file, kind, mode)?;
    }
    Ok(())
}
