use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use token_census::config::{dataset_table, AppConfig};
use token_census::hub::HubSource;
use token_census::tokenizer::PretrainedTokenCounter;
use token_census::{pipeline, report};

#[derive(Parser)]
#[command(name = "token-census")]
#[command(about = "Token-count statistics over public QA datasets", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for per-dataset result files
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Hub repo of the pretrained tokenizer
    #[arg(long)]
    tokenizer: Option<String>,

    /// Dataset split to survey
    #[arg(long)]
    split: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logging goes to stderr; stdout carries only the progress lines and the
    // final summary.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::new(cli.results_dir, cli.tokenizer, cli.split);

    if let Err(err) = run(&config) {
        eprintln!("{} {}", "✗".bright_red(), err);
        process::exit(1);
    }
}

fn run(config: &AppConfig) -> token_census::Result<()> {
    let counter = PretrainedTokenCounter::from_hub(&config.tokenizer_repo)?;
    let source = HubSource::new(config.split.clone())?;

    let results = pipeline::run(&dataset_table(), &source, &counter, &config.results_dir)?;
    report::print_summary(&results);

    Ok(())
}
