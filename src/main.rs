use std::process::ExitCode;

use anyhow::Result;
use canvas_tool::config::Config;
use canvas_tool::convert;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const TOOL_NAME: &str = "canvas_tool";

/// Convert a canvas document (JSON nodes + edges) into `from;label;to` CSV rows
#[derive(Parser)]
#[clap(name = TOOL_NAME, author, version, about)]
struct Cli {
    /// Input .canvas path (or - for stdin)
    #[clap(long = "in")]
    input: Option<String>,
    /// Input path, used when --in is not given
    #[clap(value_name = "INPUT")]
    positional: Option<String>,
    /// Output .csv path (or - for stdout). Default: input basename + .csv
    #[clap(long)]
    out: Option<String>,
    /// For file nodes, keep the full path instead of the base name
    #[clap(long)]
    keep_path: bool,
    #[clap(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", TOOL_NAME, err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let config = Config::resolve(args.input, args.positional, args.out, args.keep_path)?;
    info!("Converting {} (keep_path={})", config.input, config.keep_path);

    let summary = convert::run(&config)?;
    info!(
        "Conversion completed: {} rows, {} dangling endpoints, {} duplicate ids ({:?} decode)",
        summary.rows, summary.dangling_endpoints, summary.duplicate_ids, summary.strategy
    );
    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // stdout may carry the CSV itself
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
