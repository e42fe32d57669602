//! Codegraph Analyzer CLI
//!
//! # Usage
//!
//! ```bash
//! # Analyze a project directory, JSON to stdout
//! codegraph-analyze path/to/project --pretty
//!
//! # Metrics only, with a YAML configuration, written to a file
//! codegraph-analyze app.py --config analyzer.yaml --metrics-only -o metrics.json
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use codegraph_analyzer::config::AnalyzerConfig;
use codegraph_analyzer::shared::utils::source_files::collect_python_sources;
use codegraph_analyzer::{CodeAnalyzer, CodegraphError};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "codegraph-analyze")]
#[command(about = "Dependency/call graph and code metrics for Python sources", long_about = None)]
struct Cli {
    /// Python file or project directory
    path: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Emit only the metrics summary
    #[arg(long)]
    metrics_only: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CodegraphError> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_yaml(&path.to_string_lossy())?,
        None => AnalyzerConfig::default(),
    };

    let files = collect_python_sources(&cli.path)?;
    info!("Analyzing {} Python files from {}", files.len(), cli.path.display());

    let result = CodeAnalyzer::with_config(config).analyze(&files)?;

    let json = if cli.metrics_only {
        if cli.pretty {
            serde_json::to_string_pretty(&result.metrics)?
        } else {
            serde_json::to_string(&result.metrics)?
        }
    } else {
        result.to_json(cli.pretty)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
