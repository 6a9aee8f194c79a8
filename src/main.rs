//! `traces`: generate `.traces` files from DOT state graphs
//!
//! Every input graph is parsed, all distinct label traces are enumerated from every
//! vertex, and the traces are written one per line next to the input.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracegen::pipeline::LoggingListener;
use tracegen::{GeneratorConfig, TracesGenerator};
use tracing_subscriber::{fmt, EnvFilter};

/// Generate label traces from DOT transition graphs
#[derive(Parser)]
#[command(name = "traces")]
#[command(version)]
#[command(about = "Generate label traces from DOT transition graphs")]
struct Cli {
    /// Input files or directories; include paths are scanned when omitted
    files: Vec<PathBuf>,

    /// Minimum trace length (needs --max)
    #[arg(long, allow_negative_numbers = true)]
    min: Option<i64>,

    /// Maximum trace length (needs --min)
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i64>,

    /// Colon-separated directories scanned for input files
    #[arg(long, value_delimiter = ':')]
    include: Vec<PathBuf>,

    /// Report every distinct trace as it is found
    #[arg(long)]
    show_traces: bool,

    /// JSON configuration file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enumerate the roots of each graph in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn generator_config(&self) -> tracegen::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load_json(path)?,
            None => GeneratorConfig::default(),
        };

        if self.min.is_some() {
            config.min_depth = self.min;
        }
        if self.max.is_some() {
            config.max_depth = self.max;
        }
        if !self.include.is_empty() {
            config.include_paths = self.include.clone();
        }
        config.show_traces |= self.show_traces;
        config.parallel |= self.parallel;

        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Trace reports are info-level messages
    let level = cli.verbose.max(u8::from(cli.show_traces));
    let filter = match level {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.generator_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let generator = TracesGenerator::new(config);
    let mut listener = LoggingListener::new();

    match generator.run(&cli.files, &mut listener) {
        Ok(summary) => {
            println!(
                "Processed {} file(s), {} distinct trace(s)",
                summary.processed, summary.traces
            );
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                for path in &summary.failed {
                    eprintln!("failed: {}", path.display());
                }
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
