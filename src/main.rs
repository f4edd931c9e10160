//! test262 parser conformance CLI
//!
//! Runs a test262 checkout against an external parser command and checks the
//! failures against the allowlist.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use test262_parser_harness::{
    AllowlistMode, CommandSubject, ConfigFile, Harness, HarnessConfig, OutputFormat, Test262Stream, VERSION,
};

#[derive(Parser)]
#[command(name = "test262-parser")]
#[command(author, version, about = "Run test262 against a parser and check the failure allowlist", long_about = None)]
struct Cli {
    /// Root of the test262 checkout (contains `test/`)
    #[arg(long, value_name = "DIR", default_value = "build/test262")]
    test262_dir: PathBuf,

    /// Allowlist of known failures
    #[arg(long, value_name = "FILE", default_value = "allowlist.txt")]
    allowlist: PathBuf,

    /// Rewrite the allowlist with the current failures instead of checking it
    #[arg(long)]
    update_allowlist: bool,

    /// JSON file overriding the feature, ignore and skip tables
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of concurrent parser invocations (defaults to the core count)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Log progress every N tests (0 disables)
    #[arg(long, value_name = "N")]
    log_interval: Option<usize>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Parser command to run for every test (after --)
    #[arg(last = true, required = true, value_name = "PARSER")]
    parser: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise the verbosity flag picks the level
fn setup_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .try_init();
}

fn build_config(cli: &Cli) -> anyhow::Result<HarnessConfig> {
    let mut config = HarnessConfig {
        allowlist_path: cli.allowlist.clone(),
        mode: if cli.update_allowlist {
            AllowlistMode::Update
        } else {
            AllowlistMode::Report
        },
        ..HarnessConfig::default()
    };
    if let Some(jobs) = cli.jobs {
        config.jobs = jobs.max(1);
    }
    if let Some(interval) = cli.log_interval {
        config.log_interval = interval;
    }
    if let Some(path) = &cli.config {
        ConfigFile::load(path)
            .and_then(|file| file.apply(&mut config))
            .with_context(|| format!("failed to apply config {}", path.display()))?;
    }
    Ok(config)
}

/// Returns whether the run succeeded
fn run(cli: Cli) -> anyhow::Result<bool> {
    tracing::debug!(version = VERSION, "test262-parser");
    let config = build_config(&cli)?;
    let subject = CommandSubject::new(&cli.parser).context("invalid parser command")?;
    let corpus = Test262Stream::open(&cli.test262_dir)
        .with_context(|| format!("cannot read test262 checkout at {}", cli.test262_dir.display()))?;
    let harness = Harness::new(config, subject).context("failed to load allowlist")?;

    let report = harness.run(corpus).context("conformance run aborted")?;
    print!("{}", report.render(cli.format.into()));
    Ok(report.success())
}
