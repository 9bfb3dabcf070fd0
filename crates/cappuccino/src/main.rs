//! cappuccino - bootstrap a project from a git repository and its .cappuccino.yml

use anyhow::Result;
use cappuccino_core::config::DEFAULT_BRANCH;
use cappuccino_core::{ConsoleReporter, Reporter, RunConfig, ENGINE_VERSION};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "cappuccino")]
#[command(about = "Clone a repository and run the actions declared in its .cappuccino.yml")]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Git repository to clone
    #[arg(short = 'g', long = "git", value_name = "URL")]
    pub git: Option<String>,

    /// Branch to work with
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Directory to clone into (defaults to the current directory)
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Kill exec commands that run longer than this many seconds
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_arg)]
    pub timeout: Option<u64>,

    /// Skip the post-run scan for [cappuccino-warning] markers
    #[arg(long = "no-warnings")]
    pub no_warnings: bool,

    /// Run in debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Display program version
    #[arg(short = 'v', long)]
    pub version: bool,
}

impl Args {
    fn run_config(&self, url: &str) -> RunConfig {
        let mut config = RunConfig::new(url);
        config.branch = self.branch.clone();
        if let Some(dir) = &self.directory {
            config.directory = dir.clone();
        }
        config.exec_timeout = self
            .timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        config.scan_warnings = !self.no_warnings;
        config.with_env_overrides()
    }
}

fn parse_timeout_arg(value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("'{}' is not a whole number of seconds", value))
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let Some(url) = args.git.as_deref() else {
        return Ok(());
    };

    let config = args.run_config(url);
    tracing::debug!(?config, "starting run");

    let report = cappuccino_core::bootstrap(&config, &ConsoleReporter).await?;
    tracing::debug!(
        root = %report.root.display(),
        completed = report.summary.completed,
        skipped = report.summary.skipped,
        "run finished"
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Ctrl+C ends the run where it stands; there is nothing to roll back
    ctrlc::set_handler(move || {
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.debug);

    if args.version {
        let bin = std::env::args().next().unwrap_or_else(|| "cappuccino".to_string());
        println!("{} {}", bin, ENGINE_VERSION);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ConsoleReporter.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
