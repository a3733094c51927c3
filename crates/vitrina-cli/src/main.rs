//! Command-line orchestrator for the Vitrina scenario suite.
//!
//! ## Usage
//!
//! ```bash
//! vitrina list                          # Show the scenarios the suite ships
//! vitrina run                           # Run all of them, headless
//! vitrina run --scenario guest_checkout # Run one, by name
//! vitrina run --headed --json           # Watch the browser, emit JSON
//! ```

mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrina::flows::{self, Flow};
use vitrina::{Browser, BrowserConfig, Scenario, ScenarioReport, VitrinaError};

#[derive(Debug, Parser)]
#[command(
    name = "vitrina",
    version,
    about = "Scenario runner for the storefront end-to-end suite"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the scenarios the suite ships
    List,
    /// Run scenarios against a deployment
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Run only the named scenario (repeatable)
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,

    /// Base URL of the storefront under test
    #[arg(long, env = "VITRINA_BASE_URL", default_value = vitrina::fixture::DEFAULT_BASE_URL)]
    base_url: String,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,

    /// Chromium executable override
    #[arg(long, env = "VITRINA_CHROME", value_name = "PATH")]
    chrome: Option<String>,

    /// Disable the Chromium sandbox (containers/CI)
    #[arg(long)]
    no_sandbox: bool,

    /// Directory for failure screenshots
    #[arg(long, default_value = "artifacts", value_name = "DIR")]
    artifacts: PathBuf,

    /// Per-scenario time budget in seconds
    #[arg(long, default_value_t = 120, value_name = "SECS")]
    timeout_secs: u64,

    /// Emit the reports as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool, VitrinaError> {
    match cli.command {
        Commands::List => {
            output::print_listing(&flows::all());
            Ok(true)
        }
        Commands::Run(args) => run_scenarios(args).await,
    }
}

/// Resolve requested names against the registry before anything heavier
/// than a lookup happens.
fn select_flows(requested: &[String]) -> Result<Vec<Flow>, VitrinaError> {
    let available = flows::all();
    if requested.is_empty() {
        return Ok(available);
    }

    let mut selected = Vec::with_capacity(requested.len());
    for name in requested {
        let flow = available
            .iter()
            .find(|flow| flow.name == name)
            .ok_or_else(|| VitrinaError::InvalidArgument {
                message: format!(
                    "unknown scenario {name:?}; `vitrina list` shows what is available"
                ),
            })?;
        selected.push(flow.clone());
    }
    Ok(selected)
}

async fn run_scenarios(args: RunArgs) -> Result<bool, VitrinaError> {
    let selected = select_flows(&args.scenarios)?;
    std::fs::create_dir_all(&args.artifacts)?;

    let mut config = BrowserConfig::default().with_headless(!args.headed);
    if let Some(path) = args.chrome.clone() {
        config = config.with_chromium_path(path);
    }
    if args.no_sandbox {
        config = config.with_no_sandbox();
    }

    let browser = Browser::launch(config).await?;
    let progress = output::progress(selected.len() as u64);
    let mut reports: Vec<ScenarioReport> = Vec::with_capacity(selected.len());

    for flow in &selected {
        progress.set_message(flow.name);
        let driver = browser.new_handle(args.base_url.clone()).await?;
        let report = Scenario::new(flow.name)
            .with_timeout(Duration::from_secs(args.timeout_secs))
            .run(driver, Some(args.artifacts.as_path()), |d| flow.invoke(d))
            .await;
        if !args.json {
            progress.suspend(|| output::print_report(&report));
        }
        reports.push(report);
        progress.inc(1);
    }
    progress.finish_and_clear();
    browser.close().await?;

    let all_passed = reports.iter().all(|report| report.passed);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        output::print_summary(&reports);
    }
    Ok(all_passed)
}
