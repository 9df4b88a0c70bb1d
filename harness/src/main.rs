#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use fees_client::{FeesClient, HttpTransport};
use fees_harness::{
    config::{Config, Overrides, DEFAULT_CONFIG_FILE},
    orchestrator,
    report::{render_summary, render_verdicts, write_report, Report},
    workflow::complete_workflow,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fees-harness", version, about = "Smoke tests for the government fees API")]
struct Cli {
    /// YAML config file (defaults to harness.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override api.base_url
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override report.path
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every endpoint check and write the report
    Run,
    /// Walk metadata, categories, search, fee details and category fees
    Workflow {
        #[arg(long, env = "FEES_API_KEY")]
        api_key: Option<String>,
    },
    /// Print the documentation links (no key needed)
    Docs,
    /// Issue a new API key
    GenerateKey {
        #[arg(long)]
        email: Option<String>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let yaml_path = cli
        .config
        .as_ref()
        .map_or_else(|| DEFAULT_CONFIG_FILE.to_string(), |p| p.to_string_lossy().into_owned());
    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        report_path: cli.report.clone(),
    };
    Config::load_with(&yaml_path, &overrides).map_err(|e| anyhow::anyhow!("{e}"))
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid logging.level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

async fn run(config: &Config, transport: &HttpTransport) -> anyhow::Result<()> {
    println!("============================================================");
    println!("Government Fees API - Test Suite");
    println!("============================================================");
    println!("Base URL: {}", transport.base_url());
    println!("Started: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    println!();

    let recorder = orchestrator::run(transport, &config.checks).await;
    let summary = recorder.summary();

    println!("{}", render_verdicts(recorder.verdicts()));
    println!();
    println!("{}", render_summary(&summary));

    let report = Report::from_summary(&summary, Utc::now());
    write_report(&config.report.path, &report)?;
    println!();
    println!("Test results saved to: {}", config.report.path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging.level)?;

    tracing::info!(
        base_url = %config.api.base_url,
        report = %config.report.path.display(),
        "fees harness starting"
    );

    let client = config
        .api
        .http_client()
        .context("failed to build HTTP client")?;
    let transport = HttpTransport::with_client(client, &config.api.base_url);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&config, &transport).await?,
        Command::Workflow { api_key } => {
            let key = api_key
                .or_else(|| config.api.key.clone())
                .context("workflow needs an API key: pass --api-key or set FEES_API_KEY")?;
            let client = FeesClient::new(transport).with_api_key(key);
            let report =
                complete_workflow(&client, &config.checks.search_term, &config.checks.category)
                    .await
                    .context("workflow failed")?;
            println!("{}", report.render());
        }
        Command::Docs => {
            let docs = FeesClient::new(transport)
                .docs()
                .await
                .context("failed to fetch documentation links")?;
            println!("Repository: {}", docs.repository);
            println!("API Reference: {}", docs.main_documentation.api_reference);
            println!("Quick Start: {}", docs.main_documentation.quick_start);
            println!("Data Sources: {}", docs.main_documentation.data_sources);
            println!("Python example: {}", docs.code_examples.python);
            println!("JavaScript example: {}", docs.code_examples.javascript);
        }
        Command::GenerateKey { email } => {
            let grant = FeesClient::new(transport)
                .generate_api_key(email.as_deref())
                .await
                .context("failed to generate API key")?;
            println!("API Key: {}", grant.api_key);
            if let Some(message) = grant.message {
                println!("{message}");
            }
        }
    }

    Ok(())
}
