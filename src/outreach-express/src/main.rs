//! Outreach Express: campaign copy generation and directory submission.
//!
//! Serves the HTTP API by default; `--campaign <file>` runs one campaign from
//! a JSON file and prints the result instead.

use anyhow::Context;
use clap::Parser;
use outreach_api::{normalize, ApiServer};
use outreach_core::config::AppConfig;
use outreach_core::types::SubmissionResult;
use outreach_engine::{CampaignOrchestrator, RunObserver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "outreach-express")]
#[command(about = "Generate campaign copy and submit it to listing directories")]
#[command(version)]
struct Cli {
    /// Optional TOML config file (environment variables still override it)
    #[arg(long, env = "OUTREACH_EXPRESS_CONFIG")]
    config: Option<String>,

    /// Node identifier (overrides config)
    #[arg(long, env = "OUTREACH_EXPRESS__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "OUTREACH_EXPRESS__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Run a single campaign from a JSON file and exit
    #[arg(long, value_name = "FILE")]
    campaign: Option<PathBuf>,

    /// Force dry-run for --campaign regardless of the file's dryRun flag
    #[arg(long, default_value_t = false, requires = "campaign")]
    dry_run: bool,
}

/// Logs each directory as it completes during a one-shot run.
struct ProgressLog;

impl RunObserver for ProgressLog {
    fn on_submission(&self, index: usize, total: usize, result: &SubmissionResult) {
        info!(
            position = index + 1,
            total,
            directory = %result.directory_name,
            status = result.status.as_str(),
            message = %result.message,
            "Submission complete"
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --campaign output on stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "outreach_express=info,outreach_engine=info,outreach_api=info,tower_http=info"
                    .into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    info!("Outreach Express starting up");

    // Load configuration
    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        timeout_ms = config.dispatch.timeout_ms,
        "Configuration loaded"
    );

    let orchestrator = Arc::new(CampaignOrchestrator::from_config(&config.dispatch)?);

    if let Some(path) = cli.campaign {
        return run_once(&orchestrator, &config, &path, cli.dry_run).await;
    }

    let api_server = ApiServer::new(config.clone(), orchestrator);

    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Outreach Express is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}

async fn run_once(
    orchestrator: &CampaignOrchestrator,
    config: &AppConfig,
    path: &Path,
    force_dry_run: bool,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read campaign file {}", path.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("campaign file {} is not valid JSON", path.display()))?;

    let (request, mut options) = normalize::campaign_request(&body, &config.campaign)?;
    options.dry_run |= force_dry_run;

    let run = orchestrator
        .run_with_observer(&request, options, &ProgressLog)
        .await?;

    println!("{}", serde_json::to_string_pretty(&run)?);
    Ok(())
}
