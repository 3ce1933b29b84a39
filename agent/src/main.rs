use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use hostfacts_agent::{collectors, config, runner};

/// Hostfacts Agent — Solaris host inventory snapshot collector.
#[derive(Parser, Debug)]
#[command(name = "hostfacts-agent", version, about)]
struct Cli {
    /// Path to the configuration file. Defaults apply if omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the platform identifier from the config.
    #[arg(long)]
    platform: Option<String>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostfacts_agent=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => config::AgentConfig::from_file(path)?,
        None => config::AgentConfig::default(),
    };
    if let Some(platform) = cli.platform {
        cfg.platform = platform;
    }
    if cli.pretty {
        cfg.pretty = true;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        agent_id = %cfg.agent_id,
        platform = %cfg.platform,
        "Starting inventory collection"
    );

    let shell = runner::ShellRunner::new(Duration::from_secs(cfg.command_timeout_secs));

    let report = match collectors::collect_all(&cfg, &shell).await {
        Ok(report) => report,
        Err(e) => {
            error!("Collection failed: {e}");
            std::process::exit(1);
        }
    };

    let json = if cfg.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
