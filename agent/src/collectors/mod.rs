pub mod memory;
pub mod os;
pub mod registry;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::AgentConfig;
use crate::runner::{CommandError, CommandRunner};

/// A failed collection cycle. No partial report survives any of these;
/// a wrong silent value is worse than a visible failure for inventory data.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("unexpected `{command}` output: {reason}")]
    Parse {
        command: &'static str,
        reason: String,
    },
    #[error("no collectors registered for platform `{0}`")]
    UnsupportedPlatform(String),
}

/// A complete host inventory snapshot.
#[derive(Debug, Serialize)]
pub struct InventoryReport {
    pub agent_id: String,
    pub timestamp: String,
    pub version: String,
    pub platform: String,
    pub hostname: String,
    pub os: os::OsInfo,
    pub memory: memory::MemoryReport,
}

/// Run every collector for the configured platform and assemble one report.
pub async fn collect_all(
    config: &AgentConfig,
    runner: &dyn CommandRunner,
) -> Result<InventoryReport, CollectionError> {
    let set = registry::collectors_for(&config.platform)?;

    debug!(platform = %config.platform, "collecting inventory snapshot");

    let hostname = runner.run("uname -n").await?.trim().to_string();
    let os = set.os.collect(runner).await?;
    let memory = set.memory.collect(runner).await?;

    Ok(InventoryReport {
        agent_id: config.agent_id.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: config.platform.clone(),
        hostname,
        os,
        memory,
    })
}
