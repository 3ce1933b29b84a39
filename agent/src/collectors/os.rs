use serde::Serialize;

use super::CollectionError;
use crate::runner::CommandRunner;

/// Operating system facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsInfo {
    pub name: String,
    pub release: String,
    pub arch: String,
}

/// Collects OS facts from `uname`. Stateless, one snapshot per call.
#[derive(Debug)]
pub struct OsCollector;

impl OsCollector {
    pub fn new() -> Self {
        Self
    }

    pub async fn collect(&self, runner: &dyn CommandRunner) -> Result<OsInfo, CollectionError> {
        Ok(OsInfo {
            name: uname_fact(runner, "uname -s").await?,
            release: uname_fact(runner, "uname -r").await?,
            arch: uname_fact(runner, "uname -p").await?,
        })
    }
}

impl Default for OsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a `uname` invocation and return its single-line value.
async fn uname_fact(
    runner: &dyn CommandRunner,
    command: &'static str,
) -> Result<String, CollectionError> {
    let output = runner.run(command).await?;
    let value = output.trim();
    if value.is_empty() {
        return Err(CollectionError::Parse {
            command,
            reason: "empty output".to_string(),
        });
    }
    Ok(value.to_string())
}
