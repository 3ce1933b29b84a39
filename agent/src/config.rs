use anyhow::{Context, Result};
use serde::Deserialize;

/// Agent configuration loaded from a TOML file or defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Identifier stamped into every report.
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Platform identifier used to look up collectors (e.g., "solaris2").
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Upper bound on each external command invocation.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Pretty-print the JSON report.
    #[serde(default)]
    pub pretty: bool,
}

fn default_agent_id() -> String {
    "hostfacts".to_string()
}

fn default_platform() -> String {
    "solaris2".to_string()
}

fn default_command_timeout() -> u64 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: default_agent_id(),
            platform: default_platform(),
            command_timeout_secs: default_command_timeout(),
            pretty: false,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let config: AgentConfig =
            toml::de::from_str(&contents).with_context(|| format!("invalid config in {path}"))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_solaris() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.platform, "solaris2");
        assert_eq!(cfg.command_timeout_secs, 10);
        assert!(!cfg.pretty);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AgentConfig = toml::de::from_str("agent_id = \"db01\"").unwrap();
        assert_eq!(cfg.agent_id, "db01");
        assert_eq!(cfg.platform, "solaris2");
    }
}
