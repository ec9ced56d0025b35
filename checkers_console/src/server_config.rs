use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use checkers::network::{DEFAULT_MAX_LINE_LEN, DEFAULT_PORT, LineLimits, LineOverflow};
use checkers::registry::DEFAULT_MAX_SESSIONS;
use checkers::server::ServerOptions;


// Every field may be omitted. Example:
//   port: 12345
//   max_sessions: 50
//   line_overflow: Reject
//   read_timeout: 10m
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
    pub max_sessions: usize,
    pub max_line_len: usize,
    pub line_overflow: LineOverflow,
    #[serde(with = "humantime_serde")]
    pub read_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            line_overflow: LineOverflow::default(),
            read_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn read_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'.", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file '{}'.", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(contents)?;
        anyhow::ensure!(config.max_sessions > 0, "max_sessions must be positive");
        anyhow::ensure!(config.max_line_len > 1, "max_line_len must be at least 2");
        Ok(config)
    }

    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            max_sessions: self.max_sessions,
            line_limits: LineLimits {
                max_line_len: self.max_line_len,
                overflow: self.line_overflow,
            },
            read_timeout: self.read_timeout,
        }
    }
}
