//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{
    default_description, default_listen_address, default_log_path, default_max_line_length,
    default_true, default_version,
};
use super::oper::OperBlock;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Operator blocks.
    #[serde(default)]
    pub oper: Vec<OperBlock>,
    /// Channel transcript logging.
    #[serde(default)]
    pub logs: LogsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.example.net"). Prefix of every numeric.
    pub name: String,
    /// Version string shown in RPL_YOURHOST, RPL_MYINFO and VERSION.
    #[serde(default = "default_version")]
    pub version: String,
    /// Server description.
    #[serde(default = "default_description")]
    pub description: String,
    /// Admin info line 1 (RPL_ADMINLOC1).
    #[serde(default)]
    pub admin_info1: Option<String>,
    /// Admin info line 2 (RPL_ADMINLOC2).
    #[serde(default)]
    pub admin_info2: Option<String>,
    /// Admin email address (RPL_ADMINEMAIL).
    #[serde(default)]
    pub admin_email: Option<String>,
}

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:6667").
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
    /// Longest accepted inbound line, in bytes.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Reverse-resolve client addresses on connect.
    #[serde(default = "default_true")]
    pub resolve_hostnames: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
            max_line_length: default_max_line_length(),
            resolve_hostnames: true,
        }
    }
}

/// Channel transcript configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    /// Append every channel line to `<path>/ircserv_<channel>.ircservlog`.
    #[serde(default = "default_true")]
    pub transcripts: bool,
    /// Transcript directory, created at startup if missing.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            transcripts: true,
            path: default_log_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse("[server]\nname = \"test.com\"\n").unwrap();
        assert_eq!(config.server.name, "test.com");
        assert!(config.server.version.starts_with("ircserv-"));
        assert_eq!(config.listen.address.port(), 6667);
        assert_eq!(config.listen.max_line_length, 512);
        assert!(config.listen.resolve_hostnames);
        assert!(config.logs.transcripts);
        assert_eq!(config.logs.path, PathBuf::from("logs"));
        assert!(config.oper.is_empty());
    }

    #[test]
    fn full_config() {
        let config = Config::parse(
            r#"
[server]
name = "test.com"
version = "ircserv.0.0.2-test"
admin_info1 = "Hello! Welcome to our server!"
admin_info2 = "http://example.com"
admin_email = "admin@example.com"

[listen]
address = "127.0.0.1:7000"
resolve_hostnames = false

[logs]
transcripts = false
path = "/var/log/ircserv"

[[oper]]
name = "admin"
password = "admin"
"#,
        )
        .unwrap();
        assert_eq!(config.server.version, "ircserv.0.0.2-test");
        assert_eq!(config.server.admin_email.as_deref(), Some("admin@example.com"));
        assert_eq!(config.listen.address.port(), 7000);
        assert!(!config.listen.resolve_hostnames);
        assert!(!config.logs.transcripts);
        assert_eq!(config.logs.path, PathBuf::from("/var/log/ircserv"));
        assert_eq!(config.oper.len(), 1);
    }

    #[test]
    fn missing_server_section_is_an_error() {
        assert!(matches!(Config::parse("[listen]\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nname = \"from.file\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.name, "from.file");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
