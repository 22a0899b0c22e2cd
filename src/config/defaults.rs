//! Default value functions for configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_version() -> String {
    format!("ircserv-{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_description() -> String {
    "IRC server".to_string()
}

// =============================================================================
// Listen Defaults
// =============================================================================

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 6667))
}

/// RFC 1459 line limit, CR-LF included.
pub fn default_max_line_length() -> usize {
    512
}

// =============================================================================
// Log Defaults
// =============================================================================

pub fn default_log_path() -> PathBuf {
    PathBuf::from("logs")
}
