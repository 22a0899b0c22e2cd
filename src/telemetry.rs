//! Telemetry utilities: span constructors and the transcript log target.

/// Tracing target for transcript file diagnostics.
pub const TRANSCRIPT_TARGET: &str = "ircserv::transcript";

/// Standardized span constructors for IRC observability.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Create a span for a client connection.
    pub fn connection(id: &str, ip: &str) -> Span {
        info_span!("connection", id = %id, ip = %ip)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, source: &str, target: Option<&str>) -> Span {
        if let Some(target) = target {
            debug_span!("irc.command", command = %name, source = %source, target = %target)
        } else {
            debug_span!("irc.command", command = %name, source = %source)
        }
    }
}
