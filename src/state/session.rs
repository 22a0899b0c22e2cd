//! Per-connection session state.

use super::modes::UserModes;
use super::uid::SessionId;
use std::collections::BTreeSet;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tracing::trace;

/// Where a session is in the NICK/USER handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// Neither NICK nor USER seen.
    Connected,
    /// Exactly one of NICK or USER seen.
    PartialRegistration,
    /// Both seen, nick claimed, welcome burst sent.
    Registered,
}

/// One client connection.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    /// Current nick; empty until NICK succeeds.
    pub nick: String,
    /// Username from USER; empty until USER succeeds.
    pub username: String,
    pub realname: String,
    /// Resolved hostname, or the peer IP when lookup failed.
    pub hostname: String,
    pub remote_addr: SocketAddr,
    pub modes: UserModes,
    /// Lowercased names of joined channels.
    pub channels: BTreeSet<String>,
    /// Password from PASS. Stored, never checked.
    pub password: Option<String>,
    /// Unix seconds at connect.
    pub signon: i64,
    registered: bool,
    sink: mpsc::UnboundedSender<String>,
}

impl Session {
    pub fn new(
        id: SessionId,
        remote_addr: SocketAddr,
        sink: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self {
            id,
            nick: String::new(),
            username: String::new(),
            realname: String::new(),
            hostname: remote_addr.ip().to_string(),
            remote_addr,
            modes: UserModes::default(),
            channels: BTreeSet::new(),
            password: None,
            signon: chrono::Utc::now().timestamp(),
            registered: false,
            sink,
        }
    }

    pub fn state(&self) -> RegistrationState {
        if self.registered {
            RegistrationState::Registered
        } else if self.nick.is_empty() && self.username.is_empty() {
            RegistrationState::Connected
        } else {
            RegistrationState::PartialRegistration
        }
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Both halves of the handshake are present and completion hasn't fired.
    pub fn can_register(&self) -> bool {
        !self.registered && !self.nick.is_empty() && !self.username.is_empty()
    }

    /// Flip to Registered. Only the session registry calls this.
    pub(super) fn mark_registered(&mut self) {
        self.registered = true;
    }

    /// `nick!~user@host`, derived from current fields.
    pub fn mask(&self) -> String {
        format!("{}!~{}@{}", self.nick, self.username, self.hostname)
    }

    /// Nick for numeric targets: `*` until one is set.
    pub fn nick_or_star(&self) -> &str {
        if self.nick.is_empty() { "*" } else { &self.nick }
    }

    /// Queue a line for this session's writer. A closed sink is ignored.
    pub fn send(&self, line: impl Into<String>) {
        if self.sink.send(line.into()).is_err() {
            trace!(id = %self.id, "Dropping line for closed session");
        }
    }
}
