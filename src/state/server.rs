//! The Server - central shared state for the IRC server.
//!
//! All registry state sits behind one coarse lock. Every command and every
//! teardown runs to completion while holding it, so JOIN, PART and channel
//! fan-out are atomic and totally ordered. Nothing awaits under the lock;
//! outbound sinks are unbounded, so a send never blocks.

use crate::config::{Config, OperBlock};
use crate::handlers::{Context, Registry};
use crate::message::{Message, MessageError};
use crate::state::{
    ChannelRegistry, Session, SessionId, SessionIdGenerator, SessionRegistry, TranscriptLog,
};
use parking_lot::Mutex;
use std::io;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// This server's identity, as shown to clients.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Human-readable start time for RPL_CREATED.
    pub created: String,
    pub admin_info1: String,
    pub admin_info2: String,
    pub admin_email: String,
}

impl ServerInfo {
    fn from_config(config: &Config) -> Self {
        let server = &config.server;
        Self {
            name: server.name.clone(),
            version: server.version.clone(),
            description: server.description.clone(),
            created: chrono::Local::now()
                .format("%a %b %d %Y at %H:%M:%S %Z")
                .to_string(),
            admin_info1: server.admin_info1.clone().unwrap_or_default(),
            admin_info2: server.admin_info2.clone().unwrap_or_default(),
            admin_email: server.admin_email.clone().unwrap_or_default(),
        }
    }
}

/// Everything guarded by the server lock.
#[derive(Debug)]
pub struct State {
    pub sessions: SessionRegistry,
    pub channels: ChannelRegistry,
}

impl State {
    pub fn new(transcripts: Option<TranscriptLog>) -> Self {
        Self {
            sessions: SessionRegistry::default(),
            channels: ChannelRegistry::new(transcripts),
        }
    }

    /// Remove a session from every registry, at most once.
    ///
    /// Registered sessions send `:<mask> QUIT :<reason>` to each joined
    /// channel first. The session's sink gets a closing ERROR line and is
    /// then dropped, which ends its connection task. Returns false if the
    /// session was already gone.
    pub fn teardown(&mut self, id: SessionId, reason: &str) -> bool {
        let Some(session) = self.sessions.get(id) else {
            return false;
        };
        let quit = format!(":{} QUIT :{}", session.mask(), reason);
        let joined: Vec<String> = session.channels.iter().cloned().collect();

        for name in joined {
            if let Err(e) = self
                .channels
                .unsubscribe(&mut self.sessions, &name, id, &quit, Some(id))
            {
                debug!(
                    id = %id,
                    channel = %name,
                    error = %e,
                    "Channel already gone during teardown"
                );
            }
        }

        if let Some(session) = self.sessions.remove(id) {
            session.send(format!(
                "ERROR :Closing Link: {} ({})",
                session.hostname, reason
            ));
            info!(id = %id, nick = %session.nick, reason = %reason, "Session closed");
        }
        true
    }
}

/// The Server - composition root.
///
/// Owns the registries (behind the lock), operator credentials, server
/// identity and the command dispatcher. The transport talks to it through
/// [`connect`](Server::connect), [`handle_line`](Server::handle_line) and
/// [`disconnect`](Server::disconnect).
pub struct Server {
    info: ServerInfo,
    opers: Vec<OperBlock>,
    state: Mutex<State>,
    registry: Registry,
    ids: SessionIdGenerator,
}

impl Server {
    /// Build the server from `config`.
    ///
    /// Fails only if transcripts are on and the log directory can't be
    /// created.
    pub fn new(config: &Config) -> io::Result<Self> {
        let transcripts = if config.logs.transcripts {
            let log = TranscriptLog::open(&config.logs.path)?;
            info!(path = %log.dir().display(), "Writing channel transcripts");
            Some(log)
        } else {
            None
        };

        Ok(Self {
            info: ServerInfo::from_config(config),
            opers: config.oper.clone(),
            state: Mutex::new(State::new(transcripts)),
            registry: Registry::new(),
            ids: SessionIdGenerator::new(),
        })
    }

    #[inline]
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Create a session for a new connection. Lines for it go to `sink`.
    pub fn connect(
        &self,
        remote_addr: SocketAddr,
        sink: mpsc::UnboundedSender<String>,
    ) -> SessionId {
        let id = self.ids.next_id();
        self.state
            .lock()
            .sessions
            .insert(Session::new(id, remote_addr, sink));
        debug!(id = %id, addr = %remote_addr, "Session created");
        id
    }

    /// Record the resolved hostname for a session.
    pub fn set_hostname(&self, id: SessionId, hostname: &str) {
        if let Some(session) = self.state.lock().sessions.get_mut(id) {
            session.hostname = hostname.to_string();
        }
    }

    /// Parse and dispatch one inbound line for `id`.
    ///
    /// Replies go to the session's sink after any broadcasts the command
    /// produced. Lines for a torn-down session are ignored.
    pub fn handle_line(&self, id: SessionId, line: &str) {
        let msg = match Message::parse(line) {
            Ok(msg) => msg,
            Err(MessageError::Empty) => return,
            Err(e) => {
                debug!(id = %id, error = %e, "Discarding malformed line");
                return;
            }
        };

        let mut state = self.state.lock();
        if state.sessions.get(id).is_none() {
            return;
        }

        let mut ctx = Context::new(id, &self.info, &self.opers, &mut state);
        self.registry.dispatch(&mut ctx, &msg);
        let replies = ctx.into_replies();

        if let Some(session) = state.sessions.get(id) {
            for reply in replies {
                session.send(reply);
            }
        }
    }

    /// Transport-level disconnect. Safe to call after QUIT or KILL.
    pub fn disconnect(&self, id: SessionId, reason: &str) -> bool {
        self.state.lock().teardown(id, reason)
    }

    /// Run `f` against a consistent snapshot of the registries.
    pub fn with_state<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        f(&self.state.lock())
    }
}
