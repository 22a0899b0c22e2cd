//! In-process test network.
//!
//! Each [`TestUser`] owns the receiving end of its session sink, so tests
//! see exactly the lines the connection task would write to the socket.

use ircserv::config::Config;
use ircserv::state::{Server, SessionId};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use tokio::sync::mpsc;

/// Server name used by every harness config.
#[allow(dead_code)]
pub const SERVER_NAME: &str = "irc.test";

const DEFAULT_CONFIG: &str = r#"
[server]
name = "irc.test"
version = "ircserv-test"
description = "Test server"
admin_info1 = "Test Admin"
admin_info2 = "Test Location"
admin_email = "admin@irc.test"

[listen]
address = "127.0.0.1:0"
resolve_hostnames = false

[[oper]]
name = "admin"
password = "secret"

[logs]
transcripts = false
"#;

/// A server plus helpers for attaching fake sessions.
pub struct TestNet {
    pub server: Server,
    next_port: AtomicU16,
}

/// One attached session and its outbound queue.
pub struct TestUser {
    pub id: SessionId,
    pub nick: String,
    rx: mpsc::UnboundedReceiver<String>,
}

#[allow(dead_code)]
impl TestNet {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG)
    }

    pub fn with_config(toml: &str) -> Self {
        let config = Config::parse(toml).expect("test config parses");
        Self {
            server: Server::new(&config).expect("test server starts"),
            next_port: AtomicU16::new(40000),
        }
    }

    /// Attach an unregistered session.
    pub fn connect(&self) -> TestUser {
        let port = self.next_port.fetch_add(1, Ordering::Relaxed);
        let addr: SocketAddr = format!("127.0.0.1:{port}").parse().expect("valid addr");
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.server.connect(addr, tx);
        TestUser {
            id,
            nick: String::new(),
            rx,
        }
    }

    /// Attach a session and complete NICK/USER, discarding the burst.
    pub fn register(&self, nick: &str) -> TestUser {
        let mut user = self.connect();
        self.send(&user, &format!("NICK {nick}"));
        self.send(&user, &format!("USER {nick} 0 * :{nick} Test"));
        let burst = user.drain();
        assert!(
            burst.iter().any(|l| l.contains(" 001 ")),
            "{nick} did not register: {burst:?}"
        );
        user.nick = nick.to_string();
        user
    }

    /// Feed one inbound line for `user`.
    pub fn send(&self, user: &TestUser, line: &str) {
        self.server.handle_line(user.id, line);
    }

    /// Send and return everything queued for `user` afterwards.
    pub fn request(&self, user: &mut TestUser, line: &str) -> Vec<String> {
        self.send(user, line);
        user.drain()
    }

    /// Register `nick` and join each channel, draining the join output.
    pub fn register_in(&self, nick: &str, channels: &[&str]) -> TestUser {
        let mut user = self.register(nick);
        for channel in channels {
            self.request(&mut user, &format!("JOIN {channel}"));
        }
        user
    }

    pub fn is_live(&self, user: &TestUser) -> bool {
        self.server
            .with_state(|state| state.sessions.get(user.id).is_some())
    }

    pub fn channel_exists(&self, name: &str) -> bool {
        self.server
            .with_state(|state| state.channels.lookup(name).is_some())
    }
}

#[allow(dead_code)]
impl TestUser {
    /// Everything queued so far, in order.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    /// True once the session is torn down and its queue is empty.
    pub fn is_closed(&mut self) -> bool {
        matches!(
            self.rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        )
    }

    /// `nick!~user@host` as the harness registers it.
    pub fn mask(&self) -> String {
        format!("{0}!~{0}@127.0.0.1", self.nick)
    }
}

/// Numeric (or command) token of each line, e.g. `["001", "JOIN"]`.
#[allow(dead_code)]
pub fn codes(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| l.split(' ').nth(1))
        .collect()
}
