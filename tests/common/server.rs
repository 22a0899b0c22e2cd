//! Test server management.
//!
//! Runs a real Gateway on an ephemeral loopback port inside the test's
//! Tokio runtime.

use ircserv::config::Config;
use ircserv::network::Gateway;
use ircserv::state::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A running test server.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a server listening on `127.0.0.1:0`.
    pub async fn spawn() -> anyhow::Result<Self> {
        let config = Config::parse(
            r#"
[server]
name = "irc.test"

[listen]
address = "127.0.0.1:0"
resolve_hostnames = false

[logs]
transcripts = false
"#,
        )?;

        let server = Arc::new(Server::new(&config)?);
        let gateway = Gateway::bind(&config.listen, server).await?;
        let addr = gateway.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = gateway.run().await;
        });

        Ok(Self { addr, handle })
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
