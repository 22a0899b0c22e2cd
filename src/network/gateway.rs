//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket and spawns a Connection task for
//! each incoming client.

use crate::config::ListenConfig;
use crate::network::{Connection, HostnameResolver};
use crate::state::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    server: Arc<Server>,
    resolver: HostnameResolver,
    max_line_length: usize,
}

impl Gateway {
    /// Bind the gateway to `listen.address`.
    pub async fn bind(listen: &ListenConfig, server: Arc<Server>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(listen.address).await?;
        info!(addr = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            server,
            resolver: HostnameResolver::new(listen.resolve_hostnames),
            max_line_length: listen.max_line_length,
        })
    }

    /// Address actually bound; differs from the config when port 0 was asked for.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!(%addr, error = %e, "Could not set TCP_NODELAY");
                    }
                    info!(%addr, "Connection accepted");

                    let connection = Connection::new(
                        addr,
                        Arc::clone(&self.server),
                        self.resolver.clone(),
                        self.max_line_length,
                    );
                    tokio::spawn(connection.run(stream));
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
