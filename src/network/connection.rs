//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!   socket ──lines──▶ Server::handle_line ──▶ session sinks
//!   socket ◀──────── outbound queue (mpsc) ◀──┘
//! ```
//!
//! The outbound queue is the session's sink. When the session is torn down
//! (QUIT, KILL) the sender is dropped, the queue drains and the task ends.

use crate::network::HostnameResolver;
use crate::state::{Server, SessionId};
use crate::telemetry::spans;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Framed};
use tracing::{Instrument, debug, info, warn};

/// Reason given to channels when the socket goes away underneath a session.
const RESET_REASON: &str = "Connection reset by peer";

/// A client connection handler.
pub struct Connection {
    addr: SocketAddr,
    server: Arc<Server>,
    resolver: HostnameResolver,
    max_line_length: usize,
}

impl Connection {
    pub fn new(
        addr: SocketAddr,
        server: Arc<Server>,
        resolver: HostnameResolver,
        max_line_length: usize,
    ) -> Self {
        Self {
            addr,
            server,
            resolver,
            max_line_length,
        }
    }

    /// Drive the connection until EOF, I/O error or teardown.
    pub async fn run(self, stream: TcpStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.server.connect(self.addr, tx);
        let span = spans::connection(&id.to_string(), &self.addr.ip().to_string());

        async move {
            // Lines end in LF; a CR before it is trimmed by the parser.
            let codec = AnyDelimiterCodec::new_with_max_length(
                b"\n".to_vec(),
                b"\r\n".to_vec(),
                self.max_line_length,
            );
            let framed = Framed::new(stream, codec);
            self.serve(id, framed, rx).await;

            self.server.disconnect(id, RESET_REASON);
            info!("Connection closed");
        }
        .instrument(span)
        .await
    }

    async fn serve(
        &self,
        id: SessionId,
        framed: Framed<TcpStream, AnyDelimiterCodec>,
        mut rx: mpsc::UnboundedReceiver<String>,
    ) {
        let (mut writer, mut reader) = framed.split();

        if let Err(e) = self.lookup_hostname(id, &mut writer).await {
            warn!(error = %e, "Write failed during hostname lookup");
            return;
        }

        loop {
            tokio::select! {
                inbound = reader.next() => match inbound {
                    Some(Ok(bytes)) => {
                        let line = String::from_utf8_lossy(&bytes);
                        self.server.handle_line(id, &line);
                    }
                    // The framed stream ends after a decode error.
                    Some(Err(AnyDelimiterCodecError::MaxChunkLengthExceeded)) => {
                        warn!(max = self.max_line_length, "Line too long, closing");
                        return;
                    }
                    Some(Err(AnyDelimiterCodecError::Io(e))) => {
                        warn!(error = %e, "Read error");
                        return;
                    }
                    None => {
                        debug!("Peer closed connection");
                        return;
                    }
                },
                outbound = rx.recv() => match outbound {
                    Some(line) => {
                        if let Err(e) = writer.send(line).await {
                            warn!(error = %e, "Write error");
                            return;
                        }
                    }
                    // Session torn down and its queue fully drained.
                    None => return,
                },
            }
        }
    }

    /// Resolve the peer's hostname, reporting progress with AUTH notices.
    async fn lookup_hostname<W>(&self, id: SessionId, writer: &mut W) -> Result<(), W::Error>
    where
        W: futures_util::Sink<String> + Unpin,
    {
        writer
            .send("NOTICE AUTH :*** Looking up hostname...".to_string())
            .await?;

        match self.resolver.lookup(self.addr.ip()).await {
            Some(hostname) => {
                self.server.set_hostname(id, &hostname);
                debug!(%hostname, "Hostname resolved");
                writer
                    .send("NOTICE AUTH :*** Found hostname".to_string())
                    .await
            }
            None => {
                writer
                    .send("NOTICE AUTH :*** Could not find hostname".to_string())
                    .await
            }
        }
    }
}
