//! Network layer: the TCP listener and per-connection tasks.
//!
//! The transport only frames lines and moves them between the socket and the
//! [`Server`](crate::state::Server); all protocol logic lives in handlers.

mod connection;
mod gateway;
mod resolver;

pub use connection::Connection;
pub use gateway::Gateway;
pub use resolver::HostnameResolver;
