//! ircserv - an RFC 1459/2812 IRC server.
//!
//! The protocol engine (sessions, channels, modes, dispatch, numerics) is
//! synchronous and lives behind one lock in [`state::Server`]. The
//! [`network`] layer frames lines over TCP and feeds them in.

pub mod config;
pub mod error;
pub mod handlers;
pub mod message;
pub mod network;
pub mod replies;
pub mod state;
pub mod telemetry;
