//! State management module.
//!
//! Contains the [`Server`] (shared server state) and the entities it owns.

pub mod channel;
pub mod managers;
pub mod modes;
mod server;
pub mod session;
mod transcript;
mod uid;

pub use channel::Channel;
pub use managers::{ChannelRegistry, JoinOutcome, SessionRegistry};
pub use modes::{ChannelModes, ModeChange, UserModes};
pub use server::{Server, ServerInfo, State};
pub use session::{RegistrationState, Session};
pub use transcript::TranscriptLog;
pub use uid::{SessionId, SessionIdGenerator};
