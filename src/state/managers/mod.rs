//! Domain managers for server state.
//!
//! Each manager owns one registry: sessions and the nick table, or channels
//! and their membership. Cross-registry operations take the other registry
//! as an argument so both are always mutated under the same lock.

pub mod channel;
pub mod session;

pub use channel::{ChannelRegistry, JoinOutcome};
pub use session::SessionRegistry;
