//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! incoming IRC messages to appropriate handlers.
//!
//! Handlers are synchronous: they run under the server lock, mutate the
//! registries through their public operations and queue replies for the
//! invoking session on the [`Context`].

mod channel;
mod connection;
pub mod core;
pub mod helpers;
mod messaging;
mod mode;
mod oper;
mod server_query;
mod user_query;

pub use self::core::{Context, Handler, Registry};
pub use crate::error::{HandlerError, HandlerResult};
pub use connection::is_valid_nick;
