//! Operator command handlers.

mod kill;
mod oper;

pub use kill::KillHandler;
pub use oper::OperHandler;
