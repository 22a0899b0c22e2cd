//! Messaging handlers.
//!
//! Handles PRIVMSG and NOTICE. Both share one routing path; they differ only
//! in whether failures are reported back to the sender.

mod common;
mod notice;
mod privmsg;

pub use notice::NoticeHandler;
pub use privmsg::PrivmsgHandler;
