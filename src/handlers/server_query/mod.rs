//! Server query handlers.
//!
//! Handles VERSION, TIME, ADMIN and INFO.

mod admin;
mod info;
mod time;
mod version;

pub use admin::AdminHandler;
pub use info::InfoHandler;
pub use time::TimeHandler;
pub use version::VersionHandler;
