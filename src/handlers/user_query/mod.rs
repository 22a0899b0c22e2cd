//! User query handlers.
//!
//! Handles WHO and WHOIS.

mod who;
mod whois;

pub use who::WhoHandler;
pub use whois::WhoisHandler;
