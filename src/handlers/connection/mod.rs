//! Connection registration handlers.
//!
//! Handles NICK, USER, PASS, PING, PONG and QUIT: the commands a session may
//! send before it is registered.

mod nick;
mod pass;
mod ping;
mod quit;
mod user;
mod welcome;

pub use nick::{NickHandler, is_valid_nick};
pub use pass::PassHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::QuitHandler;
pub use user::UserHandler;
