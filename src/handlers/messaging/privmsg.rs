//! PRIVMSG command handler.
//!
//! `PRIVMSG <targets> :<text>`
//!
//! Channel messages fan out to every member except the sender, subject to
//! `+n` and `+m`. Nick targets get the line directly.

use super::common::{ErrorStrategy, route_message};
use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;

/// Handler for PRIVMSG command.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        route_message(ctx, "PRIVMSG", msg, ErrorStrategy::Reply)
    }
}
