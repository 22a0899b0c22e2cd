//! NOTICE command handler.
//!
//! `NOTICE <targets> :<text>`
//!
//! Routed exactly like PRIVMSG, but never answered with an error.

use super::common::{ErrorStrategy, route_message};
use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;

/// Handler for NOTICE command.
pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        route_message(ctx, "NOTICE", msg, ErrorStrategy::Silent)
    }
}
