//! TIME command handler.
//!
//! `TIME [target]`
//!
//! Returns the local time on the server.

use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use crate::replies::Response;

/// Handler for TIME command.
pub struct TimeHandler;

impl Handler for TimeHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let server_name = ctx.server_name().to_string();

        // RPL_TIME (391): <server> :<string showing server's local time>
        let now = chrono::Local::now();
        let time_string = now.format("%A %B %d %Y -- %H:%M:%S %z").to_string();

        ctx.send_filled(
            Response::RPL_TIME,
            &[
                ("<server>", server_name.as_str()),
                ("<time>", time_string.as_str()),
            ],
        )
    }
}
