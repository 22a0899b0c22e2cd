//! INFO command handler.
//!
//! `INFO [target]`

use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use crate::replies::Response;

/// Handler for INFO command.
pub struct InfoHandler;

impl Handler for InfoHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let info = ctx.server;
        let lines = [
            format!("{} {}", info.name, info.version),
            info.description.clone(),
            format!("Online since {}", info.created),
            format!(
                "{} users, {} channels",
                ctx.state.sessions.registered().count(),
                ctx.state.channels.len()
            ),
        ];

        for line in &lines {
            ctx.send_filled(Response::RPL_INFO, &[("<string>", line.as_str())])?;
        }
        ctx.send_reply(Response::RPL_ENDOFINFO, Response::RPL_ENDOFINFO.template())
    }
}
