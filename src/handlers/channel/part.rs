//! PART command handler.
//!
//! `PART <channels> [:<reason>]`
//!
//! The PART line reaches every member, the parting session included, before
//! membership is dropped. A channel left empty is destroyed.

use super::common::part_reason;
use crate::handlers::helpers::parse_list;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use tracing::debug;

/// Handler for PART command.
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PART <channels> [reason]
        let targets = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let (mask, nick) = {
            let session = ctx.session()?;
            (session.mask(), session.nick.clone())
        };
        let reason = part_reason(msg.arg(1), &nick);

        for name in parse_list(targets) {
            let name = name.to_ascii_lowercase();
            let line = format!(":{mask} PART {name} :{reason}");
            match ctx
                .state
                .channels
                .unsubscribe(&mut ctx.state.sessions, &name, ctx.id, &line, None)
            {
                Ok(()) => debug!(id = %ctx.id, channel = %name, "Parted channel"),
                Err(e) => ctx.send_error(&e.on(&name), "PART")?,
            }
        }
        Ok(())
    }
}
