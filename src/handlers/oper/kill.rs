//! KILL command handler.
//!
//! `KILL <nickname> [:<reason>]`
//!
//! Disconnects a user. Requires operator privileges.

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use tracing::info;

/// Handler for KILL command.
pub struct KillHandler;

impl Handler for KillHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target = msg
            .arg(0)
            .filter(|t| !t.is_empty())
            .ok_or(HandlerError::NeedMoreParams)?;
        let reason = msg.arg(1).unwrap_or("No reason given");

        let (mask, killer, is_oper) = {
            let session = ctx.session()?;
            (session.mask(), session.nick.clone(), session.modes.operator)
        };
        if !is_oper {
            return Err(HandlerError::NoPrivileges);
        }

        let target_id = ctx
            .state
            .sessions
            .lookup_nick(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;

        ctx.send_raw(format!(":{mask} KILL {target} :{reason}"));

        let quit_reason = format!("Killed by {killer} ({reason})");
        ctx.state.teardown(target_id, &quit_reason);
        info!(killer = %killer, target = %target, reason = %reason, "User killed");
        Ok(())
    }
}
