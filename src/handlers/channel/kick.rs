//! KICK command handler.
//!
//! `KICK <channel> <nick> [:<reason>]`

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use tracing::info;

/// Handler for KICK command.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(channel), Some(target)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        let channel = channel.to_ascii_lowercase();
        let (mask, nick) = {
            let session = ctx.session()?;
            (session.mask(), session.nick.clone())
        };
        let reason = msg.arg(2).filter(|r| !r.is_empty()).unwrap_or(&nick);

        let target_id = {
            let chan = ctx
                .state
                .channels
                .lookup(&channel)
                .ok_or_else(|| HandlerError::NoSuchChannel(channel.clone()))?;
            if !chan.is_operator(&nick) {
                return Err(HandlerError::ChanOpPrivsNeeded(channel));
            }
            ctx.state
                .sessions
                .lookup_nick(target)
                .filter(|id| chan.is_member(*id))
                .ok_or_else(|| HandlerError::UserNotInChannel {
                    nick: target.to_string(),
                    channel: channel.clone(),
                })?
        };

        let line = format!(":{mask} KICK {channel} {target} :{reason}");
        ctx.state
            .channels
            .unsubscribe(&mut ctx.state.sessions, &channel, target_id, &line, None)
            .map_err(|e| e.on(&channel))?;

        info!(channel = %channel, by = %nick, target = %target, "User kicked");
        Ok(())
    }
}
