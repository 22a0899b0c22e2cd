//! INVITE command handler.
//!
//! `INVITE <nick> <channel>`
//!
//! Records the nick in the channel's invited set so it can pass `+i`.
//! Only channel operators may invite into a `+i` channel.

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use crate::replies::Response;
use tracing::debug;

/// Handler for INVITE command.
pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(target), Some(channel)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        let channel = channel.to_ascii_lowercase();
        let (mask, nick) = {
            let session = ctx.session()?;
            (session.mask(), session.nick.clone())
        };

        let target_id = ctx
            .state
            .sessions
            .lookup_nick(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;

        let chan = ctx
            .state
            .channels
            .lookup_mut(&channel)
            .ok_or_else(|| HandlerError::NoSuchChannel(channel.clone()))?;
        if !chan.is_member(ctx.id) {
            return Err(HandlerError::NotOnChannel(channel));
        }
        if chan.is_member(target_id) {
            return Err(HandlerError::UserOnChannel {
                nick: target.to_string(),
                channel,
            });
        }
        if chan.modes.invite_only && !chan.is_operator(&nick) {
            return Err(HandlerError::ChanOpPrivsNeeded(channel));
        }
        chan.modes.invited.insert(target.to_string());

        if let Some(session) = ctx.state.sessions.get(target_id) {
            session.send(format!(":{mask} INVITE {target} :{channel}"));
        }
        debug!(channel = %channel, by = %nick, target = %target, "Invite recorded");

        ctx.send_filled(
            Response::RPL_INVITING,
            &[("<channel>", channel.as_str()), ("<nick>", target)],
        )
    }
}
