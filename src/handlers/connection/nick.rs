//! NICK command handler.
//!
//! `NICK <nickname>`
//!
//! Before registration this records the pending nick and may complete
//! registration. Afterwards it is a live nick change, announced to every
//! session sharing a channel with the changer.

use super::welcome::try_complete_registration;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use tracing::{debug, info};

/// Longest nick accepted, exclusive.
const NICK_LEN_LIMIT: usize = 16;

/// Nick grammar: a letter, then letters, digits or `_`, under 16 bytes.
pub fn is_valid_nick(nick: &str) -> bool {
    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    nick.len() < NICK_LEN_LIMIT
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Handler for NICK command.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // NICK <nickname>
        let nick = msg
            .arg(0)
            .filter(|n| !n.is_empty())
            .ok_or(HandlerError::NoNicknameGiven)?;

        if !is_valid_nick(nick) {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }
        if ctx.state.sessions.nick_in_use(nick, ctx.id) {
            return Err(HandlerError::NicknameInUse(nick.to_string()));
        }

        if ctx.is_registered() {
            return change_nick(ctx, nick);
        }

        ctx.session_mut()?.nick = nick.to_string();
        debug!(id = %ctx.id, nick = %nick, "Nick set");
        try_complete_registration(ctx)
    }
}

fn change_nick(ctx: &mut Context<'_>, nick: &str) -> HandlerResult {
    let old_mask = ctx.mask()?;
    if ctx.session()?.nick == nick {
        return Ok(());
    }

    let old = ctx.state.sessions.rename(ctx.id, nick)?;
    ctx.state
        .channels
        .rename_member(&ctx.state.sessions, ctx.id, &old, nick);
    ctx.state.channels.broadcast_to_peers(
        &ctx.state.sessions,
        ctx.id,
        &format!(":{old_mask} NICK {nick}"),
    );

    info!(id = %ctx.id, old = %old, new = %nick, "Nick changed");
    Ok(())
}
