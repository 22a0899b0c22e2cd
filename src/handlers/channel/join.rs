//! JOIN command handler.
//!
//! `JOIN <channels> [<keys>]` or `JOIN 0`
//!
//! - Channels and keys are comma lists, matched by position
//! - Names with spaces, control characters or over 50 bytes are refused
//! - Invite-only, key and limit are checked before membership changes
//! - The first joiner creates the channel and becomes its operator
//! - `JOIN 0` parts every joined channel

use super::common::{part_reason, send_endofnames, send_namreply, send_topic};
use crate::handlers::helpers::{is_valid_channel_name, parse_list};
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use crate::replies::Response;
use crate::state::JoinOutcome;
use tracing::debug;

/// Handler for JOIN command.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let targets = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        if targets == "0" {
            return part_all(ctx);
        }

        let keys: Vec<&str> = msg.arg(1).map(|k| k.split(',').collect()).unwrap_or_default();

        for (index, name) in parse_list(targets).enumerate() {
            let key = keys.get(index).copied().filter(|k| !k.is_empty());
            match join_channel(ctx, name, key) {
                Ok(()) => {}
                Err(e @ HandlerError::Internal(_)) => return Err(e),
                // Keep going through the rest of the list.
                Err(e) => ctx.send_error(&e, "JOIN")?,
            }
        }
        Ok(())
    }
}

fn join_channel(ctx: &mut Context<'_>, name: &str, key: Option<&str>) -> HandlerResult {
    let name = name.to_ascii_lowercase();
    if !is_valid_channel_name(&name) {
        return Err(HandlerError::NoSuchChannel(name));
    }

    let outcome = ctx
        .state
        .channels
        .subscribe(&mut ctx.state.sessions, &name, ctx.id, key)
        .map_err(|e| e.on(&name))?;

    let JoinOutcome::Joined { created } = outcome else {
        debug!(id = %ctx.id, channel = %name, "Already a member");
        return Ok(());
    };
    debug!(id = %ctx.id, channel = %name, created, "Joined channel");

    send_topic(ctx, &name)?;
    send_namreply(ctx, &name)?;
    send_endofnames(ctx, &name)?;

    let created_at = ctx
        .state
        .channels
        .lookup(&name)
        .map(|c| c.created_at.to_string())
        .unwrap_or_default();
    ctx.send_filled(
        Response::RPL_CREATIONTIME,
        &[
            ("<channel>", name.as_str()),
            ("<creation time>", created_at.as_str()),
        ],
    )
}

/// `JOIN 0`: leave every channel, announcing each PART.
fn part_all(ctx: &mut Context<'_>) -> HandlerResult {
    let (mask, nick, joined) = {
        let session = ctx.session()?;
        let joined: Vec<String> = session.channels.iter().cloned().collect();
        (session.mask(), session.nick.clone(), joined)
    };
    let reason = part_reason(None, &nick);

    for name in joined {
        let line = format!(":{mask} PART {name} :{reason}");
        ctx.state
            .channels
            .unsubscribe(&mut ctx.state.sessions, &name, ctx.id, &line, None)
            .map_err(|e| e.on(&name))?;
    }
    Ok(())
}
