//! Message routing shared by PRIVMSG and NOTICE.

use crate::handlers::helpers::{is_channel_name, parse_list};
use crate::handlers::{Context, HandlerError, HandlerResult};
use crate::message::Message;
use tracing::debug;

/// What to do when one target of a message fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ErrorStrategy {
    /// Send the numeric back and continue with the next target.
    Reply,
    /// Drop silently.
    Silent,
}

/// Route `msg` to each of its comma-separated targets.
pub(super) fn route_message(
    ctx: &mut Context<'_>,
    command: &str,
    msg: &Message,
    strategy: ErrorStrategy,
) -> HandlerResult {
    let (targets, text) = match split_message(msg) {
        Ok(parts) => parts,
        Err(e) if strategy == ErrorStrategy::Silent => {
            debug!(command = %command, error = %e, "Dropping malformed message");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let mask = ctx.mask()?;
    for target in parse_list(targets) {
        let line = format!(":{mask} {command} {target} :{text}");
        match deliver(ctx, target, &line) {
            Ok(()) => {}
            Err(e @ HandlerError::Internal(_)) => return Err(e),
            Err(e) => match strategy {
                ErrorStrategy::Reply => ctx.send_error(&e, command)?,
                ErrorStrategy::Silent => {
                    debug!(
                        command = %command,
                        target = %target,
                        error = %e,
                        "Message not delivered"
                    );
                }
            },
        }
    }
    Ok(())
}

/// `<command> <targets> :<text>`
fn split_message(msg: &Message) -> Result<(&str, &str), HandlerError> {
    let targets = msg
        .arg(0)
        .filter(|t| !t.is_empty())
        .ok_or(HandlerError::NoRecipient)?;
    let text = msg
        .arg(1)
        .filter(|t| !t.is_empty())
        .ok_or(HandlerError::NoTextToSend)?;
    Ok((targets, text))
}

/// Channel first, then nick.
fn deliver(ctx: &mut Context<'_>, target: &str, line: &str) -> HandlerResult {
    if is_channel_name(target)
        && let Some(channel) = ctx.state.channels.lookup(target)
    {
        let nick = &ctx.session()?.nick;
        let member = channel.is_member(ctx.id);
        if channel.modes.no_external && !member {
            return Err(HandlerError::CannotSendToChan(channel.name.clone()));
        }
        if channel.modes.moderated && !(channel.is_operator(nick) || channel.is_voiced(nick)) {
            return Err(HandlerError::CannotSendToChan(channel.name.clone()));
        }
        ctx.state
            .channels
            .broadcast(&ctx.state.sessions, target, line, Some(ctx.id));
        return Ok(());
    }

    let session = ctx
        .state
        .sessions
        .find_by_nick(target)
        .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
    session.send(line);
    Ok(())
}
