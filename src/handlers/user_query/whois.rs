//! WHOIS command handler.
//!
//! `WHOIS <masks>`
//!
//! Masks are comma separated and may contain `*`/`?` globs, which expand
//! against the nick table. Invisible users are skipped without an error.

use crate::handlers::helpers::{matches_mask, parse_list};
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use crate::replies::Response;
use crate::state::SessionId;
use std::collections::BTreeMap;

/// Handler for WHOIS command.
pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let masks = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        // Keyed by nick so each user is reported once, in order.
        let mut found: BTreeMap<String, SessionId> = BTreeMap::new();
        for mask in parse_list(masks) {
            if mask.contains(['*', '?']) {
                found.extend(
                    ctx.state
                        .sessions
                        .registered()
                        .filter(|s| matches_mask(mask, &s.nick))
                        .map(|s| (s.nick.clone(), s.id)),
                );
            } else if let Some(id) = ctx.state.sessions.lookup_nick(mask) {
                found.insert(mask.to_string(), id);
            }
        }

        for id in found.into_values() {
            send_whois(ctx, id)?;
        }
        Ok(())
    }
}

fn send_whois(ctx: &mut Context<'_>, id: SessionId) -> HandlerResult {
    let Some(session) = ctx.state.sessions.get(id) else {
        return Ok(());
    };
    if session.modes.invisible {
        return Ok(());
    }

    let nick = session.nick.clone();
    let user = session.username.clone();
    let host = session.hostname.clone();
    let realname = session.realname.clone();
    let operator = session.modes.operator;
    let channels = session
        .channels
        .iter()
        .filter_map(|name| ctx.state.channels.lookup(name))
        .map(|c| format!("{}{}", c.prefix_for(&nick), c.name))
        .collect::<Vec<_>>()
        .join(" ");

    ctx.send_filled(
        Response::RPL_WHOISUSER,
        &[
            ("<nick>", nick.as_str()),
            ("<user>", user.as_str()),
            ("<host>", host.as_str()),
            ("<real name>", realname.as_str()),
        ],
    )?;
    ctx.send_filled(
        Response::RPL_WHOISCHANNELS,
        &[("<nick>", nick.as_str()), ("<channels>", channels.as_str())],
    )?;
    if operator {
        ctx.send_filled(Response::RPL_WHOISOPERATOR, &[("<nick>", nick.as_str())])?;
    }
    ctx.send_filled(Response::RPL_ENDOFWHOIS, &[("<nick>", nick.as_str())])
}
