//! WHO command handler.
//!
//! `WHO [<mask|channel>] [o]`
//!
//! With a channel name, lists that channel's members. Otherwise lists every
//! visible registered user whose nick, username, host or real name matches
//! the mask. A trailing `o` restricts either form to IRC operators.

use crate::handlers::helpers::{is_channel_name, matches_mask};
use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use crate::replies::Response;
use crate::state::{Channel, Session};

/// Handler for WHO command.
pub struct WhoHandler;

/// One RPL_WHOREPLY row.
struct WhoEntry {
    channel: String,
    user: String,
    host: String,
    nick: String,
    flags: String,
    realname: String,
}

impl WhoEntry {
    fn new(session: &Session, channel: Option<&Channel>) -> Self {
        let mut flags = String::from("H");
        if session.modes.operator {
            flags.push('*');
        }
        if let Some(channel) = channel {
            flags.push_str(channel.prefix_for(&session.nick));
        }
        Self {
            channel: channel.map_or_else(|| "*".to_string(), |c| c.name.clone()),
            user: session.username.clone(),
            host: session.hostname.clone(),
            nick: session.nick.clone(),
            flags,
            realname: session.realname.clone(),
        }
    }
}

impl Handler for WhoHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let query = msg.arg(0).filter(|q| !q.is_empty() && *q != "0");
        let ops_only = msg.arg(1) == Some("o");

        let mut entries = match query {
            Some(name) if is_channel_name(name) => channel_members(ctx, name, ops_only),
            _ => matching_users(ctx, query, ops_only),
        };
        entries.sort_by(|a, b| a.nick.cmp(&b.nick));

        let server = ctx.server_name().to_string();
        for entry in entries {
            ctx.send_filled(
                Response::RPL_WHOREPLY,
                &[
                    ("<channel>", entry.channel.as_str()),
                    ("<user>", entry.user.as_str()),
                    ("<host>", entry.host.as_str()),
                    ("<server>", server.as_str()),
                    ("<nick>", entry.nick.as_str()),
                    ("<flags>", entry.flags.as_str()),
                    ("<hopcount>", "0"),
                    ("<real name>", entry.realname.as_str()),
                ],
            )?;
        }

        ctx.send_filled(Response::RPL_ENDOFWHO, &[("<name>", query.unwrap_or("*"))])
    }
}

fn channel_members(ctx: &Context<'_>, name: &str, ops_only: bool) -> Vec<WhoEntry> {
    let Some(channel) = ctx.state.channels.lookup(name) else {
        return Vec::new();
    };
    if channel.is_hidden() && !channel.is_member(ctx.id) {
        return Vec::new();
    }
    channel
        .members
        .iter()
        .filter_map(|id| ctx.state.sessions.get(*id))
        .filter(|s| !ops_only || s.modes.operator)
        .map(|s| WhoEntry::new(s, Some(channel)))
        .collect()
}

fn matching_users(ctx: &Context<'_>, mask: Option<&str>, ops_only: bool) -> Vec<WhoEntry> {
    ctx.state
        .sessions
        .registered()
        .filter(|s| !s.modes.invisible)
        .filter(|s| !ops_only || s.modes.operator)
        .filter(|s| {
            mask.is_none_or(|mask| {
                [&s.nick, &s.username, &s.hostname, &s.realname]
                    .into_iter()
                    .any(|field| matches_mask(mask, field))
            })
        })
        .map(|s| WhoEntry::new(s, None))
        .collect()
}
