//! Reply helpers shared by the channel handlers.

use crate::handlers::{Context, HandlerError, HandlerResult};
use crate::replies::Response;

/// Queue RPL_TOPIC, or RPL_NOTOPIC when the topic is empty.
pub(super) fn send_topic(ctx: &mut Context<'_>, channel: &str) -> HandlerResult {
    let (name, topic) = {
        let channel = ctx
            .state
            .channels
            .lookup(channel)
            .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))?;
        (channel.name.clone(), channel.topic.clone())
    };

    if topic.is_empty() {
        ctx.send_filled(Response::RPL_NOTOPIC, &[("<channel>", name.as_str())])
    } else {
        ctx.send_filled(
            Response::RPL_TOPIC,
            &[("<channel>", name.as_str()), ("<topic>", topic.as_str())],
        )
    }
}

/// Queue one RPL_NAMREPLY listing every member with its `@`/`+` prefix.
pub(super) fn send_namreply(ctx: &mut Context<'_>, channel: &str) -> HandlerResult {
    let (kind, name, names) = {
        let sessions = &ctx.state.sessions;
        let channel = ctx
            .state
            .channels
            .lookup(channel)
            .ok_or_else(|| HandlerError::NoSuchChannel(channel.to_string()))?;
        let names: Vec<String> = channel
            .members
            .iter()
            .filter_map(|id| sessions.get(*id))
            .map(|s| format!("{}{}", channel.prefix_for(&s.nick), s.nick))
            .collect();
        (channel.names_type(), channel.name.clone(), names.join(" "))
    };

    ctx.send_filled(
        Response::RPL_NAMREPLY,
        &[
            ("<type>", kind),
            ("<channel>", name.as_str()),
            ("<names>", names.as_str()),
        ],
    )
}

pub(super) fn send_endofnames(ctx: &mut Context<'_>, channel: &str) -> HandlerResult {
    ctx.send_filled(Response::RPL_ENDOFNAMES, &[("<channel>", channel)])
}

/// Whether the invoker may see `channel` in NAMES and LIST.
pub(super) fn is_visible(ctx: &Context<'_>, channel: &str) -> bool {
    ctx.state
        .channels
        .lookup(channel)
        .is_some_and(|c| !c.is_hidden() || c.is_member(ctx.id))
}

/// Part reason, defaulting to the parting nick.
pub(super) fn part_reason<'m>(reason: Option<&'m str>, nick: &'m str) -> &'m str {
    reason.filter(|r| !r.is_empty()).unwrap_or(nick)
}
