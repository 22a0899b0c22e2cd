//! Channel mode handling.

use crate::handlers::{Context, HandlerError, HandlerResult};
use crate::replies::Response;
use tracing::debug;

/// Apply `flags` (if any) to `target`, then report the resulting modes.
///
/// The registry checks operator status and broadcasts the applied change
/// to the channel; the invoker always gets RPL_CHANNELMODEIS afterwards.
pub(super) fn handle_channel_mode(
    ctx: &mut Context<'_>,
    target: &str,
    flags: Option<&str>,
    params: &[String],
) -> HandlerResult {
    let channel = target.to_ascii_lowercase();
    if ctx.state.channels.lookup(&channel).is_none() {
        return Err(HandlerError::NoSuchChannel(channel));
    }

    if let Some(flags) = flags {
        let change = ctx
            .state
            .channels
            .set_modes(&ctx.state.sessions, &channel, ctx.id, flags, params)
            .map_err(|e| e.on(&channel))?;
        debug!(
            channel = %channel,
            applied = %change.to_mode_string(),
            unknown = ?change.unknown,
            consumed = change.consumed,
            "Channel modes changed"
        );
    }

    let modes = ctx
        .state
        .channels
        .lookup(&channel)
        .map(|c| c.modes.as_mode_string())
        .unwrap_or_default();
    ctx.send_filled(
        Response::RPL_CHANNELMODEIS,
        &[("<channel>", channel.as_str()), ("<mode>", modes.as_str())],
    )
}
