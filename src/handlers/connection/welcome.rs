//! Registration completion.

use crate::handlers::{Context, HandlerResult};
use crate::replies;
use tracing::info;

/// Register the session if both NICK and USER have been seen.
///
/// Claims the nick in the registry and queues the 001-004 burst. Does
/// nothing if registration isn't ready or already happened.
pub(super) fn try_complete_registration(ctx: &mut Context<'_>) -> HandlerResult {
    if !ctx.session()?.can_register() {
        return Ok(());
    }

    ctx.state.sessions.complete_registration(ctx.id)?;

    let burst = {
        let session = ctx.session()?;
        info!(
            id = %ctx.id,
            nick = %session.nick,
            user = %session.username,
            addr = %session.remote_addr,
            "Client registered"
        );
        replies::welcome_burst(ctx.server, session)
    };
    for line in burst {
        ctx.send_raw(line);
    }
    Ok(())
}
