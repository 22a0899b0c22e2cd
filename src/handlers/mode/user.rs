//! User mode handling.

use crate::handlers::{Context, HandlerError, HandlerResult};
use crate::replies::Response;
use tracing::debug;

/// Apply `flags` (if any) to the invoker's own modes.
///
/// Changes are echoed to the invoker alone, followed by RPL_UMODEIS.
/// Unrecognized letters add one ERR_UMODEUNKNOWNFLAG at the end.
pub(super) fn handle_user_mode(
    ctx: &mut Context<'_>,
    target: &str,
    flags: Option<&str>,
) -> HandlerResult {
    if ctx.state.sessions.lookup_nick(target).is_none() {
        return Err(HandlerError::NoSuchNick(target.to_string()));
    }
    if ctx.session()?.nick != target {
        return Err(HandlerError::UsersDontMatch);
    }

    let mut unknown = false;
    if let Some(flags) = flags {
        let session = ctx.session_mut()?;
        let change = session.modes.apply(flags);
        unknown = !change.unknown.is_empty();
        if !change.is_empty() {
            let line = format!(
                ":{} MODE {} :{}",
                session.mask(),
                target,
                change.to_mode_string()
            );
            debug!(id = %ctx.id, applied = %change.to_mode_string(), "User modes changed");
            ctx.send_raw(line);
        }
    }

    let modes = ctx.session()?.modes.as_mode_string();
    ctx.send_reply(Response::RPL_UMODEIS, &modes)?;

    if unknown {
        ctx.send_error(&HandlerError::UmodeUnknownFlag, "MODE")?;
    }
    Ok(())
}
