//! MODE command handler.
//!
//! Handles both user modes and channel modes.
//!
//! - User modes: `MODE nick [+/-modes]`
//! - Channel modes: `MODE channel [+/-modes [args...]]`

mod channel;
mod user;

use crate::handlers::helpers::is_channel_name;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // MODE <target> [modes [params]]
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        if is_channel_name(target) {
            let params = msg.params.get(2..).unwrap_or_default();
            channel::handle_channel_mode(ctx, target, msg.arg(1), params)
        } else {
            user::handle_user_mode(ctx, target, msg.arg(1))
        }
    }
}
