//! USER command handler.
//!
//! `USER <username> <mode> <unused> <realname>`

use super::welcome::try_complete_registration;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use tracing::debug;

/// Handler for USER command.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if msg.params.len() < 4 {
            return Err(HandlerError::NeedMoreParams);
        }
        if ctx.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }

        let session = ctx.session_mut()?;
        session.username = msg.params[0].clone();
        session.realname = msg.params[3].clone();
        debug!(id = %ctx.id, user = %msg.params[0], "User info set");

        try_complete_registration(ctx)
    }
}
