//! PASS command handler.
//!
//! `PASS <password>`
//!
//! The password is kept on the session but never checked.

use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;

/// Handler for PASS command.
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let password = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        if ctx.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }
        ctx.session_mut()?.password = Some(password.to_string());
        Ok(())
    }
}
