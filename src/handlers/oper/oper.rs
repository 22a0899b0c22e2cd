//! OPER command handler.
//!
//! `OPER <name> <password>`
//!
//! Grants `+o` when the credentials match an `[[oper]]` block.

use crate::config::authenticate;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;
use crate::replies::Response;
use tracing::{info, warn};

/// Handler for OPER command.
pub struct OperHandler;

impl Handler for OperHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let (Some(name), Some(password)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };

        if authenticate(ctx.opers, name, password).is_none() {
            warn!(id = %ctx.id, nick = %ctx.nick()?, oper = %name, "Failed OPER attempt");
            return Err(HandlerError::PasswdMismatch);
        }

        ctx.session_mut()?.modes.operator = true;
        info!(id = %ctx.id, nick = %ctx.nick()?, oper = %name, "Operator authenticated");

        ctx.send_reply(Response::RPL_YOUREOPER, Response::RPL_YOUREOPER.template())
    }
}
