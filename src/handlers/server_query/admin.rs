//! ADMIN command handler.
//!
//! `ADMIN [target]`
//!
//! Returns administrative information about the server, from the
//! `[server]` config block.

use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use crate::replies::Response;

/// Handler for ADMIN command.
pub struct AdminHandler;

impl Handler for AdminHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let info = ctx.server;

        // RPL_ADMINME (256): <server> :Administrative info
        ctx.send_filled(Response::RPL_ADMINME, &[("<server>", info.name.as_str())])?;

        for (response, value) in [
            (Response::RPL_ADMINLOC1, &info.admin_info1),
            (Response::RPL_ADMINLOC2, &info.admin_info2),
            (Response::RPL_ADMINEMAIL, &info.admin_email),
        ] {
            ctx.send_filled(response, &[("<admin info>", value.as_str())])?;
        }
        Ok(())
    }
}
