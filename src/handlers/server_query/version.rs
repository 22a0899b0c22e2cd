//! VERSION command handler.
//!
//! `VERSION [target]`
//!
//! Returns the version of the server.

use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use crate::replies::Response;

/// Handler for VERSION command.
pub struct VersionHandler;

impl Handler for VersionHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let info = ctx.server;

        // RPL_VERSION (351): <version>. <server> :<comments>
        ctx.send_filled(
            Response::RPL_VERSION,
            &[
                ("<version>", info.version.as_str()),
                ("<server>", info.name.as_str()),
                ("<comments>", info.description.as_str()),
            ],
        )
    }
}
