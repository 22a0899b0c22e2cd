//! QUIT command handler.
//!
//! `QUIT [:<message>]`

use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use tracing::info;

/// Reason used when the client gives none.
const DEFAULT_QUIT_MESSAGE: &str = "Client Quit";

/// Handler for QUIT command.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = msg.arg(0).unwrap_or(DEFAULT_QUIT_MESSAGE);
        info!(id = %ctx.id, nick = %ctx.nick()?, message = %reason, "Client quit");

        // Teardown broadcasts the QUIT and closes the sink; a second QUIT
        // finds the session gone and does nothing.
        ctx.state.teardown(ctx.id, reason);
        Ok(())
    }
}
