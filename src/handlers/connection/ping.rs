//! PING and PONG handlers.

use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PING [<token>] [<nick>]
        let server = ctx.server_name().to_string();
        let token = msg.arg(0).unwrap_or(&server);
        ctx.send_raw(format!(":{server} PONG {server} :{token}"));

        // Relay to a named nick as a liveness check on the peer's behalf.
        if let Some(nick) = msg.arg(1)
            && ctx.is_registered()
            && let Some(target) = ctx.state.sessions.find_by_nick(nick)
        {
            target.send(format!(":{} PING {}", ctx.mask()?, nick));
        }
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        ctx.send_raw("NOTICE AUTH :PONG? PING!");
        Ok(())
    }
}
