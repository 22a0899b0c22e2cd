//! NAMES command handler.
//!
//! `NAMES [<channels>]`
//!
//! Hidden (`+p`/`+s`) channels are only listed to their members.

use super::common::{is_visible, send_endofnames, send_namreply};
use crate::handlers::helpers::parse_list;
use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;

/// Handler for NAMES command.
pub struct NamesHandler;

impl Handler for NamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match msg.arg(0) {
            Some(targets) => {
                for name in parse_list(targets) {
                    let name = name.to_ascii_lowercase();
                    if is_visible(ctx, &name) {
                        send_namreply(ctx, &name)?;
                    }
                    send_endofnames(ctx, &name)?;
                }
            }
            None => {
                let visible: Vec<String> = ctx
                    .state
                    .channels
                    .iter()
                    .map(|c| c.name.clone())
                    .filter(|name| is_visible(ctx, name))
                    .collect();
                for name in visible {
                    send_namreply(ctx, &name)?;
                }
                send_endofnames(ctx, "*")?;
            }
        }
        Ok(())
    }
}
