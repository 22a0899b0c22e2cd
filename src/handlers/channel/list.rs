//! LIST command handler.
//!
//! `LIST [<channels>]`

use super::common::is_visible;
use crate::handlers::helpers::parse_list;
use crate::handlers::{Context, Handler, HandlerResult};
use crate::message::Message;
use crate::replies::Response;

/// Handler for LIST command.
pub struct ListHandler;

impl Handler for ListHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let wanted: Option<Vec<String>> = msg
            .arg(0)
            .map(|targets| parse_list(targets).map(str::to_ascii_lowercase).collect());

        let entries: Vec<(String, String, String)> = ctx
            .state
            .channels
            .iter()
            .filter(|c| wanted.as_ref().is_none_or(|w| w.contains(&c.name)))
            .filter(|c| is_visible(ctx, &c.name))
            .map(|c| (c.name.clone(), c.members.len().to_string(), c.topic.clone()))
            .collect();

        ctx.send_reply(Response::RPL_LISTSTART, Response::RPL_LISTSTART.template())?;
        for (name, count, topic) in entries {
            ctx.send_filled(
                Response::RPL_LIST,
                &[
                    ("<channel>", name.as_str()),
                    ("<# visible>", count.as_str()),
                    ("<topic>", topic.as_str()),
                ],
            )?;
        }
        ctx.send_reply(Response::RPL_LISTEND, Response::RPL_LISTEND.template())
    }
}
