//! TOPIC command handler.
//!
//! `TOPIC <channel> [:<topic>]`
//!
//! Without a topic argument this is a query. Setting requires membership,
//! and channel operator when the channel is `+t`.

use super::common::send_topic;
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use crate::message::Message;

/// Handler for TOPIC command.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let channel = msg
            .arg(0)
            .ok_or(HandlerError::NeedMoreParams)?
            .to_ascii_lowercase();
        let (mask, nick) = {
            let session = ctx.session()?;
            (session.mask(), session.nick.clone())
        };

        {
            let chan = ctx
                .state
                .channels
                .lookup(&channel)
                .ok_or_else(|| HandlerError::NoSuchChannel(channel.clone()))?;
            if !chan.is_member(ctx.id) {
                return Err(HandlerError::NotOnChannel(channel));
            }
        }

        let Some(topic) = msg.arg(1) else {
            return send_topic(ctx, &channel);
        };

        if let Some(chan) = ctx.state.channels.lookup_mut(&channel) {
            if chan.modes.topic_locked && !chan.is_operator(&nick) {
                return Err(HandlerError::ChanOpPrivsNeeded(channel));
            }
            chan.topic = topic.to_string();
        }
        ctx.state.channels.broadcast(
            &ctx.state.sessions,
            &channel,
            &format!(":{mask} TOPIC {channel} :{topic}"),
            None,
        );
        Ok(())
    }
}
