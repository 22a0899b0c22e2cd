//! Command handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers. It borrows the
//! locked server state for the duration of one command and buffers the
//! replies addressed to the invoking session.

use crate::config::OperBlock;
use crate::error::{HandlerError, HandlerResult};
use crate::message::Message;
use crate::replies::{self, Response};
use crate::state::{ServerInfo, Session, SessionId, State};

/// A command handler.
///
/// Handlers run under the server lock and must not block.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The invoking session.
    pub id: SessionId,
    /// This server's identity.
    pub server: &'a ServerInfo,
    /// Operator credentials.
    pub opers: &'a [OperBlock],
    /// Registries, locked for the whole command.
    pub state: &'a mut State,
    replies: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(
        id: SessionId,
        server: &'a ServerInfo,
        opers: &'a [OperBlock],
        state: &'a mut State,
    ) -> Self {
        Self {
            id,
            server,
            opers,
            state,
            replies: Vec::new(),
        }
    }

    #[inline]
    pub fn server_name(&self) -> &str {
        &self.server.name
    }

    /// The invoking session.
    pub fn session(&self) -> Result<&Session, HandlerError> {
        self.state
            .sessions
            .get(self.id)
            .ok_or_else(|| HandlerError::Internal(format!("session {} vanished", self.id)))
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, HandlerError> {
        let id = self.id;
        self.state
            .sessions
            .get_mut(id)
            .ok_or_else(|| HandlerError::Internal(format!("session {id} vanished")))
    }

    pub fn is_registered(&self) -> bool {
        self.session().is_ok_and(Session::is_registered)
    }

    /// Current nick of the invoker, `*` before NICK.
    pub fn nick(&self) -> Result<String, HandlerError> {
        Ok(self.session()?.nick_or_star().to_string())
    }

    /// `nick!~user@host` of the invoker.
    pub fn mask(&self) -> Result<String, HandlerError> {
        Ok(self.session()?.mask())
    }

    /// Queue a numeric reply to the invoker.
    pub fn send_reply(&mut self, response: Response, text: &str) -> HandlerResult {
        let line = replies::create_reply(
            &self.server.name,
            self.session()?,
            response.name(),
            Some(text),
        );
        self.replies.push(line);
        Ok(())
    }

    /// Queue a catalog reply with its template filled from `values`.
    pub fn send_filled(&mut self, response: Response, values: &[(&str, &str)]) -> HandlerResult {
        self.send_reply(response, &response.fill(values))
    }

    /// Queue the numeric for `error` without aborting the command.
    ///
    /// Used by handlers that process a list of targets and must keep going
    /// after one fails.
    pub fn send_error(&mut self, error: &HandlerError, command: &str) -> HandlerResult {
        let line = error.to_reply(&self.server.name, self.session()?, command);
        self.replies.push(line);
        Ok(())
    }

    /// Queue a preformatted line to the invoker.
    pub fn send_raw(&mut self, line: impl Into<String>) {
        self.replies.push(line.into());
    }

    /// Replies queued so far, in order.
    pub fn into_replies(self) -> Vec<String> {
        self.replies
    }
}
