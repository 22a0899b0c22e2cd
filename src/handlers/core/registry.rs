//! Command handler registry and dispatch.
//!
//! The `Registry` maps command names to handlers, enforces the registration
//! gate and turns handler errors into numeric replies.

use super::context::{Context, Handler};
use crate::error::HandlerError;
use crate::handlers::{
    channel::{
        InviteHandler, JoinHandler, KickHandler, ListHandler, NamesHandler, PartHandler,
        TopicHandler,
    },
    connection::{NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler},
    helpers::is_channel_name,
    messaging::{NoticeHandler, PrivmsgHandler},
    mode::ModeHandler,
    oper::{KillHandler, OperHandler},
    server_query::{AdminHandler, InfoHandler, TimeHandler, VersionHandler},
    user_query::{WhoHandler, WhoisHandler},
};
use crate::message::Message;
use crate::telemetry::spans;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// Commands an unregistered session may run.
const PRE_REGISTRATION: &[&str] = &["NICK", "USER", "PASS", "QUIT", "PING", "PONG"];

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection/registration handlers
        handlers.insert("NICK", Box::new(NickHandler));
        handlers.insert("USER", Box::new(UserHandler));
        handlers.insert("PASS", Box::new(PassHandler));
        handlers.insert("PING", Box::new(PingHandler));
        handlers.insert("PONG", Box::new(PongHandler));
        handlers.insert("QUIT", Box::new(QuitHandler));

        // Channel handlers
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PART", Box::new(PartHandler));
        handlers.insert("TOPIC", Box::new(TopicHandler));
        handlers.insert("NAMES", Box::new(NamesHandler));
        handlers.insert("MODE", Box::new(ModeHandler));
        handlers.insert("KICK", Box::new(KickHandler));
        handlers.insert("LIST", Box::new(ListHandler));
        handlers.insert("INVITE", Box::new(InviteHandler));

        // Messaging handlers
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        handlers.insert("NOTICE", Box::new(NoticeHandler));

        // User query handlers
        handlers.insert("WHO", Box::new(WhoHandler));
        handlers.insert("WHOIS", Box::new(WhoisHandler));

        // Server query handlers
        handlers.insert("VERSION", Box::new(VersionHandler));
        handlers.insert("TIME", Box::new(TimeHandler));
        handlers.insert("ADMIN", Box::new(AdminHandler));
        handlers.insert("INFO", Box::new(InfoHandler));

        // Operator handlers
        handlers.insert("OPER", Box::new(OperHandler));
        handlers.insert("KILL", Box::new(KillHandler));

        Self { handlers }
    }

    /// Whether `command` (any case) has a handler.
    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command.to_ascii_uppercase().as_str())
    }

    /// Dispatch a message to the appropriate handler.
    ///
    /// Every failure becomes exactly one numeric queued on `ctx`. Internal
    /// errors and handler panics are logged and answered with a generic
    /// error; they never take the connection down.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) {
        let cmd_name = msg.command_name();

        let Some(handler) = self.handlers.get(cmd_name.as_str()) else {
            debug!(command = %cmd_name, id = %ctx.id, "Unknown command");
            reply_error(ctx, &HandlerError::UnknownCommand(cmd_name.clone()), &cmd_name);
            return;
        };

        if !ctx.is_registered() && !PRE_REGISTRATION.contains(&cmd_name.as_str()) {
            reply_error(ctx, &HandlerError::NotRegistered, &cmd_name);
            return;
        }

        let source = ctx.nick().unwrap_or_else(|_| ctx.id.to_string());
        let target = msg.arg(0).filter(|a| is_channel_name(a));
        let span = spans::command(&cmd_name, &source, target);
        let _enter = span.enter();

        let result = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(ctx, msg)))
            .unwrap_or_else(|payload| {
                Err(HandlerError::Internal(panic_message(payload.as_ref())))
            });

        if let Err(e) = result {
            if let HandlerError::Internal(detail) = &e {
                error!(command = %cmd_name, id = %ctx.id, detail = %detail, "Command failed");
            } else {
                debug!(command = %cmd_name, error = %e, code = e.error_code(), "Command error");
            }
            reply_error(ctx, &e, &cmd_name);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn reply_error(ctx: &mut Context<'_>, error: &HandlerError, command: &str) {
    // The session may have been torn down by the failing command.
    if ctx.send_error(error, command).is_err() {
        debug!(id = %ctx.id, command = %command, "No session left to receive error");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
