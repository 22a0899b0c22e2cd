//! Unified error handling for ircserv.
//!
//! Every protocol failure a handler can hit is a [`HandlerError`] variant,
//! and each one maps to exactly one numeric reply.

use crate::replies::{self, Response};
use crate::state::Session;
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("not registered")]
    NotRegistered,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("unknown user mode flag")]
    UmodeUnknownFlag,

    #[error("not channel operator on {0}")]
    ChanOpPrivsNeeded(String),

    #[error("not an IRC operator")]
    NoPrivileges,

    #[error("password mismatch")]
    PasswdMismatch,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("not on channel {0}")]
    NotOnChannel(String),

    #[error("{nick} is not on {channel}")]
    UserNotInChannel { nick: String, channel: String },

    #[error("{nick} is already on {channel}")]
    UserOnChannel { nick: String, channel: String },

    #[error("cannot join {0} (+i)")]
    InviteOnlyChan(String),

    #[error("cannot join {0} (+k)")]
    BadChannelKey(String),

    #[error("cannot join {0} (+l)")]
    ChannelIsFull(String),

    #[error("no recipient given")]
    NoRecipient,

    #[error("no text to send")]
    NoTextToSend,

    #[error("cannot send to {0}")]
    CannotSendToChan(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::AlreadyRegistered => "already_registered",
            Self::NotRegistered => "not_registered",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::UsersDontMatch => "users_dont_match",
            Self::UmodeUnknownFlag => "umode_unknown_flag",
            Self::ChanOpPrivsNeeded(_) => "chanop_privs_needed",
            Self::NoPrivileges => "no_privileges",
            Self::PasswdMismatch => "passwd_mismatch",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotOnChannel(_) => "not_on_channel",
            Self::UserNotInChannel { .. } => "user_not_in_channel",
            Self::UserOnChannel { .. } => "user_on_channel",
            Self::InviteOnlyChan(_) => "invite_only_chan",
            Self::BadChannelKey(_) => "bad_channel_key",
            Self::ChannelIsFull(_) => "channel_is_full",
            Self::NoRecipient => "no_recipient",
            Self::NoTextToSend => "no_text_to_send",
            Self::CannotSendToChan(_) => "cannot_send_to_chan",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Errors an unregistered client is allowed to see.
    ///
    /// Everything else is replaced by the not-registered line.
    pub fn bypasses_registration(&self) -> bool {
        matches!(
            self,
            Self::NeedMoreParams
                | Self::AlreadyRegistered
                | Self::NoNicknameGiven
                | Self::ErroneousNickname(_)
                | Self::NicknameInUse(_)
        )
    }

    /// Catalog entry and filled text for this error.
    pub fn response(&self, command: &str) -> (Response, String) {
        fn r(response: Response, values: &[(&str, &str)]) -> (Response, String) {
            (response, response.fill(values))
        }

        match self {
            Self::NeedMoreParams => r(Response::ERR_NEEDMOREPARAMS, &[("<command>", command)]),
            Self::AlreadyRegistered => r(Response::ERR_ALREADYREGISTRED, &[]),
            Self::NotRegistered => r(Response::ERR_NOTREGISTERED, &[]),
            Self::NoNicknameGiven => r(Response::ERR_NONICKNAMEGIVEN, &[]),
            Self::ErroneousNickname(nick) => {
                r(Response::ERR_ERRONEUSNICKNAME, &[("<nick>", nick.as_str())])
            }
            Self::NicknameInUse(nick) => {
                r(Response::ERR_NICKNAMEINUSE, &[("<nick>", nick.as_str())])
            }
            Self::UsersDontMatch => r(Response::ERR_USERSDONTMATCH, &[]),
            Self::UmodeUnknownFlag => r(Response::ERR_UMODEUNKNOWNFLAG, &[]),
            Self::ChanOpPrivsNeeded(chan) => {
                r(Response::ERR_CHANOPRIVSNEEDED, &[("<channel>", chan.as_str())])
            }
            Self::NoPrivileges => r(Response::ERR_NOPRIVILEGES, &[]),
            Self::PasswdMismatch => r(Response::ERR_PASSWDMISMATCH, &[]),
            Self::NoSuchNick(nick) => r(Response::ERR_NOSUCHNICK, &[("<nickname>", nick.as_str())]),
            Self::NoSuchChannel(chan) => {
                r(Response::ERR_NOSUCHCHANNEL, &[("<channel name>", chan.as_str())])
            }
            Self::NotOnChannel(chan) => {
                r(Response::ERR_NOTONCHANNEL, &[("<channel>", chan.as_str())])
            }
            Self::UserNotInChannel { nick, channel } => r(
                Response::ERR_USERNOTINCHANNEL,
                &[("<nick>", nick.as_str()), ("<channel>", channel.as_str())],
            ),
            Self::UserOnChannel { nick, channel } => r(
                Response::ERR_USERONCHANNEL,
                &[("<user>", nick.as_str()), ("<channel>", channel.as_str())],
            ),
            Self::InviteOnlyChan(chan) => {
                r(Response::ERR_INVITEONLYCHAN, &[("<channel>", chan.as_str())])
            }
            Self::BadChannelKey(chan) => {
                r(Response::ERR_BADCHANNELKEY, &[("<channel>", chan.as_str())])
            }
            Self::ChannelIsFull(chan) => {
                r(Response::ERR_CHANNELISFULL, &[("<channel>", chan.as_str())])
            }
            Self::NoRecipient => r(Response::ERR_NORECIPIENT, &[("<command>", command)]),
            Self::NoTextToSend => r(Response::ERR_NOTEXTTOSEND, &[]),
            Self::CannotSendToChan(chan) => {
                r(Response::ERR_CANNOTSENDTOCHAN, &[("<channel name>", chan.as_str())])
            }
            Self::UnknownCommand(cmd) => {
                r(Response::ERR_UNKNOWNCOMMAND, &[("<command>", cmd.as_str())])
            }
            Self::Internal(_) => r(
                Response::ERR_UNKNOWNERROR,
                &[("<command>", command), ("<info>", "Internal server error")],
            ),
        }
    }

    /// Render the single numeric line sent back for this error.
    pub fn to_reply(&self, server_name: &str, session: &Session, command: &str) -> String {
        let (response, text) = self.response(command);
        replies::create_error(
            server_name,
            session,
            response.name(),
            Some(&text),
            self.bypasses_registration(),
        )
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors (registry operations)
// ============================================================================

/// Channel operation errors.
///
/// Returned by the channel registry without the channel name; handlers
/// attach it with [`ChannelError::on`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("no such channel")]
    NoSuchChannel,

    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("session invalid")]
    SessionInvalid,
}

impl ChannelError {
    /// Attach the channel name, producing the handler-level error.
    pub fn on(self, channel: &str) -> HandlerError {
        let channel = channel.to_string();
        match self {
            Self::NoSuchChannel => HandlerError::NoSuchChannel(channel),
            Self::NotOnChannel => HandlerError::NotOnChannel(channel),
            Self::ChanOpPrivsNeeded => HandlerError::ChanOpPrivsNeeded(channel),
            Self::InviteOnlyChan => HandlerError::InviteOnlyChan(channel),
            Self::BadChannelKey => HandlerError::BadChannelKey(channel),
            Self::ChannelIsFull => HandlerError::ChannelIsFull(channel),
            Self::SessionInvalid => {
                HandlerError::Internal(format!("session missing for {channel}"))
            }
        }
    }
}
