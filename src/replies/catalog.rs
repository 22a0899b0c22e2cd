//! Numeric reply and error table (RFC 2812 §5).
//!
//! Each entry carries its three-digit code and a message template. Templates
//! use literal `<placeholder>` tokens that [`fill`] replaces verbatim.

macro_rules! responses {
    ($($name:ident = $code:literal => $template:literal,)*) => {
        /// Every numeric the server emits.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(non_camel_case_types)]
        pub enum Response {
            $($name,)*
        }

        impl Response {
            /// All catalog entries, in code order.
            pub const ALL: &'static [Response] = &[$(Response::$name,)*];

            /// Numeric code.
            pub fn code(self) -> u16 {
                match self {
                    $(Response::$name => $code,)*
                }
            }

            /// Symbolic name, e.g. `ERR_NOSUCHNICK`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Response::$name => stringify!($name),)*
                }
            }

            /// Message template with `<placeholder>` tokens.
            pub fn template(self) -> &'static str {
                match self {
                    $(Response::$name => $template,)*
                }
            }
        }
    };
}

responses! {
    RPL_WELCOME = 1 => ":Welcome to the Internet Relay Network <nick>!<user>@<host>",
    RPL_YOURHOST = 2 => ":Your host is <servername>, running version <ver>",
    RPL_CREATED = 3 => ":This server was created <date>",
    RPL_MYINFO = 4 => "<servername> <version> <available user modes> <available channel modes>",
    RPL_UMODEIS = 221 => "<user mode string>",
    RPL_ADMINME = 256 => "<server> :Administrative info",
    RPL_ADMINLOC1 = 257 => ":<admin info>",
    RPL_ADMINLOC2 = 258 => ":<admin info>",
    RPL_ADMINEMAIL = 259 => ":<admin info>",
    RPL_WHOISUSER = 311 => "<nick> <user> <host> * :<real name>",
    RPL_WHOISOPERATOR = 313 => "<nick> :is an IRC operator",
    RPL_ENDOFWHO = 315 => "<name> :End of WHO list",
    RPL_ENDOFWHOIS = 318 => "<nick> :End of WHOIS list",
    RPL_WHOISCHANNELS = 319 => "<nick> :<channels>",
    RPL_LISTSTART = 321 => "Channel :Users  Name",
    RPL_LIST = 322 => "<channel> <# visible> :<topic>",
    RPL_LISTEND = 323 => ":End of LIST",
    RPL_CHANNELMODEIS = 324 => "<channel> <mode>",
    RPL_CREATIONTIME = 329 => "<channel> <creation time>",
    RPL_NOTOPIC = 331 => "<channel> :No topic is set",
    RPL_TOPIC = 332 => "<channel> :<topic>",
    RPL_INVITING = 341 => "<channel> <nick>",
    RPL_VERSION = 351 => "<version>. <server> :<comments>",
    RPL_WHOREPLY = 352 => "<channel> <user> <host> <server> <nick> <flags> :<hopcount> <real name>",
    RPL_NAMREPLY = 353 => "<type> <channel> :<names>",
    RPL_ENDOFNAMES = 366 => "<channel> :End of NAMES list",
    RPL_INFO = 371 => ":<string>",
    RPL_ENDOFINFO = 374 => ":End of INFO list",
    RPL_YOUREOPER = 381 => ":You are now an IRC operator",
    RPL_TIME = 391 => "<server> :<time>",
    ERR_UNKNOWNERROR = 400 => "<command> :<info>",
    ERR_NOSUCHNICK = 401 => "<nickname> :No such nick/channel",
    ERR_NOSUCHCHANNEL = 403 => "<channel name> :No such channel",
    ERR_CANNOTSENDTOCHAN = 404 => "<channel name> :Cannot send to channel",
    ERR_NORECIPIENT = 411 => ":No recipient given (<command>)",
    ERR_NOTEXTTOSEND = 412 => ":No text to send",
    ERR_UNKNOWNCOMMAND = 421 => "<command> :Unknown command",
    ERR_NONICKNAMEGIVEN = 431 => ":No nickname given",
    ERR_ERRONEUSNICKNAME = 432 => "<nick> :Erroneous nickname",
    ERR_NICKNAMEINUSE = 433 => "<nick> :Nickname is already in use",
    ERR_USERNOTINCHANNEL = 441 => "<nick> <channel> :They aren't on that channel",
    ERR_NOTONCHANNEL = 442 => "<channel> :You're not on that channel",
    ERR_USERONCHANNEL = 443 => "<user> <channel> :is already on channel",
    ERR_NOTREGISTERED = 451 => ":You have not registered",
    ERR_NEEDMOREPARAMS = 461 => "<command> :Not enough parameters",
    ERR_ALREADYREGISTRED = 462 => ":Unauthorized command (already registered)",
    ERR_PASSWDMISMATCH = 464 => ":Password incorrect",
    ERR_CHANNELISFULL = 471 => "<channel> :Cannot join channel (+l)",
    ERR_INVITEONLYCHAN = 473 => "<channel> :Cannot join channel (+i)",
    ERR_BADCHANNELKEY = 475 => "<channel> :Cannot join channel (+k)",
    ERR_NOPRIVILEGES = 481 => ":Permission Denied- You're not an IRC operator",
    ERR_CHANOPRIVSNEEDED = 482 => "<channel> :You're not channel operator",
    ERR_UMODEUNKNOWNFLAG = 501 => ":Unknown MODE flag",
    ERR_USERSDONTMATCH = 502 => ":Cannot change mode for other users",
}

/// Code used for reply names missing from the table.
pub const FALLBACK_REPLY_CODE: u16 = 300;
/// Code used for error names missing from the table.
pub const FALLBACK_ERROR_CODE: u16 = 400;

impl Response {
    /// Look up an entry by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.name() == name)
    }

    /// Fill this entry's template.
    pub fn fill(self, values: &[(&str, &str)]) -> String {
        fill(self.template(), values)
    }
}

/// Resolve a symbolic name to a code, falling back to 300 or 400.
pub fn code_for_name(name: &str, is_error: bool) -> u16 {
    match Response::from_name(name) {
        Some(r) => r.code(),
        None if is_error => FALLBACK_ERROR_CODE,
        None => FALLBACK_REPLY_CODE,
    }
}

/// Substitute `(token, value)` pairs into `template` in one left-to-right pass.
///
/// Inserted values are never rescanned, so a value that happens to contain a
/// placeholder is emitted as-is. Where tokens overlap the longest one wins.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        let hit = values
            .iter()
            .filter(|(token, _)| !token.is_empty() && rest.starts_with(*token))
            .max_by_key(|(token, _)| token.len());

        match hit {
            Some((token, value)) => {
                out.push_str(value);
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}
