//! Numeric reply construction.
//!
//! Outbound numerics are shaped `:<server> <code> <nick-or-*> <text>`.
//! Sessions that haven't registered get the fixed not-registered line
//! instead, unless the caller explicitly bypasses that gate.

pub mod catalog;

pub use catalog::{Response, code_for_name, fill};

use crate::state::modes::{CHANNEL_MODE_LETTERS, USER_MODE_LETTERS};
use crate::state::{ServerInfo, Session};

/// Format one numeric line.
pub fn numeric(server_name: &str, target: &str, code: u16, text: &str) -> String {
    format!(":{server_name} {code:03} {target} {text}")
}

/// The line every unregistered client gets for gated commands.
pub fn not_registered(server_name: &str) -> String {
    numeric(
        server_name,
        "*",
        Response::ERR_NOTREGISTERED.code(),
        Response::ERR_NOTREGISTERED.template(),
    )
}

/// Build a reply from a symbolic name; unknown names use code 300.
///
/// `message` replaces the catalog template when given.
pub fn create_reply(
    server_name: &str,
    session: &Session,
    name: &str,
    message: Option<&str>,
) -> String {
    if !session.is_registered() {
        return not_registered(server_name);
    }
    let text = named_text(name, message);
    numeric(server_name, &session.nick, code_for_name(name, false), text)
}

/// Build an error from a symbolic name; unknown names use code 400.
///
/// `bypass` lets it through before registration.
pub fn create_error(
    server_name: &str,
    session: &Session,
    name: &str,
    message: Option<&str>,
    bypass: bool,
) -> String {
    if !session.is_registered() && !bypass {
        return not_registered(server_name);
    }
    let text = named_text(name, message);
    numeric(server_name, session.nick_or_star(), code_for_name(name, true), text)
}

fn named_text<'a>(name: &str, message: Option<&'a str>) -> &'a str {
    match message {
        Some(text) => text,
        None => Response::from_name(name).map_or("", Response::template),
    }
}

/// RPL_WELCOME through RPL_MYINFO for a freshly registered session.
pub fn welcome_burst(info: &ServerInfo, session: &Session) -> Vec<String> {
    let mask = session.mask();
    let lines = [
        (
            Response::RPL_WELCOME,
            Response::RPL_WELCOME.fill(&[("<nick>!<user>@<host>", mask.as_str())]),
        ),
        (
            Response::RPL_YOURHOST,
            Response::RPL_YOURHOST.fill(&[
                ("<servername>", info.name.as_str()),
                ("<ver>", info.version.as_str()),
            ]),
        ),
        (
            Response::RPL_CREATED,
            Response::RPL_CREATED.fill(&[("<date>", info.created.as_str())]),
        ),
        (
            Response::RPL_MYINFO,
            Response::RPL_MYINFO.fill(&[
                ("<servername>", info.name.as_str()),
                ("<version>", info.version.as_str()),
                ("<available user modes>", USER_MODE_LETTERS),
                ("<available channel modes>", CHANNEL_MODE_LETTERS),
            ]),
        ),
    ];

    lines
        .into_iter()
        .map(|(response, text)| {
            create_reply(&info.name, session, response.name(), Some(&text))
        })
        .collect()
}
