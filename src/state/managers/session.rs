//! Session registry: every live connection plus the nick table.

use crate::error::HandlerError;
use crate::state::{Session, SessionId};
use std::collections::HashMap;

/// Live sessions, keyed by id, and the registered-nick index.
///
/// The nick table holds exactly one entry per registered session and its key
/// always equals that session's `nick`. Comparison is case-sensitive.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    nicks: HashMap<String, SessionId>,
}

impl SessionRegistry {
    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    #[inline]
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Registered session owning `nick`.
    pub fn lookup_nick(&self, nick: &str) -> Option<SessionId> {
        self.nicks.get(nick).copied()
    }

    pub fn find_by_nick(&self, nick: &str) -> Option<&Session> {
        self.lookup_nick(nick).and_then(|id| self.get(id))
    }

    /// True if a session other than `id` owns `nick`.
    pub fn nick_in_use(&self, nick: &str, id: SessionId) -> bool {
        self.nicks.get(nick).is_some_and(|owner| *owner != id)
    }

    /// Registered sessions, in no particular order.
    pub fn registered(&self) -> impl Iterator<Item = &Session> + '_ {
        self.sessions.values().filter(|s| s.is_registered())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Claim the session's pending nick and mark it Registered.
    ///
    /// Fails with `NicknameInUse` if another session took the nick since
    /// NICK was accepted. Registration never fires twice.
    pub fn complete_registration(&mut self, id: SessionId) -> Result<(), HandlerError> {
        let session = self
            .sessions
            .get(&id)
            .ok_or_else(|| HandlerError::Internal(format!("unknown session {id}")))?;
        if !session.can_register() {
            return Ok(());
        }
        if self.nick_in_use(&session.nick, id) {
            return Err(HandlerError::NicknameInUse(session.nick.clone()));
        }

        let nick = session.nick.clone();
        if let Some(session) = self.sessions.get_mut(&id) {
            session.mark_registered();
        }
        self.nicks.insert(nick, id);
        Ok(())
    }

    /// Swap a registered session's nick in one step. Returns the old nick.
    pub fn rename(&mut self, id: SessionId, new_nick: &str) -> Result<String, HandlerError> {
        if self.nick_in_use(new_nick, id) {
            return Err(HandlerError::NicknameInUse(new_nick.to_string()));
        }
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| HandlerError::Internal(format!("unknown session {id}")))?;

        let old = std::mem::replace(&mut session.nick, new_nick.to_string());
        if session.is_registered() {
            self.nicks.insert(new_nick.to_string(), id);
            if self.nicks.get(&old) == Some(&id) {
                self.nicks.remove(&old);
            }
        }
        Ok(old)
    }

    /// Remove a session and release its nick.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(&id)?;
        if self.nicks.get(&session.nick) == Some(&id) {
            self.nicks.remove(&session.nick);
        }
        Some(session)
    }
}
