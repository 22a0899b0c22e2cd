//! Per-channel state.

use super::modes::ChannelModes;
use super::uid::SessionId;
use crate::error::ChannelError;
use std::collections::BTreeSet;

/// A live channel. It exists only while it has members.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Lowercased name, including the `#`/`&` sigil.
    pub name: String,
    pub topic: String,
    /// Unix seconds at creation.
    pub created_at: i64,
    pub modes: ChannelModes,
    pub members: BTreeSet<SessionId>,
}

impl Channel {
    /// Fresh channel with default modes and the welcome topic.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            topic: format!("Welcome to {name}"),
            created_at: chrono::Utc::now().timestamp(),
            modes: ChannelModes::default(),
            members: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn is_member(&self, id: SessionId) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn is_operator(&self, nick: &str) -> bool {
        self.modes.operators.contains(nick)
    }

    #[inline]
    pub fn is_voiced(&self, nick: &str) -> bool {
        self.modes.voiced.contains(nick)
    }

    /// Private or secret channels are hidden from LIST and NAMES for outsiders.
    pub fn is_hidden(&self) -> bool {
        self.modes.private || self.modes.secret
    }

    /// One more member would exceed a positive limit.
    pub fn is_full(&self) -> bool {
        self.modes.limit > 0 && self.members.len() as i64 + 1 > self.modes.limit
    }

    /// Admission checks for a join, in invite, key, limit order.
    pub fn check_join(&self, nick: &str, key: Option<&str>) -> Result<(), ChannelError> {
        if self.modes.invite_only && !self.modes.invited.contains(nick) {
            return Err(ChannelError::InviteOnlyChan);
        }
        if !self.modes.key.is_empty() && key != Some(self.modes.key.as_str()) {
            return Err(ChannelError::BadChannelKey);
        }
        if self.is_full() {
            return Err(ChannelError::ChannelIsFull);
        }
        Ok(())
    }

    /// Membership prefix for NAMES/WHO: `@` beats `+`.
    pub fn prefix_for(&self, nick: &str) -> &'static str {
        if self.is_operator(nick) {
            "@"
        } else if self.is_voiced(nick) {
            "+"
        } else {
            ""
        }
    }

    /// NAMES channel type: `@` secret, `*` private, `=` public.
    pub fn names_type(&self) -> &'static str {
        if self.modes.secret {
            "@"
        } else if self.modes.private {
            "*"
        } else {
            "="
        }
    }

    /// Drop every nick-keyed privilege held by `nick`.
    pub fn forget_nick(&mut self, nick: &str) {
        self.modes.operators.remove(nick);
        self.modes.voiced.remove(nick);
        self.modes.invited.remove(nick);
    }

    /// Carry nick-keyed privileges across a nick change.
    pub fn rename_nick(&mut self, old: &str, new: &str) {
        for set in [
            &mut self.modes.operators,
            &mut self.modes.voiced,
            &mut self.modes.invited,
        ] {
            if set.remove(old) {
                set.insert(new.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::uid::SessionIdGenerator;

    #[test]
    fn new_channel_defaults() {
        let chan = Channel::new("#rust");
        assert_eq!(chan.topic, "Welcome to #rust");
        assert!(chan.modes.topic_locked);
        assert!(chan.modes.no_external);
        assert_eq!(chan.modes.limit, 100);
        assert!(chan.members.is_empty());
    }

    #[test]
    fn full_check_respects_limit() {
        let ids = SessionIdGenerator::new();
        let mut chan = Channel::new("#tiny");
        chan.modes.limit = 1;
        assert!(!chan.is_full());
        chan.members.insert(ids.next_id());
        assert!(chan.is_full());
        chan.modes.limit = -1;
        assert!(!chan.is_full());
        chan.modes.limit = 0;
        assert!(!chan.is_full());
    }

    #[test]
    fn join_checks_in_order() {
        let mut chan = Channel::new("#club");
        chan.modes.invite_only = true;
        chan.modes.key = "secret".into();
        assert_eq!(chan.check_join("bob", Some("secret")), Err(ChannelError::InviteOnlyChan));

        chan.modes.invited.insert("bob".into());
        assert_eq!(chan.check_join("bob", None), Err(ChannelError::BadChannelKey));
        assert_eq!(chan.check_join("bob", Some("wrong")), Err(ChannelError::BadChannelKey));
        assert_eq!(chan.check_join("bob", Some("secret")), Ok(()));
    }

    #[test]
    fn rename_moves_privileges() {
        let mut chan = Channel::new("#x");
        chan.modes.operators.insert("old".into());
        chan.modes.voiced.insert("old".into());
        chan.rename_nick("old", "new");
        assert!(chan.is_operator("new") && chan.is_voiced("new"));
        assert!(!chan.is_operator("old"));
        assert_eq!(chan.prefix_for("new"), "@");

        chan.forget_nick("new");
        assert_eq!(chan.prefix_for("new"), "");
    }

    #[test]
    fn names_type_reflects_visibility() {
        let mut chan = Channel::new("#x");
        assert_eq!(chan.names_type(), "=");
        chan.modes.private = true;
        assert_eq!(chan.names_type(), "*");
        assert!(chan.is_hidden());
        chan.modes.secret = true;
        assert_eq!(chan.names_type(), "@");
    }
}
