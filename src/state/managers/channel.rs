//! Channel registry: channel lifecycle, membership and fan-out.
//!
//! A channel is created by the first subscribe and deleted the moment its
//! last member leaves. Both sides of membership (`Channel::members` and
//! `Session::channels`) are updated together here and nowhere else.

use crate::error::ChannelError;
use crate::state::modes::ModeChange;
use crate::state::{Channel, SessionId, SessionRegistry, TranscriptLog};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::info;

/// Result of a successful subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Session joined; `created` is true if the channel was new.
    Joined { created: bool },
    /// Session was already a member; nothing changed.
    AlreadyMember,
}

/// All live channels, keyed by lowercased name.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: BTreeMap<String, Channel>,
    transcripts: Option<TranscriptLog>,
}

impl ChannelRegistry {
    /// With `transcripts`, every channel line is also appended to its file.
    pub fn new(transcripts: Option<TranscriptLog>) -> Self {
        Self {
            channels: BTreeMap::new(),
            transcripts,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&name.to_ascii_lowercase())
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(&name.to_ascii_lowercase())
    }

    /// Channels in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.channels.values()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Add `id` to `name`, creating the channel if needed.
    ///
    /// Admission checks run before anything is mutated. On success the JOIN
    /// line goes to every member, the joiner included.
    pub fn subscribe(
        &mut self,
        sessions: &mut SessionRegistry,
        name: &str,
        id: SessionId,
        key: Option<&str>,
    ) -> Result<JoinOutcome, ChannelError> {
        let name = name.to_ascii_lowercase();
        let session = sessions.get(id).ok_or(ChannelError::SessionInvalid)?;
        if session.channels.contains(&name) {
            return Ok(JoinOutcome::AlreadyMember);
        }
        let nick = session.nick.clone();
        let mask = session.mask();

        let transcripts = self.transcripts.as_ref();
        let mut created = false;
        let channel = match self.channels.entry(name.clone()) {
            Entry::Occupied(entry) => {
                entry.get().check_join(&nick, key)?;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                created = true;
                let mut channel = Channel::new(&name);
                channel.modes.operators.insert(nick.clone());
                transcript(
                    transcripts,
                    &name,
                    &format!(
                        ":SERVER Channel created at {}",
                        chrono::Utc::now().timestamp_millis()
                    ),
                );
                info!(channel = %name, nick = %nick, "Channel created");
                entry.insert(channel)
            }
        };

        channel.modes.invited.remove(&nick);
        channel.members.insert(id);
        if let Some(session) = sessions.get_mut(id) {
            session.channels.insert(name.clone());
        }

        let line = format!(":{mask} JOIN :{name}");
        deliver(sessions, &channel.members, &line, None);
        transcript(transcripts, &name, &line);

        Ok(JoinOutcome::Joined { created })
    }

    /// Remove `id` from `name` after sending `departure` to the members.
    ///
    /// `exclude` keeps the departure line from one member (QUIT skips the
    /// quitter). The channel is deleted once empty.
    pub fn unsubscribe(
        &mut self,
        sessions: &mut SessionRegistry,
        name: &str,
        id: SessionId,
        departure: &str,
        exclude: Option<SessionId>,
    ) -> Result<(), ChannelError> {
        let name = name.to_ascii_lowercase();
        let channel = self
            .channels
            .get_mut(&name)
            .ok_or(ChannelError::NoSuchChannel)?;
        if !channel.is_member(id) {
            return Err(ChannelError::NotOnChannel);
        }

        deliver(sessions, &channel.members, departure, exclude);
        transcript(self.transcripts.as_ref(), &name, departure);

        channel.members.remove(&id);
        if let Some(session) = sessions.get_mut(id) {
            channel.forget_nick(&session.nick);
            session.channels.remove(&name);
        }

        if channel.members.is_empty() {
            self.channels.remove(&name);
            if let Some(log) = &self.transcripts {
                log.record(
                    &name,
                    &format!(
                        ":SERVER Channel deleted at {}",
                        chrono::Utc::now().timestamp_millis()
                    ),
                );
                log.close(&name);
            }
            info!(channel = %name, "Channel removed");
        }
        Ok(())
    }

    /// Send `text` to every member of `name` except `exclude`.
    ///
    /// Returns false if the channel doesn't exist.
    pub fn broadcast(
        &self,
        sessions: &SessionRegistry,
        name: &str,
        text: &str,
        exclude: Option<SessionId>,
    ) -> bool {
        let Some(channel) = self.lookup(name) else {
            return false;
        };
        deliver(sessions, &channel.members, text, exclude);
        transcript(self.transcripts.as_ref(), &channel.name, text);
        true
    }

    /// Send `text` once to `id` and to everyone sharing a channel with it.
    pub fn broadcast_to_peers(&self, sessions: &SessionRegistry, id: SessionId, text: &str) {
        let Some(session) = sessions.get(id) else {
            return;
        };
        let mut peers = BTreeSet::from([id]);
        for name in &session.channels {
            if let Some(channel) = self.channels.get(name) {
                peers.extend(channel.members.iter().copied());
                transcript(self.transcripts.as_ref(), name, text);
            }
        }
        deliver(sessions, &peers, text, None);
    }

    /// Apply a channel mode change on behalf of `id`.
    ///
    /// Requires `id` to hold channel operator. A non-empty change is
    /// broadcast as a MODE line to all members.
    pub fn set_modes(
        &mut self,
        sessions: &SessionRegistry,
        name: &str,
        id: SessionId,
        flags: &str,
        params: &[String],
    ) -> Result<ModeChange, ChannelError> {
        let name = name.to_ascii_lowercase();
        let channel = self
            .channels
            .get_mut(&name)
            .ok_or(ChannelError::NoSuchChannel)?;
        let session = sessions.get(id).ok_or(ChannelError::SessionInvalid)?;
        if !channel.is_operator(&session.nick) {
            return Err(ChannelError::ChanOpPrivsNeeded);
        }

        let member_nicks: HashSet<&str> = channel
            .members
            .iter()
            .filter_map(|member| sessions.get(*member))
            .map(|s| s.nick.as_str())
            .collect();
        let change = channel
            .modes
            .apply(flags, params, |nick| member_nicks.contains(nick));

        if !change.is_empty() {
            let line = format!(
                ":{} MODE {} {}",
                session.mask(),
                channel.name,
                change.to_mode_string()
            );
            deliver(sessions, &channel.members, &line, None);
            transcript(self.transcripts.as_ref(), &name, &line);
        }
        Ok(change)
    }

    /// Carry `old`'s nick-keyed privileges over to `new` in every channel
    /// `id` has joined.
    pub fn rename_member(
        &mut self,
        sessions: &SessionRegistry,
        id: SessionId,
        old: &str,
        new: &str,
    ) {
        let Some(session) = sessions.get(id) else {
            return;
        };
        for name in &session.channels {
            if let Some(channel) = self.channels.get_mut(name) {
                channel.rename_nick(old, new);
            }
        }
    }
}

fn deliver(
    sessions: &SessionRegistry,
    members: &BTreeSet<SessionId>,
    text: &str,
    exclude: Option<SessionId>,
) {
    members
        .iter()
        .filter(|member| Some(**member) != exclude)
        .filter_map(|member| sessions.get(*member))
        .for_each(|session| session.send(text));
}

fn transcript(log: Option<&TranscriptLog>, channel: &str, line: &str) {
    if let Some(log) = log {
        log.record(channel, line);
    }
}
