//! Channel and user mode state, and the `+`/`-` flag algebra applied to it.
//!
//! The algorithms here are pure: they mutate the mode struct handed in and
//! report what they did as a [`ModeChange`]. Privilege checks live with the
//! caller.

use std::collections::HashSet;

/// Channel letters this server understands.
pub const CHANNEL_MODE_LETTERS: &str = "opsitnmlbvk";
/// User letters this server understands.
pub const USER_MODE_LETTERS: &str = "iswo";

/// Direction of a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// One letter that was actually applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMode {
    pub sign: Sign,
    pub letter: char,
    pub param: Option<String>,
}

/// Outcome of running a flag string through a mode set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeChange {
    /// Letters applied, in input order.
    pub applied: Vec<AppliedMode>,
    /// Letters not recognized (or recognized but unsupported, like `b`).
    pub unknown: Vec<char>,
    /// How many positional parameters were consumed.
    pub consumed: usize,
}

impl ModeChange {
    /// True when nothing was applied.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn added(&self) -> impl Iterator<Item = &AppliedMode> + '_ {
        self.applied.iter().filter(|m| m.sign == Sign::Plus)
    }

    pub fn removed(&self) -> impl Iterator<Item = &AppliedMode> + '_ {
        self.applied.iter().filter(|m| m.sign == Sign::Minus)
    }

    /// Canonical form of the applied change, e.g. `+lo-v 10 alice bob`.
    pub fn to_mode_string(&self) -> String {
        let mut flags = String::new();
        let mut params = Vec::new();
        let mut current = None;

        for mode in &self.applied {
            if current != Some(mode.sign) {
                flags.push(mode.sign.symbol());
                current = Some(mode.sign);
            }
            flags.push(mode.letter);
            if let Some(param) = &mode.param {
                params.push(param.as_str());
            }
        }

        if params.is_empty() {
            flags
        } else {
            format!("{} {}", flags, params.join(" "))
        }
    }

    fn push(&mut self, sign: Sign, letter: char, param: Option<String>) {
        self.applied.push(AppliedMode { sign, letter, param });
    }
}

/// Per-channel mode state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelModes {
    /// Nicks holding channel operator (`o`).
    pub operators: HashSet<String>,
    /// Nicks holding voice (`v`).
    pub voiced: HashSet<String>,
    /// Nicks invited past `+i`.
    pub invited: HashSet<String>,
    pub private: bool,
    pub secret: bool,
    pub invite_only: bool,
    pub topic_locked: bool,
    pub no_external: bool,
    pub moderated: bool,
    /// Member cap; zero or negative means unlimited.
    pub limit: i64,
    /// Join key; empty means none.
    pub key: String,
}

impl Default for ChannelModes {
    fn default() -> Self {
        Self {
            operators: HashSet::new(),
            voiced: HashSet::new(),
            invited: HashSet::new(),
            private: false,
            secret: false,
            invite_only: false,
            topic_locked: true,
            no_external: true,
            moderated: false,
            limit: 100,
            key: String::new(),
        }
    }
}

impl ChannelModes {
    /// Mode string in fixed letter order, with `l`/`k` values appended.
    pub fn as_mode_string(&self) -> String {
        let mut flags = String::from("+");
        let mut params = Vec::new();

        for (letter, set) in [
            ('p', self.private),
            ('s', self.secret),
            ('i', self.invite_only),
            ('t', self.topic_locked),
            ('n', self.no_external),
            ('m', self.moderated),
        ] {
            if set {
                flags.push(letter);
            }
        }
        if self.limit > 0 {
            flags.push('l');
            params.push(self.limit.to_string());
        }
        if !self.key.is_empty() {
            flags.push('k');
            params.push(self.key.clone());
        }

        if params.is_empty() {
            flags
        } else {
            format!("{} {}", flags, params.join(" "))
        }
    }

    fn flag_mut(&mut self, letter: char) -> Option<&mut bool> {
        match letter {
            'p' => Some(&mut self.private),
            's' => Some(&mut self.secret),
            'i' => Some(&mut self.invite_only),
            't' => Some(&mut self.topic_locked),
            'n' => Some(&mut self.no_external),
            'm' => Some(&mut self.moderated),
            _ => None,
        }
    }

    /// Apply `flags` with positional `params`.
    ///
    /// `o`/`v` targets must satisfy `is_member`; a nick that doesn't still
    /// consumes its parameter but is not granted anything.
    pub fn apply<F>(&mut self, flags: &str, params: &[String], is_member: F) -> ModeChange
    where
        F: Fn(&str) -> bool,
    {
        let mut change = ModeChange::default();
        let mut params = params.iter();
        let mut sign = Sign::Plus;

        for letter in flags.chars() {
            match letter {
                '+' => sign = Sign::Plus,
                '-' => sign = Sign::Minus,
                'o' | 'v' => {
                    let Some(nick) = params.next() else {
                        continue;
                    };
                    change.consumed += 1;
                    if !is_member(nick) {
                        continue;
                    }
                    let set = if letter == 'o' {
                        &mut self.operators
                    } else {
                        &mut self.voiced
                    };
                    match sign {
                        Sign::Plus => set.insert(nick.clone()),
                        Sign::Minus => set.remove(nick),
                    };
                    change.push(sign, letter, Some(nick.clone()));
                }
                'l' => match sign {
                    Sign::Plus => {
                        let Some(raw) = params.next() else {
                            continue;
                        };
                        change.consumed += 1;
                        let Ok(limit) = raw.parse::<i64>() else {
                            continue;
                        };
                        self.limit = limit;
                        change.push(sign, 'l', Some(limit.to_string()));
                    }
                    Sign::Minus => {
                        self.limit = -1;
                        change.push(sign, 'l', None);
                    }
                },
                'k' => match sign {
                    Sign::Plus => {
                        let Some(key) = params.next() else {
                            continue;
                        };
                        change.consumed += 1;
                        self.key = key.clone();
                        change.push(sign, 'k', Some(key.clone()));
                    }
                    Sign::Minus => {
                        self.key.clear();
                        change.push(sign, 'k', None);
                    }
                },
                other => match self.flag_mut(other) {
                    Some(flag) => {
                        *flag = sign == Sign::Plus;
                        change.push(sign, other, None);
                    }
                    None => change.unknown.push(other),
                },
            }
        }

        change
    }
}

/// Per-session user modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserModes {
    pub invisible: bool,
    pub server_notices: bool,
    pub wallops: bool,
    pub operator: bool,
}

impl UserModes {
    /// Mode string in fixed `i s w o` order, e.g. `+iw`.
    pub fn as_mode_string(&self) -> String {
        let mut s = String::from("+");
        for (letter, set) in [
            ('i', self.invisible),
            ('s', self.server_notices),
            ('w', self.wallops),
            ('o', self.operator),
        ] {
            if set {
                s.push(letter);
            }
        }
        s
    }

    /// Apply a user flag string.
    ///
    /// `+o` is dropped without trace; operator status only comes from OPER.
    pub fn apply(&mut self, flags: &str) -> ModeChange {
        let mut change = ModeChange::default();
        let mut sign = Sign::Plus;

        for letter in flags.chars() {
            let flag = match letter {
                '+' => {
                    sign = Sign::Plus;
                    continue;
                }
                '-' => {
                    sign = Sign::Minus;
                    continue;
                }
                'i' => &mut self.invisible,
                's' => &mut self.server_notices,
                'w' => &mut self.wallops,
                'o' if sign == Sign::Plus => continue,
                'o' => &mut self.operator,
                other => {
                    change.unknown.push(other);
                    continue;
                }
            };
            *flag = sign == Sign::Plus;
            change.push(sign, letter, None);
        }

        change
    }
}
