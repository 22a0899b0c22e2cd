//! Helper functions shared by command handlers.

use glob::{MatchOptions, Pattern};

/// `#` and `&` are the only channel sigils this server accepts.
#[inline]
pub fn is_channel_name(name: &str) -> bool {
    name.starts_with('#') || name.starts_with('&')
}

/// Longest channel name accepted, sigil included.
pub const MAX_CHANNEL_NAME_LEN: usize = 50;

/// Whether `name` may be created or joined.
///
/// RFC 2812 §1.3: a sigil followed by anything except space, comma, BEL or
/// other control characters, at most 50 bytes long.
pub fn is_valid_channel_name(name: &str) -> bool {
    is_channel_name(name)
        && name.len() <= MAX_CHANNEL_NAME_LEN
        && !name.chars().any(|c| c == ' ' || c == ',' || c.is_control())
}

/// Split a comma-separated target list, skipping empty entries.
pub fn parse_list(list: &str) -> impl Iterator<Item = &str> + '_ {
    list.split(',').filter(|item| !item.is_empty())
}

/// Case-insensitive glob match supporting `*` and `?`.
pub fn matches_mask(mask: &str, value: &str) -> bool {
    const OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    // Only `*` and `?` are wildcards; brackets match themselves.
    let mut escaped = Pattern::escape(mask).replace("[*]", "*").replace("[?]", "?");
    // glob reserves `**` for whole path components.
    while escaped.contains("**") {
        escaped = escaped.replace("**", "*");
    }
    match Pattern::new(&escaped) {
        Ok(pattern) => pattern.matches_with(value, OPTIONS),
        Err(_) => mask.eq_ignore_ascii_case(value),
    }
}
