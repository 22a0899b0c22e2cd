//! Inbound line tokenizer.
//!
//! Splits one IRC line into an optional `:prefix`, a command word and its
//! parameters. A parameter starting with `:` swallows the rest of the line.

use thiserror::Error;

/// Errors produced while tokenizing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("empty line")]
    Empty,

    #[error("missing command after prefix")]
    MissingCommand,
}

/// A tokenized client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Source prefix, without the leading `:`. Clients rarely send one.
    pub prefix: Option<String>,
    /// Command word exactly as received.
    pub command: String,
    /// Positional parameters; the trailing one has its `:` stripped.
    pub params: Vec<String>,
}

impl Message {
    /// Tokenize a single line. Trailing CR/LF is ignored.
    pub fn parse(line: &str) -> Result<Self, MessageError> {
        let mut rest = line.trim_end_matches(['\r', '\n']).trim_start_matches(' ');
        if rest.is_empty() {
            return Err(MessageError::Empty);
        }

        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (prefix, tail) = stripped.split_once(' ').unwrap_or((stripped, ""));
            rest = tail.trim_start_matches(' ');
            Some(prefix.to_string())
        } else {
            None
        };

        let (command, mut rest) = rest.split_once(' ').unwrap_or((rest, ""));
        if command.is_empty() {
            return Err(MessageError::MissingCommand);
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, tail)) => {
                    params.push(param.to_string());
                    rest = tail;
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Ok(Self {
            prefix,
            command: command.to_string(),
            params,
        })
    }

    /// Parameter at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Command word normalized to upper case.
    pub fn command_name(&self) -> String {
        self.command.to_ascii_uppercase()
    }
}
