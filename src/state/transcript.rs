//! Per-channel transcript files.
//!
//! Every line a channel fans out is appended to
//! `<dir>/ircserv_<channel>.ircservlog`. Files are opened on first use and
//! closed when the channel is deleted; a recreated channel appends to the
//! same file.

use crate::telemetry::TRANSCRIPT_TARGET;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append-only transcript sink shared by all channels.
#[derive(Debug)]
pub struct TranscriptLog {
    dir: PathBuf,
    files: Mutex<HashMap<String, File>>,
}

impl TranscriptLog {
    /// Write transcripts under `dir`, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            files: Mutex::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Transcript file for `channel`. Path separators are replaced so the
    /// file always lands directly in the log directory.
    pub fn path_for(&self, channel: &str) -> PathBuf {
        let name: String = channel
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("ircserv_{name}.ircservlog"))
    }

    /// Append `line` to `channel`'s transcript.
    ///
    /// Write failures are logged and otherwise ignored; a broken log never
    /// holds up delivery.
    pub fn record(&self, channel: &str, line: &str) {
        let mut files = self.files.lock();
        let result = match files.get_mut(channel) {
            Some(file) => writeln!(file, "{line}"),
            None => self.create(channel).and_then(|mut file| {
                writeln!(file, "{line}")?;
                files.insert(channel.to_string(), file);
                Ok(())
            }),
        };

        if let Err(e) = result {
            warn!(
                target: TRANSCRIPT_TARGET,
                channel = %channel,
                error = %e,
                "Transcript write failed"
            );
            files.remove(channel);
        }
    }

    /// Drop the open handle for `channel`.
    pub fn close(&self, channel: &str) {
        self.files.lock().remove(channel);
    }

    fn create(&self, channel: &str) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(channel))
    }
}
