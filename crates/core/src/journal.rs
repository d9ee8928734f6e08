//! Serializable record of the commands that drove a run.
//!
//! A journal carries everything needed to rebuild the run: the map text, the seed, and
//! the ordered player commands. It is stored as a single pretty-printed JSON document.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Command;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported journal format version {found}")]
    UnsupportedVersion { found: u16 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub seed: u64,
    pub map: String,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: Command,
}

impl CommandJournal {
    pub fn new(seed: u64, map: impl Into<String>) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, map: map.into(), commands: Vec::new() }
    }

    /// Appends a command with the next sequence number and returns that number.
    pub fn record(&mut self, command: Command) -> u64 {
        let seq = self.commands.last().map_or(0, |last| last.seq + 1);
        self.commands.push(CommandRecord { seq, command });
        seq
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, JournalError> {
        let journal: CommandJournal = serde_json::from_str(text)?;
        if journal.format_version != JOURNAL_FORMAT_VERSION {
            return Err(JournalError::UnsupportedVersion { found: journal.format_version });
        }
        Ok(journal)
    }

    pub fn save(&self, path: &Path) -> Result<(), JournalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, JournalError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
