//! Notices: the user-facing record of aborted commands.

use log::error;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::rules::CommandTag;

/// One aborted command (or grading row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Tag of the command; `None` when the command was not recognized.
    pub tag: Option<CommandTag>,
    pub message: String,
}

impl Notice {
    pub fn new(tag: Option<CommandTag>, message: impl Into<String>) -> Self {
        Self {
            tag,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{tag} -- {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Where notices go.
pub trait NoticeSink {
    fn notify(&mut self, notice: Notice);
}

/// Appends notices, one per line, to a log file.
#[derive(Debug, Clone)]
pub struct NoticeLog {
    path: PathBuf,
}

impl NoticeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{notice}"));
        if let Err(e) = written {
            error!("cannot append to {}: {e} (notice: {notice})", self.path.display());
        }
    }
}

/// Keeps notices in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotices {
    pub notices: Vec<Notice>,
}

impl MemoryNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices as they would be logged.
    pub fn lines(&self) -> Vec<String> {
        self.notices.iter().map(|n| n.to_string()).collect()
    }
}

impl NoticeSink for MemoryNotices {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
