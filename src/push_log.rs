// Push log: append-only record of pushed drafts.
// Each successful push adds one line of JSON to `logs/push_log.jsonl`:
//
//   {"file":"drafts/a.json","post_id":101,"title":"First"}
//   {"file":"drafts/b.json","post_id":102,"title":"Second"}
//
// The file is never truncated, so it accumulates across runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default log location, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "logs/push_log.jsonl";

/// One pushed draft.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub file: String,
    pub post_id: u64,
    pub title: String,
}

/// Open handle on the log file, held for the whole run and closed on drop.
pub struct PushLog {
    file: File,
    path: PathBuf,
}

impl PushLog {
    /// Open `path` for appending, creating its parent folder if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log folder {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open push log {}", path.display()))?;
        Ok(PushLog {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Write one record as a single line and flush it.
    pub fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = serde_json::to_string(record).context("serialize push log record")?;
        writeln!(self.file, "{}", line)
            .and_then(|_| self.file.flush())
            .with_context(|| format!("Failed to write push log {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
