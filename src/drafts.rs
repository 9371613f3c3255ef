// Draft source: finds the local draft files and parses them.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default folder scanned for drafts, relative to the working directory.
pub const DEFAULT_DRAFTS_DIR: &str = "drafts";

/// One article as authored locally. `title` and `content_html` are
/// required; the description is optional.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content_html: String,
    #[serde(default)]
    pub article_description: Option<String>,
}

impl Draft {
    /// The description to push, trimmed. `None` when it is absent or
    /// contains only whitespace.
    pub fn description(&self) -> Option<&str> {
        self.article_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// List `*.json` files directly inside `dir`, sorted by name. Dotfiles
/// are skipped like a shell glob would. A missing folder yields nothing.
pub fn list_drafts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "drafts folder does not exist");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list {}", dir.display()));
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with('.') || !name.ends_with(".json") {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }
        files.push(dir.join(name));
    }
    files.sort();
    tracing::debug!(count = files.len(), dir = %dir.display(), "found drafts");
    Ok(files)
}

/// Read and parse one draft file.
pub fn load_draft(path: &Path) -> Result<Draft> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    let draft: Draft = serde_json::from_str(&text)
        .with_context(|| format!("Invalid draft JSON in {}", path.display()))?;
    Ok(draft)
}
