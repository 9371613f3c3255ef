// Push flow: walks the drafts folder and publishes each draft in turn.
// One draft is finished (post created, description set, log written,
// confirmation printed) before the next one is read.

use crate::api::Publisher;
use crate::drafts::{list_drafts, load_draft};
use crate::push_log::{LogRecord, PushLog};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the run reads drafts from and appends its log to.
#[derive(Debug, Clone)]
pub struct PushPaths {
    pub drafts_dir: PathBuf,
    pub log_file: PathBuf,
}

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSummary {
    /// The drafts folder held nothing to push.
    NoDrafts,
    /// Every draft found was pushed.
    Pushed(usize),
}

/// Why a run stopped. Drafts pushed before the failure stay logged.
#[derive(Debug)]
pub enum PushError {
    /// The drafts folder exists but could not be listed.
    ListDrafts {
        dir: PathBuf,
        source: anyhow::Error,
    },
    /// A draft could not be read or parsed.
    Input {
        file: PathBuf,
        source: anyhow::Error,
    },
    /// WordPress rejected a request, or it never answered.
    Remote {
        file: PathBuf,
        source: anyhow::Error,
    },
    /// The push log could not be opened or written.
    Log {
        file: PathBuf,
        source: anyhow::Error,
    },
    /// The console confirmation could not be written.
    Output {
        file: PathBuf,
        source: std::io::Error,
    },
}

impl PushError {
    /// The draft (or drafts folder) the run stopped on.
    pub fn file(&self) -> &Path {
        match self {
            PushError::ListDrafts { dir, .. } => dir,
            PushError::Input { file, .. }
            | PushError::Remote { file, .. }
            | PushError::Log { file, .. }
            | PushError::Output { file, .. } => file,
        }
    }
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::ListDrafts { dir, .. } => {
                write!(f, "cannot list drafts folder {}", dir.display())
            }
            PushError::Input { file, .. } => write!(f, "cannot read draft {}", file.display()),
            PushError::Remote { file, .. } => write!(f, "WordPress rejected {}", file.display()),
            PushError::Log { file, .. } => {
                write!(f, "cannot record push of {}", file.display())
            }
            PushError::Output { file, .. } => {
                write!(f, "cannot print result for {}", file.display())
            }
        }
    }
}

impl std::error::Error for PushError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PushError::ListDrafts { source, .. }
            | PushError::Input { source, .. }
            | PushError::Remote { source, .. }
            | PushError::Log { source, .. } => Some(&**source),
            PushError::Output { source, .. } => Some(source),
        }
    }
}

/// Push every draft in `paths.drafts_dir`, in file name order, writing one
/// confirmation line per draft to `out`.
///
/// Any failure stops the run: malformed drafts are not skipped and failed
/// requests are not retried.
pub fn run<P, W>(publisher: &P, paths: &PushPaths, out: &mut W) -> Result<RunSummary, PushError>
where
    P: Publisher + ?Sized,
    W: Write,
{
    run_with_spinner(publisher, paths, out, ProgressBar::new_spinner())
}

/// `run` with the spinner supplied by the caller. Confirmations are written
/// while the spinner is suspended so they never share its line.
fn run_with_spinner<P, W>(
    publisher: &P,
    paths: &PushPaths,
    out: &mut W,
    spinner: ProgressBar,
) -> Result<RunSummary, PushError>
where
    P: Publisher + ?Sized,
    W: Write,
{
    let files = list_drafts(&paths.drafts_dir).map_err(|source| PushError::ListDrafts {
        dir: paths.drafts_dir.clone(),
        source,
    })?;

    if files.is_empty() {
        writeln!(
            out,
            "No drafts found in {}/*.json. Create a draft JSON file first.",
            paths.drafts_dir.display()
        )
        .map_err(|source| PushError::Output {
            file: paths.drafts_dir.clone(),
            source,
        })?;
        return Ok(RunSummary::NoDrafts);
    }

    let mut log = PushLog::open(&paths.log_file).map_err(|source| PushError::Log {
        file: paths.log_file.clone(),
        source,
    })?;

    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));

    for file in &files {
        spinner.set_message(format!("Pushing {}...", file.display()));
        if let Err(e) = push_one(publisher, file, &mut log, &spinner, out) {
            spinner.finish_and_clear();
            tracing::debug!(file = %e.file().display(), "push aborted");
            return Err(e);
        }
    }
    spinner.finish_and_clear();

    Ok(RunSummary::Pushed(files.len()))
}

/// Publish a single draft and record it.
fn push_one<P, W>(
    publisher: &P,
    file: &Path,
    log: &mut PushLog,
    spinner: &ProgressBar,
    out: &mut W,
) -> Result<(), PushError>
where
    P: Publisher + ?Sized,
    W: Write,
{
    let draft = load_draft(file).map_err(|source| PushError::Input {
        file: file.to_path_buf(),
        source,
    })?;

    let remote = |source: anyhow::Error| PushError::Remote {
        file: file.to_path_buf(),
        source,
    };
    let post_id = publisher
        .create_draft_post(&draft.title, &draft.content_html)
        .map_err(remote)?;
    if let Some(description) = draft.description() {
        publisher
            .set_article_description(post_id, description)
            .map_err(remote)?;
    }

    let record = LogRecord {
        file: file.display().to_string(),
        post_id,
        title: draft.title.clone(),
    };
    log.append(&record).map_err(|source| PushError::Log {
        file: file.to_path_buf(),
        source,
    })?;

    tracing::info!(file = %file.display(), post_id, log = %log.path().display(), "pushed draft");
    spinner
        .suspend(|| {
            writeln!(out, "OK: {} -> post_id={}", draft.title, post_id)?;
            out.flush()
        })
        .map_err(|source| PushError::Output {
            file: file.to_path_buf(),
            source,
        })
}
