//! Public and internal types for the organizer API and pipeline.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

use crate::engine::naming::normalize_model;
use crate::error::OrganizeError;
use crate::events::Event;
use crate::utils::config::{CollisionConsts, DEFAULT_EXTENSIONS, DEFAULT_NUM_WORKERS};

/// Capture metadata of one image. `model` is always normalized (ASCII alphanumerics only).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageMetadata {
    pub model: String,
    pub taken_at: NaiveDateTime,
}

impl ImageMetadata {
    /// Build metadata from a raw model string; the model is normalized here.
    pub fn new(raw_model: &str, taken_at: NaiveDateTime) -> Self {
        Self {
            model: normalize_model(raw_model),
            taken_at,
        }
    }
}

/// A proposed destination, relative to the destination root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DestinationCandidate {
    /// `{year}/{month:02}`.
    pub directory: PathBuf,
    pub file_name: String,
    /// `directory/file_name`.
    pub full_path: PathBuf,
    pub index: u32,
}

/// What happened to one source file. Produced exactly once per discovered file.
#[derive(Debug)]
pub enum CopyOutcome {
    Copied(PathBuf),
    SkippedDuplicate(PathBuf),
    Failed(OrganizeError),
}

/// A finished file: its outcome plus the events recorded while processing it.
#[derive(Debug)]
pub struct Processed {
    pub source: PathBuf,
    pub outcome: CopyOutcome,
    pub events: Vec<Event>,
}

/// Source → destination pair in a [`Report`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Clone, Debug, Serialize)]
pub struct Failure {
    pub source: PathBuf,
    pub reason: String,
}

/// Part of the source tree the walk could not read. Nothing under `path` was processed.
#[derive(Clone, Debug, Serialize)]
pub struct WalkFailure {
    pub path: Option<PathBuf>,
    pub reason: String,
}

/// Aggregate of one run. Order of entries follows completion order, not source order.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Files that matched the extension set and were queued.
    pub discovered: usize,
    pub copied: Vec<Transfer>,
    pub skipped: Vec<Transfer>,
    pub failures: Vec<Failure>,
    /// Unreadable directories, broken links and loops met during the walk.
    pub walk_errors: Vec<WalkFailure>,
}

impl Report {
    /// Fold one file's outcome into the report.
    pub fn record(&mut self, processed: &Processed) {
        let source = processed.source.clone();
        match &processed.outcome {
            CopyOutcome::Copied(dest) => self.copied.push(Transfer {
                source,
                destination: dest.clone(),
            }),
            CopyOutcome::SkippedDuplicate(dest) => self.skipped.push(Transfer {
                source,
                destination: dest.clone(),
            }),
            CopyOutcome::Failed(err) => self.failures.push(Failure {
                source,
                reason: err.to_string(),
            }),
        }
    }

    /// Keep walk errors; every other walk event is informational.
    pub fn record_event(&mut self, event: &Event) {
        if let Event::WalkError { path, message } = event {
            self.walk_errors.push(WalkFailure {
                path: path.clone(),
                reason: message.clone(),
            });
        }
    }

    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of files that produced an outcome.
    pub fn processed(&self) -> usize {
        self.copied.len() + self.skipped.len() + self.failures.len()
    }

    /// True when no file failed and the whole source tree was walked.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.walk_errors.is_empty()
    }
}

/// Lib-only options for [`organize_dir`](crate::organize_dir).
#[derive(Clone, Debug)]
pub struct OrganizeOpts {
    /// Worker thread count. Clamped to at least 1 and capped by the FD limit.
    pub num_workers: usize,
    /// Image extensions, without the dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Highest collision index probed before a file fails.
    pub max_collision_index: u32,
    /// Follow symbolic links while walking the source tree.
    pub follow_links: bool,
}

impl Default for OrganizeOpts {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_NUM_WORKERS,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_collision_index: CollisionConsts::MAX_INDEX,
            follow_links: false,
        }
    }
}

impl From<&Opts> for OrganizeOpts {
    fn from(o: &Opts) -> Self {
        o.organize.clone()
    }
}

/// Full options (CLI). Use [`OrganizeOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub organize: OrganizeOpts,
    /// Debug-level logging.
    pub verbose: bool,
    /// Show a progress bar while copying.
    pub progress: bool,
    /// Print the final report as JSON on stdout.
    pub json: bool,
    /// Exit non-zero when any file failed.
    pub fail_on_error: bool,
}
