//! Structured events emitted by the walk and the copy workers.
//!
//! Components return events as values; the collector decides what to do with them
//! (log them, hand them to a caller callback). Nothing in the core logs per-file state directly.

use chrono::NaiveDateTime;
use log::Level;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    DirSkipped {
        path: PathBuf,
    },
    ExtensionSkipped {
        path: PathBuf,
        extension: String,
    },
    WalkError {
        path: Option<PathBuf>,
        message: String,
    },
    MetadataRead {
        source: PathBuf,
        model: String,
        taken_at: NaiveDateTime,
    },
    DestinationComputed {
        source: PathBuf,
        directory: PathBuf,
    },
    CollisionEscalated {
        source: PathBuf,
        occupied: PathBuf,
    },
    DuplicateSkipped {
        source: PathBuf,
        existing: PathBuf,
    },
    Copied {
        source: PathBuf,
        destination: PathBuf,
    },
    VerificationFailed {
        source: PathBuf,
        destination: PathBuf,
    },
    Failed {
        source: PathBuf,
        reason: String,
    },
}

impl Event {
    pub fn level(&self) -> Level {
        match self {
            Event::DirSkipped { .. } | Event::CollisionEscalated { .. } => Level::Debug,
            Event::MetadataRead { .. } | Event::DestinationComputed { .. } | Event::Copied { .. } => {
                Level::Info
            }
            Event::ExtensionSkipped { .. }
            | Event::WalkError { .. }
            | Event::DuplicateSkipped { .. }
            | Event::VerificationFailed { .. } => Level::Warn,
            Event::Failed { .. } => Level::Error,
        }
    }

    /// Forward to the `log` facade at [`Self::level`].
    pub fn log(&self) {
        log::log!(self.level(), "{}", self);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::DirSkipped { path } => write!(f, "path is a dir, skipping: {}", path.display()),
            Event::ExtensionSkipped { path, extension } => write!(
                f,
                "file extension {:?} not an image, skipping: {}",
                extension,
                path.display()
            ),
            Event::WalkError { path, message } => match path {
                Some(p) => write!(f, "walk error at {}: {}", p.display(), message),
                None => write!(f, "walk error: {}", message),
            },
            Event::MetadataRead {
                source,
                model,
                taken_at,
            } => write!(
                f,
                "image EXIF model={} date={} ({})",
                model,
                taken_at,
                source.display()
            ),
            Event::DestinationComputed { source, directory } => write!(
                f,
                "final destination {} ({})",
                directory.display(),
                source.display()
            ),
            Event::CollisionEscalated { source, occupied } => write!(
                f,
                "{} taken by a different image, trying next index ({})",
                occupied.display(),
                source.display()
            ),
            Event::DuplicateSkipped { source, existing } => write!(
                f,
                "image skipped as already exists at {} ({})",
                existing.display(),
                source.display()
            ),
            Event::Copied {
                source,
                destination,
            } => write!(
                f,
                "image copied to {} ({})",
                destination.display(),
                source.display()
            ),
            Event::VerificationFailed {
                source,
                destination,
            } => write!(
                f,
                "deleting {} as the content is not equal to {}",
                destination.display(),
                source.display()
            ),
            Event::Failed { source, reason } => {
                write!(f, "failed {}: {}", source.display(), reason)
            }
        }
    }
}
