//! Per-file error types. These are carried as values inside [`CopyOutcome`](crate::CopyOutcome)
//! so one bad file never aborts the run; run-level errors use `anyhow`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why capture metadata could not be read from an image's bytes.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot decode EXIF: {0}")]
    Decode(String),
    #[error("EXIF tag {0} is missing or empty")]
    MissingTag(&'static str),
    #[error("unparseable capture timestamp {0:?}")]
    InvalidTimestamp(String),
}

/// Failure of one file inside the copy pipeline.
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("error opening image {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("error extracting EXIF from {path}: {source}")]
    Extract { path: PathBuf, source: ExtractError },

    #[error("error creating directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("error probing destination {path}: {source}")]
    Probe { path: PathBuf, source: io::Error },

    #[error("error comparing {existing} with {path}: {source}")]
    Compare {
        existing: PathBuf,
        path: PathBuf,
        source: io::Error,
    },

    #[error("no free name for {path} after {limit} collisions")]
    CollisionLimit { path: PathBuf, limit: u32 },

    #[error("error copying to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("error reading image just written {path}: {source}")]
    ReadBack { path: PathBuf, source: io::Error },

    #[error("written image {path} does not match its source; removed")]
    Verification { path: PathBuf },

    #[error("error deleting image not copied correctly {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}
