//! Destination naming: pure mapping from metadata + extension + collision index to a relative path.

use chrono::Datelike;
use std::path::{Path, PathBuf};

use crate::{DestinationCandidate, ImageMetadata};

/// Timestamp part of a destination file name (`YYYY-MM-DD-HHMMSS`).
pub const NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// Keep ASCII letters and digits only. Quotes, spaces and separators are dropped.
pub fn normalize_model(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// `{year}/{month:02}` for the capture time. Never depends on where the source lives.
pub fn destination_dir(meta: &ImageMetadata) -> PathBuf {
    let year = meta.taken_at.year();
    let month = meta.taken_at.month();
    PathBuf::from(year.to_string()).join(format!("{month:02}"))
}

/// Lowercased extension of `path` with its leading dot, or empty when there is none.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Candidate for `index`. `ext` is the original extension (with or without the dot); it is lowercased.
pub fn candidate(meta: &ImageMetadata, ext: &str, index: u32) -> DestinationCandidate {
    let ext = ext.to_lowercase();
    let ext = if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    };
    let file_name = format!(
        "{}-{}-{:02}{}",
        meta.taken_at.format(NAME_TIMESTAMP_FORMAT),
        normalize_model(&meta.model),
        index,
        ext
    );
    let directory = destination_dir(meta);
    let full_path = directory.join(&file_name);
    DestinationCandidate {
        directory,
        file_name,
        full_path,
        index,
    }
}
