//! photo-organizer: copy camera images into a `{year}/{month}` tree, renamed from EXIF model
//! and capture time, in parallel and idempotently.

pub mod engine;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::capabilities::{
    Capabilities, ContentComparator, DestinationWriter, MetadataExtractor,
};
pub use error::{ExtractError, OrganizeError};
pub use events::Event;

use log::debug;
use std::path::Path;

/// Result alias used by public API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Organize `source` into `dest` with the default EXIF extractor, comparator and writer.
///
/// Per-file failures land in [`Report::failures`]; `Err` means the run could not start
/// (missing or invalid directories) or a worker thread died.
pub fn organize_dir(source: &Path, dest: &Path, opts: &OrganizeOpts) -> Result<Report> {
    organize_dir_with(source, dest, opts, Capabilities::default(), None::<fn(&Event)>)
}

/// Like [`organize_dir`] with caller-supplied [`Capabilities`].
///
/// - **`on_event: None`** → events are forwarded to the `log` facade.
/// - **`on_event: Some(f)`** → `f` sees every event instead, on the calling thread.
pub fn organize_dir_with<F>(
    source: &Path,
    dest: &Path,
    opts: &OrganizeOpts,
    caps: Capabilities,
    on_event: Option<F>,
) -> Result<Report>
where
    F: FnMut(&Event),
{
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let handles = pipeline::run_pipeline(source, dest, opts, caps)?;
    match on_event {
        None => pipeline::collect_report(handles, |e: &Event| e.log(), None),
        Some(f) => pipeline::collect_report(handles, f, None),
    }
}
