//! Per-file copy: read → extract → resolve → write → verify.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::engine::capabilities::Capabilities;
use crate::engine::fs_ops::written_matches;
use crate::engine::naming::{destination_dir, dotted_extension};
use crate::engine::resolver::{ClaimRegistry, CollisionResolver};
use crate::error::OrganizeError;
use crate::events::Event;
use crate::{CopyOutcome, Processed};

/// Everything a worker needs to copy one file. Shared by reference across a worker's files.
pub struct CopyContext<'a> {
    pub dest_root: &'a Path,
    pub caps: &'a Capabilities,
    pub claims: &'a ClaimRegistry,
    pub max_collision_index: u32,
}

/// Copy `source` into the destination tree. Never panics on I/O; every failure becomes
/// [`CopyOutcome::Failed`] with a matching [`Event::Failed`].
pub fn process_file(source: &Path, ctx: &CopyContext<'_>) -> Processed {
    let mut events = Vec::new();
    let outcome = match copy_image(source, ctx, &mut events) {
        Ok(outcome) => outcome,
        Err(err) => {
            events.push(Event::Failed {
                source: source.to_path_buf(),
                reason: err.to_string(),
            });
            CopyOutcome::Failed(err)
        }
    };
    Processed {
        source: source.to_path_buf(),
        outcome,
        events,
    }
}

fn copy_image(
    source: &Path,
    ctx: &CopyContext<'_>,
    events: &mut Vec<Event>,
) -> Result<CopyOutcome, OrganizeError> {
    let content = fs::read(source).map_err(|e| OrganizeError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let meta = ctx
        .caps
        .extractor
        .extract(&content)
        .map_err(|e| OrganizeError::Extract {
            path: source.to_path_buf(),
            source: e,
        })?;
    events.push(Event::MetadataRead {
        source: source.to_path_buf(),
        model: meta.model.clone(),
        taken_at: meta.taken_at,
    });

    let dir = ctx.dest_root.join(destination_dir(&meta));
    events.push(Event::DestinationComputed {
        source: source.to_path_buf(),
        directory: dir.clone(),
    });
    fs::create_dir_all(&dir).map_err(|e| OrganizeError::CreateDir {
        path: dir.clone(),
        source: e,
    })?;

    let ext = dotted_extension(source);
    let resolver = CollisionResolver::new(
        ctx.dest_root,
        ctx.caps.comparator.as_ref(),
        ctx.claims,
        ctx.max_collision_index,
    );

    let mut start = 0;
    loop {
        let mut resolution = resolver.resolve_from(&meta, &ext, source, start, events)?;
        if resolution.duplicate {
            events.push(Event::DuplicateSkipped {
                source: source.to_path_buf(),
                existing: resolution.path.clone(),
            });
            return Ok(CopyOutcome::SkippedDuplicate(resolution.path));
        }

        match ctx.caps.writer.write_new(&resolution.path, &content) {
            Ok(()) => {}
            // Another process took the slot between probe and write: probe it again.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                start = resolution.candidate.index;
                resolution.release();
                continue;
            }
            Err(e) => {
                return Err(OrganizeError::Write {
                    path: resolution.path.clone(),
                    source: e,
                });
            }
        }

        verify_written(source, &resolution.path, &content, events)?;
        events.push(Event::Copied {
            source: source.to_path_buf(),
            destination: resolution.path.clone(),
        });
        return Ok(CopyOutcome::Copied(resolution.path.clone()));
    }
}

/// Re-read `dest` and compare with `content`. A mismatching file is deleted.
fn verify_written(
    source: &Path,
    dest: &Path,
    content: &[u8],
    events: &mut Vec<Event>,
) -> Result<(), OrganizeError> {
    let matches = match written_matches(dest, content) {
        Ok(m) => m,
        Err(e) => {
            remove_bad_copy(dest)?;
            return Err(OrganizeError::ReadBack {
                path: dest.to_path_buf(),
                source: e,
            });
        }
    };
    if matches {
        return Ok(());
    }
    events.push(Event::VerificationFailed {
        source: source.to_path_buf(),
        destination: dest.to_path_buf(),
    });
    remove_bad_copy(dest)?;
    Err(OrganizeError::Verification {
        path: dest.to_path_buf(),
    })
}

fn remove_bad_copy(dest: &Path) -> Result<(), OrganizeError> {
    match fs::remove_file(dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(OrganizeError::Remove {
            path: PathBuf::from(dest),
            source: e,
        }),
    }
}
