//! Destination filesystem helpers: slot probing, the default writer, post-write verification.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::engine::capabilities::DestinationWriter;

/// What currently sits at a candidate path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Free,
    File,
    /// Directory or other non-file; never a duplicate of an image.
    Other,
}

pub fn probe_slot(path: &Path) -> io::Result<Slot> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Slot::File),
        Ok(meta) if meta.file_type().is_symlink() => match fs::metadata(path) {
            Ok(target) if target.is_file() => Ok(Slot::File),
            _ => Ok(Slot::Other),
        },
        Ok(_) => Ok(Slot::Other),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Slot::Free),
        Err(e) => Err(e),
    }
}

/// Create-if-absent write. Removes its own partial file when the write fails halfway.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsWriter;

impl DestinationWriter for FsWriter {
    fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        let written = file.write_all(bytes).and_then(|_| file.sync_all());
        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(path);
            return Err(e);
        }
        Ok(())
    }
}

/// Re-read `path` and compare with `expected`. Ok(false) on mismatch; the caller removes the file.
pub fn written_matches(path: &Path, expected: &[u8]) -> io::Result<bool> {
    let written = fs::read(path)?;
    Ok(written == expected)
}
