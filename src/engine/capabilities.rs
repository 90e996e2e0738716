//! Seams for the collaborators the pipeline depends on: metadata extraction,
//! content comparison and the final write. Defaults live in `exif`, `hashing` and `fs_ops`.

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::ImageMetadata;
use crate::engine::exif::ExifExtractor;
use crate::engine::fs_ops::FsWriter;
use crate::engine::hashing::HashComparator;
use crate::error::ExtractError;

/// Raw image bytes → capture metadata.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ImageMetadata, ExtractError>;
}

/// Byte-for-byte equality of two files.
pub trait ContentComparator: Send + Sync {
    fn same_content(&self, a: &Path, b: &Path) -> io::Result<bool>;
}

/// Writes a new file. Must fail with [`io::ErrorKind::AlreadyExists`] when `path` is taken,
/// and must not leave a partial file behind on any other error.
pub trait DestinationWriter: Send + Sync {
    fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// The collaborators handed to every worker.
#[derive(Clone)]
pub struct Capabilities {
    pub extractor: Arc<dyn MetadataExtractor>,
    pub comparator: Arc<dyn ContentComparator>,
    pub writer: Arc<dyn DestinationWriter>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            extractor: Arc::new(ExifExtractor),
            comparator: Arc::new(HashComparator),
            writer: Arc::new(FsWriter),
        }
    }
}

impl Capabilities {
    pub fn with_extractor(mut self, extractor: impl MetadataExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn with_comparator(mut self, comparator: impl ContentComparator + 'static) -> Self {
        self.comparator = Arc::new(comparator);
        self
    }

    pub fn with_writer(mut self, writer: impl DestinationWriter + 'static) -> Self {
        self.writer = Arc::new(writer);
        self
    }
}
