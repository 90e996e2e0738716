//! Engine: naming, collision resolution, per-file copy and the CLI layer around them.

pub mod arg_parser;
pub mod capabilities;
pub mod cli;
pub mod copy;
pub mod exif;
pub mod fs_ops;
pub mod hashing;
pub mod naming;
pub mod progress;
pub mod resolver;
pub mod tools;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use capabilities::{Capabilities, ContentComparator, DestinationWriter, MetadataExtractor};
pub use cli::handle_run;
pub use copy::{CopyContext, process_file};
pub use exif::{ExifExtractor, parse_capture_time};
pub use fs_ops::FsWriter;
pub use hashing::{HashComparator, hash_file};
pub use naming::{candidate, destination_dir, dotted_extension, normalize_model};
pub use resolver::{ClaimRegistry, CollisionResolver, Resolution};
pub use tools::{has_image_extension, validate_roots};
