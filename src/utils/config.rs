//! Application configuration constants.
//! Defaults and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Settings file looked up in the destination directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Input ----

/// Extensions treated as images when none are configured (case-insensitive, no dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "arw"];

// ---- Worker threads ----

/// Copy workers when not configured.
pub const DEFAULT_NUM_WORKERS: usize = 2;

/// Path and outcome channel capacity. The walk blocks once this many paths are queued
/// and not yet picked up, which bounds memory on very large trees.
pub const PATH_CHANNEL_CAP: usize = 10_000;

// ---- Collisions ----

pub struct CollisionConsts;

impl CollisionConsts {
    /// Highest `-NN` index probed for one timestamp+model before the file fails.
    pub const MAX_INDEX: u32 = 9_999;
}

// ---- Hashing ----

/// Hashing I/O thresholds and buffer sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// File size above which hashing uses memory-mapped I/O (bytes). 100 MB.
    pub const HASH_MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;
    /// Chunk size for reading files below mmap threshold (bytes). 1 MB.
    pub const HASH_READ_CHUNK_SIZE: usize = 1024 * 1024;
}
