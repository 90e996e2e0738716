//! File hashing and the default content comparator.

use blake3::Hasher;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::engine::capabilities::ContentComparator;
use crate::utils::config::HashingConsts;

/// Hash a file with blake3. Uses memory-mapped I/O for files above threshold, chunked reading otherwise.
pub fn hash_file(path: &Path, size: u64) -> io::Result<[u8; 32]> {
    let file = File::open(path)?;
    let mut hasher = Hasher::new();

    if size > HashingConsts::HASH_MMAP_THRESHOLD {
        // Memory-mapped I/O for large files (Blake3 already uses SIMD internally)
        let mmap = unsafe { Mmap::map(&file)? };
        hasher.update(&mmap);
    } else {
        let mut reader = io::BufReader::with_capacity(HashingConsts::HASH_READ_CHUNK_SIZE, file);
        let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Compares sizes first, then blake3 digests.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashComparator;

impl ContentComparator for HashComparator {
    fn same_content(&self, a: &Path, b: &Path) -> io::Result<bool> {
        let size_a = std::fs::metadata(a)?.len();
        let size_b = std::fs::metadata(b)?.len();
        if size_a != size_b {
            return Ok(false);
        }
        Ok(hash_file(a, size_a)? == hash_file(b, size_b)?)
    }
}
