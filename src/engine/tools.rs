//! Path and filter utilities

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// True when the extension of `path` is in `extensions` (lowercased, no dot). Case-insensitive on the path side.
pub fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let ext = ext.to_lowercase();
            extensions.iter().any(|e| *e == ext)
        }
        None => false,
    }
}

/// Canonicalize `path` and require it to be an existing directory.
pub fn validate_dir(path: &Path, label: &str) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("{} dir {} does not exist", label, path.display()))?;
    if !canonical.is_dir() {
        bail!("{} path {} is not a directory", label, path.display());
    }
    Ok(canonical)
}

/// Validate both roots before any work starts. Returns canonical `(source, dest)`.
pub fn validate_roots(source: &Path, dest: &Path) -> Result<(PathBuf, PathBuf)> {
    let source = validate_dir(source, "source")?;
    let dest = validate_dir(dest, "destination")?;
    if source == dest {
        bail!(
            "source and destination are the same directory: {}",
            source.display()
        );
    }
    Ok((source, dest))
}
