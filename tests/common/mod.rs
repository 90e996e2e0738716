//! Shared fixtures: a text-header extractor, a corrupting writer, a TIFF builder and tree helpers.
#![allow(dead_code)]

use photo_organizer::engine::{FsWriter, parse_capture_time};
use photo_organizer::{
    Capabilities, DestinationWriter, ExtractError, ImageMetadata, MetadataExtractor, OrganizeOpts,
};
use std::io;
use std::path::{Path, PathBuf};

/// Reads `MODEL|YYYY:MM:DD HH:MM:SS|payload` so tests control metadata and content separately.
pub struct TextExtractor;

impl MetadataExtractor for TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ImageMetadata, ExtractError> {
        let text = std::str::from_utf8(bytes).map_err(|e| ExtractError::Decode(e.to_string()))?;
        let mut parts = text.splitn(3, '|');
        let model = parts
            .next()
            .filter(|m| !m.is_empty())
            .ok_or(ExtractError::MissingTag("Model"))?;
        let taken_at = parts.next().ok_or(ExtractError::MissingTag("DateTime"))?;
        Ok(ImageMetadata::new(model, parse_capture_time(taken_at)?))
    }
}

/// Writes only the first half of the bytes, as a short write would.
pub struct TruncatingWriter;

impl DestinationWriter for TruncatingWriter {
    fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        FsWriter.write_new(path, &bytes[..bytes.len() / 2])
    }
}

pub fn text_caps() -> Capabilities {
    Capabilities::default().with_extractor(TextExtractor)
}

pub fn opts(num_workers: usize) -> OrganizeOpts {
    OrganizeOpts {
        num_workers,
        ..OrganizeOpts::default()
    }
}

pub fn image(model: &str, taken_at: &str, payload: &str) -> String {
    format!("{model}|{taken_at}|{payload}")
}

/// Write `contents` to `root/rel`, creating parent dirs.
pub fn put(root: &Path, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

/// All regular files under `root`, relative and sorted, with `/` separators.
pub fn files_under(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}

pub const TAG_MODEL: u16 = 0x0110;
pub const TAG_DATETIME: u16 = 0x0132;
const TYPE_ASCII: u16 = 2;

/// Minimal little-endian TIFF with one IFD carrying the given ASCII tags (pass them sorted by tag).
pub fn tiff_with_ascii_tags(tags: &[(u16, &str)]) -> Vec<u8> {
    let entries = tags.len();
    let ifd_len = 2 + entries * 12 + 4;
    let mut data_offset = 8 + ifd_len;
    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());
    out.extend_from_slice(&(entries as u16).to_le_bytes());

    let mut data = Vec::new();
    for (tag, text) in tags {
        let mut value = text.as_bytes().to_vec();
        value.push(0);
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&TYPE_ASCII.to_le_bytes());
        out.extend_from_slice(&(value.len() as u32).to_le_bytes());
        out.extend_from_slice(&(data_offset as u32).to_le_bytes());
        // keep value offsets word-aligned
        if value.len() % 2 == 1 {
            value.push(0);
        }
        data_offset += value.len();
        data.extend_from_slice(&value);
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data);
    out
}

pub fn sample_tiff(model: &str, datetime: &str) -> Vec<u8> {
    tiff_with_ascii_tags(&[(TAG_MODEL, model), (TAG_DATETIME, datetime)])
}
