//! EXIF-backed [`MetadataExtractor`] (JPEG and TIFF-based RAW containers).

use chrono::NaiveDateTime;
use exif::{Exif, In, Reader, Tag, Value};
use std::io::Cursor;

use crate::ImageMetadata;
use crate::engine::capabilities::MetadataExtractor;
use crate::engine::naming::normalize_model;
use crate::error::ExtractError;

/// EXIF `DateTime*` layout.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Reads `Model` and the capture time (`DateTimeOriginal`, else `DateTime`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExifExtractor;

impl MetadataExtractor for ExifExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ImageMetadata, ExtractError> {
        let exif = Reader::new()
            .read_from_container(&mut Cursor::new(bytes))
            .map_err(|e| ExtractError::Decode(e.to_string()))?;

        let model = ascii_field(&exif, Tag::Model)
            .map(|m| normalize_model(&m))
            .filter(|m| !m.is_empty())
            .ok_or(ExtractError::MissingTag("Model"))?;

        let raw_time = ascii_field(&exif, Tag::DateTimeOriginal)
            .or_else(|| ascii_field(&exif, Tag::DateTime))
            .ok_or(ExtractError::MissingTag("DateTime"))?;

        Ok(ImageMetadata {
            model,
            taken_at: parse_capture_time(&raw_time)?,
        })
    }
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .filter(|s| !s.trim().is_empty()),
        _ => None,
    }
}

/// Parse `YYYY:MM:DD HH:MM:SS`, tolerating surrounding quotes, whitespace and NUL padding.
pub fn parse_capture_time(raw: &str) -> Result<NaiveDateTime, ExtractError> {
    let cleaned = raw.trim_matches(|c: char| c == '"' || c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(cleaned, EXIF_DATETIME_FORMAT)
        .map_err(|_| ExtractError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            ExifExtractor.extract(b"definitely not an image"),
            Err(ExtractError::Decode(_))
        ));
    }

    #[test]
    fn capture_time_parsing() {
        assert!(parse_capture_time("\"2023:01:31 23:59:59\"").is_ok());
        assert!(parse_capture_time("2023:01:31 23:59:59\0").is_ok());
        assert!(matches!(
            parse_capture_time("2023-01-31T23:59:59"),
            Err(ExtractError::InvalidTimestamp(_))
        ));
        assert!(parse_capture_time("0000:00:00 00:00:00").is_err());
    }
}
