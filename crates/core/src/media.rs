//! Image attachments as base64 data URIs.
//!
//! The generation boundary accepts images only in the
//! `data:<mimetype>;base64,<data>` form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Not a data URI: expected 'data:<mimetype>;base64,<data>'")]
    NotDataUri,

    #[error("Data URI is not base64 encoded")]
    NotBase64,

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    #[error("Failed to read image at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A validated image data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUri {
    mime_type: String,
    data: String,
}

impl ImageDataUri {
    /// Encode raw image bytes.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self, MediaError> {
        if !mime_type.starts_with("image/") {
            return Err(MediaError::UnsupportedType(mime_type.to_string()));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Read an image file, inferring the MIME type from its extension.
    pub fn from_file(path: &Path) -> Result<Self, MediaError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let mime_type = mime_type_for_extension(&extension)
            .ok_or_else(|| MediaError::UnsupportedType(format!(".{extension}")))?;

        let bytes = std::fs::read(path).map_err(|source| MediaError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(mime_type, &bytes)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the `data:` prefix.
    pub fn data(&self) -> &str {
        &self.data
    }
}

fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

impl FromStr for ImageDataUri {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.trim().strip_prefix("data:").ok_or(MediaError::NotDataUri)?;
        let (header, data) = rest.split_once(',').ok_or(MediaError::NotDataUri)?;
        let mime_type = header.strip_suffix(";base64").ok_or(MediaError::NotBase64)?;

        if !mime_type.starts_with("image/") {
            return Err(MediaError::UnsupportedType(mime_type.to_string()));
        }

        STANDARD.decode(data)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

impl fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri() {
        let uri: ImageDataUri = "data:image/png;base64,aGVsbG8=".parse().unwrap();
        assert_eq!(uri.mime_type(), "image/png");
        assert_eq!(uri.data(), "aGVsbG8=");
        assert_eq!(uri.to_string(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_parse_rejects_malformed_uris() {
        assert!(matches!(
            "https://example.com/a.png".parse::<ImageDataUri>(),
            Err(MediaError::NotDataUri)
        ));
        assert!(matches!(
            "data:image/png,raw".parse::<ImageDataUri>(),
            Err(MediaError::NotBase64)
        ));
        assert!(matches!(
            "data:text/plain;base64,aGVsbG8=".parse::<ImageDataUri>(),
            Err(MediaError::UnsupportedType(_))
        ));
        assert!(matches!(
            "data:image/png;base64,@@@".parse::<ImageDataUri>(),
            Err(MediaError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_from_file_infers_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, b"hello").unwrap();

        let uri = ImageDataUri::from_file(&path).unwrap();
        assert_eq!(uri.mime_type(), "image/jpeg");
        assert_eq!(uri.data(), "aGVsbG8=");
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let result = ImageDataUri::from_file(&path);
        assert!(matches!(result, Err(MediaError::UnsupportedType(_))));
    }
}
