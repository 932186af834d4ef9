use bytes::Bytes;
use std::path::Path;

use crate::constants::IMAGE_MEDIA_TYPE_PREFIX;

/// A locally selected file waiting to be uploaded as a frame or poster.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub file_name: String,
    pub media_type: String,
    pub data: Bytes,
}

impl CandidateFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, deriving its media type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self::new(file_name, media_type_for_path(path), data))
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type
            .trim()
            .to_ascii_lowercase()
            .starts_with(IMAGE_MEDIA_TYPE_PREFIX)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Media type for a path, by extension. Unknown extensions map to
/// `application/octet-stream`.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "json" => "application/json",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
