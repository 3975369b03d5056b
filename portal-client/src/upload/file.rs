//! Local file selection and pre-upload validation

use crate::{ClientError, ClientResult};
use std::path::{Path, PathBuf};

/// Image types accepted for every upload
pub const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Document type additionally accepted for ID proofs
pub const PDF_TYPE: &str = "application/pdf";

/// A file chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub name: String,
    /// MIME type guessed from the extension
    pub mime: String,
    pub size: u64,
}

impl LocalFile {
    /// Describe the file at `path` (reads metadata only)
    pub async fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path).await?;
        if !meta.is_file() {
            return Err(ClientError::validation(
                "file",
                format!("{} is not a file", path.display()),
            ));
        }
        Ok(Self::with_size(path, meta.len()))
    }

    /// Describe a file whose size is already known
    pub fn with_size(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            path,
            name,
            mime,
            size,
        }
    }
}

/// What a slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    pub max_bytes: u64,
    pub allow_pdf: bool,
}

impl FilePolicy {
    pub fn images(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            allow_pdf: false,
        }
    }

    pub fn documents(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            allow_pdf: true,
        }
    }

    fn allows_type(&self, mime: &str) -> bool {
        IMAGE_TYPES.contains(&mime) || (self.allow_pdf && mime == PDF_TYPE)
    }

    /// Validation failure message, or `None` when the file is acceptable
    pub fn validate(&self, file: &LocalFile) -> Option<String> {
        if !self.allows_type(&file.mime) {
            let allowed = if self.allow_pdf {
                "JPEG, PNG, GIF or PDF"
            } else {
                "JPEG, PNG or GIF"
            };
            return Some(format!(
                "Unsupported file type '{}'. Allowed: {allowed}",
                file.mime
            ));
        }
        if file.size > self.max_bytes {
            return Some(format!(
                "File is too large ({:.1} MB). Maximum size is {} MB",
                file.size as f64 / (1024.0 * 1024.0),
                self.max_bytes / 1024 / 1024
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(LocalFile::with_size("a/receipt.JPG", 1).mime, "image/jpeg");
        assert_eq!(LocalFile::with_size("id.pdf", 1).mime, "application/pdf");
        assert_eq!(LocalFile::with_size("blob", 1).mime, "application/octet-stream");
        assert_eq!(LocalFile::with_size("x/y/photo.png", 1).name, "photo.png");
    }

    #[test]
    fn test_validate_types() {
        let images = FilePolicy::images(5 * MIB);
        for ok in ["a.jpg", "a.jpeg", "a.png", "a.gif"] {
            assert_eq!(images.validate(&LocalFile::with_size(ok, 10)), None, "{ok}");
        }
        for bad in ["a.pdf", "a.webp", "a.exe", "a"] {
            assert!(images.validate(&LocalFile::with_size(bad, 10)).is_some(), "{bad}");
        }
        let docs = FilePolicy::documents(5 * MIB);
        assert_eq!(docs.validate(&LocalFile::with_size("id.pdf", 10)), None);
    }

    #[test]
    fn test_validate_size_boundary() {
        let policy = FilePolicy::images(5 * MIB);
        assert_eq!(policy.validate(&LocalFile::with_size("a.jpg", 5 * MIB)), None);
        let msg = policy
            .validate(&LocalFile::with_size("a.jpg", 5 * MIB + 1))
            .unwrap();
        assert!(msg.contains("too large"));
        assert!(policy.validate(&LocalFile::with_size("a.jpg", 6 * MIB)).is_some());
    }
}
