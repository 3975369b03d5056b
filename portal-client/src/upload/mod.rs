//! File upload adapter

mod file;
mod slot;

pub use file::{FilePolicy, IMAGE_TYPES, LocalFile, PDF_TYPE};
pub use slot::{UploadPurpose, UploadSlot, UploadStatus};
