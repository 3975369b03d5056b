//! Upload slot state machine
//!
//! `Idle → Reading → Uploading → Done`, with any failing step ending in
//! `Failed`. A failed slot keeps its file so the upload can be retried
//! without selecting it again.

use super::file::{FilePolicy, LocalFile};
use crate::{ClientError, ClientResult, PortalClient};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use shared::{Gofor, UploadResponse};
use std::fmt;
use tokio::sync::watch;

/// What an upload is for; sent as the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPurpose {
    /// Rent payment proof
    Rent,
    /// Guest photo
    Guest,
    /// ID proof document
    IdProof,
    /// Company / employment proof
    Company,
}

impl UploadPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Guest => "guest",
            Self::IdProof => "idproof",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for UploadPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Reading,
    Uploading,
    Done,
    Failed,
}

#[derive(Serialize)]
struct ImageUploadRequest<'a> {
    /// Base64 file content, without a data-URL prefix
    imgname: &'a str,
    #[serde(rename = "type")]
    purpose: UploadPurpose,
}

/// A single file input backed by the `image_upload` operation
#[derive(Debug)]
pub struct UploadSlot {
    purpose: UploadPurpose,
    required: bool,
    policy: FilePolicy,
    file: Option<LocalFile>,
    status: UploadStatus,
    remote_url: Option<String>,
    error_message: Option<String>,
    status_tx: watch::Sender<UploadStatus>,
}

impl UploadSlot {
    pub fn new(purpose: UploadPurpose, required: bool, policy: FilePolicy) -> Self {
        let (status_tx, _) = watch::channel(UploadStatus::Idle);
        Self {
            purpose,
            required,
            policy,
            file: None,
            status: UploadStatus::Idle,
            remote_url: None,
            error_message: None,
            status_tx,
        }
    }

    pub fn purpose(&self) -> UploadPurpose {
        self.purpose
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn file(&self) -> Option<&LocalFile> {
        self.file.as_ref()
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Persisted URL; set only when `Done`
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref()
    }

    /// Failure message; set only when `Failed`
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Observe status changes
    pub fn watch(&self) -> watch::Receiver<UploadStatus> {
        self.status_tx.subscribe()
    }

    /// Whether a dependent submission may proceed
    pub fn is_satisfied(&self) -> bool {
        match self.status {
            UploadStatus::Done => true,
            UploadStatus::Idle => !self.required,
            _ => false,
        }
    }

    fn set_status(&mut self, status: UploadStatus) {
        tracing::debug!(purpose = %self.purpose, from = ?self.status, to = ?status, "Upload status");
        self.status = status;
        self.status_tx.send_replace(status);
    }

    fn fail(&mut self, client: &PortalClient, message: String) -> ClientError {
        self.remote_url = None;
        self.error_message = Some(message.clone());
        self.set_status(UploadStatus::Failed);
        client.notifier().error("Upload", message.clone());
        ClientError::Upload(message)
    }

    /// Validate a file against this slot's policy
    pub fn validate(&self, file: &LocalFile) -> Option<String> {
        self.policy.validate(file)
    }

    /// Choose a file
    ///
    /// An invalid file is rejected and the current selection is kept. A valid
    /// one replaces it and returns the slot to `Idle`.
    pub fn select_file(&mut self, file: LocalFile) -> ClientResult<()> {
        if let Some(message) = self.validate(&file) {
            tracing::info!(purpose = %self.purpose, file = %file.name, %message, "File rejected");
            return Err(ClientError::validation(self.purpose.as_str(), message));
        }
        self.file = Some(file);
        self.remote_url = None;
        self.error_message = None;
        self.set_status(UploadStatus::Idle);
        Ok(())
    }

    /// Drop the selection and any uploaded URL
    pub fn clear(&mut self) {
        self.file = None;
        self.remote_url = None;
        self.error_message = None;
        self.set_status(UploadStatus::Idle);
    }

    /// Upload the selected file; returns the persisted URL
    ///
    /// Also used to retry after `Failed`, or after an earlier upload future
    /// was dropped mid-flight.
    pub async fn upload(&mut self, client: &PortalClient) -> ClientResult<String> {
        let Some(file) = self.file.clone() else {
            return Err(ClientError::NotReady("no file selected".into()));
        };
        // `&mut self` rules out a concurrent upload, so an in-progress status
        // here belongs to a cancelled one
        if matches!(self.status, UploadStatus::Reading | UploadStatus::Uploading) {
            tracing::debug!(purpose = %self.purpose, status = ?self.status, "Restarting interrupted upload");
        }
        self.error_message = None;

        self.set_status(UploadStatus::Reading);
        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.fail(client, format!("Could not read {}: {e}", file.name))),
        };
        // The file may have changed since it was selected
        let actual = LocalFile {
            size: bytes.len() as u64,
            ..file.clone()
        };
        if let Some(message) = self.validate(&actual) {
            return Err(self.fail(client, message));
        }
        let encoded = STANDARD.encode(&bytes);

        self.set_status(UploadStatus::Uploading);
        let request = ImageUploadRequest {
            imgname: &encoded,
            purpose: self.purpose,
        };
        let value = match client.submit(Gofor::ImageUpload, &request).await {
            Ok(value) => value,
            Err(e) => return Err(self.fail(client, format!("Upload error: {e}"))),
        };
        let response: UploadResponse = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => return Err(self.fail(client, format!("Malformed upload response: {e}"))),
        };

        match response.into_result() {
            Ok(url) => {
                tracing::info!(purpose = %self.purpose, file = %file.name, %url, "Upload complete");
                self.remote_url = Some(url.clone());
                self.set_status(UploadStatus::Done);
                client.notifier().success("Upload", "Upload successful!");
                Ok(url)
            }
            Err(message) => Err(self.fail(client, message)),
        }
    }
}
