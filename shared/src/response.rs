//! API response envelopes
//!
//! The backend has no single response contract. Uploads answer either
//! `{success, url}` or `{status: "success", url}`; mutations answer a mix of
//! `{success}`, `{status}` and `{response: "<literal>"}`. These types accept
//! every observed shape and reduce it to a structured ok/error result. Free
//! text is never scanned for an "error" marker.

use serde::{Deserialize, Deserializer, Serialize};

/// Flag that may be sent as `true`, `1` or `"true"`
fn loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|f| match f {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Str(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
    }))
}

fn is_success_status(status: &str) -> bool {
    matches!(status.trim().to_ascii_lowercase().as_str(), "success" | "ok" | "true")
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `image_upload` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "loose_bool")]
    pub success: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

impl UploadResponse {
    /// Persisted URL on success, failure message otherwise
    ///
    /// Success requires a positive flag (either shape) and a non-empty URL.
    pub fn into_result(self) -> Result<String, String> {
        let flagged = self.success == Some(true)
            || self.status.as_deref().is_some_and(is_success_status);
        let failure = non_empty(&self.message)
            .map(String::from)
            .unwrap_or_else(|| "Upload failed".to_string());

        if !flagged {
            return Err(failure);
        }
        match non_empty(&self.url) {
            Some(url) => Ok(url.to_string()),
            None => Err("Upload succeeded but no URL was returned".to_string()),
        }
    }
}

/// Mutation (`addguest`, `payrent`) response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    #[serde(default, alias = "success", deserialize_with = "loose_bool")]
    pub ok: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    /// Free-text confirmation, e.g. "Rent Paid successfully"
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmitOutcome {
    /// Classify the outcome
    ///
    /// `success_literal` is the exact confirmation text an operation answers
    /// with in the `response` field, when it uses that shape. An explicit
    /// `error` field always wins.
    pub fn into_result(self, success_literal: Option<&str>) -> Result<String, String> {
        if let Some(err) = non_empty(&self.error) {
            return Err(err.to_string());
        }

        let literal_match = match (success_literal, non_empty(&self.response)) {
            (Some(expected), Some(got)) => expected == got,
            _ => false,
        };
        let succeeded = literal_match
            || self.ok == Some(true)
            || self.status.as_deref().is_some_and(is_success_status);

        let text = non_empty(&self.message)
            .or_else(|| non_empty(&self.response))
            .map(String::from);

        if succeeded {
            Ok(text.unwrap_or_else(|| "Submitted successfully".to_string()))
        } else {
            Err(text.unwrap_or_else(|| "Submission failed".to_string()))
        }
    }
}
