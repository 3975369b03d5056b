//! Portal session context
//!
//! Every portal route is scoped by `user_id` (the PG owner account) and,
//! usually, `building_id`. Both arrive on the page URL's query string; the
//! session is parsed once and passed to every component.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};

/// `user_id` / `building_id` scope for a portal visit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortalSession {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
}

impl PortalSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            building_id: None,
        }
    }

    pub fn with_building(mut self, building_id: impl Into<String>) -> Self {
        self.building_id = Some(building_id.into());
        self
    }

    /// Parse from a query string such as `?user_id=7&building_id=3`
    ///
    /// A leading `?` is optional. Unknown parameters are ignored; empty
    /// values count as missing.
    pub fn from_query(query: &str) -> Result<Self, SessionError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut user_id = None;
        let mut building_id = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "user_id" => user_id = Some(Self::check_param("user_id", value)?),
                "building_id" => building_id = Some(Self::check_param("building_id", value)?),
                other => tracing::trace!(key = other, "Ignoring query parameter"),
            }
        }

        Ok(Self {
            user_id: user_id.ok_or(SessionError::MissingUserId)?,
            building_id,
        })
    }

    fn check_param(name: &'static str, value: &str) -> Result<String, SessionError> {
        if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            Ok(value.to_string())
        } else {
            Err(SessionError::InvalidParam {
                name,
                value: value.to_string(),
            })
        }
    }

    /// Query pairs identifying this session
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("user_id", self.user_id.clone())];
        if let Some(b) = &self.building_id {
            pairs.push(("building_id", b.clone()));
        }
        pairs
    }

    /// Route to `path` carrying the session identifiers
    pub fn route(&self, path: &str) -> String {
        let query = self
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}
