//! Building and owner profile (`getbuilding`, `userget`)

use crate::util::{opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// PG building shown on the home and location pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    #[serde(deserialize_with = "string_or_number")]
    pub building_id: String,
    #[serde(alias = "name")]
    pub building_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub longitude: Option<String>,
    /// Fields the portal does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Building {
    /// Map link: explicit URL, else a coordinates query
    pub fn map_link(&self) -> Option<String> {
        if let Some(url) = self.map_url.as_ref().filter(|u| !u.is_empty()) {
            return Some(url.clone());
        }
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lng)) => Some(format!("https://www.google.com/maps?q={lat},{lng}")),
            _ => None,
        }
    }
}

/// PG owner account (`userget`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
