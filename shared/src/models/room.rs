//! Room / Bed models

use super::{AsSelectOption, SelectOption};
use crate::util::{opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// Room (`roomlist&user_id=`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(deserialize_with = "string_or_number")]
    pub room_id: String,
    #[serde(alias = "room_number", deserialize_with = "string_or_number")]
    pub room_no: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub building_id: Option<String>,
}

/// Bed (`bedlist&room_id=`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bed {
    #[serde(deserialize_with = "string_or_number")]
    pub bed_id: String,
    #[serde(alias = "bed_number", deserialize_with = "string_or_number")]
    pub bed_no: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub room_id: Option<String>,
}

impl AsSelectOption for Room {
    fn to_option(&self) -> SelectOption {
        SelectOption::new(&self.room_id, format!("Room {}", self.room_no))
    }
}

impl AsSelectOption for Bed {
    fn to_option(&self) -> SelectOption {
        SelectOption::new(&self.bed_id, format!("Bed {}", self.bed_no))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_and_bed() {
        let r: Room = serde_json::from_str(r#"{"room_id": 12, "room_no": "201"}"#).unwrap();
        assert_eq!(r.to_option(), SelectOption::new("12", "Room 201"));
        assert!(r.building_id.is_none());

        let b: Bed = serde_json::from_str(r#"{"bed_id": "5", "bed_no": 2, "room_id": 12}"#).unwrap();
        assert_eq!(b.to_option(), SelectOption::new("5", "Bed 2"));
        assert_eq!(b.room_id.as_deref(), Some("12"));
    }
}
