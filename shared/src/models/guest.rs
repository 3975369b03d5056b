//! Guest model (`guestlist`)

use super::{AsSelectOption, SelectOption};
use crate::util::{opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// A registered guest, as listed for rent payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(deserialize_with = "string_or_number")]
    pub guest_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub room_no: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bed_no: Option<String>,
    /// Monthly rent; the backend sends a decimal string
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub rent_amount: Option<String>,
    #[serde(default)]
    pub rent_due_date: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bed_id: Option<String>,
}

impl AsSelectOption for Guest {
    fn to_option(&self) -> SelectOption {
        let label = match &self.room_no {
            Some(room) => format!("{} (Room {})", self.name, room),
            None => self.name.clone(),
        };
        SelectOption::new(&self.guest_id, label)
    }
}
