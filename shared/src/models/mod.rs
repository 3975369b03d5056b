//! Data models returned by the remote data API

pub mod building;
pub mod content;
pub mod geo;
pub mod guest;
pub mod invoice;
pub mod room;

use serde::{Deserialize, Serialize};

pub use building::{Building, UserProfile};
pub use content::{FoodPlan, GalleryImage, Review, Rule};
pub use geo::{City, Country, State};
pub use guest::Guest;
pub use invoice::{Invoice, InvoiceStatus};
pub use room::{Bed, Room};

/// One entry of a select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Identifier sent back to the API for the next level
    pub id: String,
    /// Display label
    pub name: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Models that can populate a select control
pub trait AsSelectOption {
    fn to_option(&self) -> SelectOption;
}

impl AsSelectOption for SelectOption {
    fn to_option(&self) -> SelectOption {
        self.clone()
    }
}
