//! `gofor` operation discriminator
//!
//! The remote data API exposes a single endpoint; the operation is selected
//! by the `gofor` query parameter (GET) or body field (POST).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote data API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gofor {
    // === Lookup lists ===
    GuestList,
    RoomList,
    BedList,
    DuePayments,
    CountriesList,
    StatesList,
    CitiesList,

    // === Page content ===
    RulesList,
    ReviewList,
    GalleryList,
    FoodPlanList,
    GetBuilding,
    UserGet,

    // === Mutations ===
    AddGuest,
    PayRent,
    #[serde(rename = "image_upload")]
    ImageUpload,
}

impl Gofor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GuestList => "guestlist",
            Self::RoomList => "roomlist",
            Self::BedList => "bedlist",
            Self::DuePayments => "duepayments",
            Self::CountriesList => "countrieslist",
            Self::StatesList => "stateslist",
            Self::CitiesList => "citieslist",
            Self::RulesList => "ruleslist",
            Self::ReviewList => "reviewlist",
            Self::GalleryList => "gallerylist",
            Self::FoodPlanList => "foodplanlist",
            Self::GetBuilding => "getbuilding",
            Self::UserGet => "userget",
            Self::AddGuest => "addguest",
            Self::PayRent => "payrent",
            Self::ImageUpload => "image_upload",
        }
    }

    /// Whether the operation is sent as a JSON POST body
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::AddGuest | Self::PayRent | Self::ImageUpload)
    }
}

impl fmt::Display for Gofor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
