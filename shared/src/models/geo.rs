//! Country / State / City lookup models

use super::{AsSelectOption, SelectOption};
use crate::util::string_or_number;
use serde::{Deserialize, Serialize};

/// Country (`countrieslist`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(alias = "country_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "country_name")]
    pub name: String,
}

/// State (`stateslist&country_id=`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(alias = "state_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "state_name")]
    pub name: String,
}

/// City (`citieslist&state_id=`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(alias = "city_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "city_name")]
    pub name: String,
}

impl AsSelectOption for Country {
    fn to_option(&self) -> SelectOption {
        SelectOption::new(&self.id, &self.name)
    }
}

impl AsSelectOption for State {
    fn to_option(&self) -> SelectOption {
        SelectOption::new(&self.id, &self.name)
    }
}

impl AsSelectOption for City {
    fn to_option(&self) -> SelectOption {
        SelectOption::new(&self.id, &self.name)
    }
}
