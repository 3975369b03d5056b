//! Page content models: rules, reviews, gallery, food plan

use crate::util::{float_or_string, int_or_string, opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// Published flag used by gallery and review rows
pub const STATUS_PUBLISHED: i64 = 1;

/// House rule section (`ruleslist`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, alias = "description")]
    pub items: RuleItems,
}

/// Rule body: the backend sends either a list or a single text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleItems {
    List(Vec<String>),
    Text(String),
}

impl Default for RuleItems {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl RuleItems {
    /// Items as lines; text blocks are split on newlines
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Text(text) => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// Guest review (`reviewlist`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub guest_id: Option<String>,
    #[serde(deserialize_with = "float_or_string")]
    pub rating: f64,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(deserialize_with = "int_or_string")]
    pub status: i64,
}

impl Review {
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }
}

/// Gallery image (`gallerylist`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "int_or_string")]
    pub status: i64,
}

impl GalleryImage {
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }
}

/// Day entry of the weekly food plan (`foodplanlist`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPlan {
    /// Lower-case weekday, e.g. "monday"
    pub day: String,
    #[serde(default)]
    pub breakfast: MealItems,
    #[serde(default)]
    pub lunch: MealItems,
    #[serde(default)]
    pub dinner: MealItems,
}

/// Dishes of one meal; either a list or a comma-separated string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MealItems {
    List(Vec<String>),
    Csv(String),
}

impl Default for MealItems {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl MealItems {
    pub fn dishes(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Csv(s) => s
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rating_as_string() {
        let r: Review = serde_json::from_str(
            r#"{"id": 3, "guest_id": 42, "rating": "4", "review_text": "Clean rooms", "status": 1}"#,
        )
        .unwrap();
        assert_eq!(r.rating, 4.0);
        assert!(r.is_published());
    }

    #[test]
    fn test_rule_items_text() {
        let r: Rule = serde_json::from_str(
            r#"{"title": "Visitors", "description": "No visitors after 9 PM\n\nSign the register"}"#,
        )
        .unwrap();
        assert_eq!(r.items.lines(), vec!["No visitors after 9 PM", "Sign the register"]);
    }

    #[test]
    fn test_meal_items_csv() {
        let f: FoodPlan = serde_json::from_str(
            r#"{"day": "monday", "breakfast": "Idli/Dosa, Sambar, Tea/Coffee", "lunch": ["Rice", "Dal"]}"#,
        )
        .unwrap();
        assert_eq!(f.breakfast.dishes(), vec!["Idli/Dosa", "Sambar", "Tea/Coffee"]);
        assert_eq!(f.lunch.dishes().len(), 2);
        assert!(f.dinner.dishes().is_empty());
    }
}
