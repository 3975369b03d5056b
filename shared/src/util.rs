//! Serde helpers for the loosely-typed remote API
//!
//! The backend is inconsistent about scalar encoding: ids and amounts arrive
//! either as JSON numbers or as strings. These helpers accept both.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Deserialize a string or number into a `String`
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_string())
}

/// Deserialize an optional string or number; `null` becomes `None`
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

/// Deserialize an integer that may be sent as a string
pub fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(i) => Ok(i),
        Scalar::Float(f) => Ok(f as i64),
        Scalar::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Scalar::Bool(b) => Ok(b as i64),
    }
}

/// Deserialize a float that may be sent as a string
pub fn float_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(i) => Ok(i as f64),
        Scalar::Float(f) => Ok(f),
        Scalar::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Scalar::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
    }
}

/// Today's date as `YYYY-MM-DD` (local time)
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
