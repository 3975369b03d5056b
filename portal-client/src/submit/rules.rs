//! Field rules shared by the portal forms

use regex::Regex;
use shared::FieldError;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

/// Indian mobile number: 10 ASCII digits, leading 6-9
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid regex"));

/// Basic `local@domain.tld` shape
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const MOBILE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// The value is checked as sent; surrounding whitespace fails
pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Required mobile number
pub fn mobile(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Mobile number is required"));
    }
    if !is_valid_mobile(value) {
        return Err(error("mobile", MOBILE_MESSAGE));
    }
    Ok(())
}

/// Optional mobile number (checked only when present)
pub fn optional_mobile(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || is_valid_mobile(value) {
        Ok(())
    } else {
        Err(error("mobile", MOBILE_MESSAGE))
    }
}

/// Optional email (checked only when present)
pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || is_valid_email(value) {
        Ok(())
    } else {
        Err(error("email", EMAIL_MESSAGE))
    }
}

/// Non-blank text
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Positive decimal amount
pub fn positive_amount(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Amount is required"));
    }
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(error("amount", "Amount must be a positive number")),
    }
}

/// Flatten validator output into form-ordered field errors
///
/// Fields listed in `order` come first in that order; anything else follows
/// alphabetically. Errors without a message get a "<field> is required" text.
pub fn collect(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = Vec::new();
    for (field, errs) in errors.field_errors() {
        let field = field.to_string();
        for e in errs.iter() {
            out.push(match &e.message {
                Some(message) => FieldError::new(&field, message.to_string()),
                None => FieldError::required(&field),
            });
        }
    }
    let rank = |f: &str| order.iter().position(|o| *o == f).unwrap_or(order.len());
    out.sort_by(|a, b| {
        rank(&a.field)
            .cmp(&rank(&b.field))
            .then_with(|| a.field.cmp(&b.field))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_pattern() {
        assert!(is_valid_mobile("9876543210"));
        assert!(is_valid_mobile("6000000000"));
        assert!(!is_valid_mobile("5876543210"));
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile("98765432101"));
        assert!(!is_valid_mobile("98765-4321"));
        // Non-ASCII decimal digits (Devanagari)
        assert!(!is_valid_mobile("9\u{096E}\u{096D}\u{096C}\u{096B}\u{096A}\u{0969}\u{0968}\u{0967}\u{0966}"));
        assert!(!is_valid_mobile(" 9876543210 "));
    }

    #[test]
    fn test_mobile_rule_messages() {
        assert_eq!(mobile("").unwrap_err().code, "required");
        let err = mobile("12345").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(MOBILE_MESSAGE));
        assert!(optional_mobile("").is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("asha@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha example.com"));
        assert!(optional_email("").is_ok());
        assert!(optional_email("nope").is_err());
    }

    #[test]
    fn test_positive_amount() {
        assert!(positive_amount("6500.00").is_ok());
        assert!(positive_amount("0").is_err());
        assert!(positive_amount("-5").is_err());
        assert!(positive_amount("abc").is_err());
        assert_eq!(positive_amount(" ").unwrap_err().code, "required");
    }
}
