//! Invoice model (`duepayments`)

use super::{AsSelectOption, SelectOption};
use crate::util::{opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// Invoice payment status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    #[serde(other)]
    Other,
}

/// Monthly rent invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(deserialize_with = "string_or_number")]
    pub invoice_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub guest_id: String,
    /// e.g. "August 2024"
    #[serde(default)]
    pub month_year: String,
    /// Decimal string as sent by the backend
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default)]
    pub generated_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub proof: Option<String>,
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub room_no: Option<String>,
}

impl Invoice {
    pub fn is_unpaid(&self) -> bool {
        self.status == InvoiceStatus::Unpaid
    }
}

impl AsSelectOption for Invoice {
    fn to_option(&self) -> SelectOption {
        SelectOption::new(
            &self.invoice_id,
            format!("{} - ₹{}", self.month_year, self.amount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status() {
        let json = r#"{
            "invoice_id": 9, "guest_id": 42, "month_year": "August 2024",
            "amount": "6500.00", "generated_date": "2024-08-01", "due_date": "2024-08-05",
            "payment_date": null, "payment_mode": null, "notes": null, "proof": null,
            "status": "unpaid", "user_id": 7, "guest_name": "Asha", "room_no": "201"
        }"#;
        let inv: Invoice = serde_json::from_str(json).unwrap();
        assert!(inv.is_unpaid());
        assert_eq!(inv.to_option(), SelectOption::new("9", "August 2024 - ₹6500.00"));

        let other: Invoice = serde_json::from_str(
            r#"{"invoice_id": 1, "guest_id": 1, "amount": 10, "status": "cancelled"}"#,
        )
        .unwrap();
        assert_eq!(other.status, InvoiceStatus::Other);
        assert!(!other.is_unpaid());
    }
}
