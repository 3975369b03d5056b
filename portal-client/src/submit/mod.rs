//! Submission assembler
//!
//! Forms validate the whole draft first and report every violated rule; no
//! request is made while any rule fails. A valid draft is posted as one JSON
//! body tagged with its `gofor` operation.

mod payment;
mod registration;
pub mod rules;

pub use payment::{
    CASH_PROOF, PayRentRequest, PaymentDraft, PaymentForm, PaymentMethod, RENT_PAID,
};
pub use registration::{AddGuestRequest, GuestRegistrationDraft, RegistrationForm};

use crate::{ClientError, ClientResult, PortalClient};
use serde::Serialize;
use shared::{Gofor, SubmitOutcome};

/// Successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Confirmation text from the backend
    pub message: String,
    /// Route to navigate to next, carrying the session identifiers
    pub follow_up: String,
}

/// Post a validated draft and classify the response
///
/// Success and failure both raise a notification. The caller's draft is
/// never touched here, so a failed submission can be retried as is.
pub(crate) async fn post_draft<P: Serialize>(
    client: &PortalClient,
    gofor: Gofor,
    payload: &P,
    success_literal: Option<&str>,
) -> ClientResult<String> {
    let value = match client.submit(gofor, payload).await {
        Ok(value) => value,
        Err(e) => {
            client
                .notifier()
                .error("Submission failed", format!("{e}. Please try again."));
            return Err(e);
        }
    };

    let outcome: SubmitOutcome = match serde_json::from_value(value) {
        Ok(outcome) => outcome,
        Err(e) => {
            client
                .notifier()
                .error("Submission failed", "Unexpected response. Please try again.");
            return Err(ClientError::InvalidResponse(format!("{gofor}: {e}")));
        }
    };

    match outcome.into_result(success_literal) {
        Ok(message) => {
            client.notifier().success("Submitted", message.clone());
            Ok(message)
        }
        Err(message) => {
            tracing::warn!(%gofor, %message, "Submission rejected");
            client
                .notifier()
                .error("Submission failed", format!("{message}. Please try again."));
            Err(ClientError::Rejected(message))
        }
    }
}
