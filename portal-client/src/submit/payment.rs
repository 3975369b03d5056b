//! Rent payment (`payrent`)

use super::rules::{self, positive_amount, required};
use super::{SubmitReceipt, post_draft};
use crate::selection::{Applied, Cascade, GuestInvoiceSource};
use crate::upload::{FilePolicy, UploadPurpose, UploadSlot, UploadStatus};
use crate::{ClientError, ClientResult, PortalClient};
use serde::{Deserialize, Serialize};
use shared::{FieldError, Gofor, PortalSession};
use validator::Validate;

/// Confirmation text `payrent` answers with
pub const RENT_PAID: &str = "Rent Paid successfully";

/// Proof placeholder sent for cash payments
pub const CASH_PROOF: &str = "cash_payment";

const FIELD_ORDER: &[&str] = &["guest_id", "invoice_id", "amount", "transaction_id", "proof"];

/// How the rent is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Bank,
    Cash,
}

impl PaymentMethod {
    /// `payment_mode` label stored by the backend
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Bank => "Bank Transfer",
            Self::Cash => "Cash",
        }
    }

    /// Transaction id and proof screenshot are required
    pub fn needs_proof(&self) -> bool {
        !matches!(self, Self::Cash)
    }
}

/// Payment form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PaymentDraft {
    #[validate(custom(function = "required"))]
    pub invoice_id: String,
    #[validate(custom(function = "positive_amount"))]
    pub amount: String,
    pub payment_method: PaymentMethod,
    /// UPI / bank reference; required unless paying cash
    pub transaction_id: String,
}

impl PaymentDraft {
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => rules::collect(&errors, FIELD_ORDER),
        };
        if self.invoice_id.trim().is_empty() {
            // Amount comes from the invoice; one message is enough
            errors.retain(|e| e.field != "amount");
            errors.iter_mut().filter(|e| e.field == "invoice_id").for_each(|e| {
                e.message = "Please select an invoice first".to_string();
            });
        }
        if self.payment_method.needs_proof() && self.transaction_id.trim().is_empty() {
            errors.push(FieldError::new(
                "transaction_id",
                "Please enter transaction/reference ID",
            ));
        }
        errors
    }
}

/// `payrent` request body (without `gofor`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayRentRequest {
    pub invoice_id: String,
    pub amount: String,
    /// `YYYY-MM-DD`
    pub payment_date: String,
    pub payment_mode: String,
    pub notes: String,
    pub proof: String,
}

/// Pay-rent page state
pub struct PaymentForm {
    client: PortalClient,
    session: PortalSession,
    pub draft: PaymentDraft,
    pub selection: Cascade<GuestInvoiceSource>,
    pub proof: UploadSlot,
}

impl PaymentForm {
    pub fn new(client: PortalClient, session: PortalSession) -> Self {
        let max = client.config().max_upload_bytes;
        Self {
            selection: Cascade::new(client.clone(), GuestInvoiceSource::new(session.clone())),
            proof: UploadSlot::new(UploadPurpose::Rent, true, FilePolicy::images(max)),
            draft: PaymentDraft::default(),
            client,
            session,
        }
    }

    /// Load the guest list
    pub async fn load(&mut self) -> ClientResult<Applied> {
        self.selection.load_root().await
    }

    /// Choose a guest and load their unpaid invoices
    ///
    /// A single unpaid invoice is selected automatically and its amount is
    /// copied into the draft. A rejected guest leaves the selection and the
    /// draft as they were.
    pub async fn select_guest(&mut self, guest_id: &str) -> ClientResult<Option<Applied>> {
        let applied = self
            .selection
            .select(GuestInvoiceSource::GUEST, guest_id)
            .await;
        self.sync_invoice();
        applied
    }

    /// Choose one of the offered invoices
    pub fn select_invoice(&mut self, invoice_id: &str) -> ClientResult<()> {
        self.selection
            .select_at(GuestInvoiceSource::INVOICE, invoice_id)?;
        self.sync_invoice();
        Ok(())
    }

    fn sync_invoice(&mut self) {
        let selected = self
            .selection
            .selected(GuestInvoiceSource::INVOICE)
            .and_then(|id| self.selection.source().invoice(id));
        match selected {
            Some(invoice) => {
                self.draft.invoice_id = invoice.invoice_id;
                self.draft.amount = invoice.amount;
            }
            None => {
                self.draft.invoice_id.clear();
                self.draft.amount.clear();
            }
        }
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        self.draft.payment_method = method;
    }

    /// Every violated rule
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.draft.field_errors();
        if self.draft.payment_method.needs_proof() && self.proof.status() != UploadStatus::Done {
            errors.push(FieldError::new(
                "proof",
                "Please upload a payment screenshot first",
            ));
        }
        errors
    }

    /// Build the request body; fails with every violation when invalid
    pub fn assemble(&self) -> ClientResult<PayRentRequest> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }
        let proof = match (self.draft.payment_method, self.proof.remote_url()) {
            (_, Some(url)) => url.to_string(),
            (PaymentMethod::Cash, None) => CASH_PROOF.to_string(),
            (_, None) => String::new(),
        };
        Ok(PayRentRequest {
            invoice_id: self.draft.invoice_id.clone(),
            amount: self.draft.amount.clone(),
            payment_date: shared::util::today(),
            payment_mode: self.draft.payment_method.label().to_string(),
            notes: self.draft.transaction_id.trim().to_string(),
            proof,
        })
    }

    /// Validate and post `payrent`; the receipt routes back to the home page
    pub async fn submit(&mut self, reset: bool) -> ClientResult<SubmitReceipt> {
        let request = self.assemble()?;
        let message = post_draft(&self.client, Gofor::PayRent, &request, Some(RENT_PAID)).await?;
        tracing::info!(invoice_id = %request.invoice_id, mode = %request.payment_mode, "Rent paid");
        if reset {
            self.draft = PaymentDraft::default();
            let _ = self.selection.select_at(GuestInvoiceSource::GUEST, "");
            self.proof.clear();
        }
        Ok(SubmitReceipt {
            message,
            follow_up: self.session.route("/"),
        })
    }
}
