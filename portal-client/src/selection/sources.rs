//! Option sources for the portal's cascading forms

use super::cascade::OptionSource;
use crate::{ClientError, ClientResult, PortalClient};
use async_trait::async_trait;
use shared::models::{AsSelectOption, Invoice};
use shared::{PortalSession, SelectOption};
use std::collections::HashMap;
use std::sync::Mutex;

fn to_options<T: AsSelectOption>(rows: Vec<T>) -> Vec<SelectOption> {
    rows.iter().map(AsSelectOption::to_option).collect()
}

fn require_parent(level: usize, parent: Option<&str>) -> ClientResult<&str> {
    parent.ok_or_else(|| ClientError::NotReady(format!("level {level} requires a parent value")))
}

fn unknown_level(level: usize) -> ClientError {
    ClientError::NotReady(format!("unknown selection level {level}"))
}

/// Country → State → City
#[derive(Debug, Clone, Default)]
pub struct GeoSource;

impl GeoSource {
    pub const COUNTRY: usize = 0;
    pub const STATE: usize = 1;
    pub const CITY: usize = 2;
}

#[async_trait]
impl OptionSource for GeoSource {
    fn levels(&self) -> &'static [&'static str] {
        &["country", "state", "city"]
    }

    async fn fetch(
        &self,
        client: &PortalClient,
        level: usize,
        parent: Option<&str>,
    ) -> ClientResult<Vec<SelectOption>> {
        match level {
            Self::COUNTRY => Ok(to_options(client.countries().await?)),
            Self::STATE => Ok(to_options(
                client.states(require_parent(level, parent)?).await?,
            )),
            Self::CITY => Ok(to_options(
                client.cities(require_parent(level, parent)?).await?,
            )),
            _ => Err(unknown_level(level)),
        }
    }
}

/// Room → Bed, scoped to the session's owner
#[derive(Debug, Clone)]
pub struct RoomBedSource {
    session: PortalSession,
}

impl RoomBedSource {
    pub const ROOM: usize = 0;
    pub const BED: usize = 1;

    pub fn new(session: PortalSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl OptionSource for RoomBedSource {
    fn levels(&self) -> &'static [&'static str] {
        &["room", "bed"]
    }

    async fn fetch(
        &self,
        client: &PortalClient,
        level: usize,
        parent: Option<&str>,
    ) -> ClientResult<Vec<SelectOption>> {
        match level {
            Self::ROOM => Ok(to_options(client.rooms(&self.session).await?)),
            Self::BED => Ok(to_options(
                client.beds(require_parent(level, parent)?).await?,
            )),
            _ => Err(unknown_level(level)),
        }
    }
}

/// Guest → unpaid invoice, for rent payment
///
/// Only unpaid invoices are offered; a guest with exactly one is
/// auto-selected. The current guest's invoices are kept so the form can read
/// the amount of the selected one.
#[derive(Debug)]
pub struct GuestInvoiceSource {
    session: PortalSession,
    invoices: Mutex<HashMap<String, Invoice>>,
}

impl GuestInvoiceSource {
    pub const GUEST: usize = 0;
    pub const INVOICE: usize = 1;

    pub fn new(session: PortalSession) -> Self {
        Self {
            session,
            invoices: Mutex::new(HashMap::new()),
        }
    }

    /// A previously fetched invoice
    pub fn invoice(&self, invoice_id: &str) -> Option<Invoice> {
        self.invoices
            .lock()
            .ok()
            .and_then(|map| map.get(invoice_id).cloned())
    }
}

#[async_trait]
impl OptionSource for GuestInvoiceSource {
    fn levels(&self) -> &'static [&'static str] {
        &["guest", "invoice"]
    }

    async fn fetch(
        &self,
        client: &PortalClient,
        level: usize,
        parent: Option<&str>,
    ) -> ClientResult<Vec<SelectOption>> {
        match level {
            Self::GUEST => Ok(to_options(client.guests().await?)),
            Self::INVOICE => {
                let guest_id = require_parent(level, parent)?;
                // Only the guest being fetched can have a selectable invoice
                if let Ok(mut map) = self.invoices.lock() {
                    map.clear();
                }
                let unpaid: Vec<_> = client
                    .due_payments(&self.session, guest_id)
                    .await?
                    .into_iter()
                    .filter(|inv| inv.is_unpaid())
                    .collect();
                if let Ok(mut map) = self.invoices.lock() {
                    for inv in &unpaid {
                        map.insert(inv.invoice_id.clone(), inv.clone());
                    }
                }
                Ok(to_options(unpaid))
            }
            _ => Err(unknown_level(level)),
        }
    }

    fn auto_select_single(&self, level: usize) -> bool {
        level == Self::INVOICE
    }
}
