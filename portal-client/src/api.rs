//! Typed operations over the remote data API

use crate::http::{NetworkPortalApi, PortalApi};
use crate::notify::Notifier;
use crate::{ClientConfig, ClientError, ClientResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    Bed, Building, City, Country, FoodPlan, GalleryImage, Guest, Invoice, Review, Room, Rule,
    State, UserProfile,
};
use shared::{Gofor, PortalSession};
use std::sync::Arc;
use std::time::Duration;

/// Portal client: transport, configuration and notification sink
#[derive(Clone)]
pub struct PortalClient {
    api: Arc<dyn PortalApi>,
    config: ClientConfig,
    notifier: Notifier,
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PortalClient {
    /// Create a network-backed client
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = NetworkPortalApi::new(&config)?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Create a client over any transport
    pub fn with_api(api: Arc<dyn PortalApi>, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            notifier: Notifier::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    async fn timed<F>(&self, fut: F) -> ClientResult<Value>
    where
        F: std::future::Future<Output = ClientResult<Value>>,
    {
        let secs = self.config.timeout;
        tokio::time::timeout(Duration::from_secs(secs), fut)
            .await
            .map_err(|_| ClientError::Timeout(secs))?
    }

    /// Raw read
    pub async fn get(&self, gofor: Gofor, params: &[(&str, String)]) -> ClientResult<Value> {
        self.timed(self.api.get(gofor, params)).await
    }

    /// Read a list, skipping rows that fail to decode
    pub async fn list<T: DeserializeOwned>(
        &self,
        gofor: Gofor,
        params: &[(&str, String)],
    ) -> ClientResult<Vec<T>> {
        let value = self.get(gofor, params).await?;
        decode_list(gofor, value)
    }

    /// Read a single record; a one-element array is unwrapped
    pub async fn one<T: DeserializeOwned>(
        &self,
        gofor: Gofor,
        params: &[(&str, String)],
    ) -> ClientResult<T> {
        let value = match self.get(gofor, params).await? {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            Value::Array(_) | Value::Null => {
                return Err(ClientError::InvalidResponse(format!("{gofor}: empty response")));
            }
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Mutation: `payload` must serialize to a JSON object; `gofor` is added
    pub async fn submit<P: Serialize>(&self, gofor: Gofor, payload: &P) -> ClientResult<Value> {
        let mut body = serde_json::to_value(payload)?;
        let Some(obj) = body.as_object_mut() else {
            return Err(ClientError::InvalidResponse(format!(
                "{gofor}: payload must be a JSON object"
            )));
        };
        obj.insert("gofor".into(), Value::String(gofor.as_str().into()));
        self.timed(self.api.post(body)).await
    }

    // ========== Lookup lists ==========

    pub async fn guests(&self) -> ClientResult<Vec<Guest>> {
        self.list(Gofor::GuestList, &[]).await
    }

    pub async fn rooms(&self, session: &PortalSession) -> ClientResult<Vec<Room>> {
        self.list(Gofor::RoomList, &[("user_id", session.user_id.clone())])
            .await
    }

    pub async fn beds(&self, room_id: &str) -> ClientResult<Vec<Bed>> {
        self.list(Gofor::BedList, &[("room_id", room_id.to_string())])
            .await
    }

    /// All invoices of a guest (paid and unpaid)
    pub async fn due_payments(
        &self,
        session: &PortalSession,
        guest_id: &str,
    ) -> ClientResult<Vec<Invoice>> {
        self.list(
            Gofor::DuePayments,
            &[
                ("user_id", session.user_id.clone()),
                ("guest_id", guest_id.to_string()),
            ],
        )
        .await
    }

    pub async fn countries(&self) -> ClientResult<Vec<Country>> {
        self.list(Gofor::CountriesList, &[]).await
    }

    pub async fn states(&self, country_id: &str) -> ClientResult<Vec<State>> {
        self.list(Gofor::StatesList, &[("country_id", country_id.to_string())])
            .await
    }

    pub async fn cities(&self, state_id: &str) -> ClientResult<Vec<City>> {
        self.list(Gofor::CitiesList, &[("state_id", state_id.to_string())])
            .await
    }

    // ========== Page content ==========

    pub async fn rules(&self, session: &PortalSession) -> ClientResult<Vec<Rule>> {
        self.list(Gofor::RulesList, &[("user_id", session.user_id.clone())])
            .await
    }

    pub async fn reviews(&self, session: &PortalSession) -> ClientResult<Vec<Review>> {
        self.list(Gofor::ReviewList, &[("user_id", session.user_id.clone())])
            .await
    }

    pub async fn gallery(&self, session: &PortalSession) -> ClientResult<Vec<GalleryImage>> {
        self.list(Gofor::GalleryList, &[("user_id", session.user_id.clone())])
            .await
    }

    pub async fn food_plan(&self, session: &PortalSession) -> ClientResult<Vec<FoodPlan>> {
        self.list(Gofor::FoodPlanList, &[("user_id", session.user_id.clone())])
            .await
    }

    pub async fn building(&self, building_id: &str) -> ClientResult<Building> {
        self.one(Gofor::GetBuilding, &[("building_id", building_id.to_string())])
            .await
    }

    pub async fn user(&self, user_id: &str) -> ClientResult<UserProfile> {
        self.one(Gofor::UserGet, &[("user_id", user_id.to_string())])
            .await
    }
}

/// Decode a list response
///
/// Accepts a bare array, `{"data": [...]}` or `null` (empty). Rows that fail
/// to decode are dropped with a warning so one bad row does not blank a page.
pub fn decode_list<T: DeserializeOwned>(gofor: Gofor, value: Value) -> ClientResult<Vec<T>> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None if obj.is_empty() => Vec::new(),
            _ => {
                return Err(ClientError::InvalidResponse(format!(
                    "{gofor}: expected a list"
                )));
            }
        },
        _ => {
            return Err(ClientError::InvalidResponse(format!(
                "{gofor}: expected a list"
            )));
        }
    };

    let total = rows.len();
    let items: Vec<T> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(%gofor, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect();
    if items.len() < total {
        tracing::debug!(%gofor, kept = items.len(), total, "Decoded list with skipped rows");
    }
    Ok(items)
}
