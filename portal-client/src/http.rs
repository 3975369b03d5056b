//! HTTP transport for the remote data API
//!
//! The API is a single endpoint. Reads are `GET ?gofor=<op>&<params>`,
//! mutations are a JSON `POST` whose body carries `gofor`.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::Gofor;
use std::time::Duration;

/// Transport seam for the remote data API
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Read operation; returns the decoded JSON body
    async fn get(&self, gofor: Gofor, params: &[(&str, String)]) -> ClientResult<Value>;

    /// Mutation; `body` must already contain the `gofor` field
    async fn post(&self, body: Value) -> ClientResult<Value>;
}

/// Network implementation backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkPortalApi {
    client: Client,
    base_url: String,
    timeout: u64,
}

impl NetworkPortalApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Http(err)
        }
    }

    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "API returned non-success status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(error = %e, "API returned a non-JSON body");
            ClientError::InvalidResponse(format!("expected JSON body: {e}"))
        })
    }
}

#[async_trait]
impl PortalApi for NetworkPortalApi {
    async fn get(&self, gofor: Gofor, params: &[(&str, String)]) -> ClientResult<Value> {
        let mut query: Vec<(&str, &str)> = vec![("gofor", gofor.as_str())];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        tracing::debug!(%gofor, "GET");
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.handle_response(response).await
    }

    async fn post(&self, body: Value) -> ClientResult<Value> {
        let gofor = body.get("gofor").and_then(Value::as_str).unwrap_or("?");
        tracing::debug!(%gofor, "POST");
        let response = self
            .client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_config() {
        let config = ClientConfig::new("not-a-url");
        assert!(matches!(
            NetworkPortalApi::new(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_new_keeps_endpoint() {
        let api = NetworkPortalApi::new(&ClientConfig::default()).unwrap();
        assert_eq!(api.base_url(), crate::config::DEFAULT_API_URL);
    }
}
