// portal-client/tests/common/mod.rs
// In-memory API double shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use portal_client::{ClientConfig, ClientError, ClientResult, PortalApi, PortalClient};
use serde_json::Value;
use shared::Gofor;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Call {
    Get { gofor: Gofor, params: Vec<(String, String)> },
    Post { body: Value },
}

#[derive(Clone)]
struct Canned {
    body: Result<Value, String>,
    delay: Duration,
}

/// Canned responses keyed by operation and (optionally) the first param value
#[derive(Default)]
pub struct FakeApi {
    gets: Mutex<HashMap<(Gofor, Option<String>), Canned>>,
    posts: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on_get(&self, gofor: Gofor, param: Option<&str>, body: Value) {
        self.on_get_delayed(gofor, param, body, Duration::ZERO);
    }

    pub fn on_get_delayed(&self, gofor: Gofor, param: Option<&str>, body: Value, delay: Duration) {
        self.gets.lock().unwrap().insert(
            (gofor, param.map(String::from)),
            Canned { body: Ok(body), delay },
        );
    }

    pub fn fail_get(&self, gofor: Gofor, param: Option<&str>, message: &str) {
        self.gets.lock().unwrap().insert(
            (gofor, param.map(String::from)),
            Canned {
                body: Err(message.to_string()),
                delay: Duration::ZERO,
            },
        );
    }

    pub fn on_post(&self, gofor: &str, body: Value) {
        self.on_post_delayed(gofor, body, Duration::ZERO);
    }

    pub fn on_post_delayed(&self, gofor: &str, body: Value, delay: Duration) {
        self.posts
            .lock()
            .unwrap()
            .insert(gofor.to_string(), Canned { body: Ok(body), delay });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Post { body } => Some(body),
                Call::Get { .. } => None,
            })
            .collect()
    }

    pub fn get_count(&self, gofor: Gofor) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Get { gofor: g, .. } if *g == gofor))
            .count()
    }

    fn lookup_get(&self, gofor: Gofor, params: &[(&str, String)]) -> Option<Canned> {
        let gets = self.gets.lock().unwrap();
        let keyed = params
            .iter()
            .find(|(name, _)| *name != "user_id")
            .and_then(|(_, v)| gets.get(&(gofor, Some(v.clone()))));
        keyed.or_else(|| gets.get(&(gofor, None))).cloned()
    }
}

async fn reply(canned: Option<Canned>, what: &str) -> ClientResult<Value> {
    let canned = canned.ok_or_else(|| ClientError::Status {
        status: 404,
        body: format!("no canned response for {what}"),
    })?;
    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }
    canned.body.map_err(|message| ClientError::Status {
        status: 500,
        body: message,
    })
}

#[async_trait]
impl PortalApi for FakeApi {
    async fn get(&self, gofor: Gofor, params: &[(&str, String)]) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(Call::Get {
            gofor,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });
        let canned = self.lookup_get(gofor, params);
        reply(canned, gofor.as_str()).await
    }

    async fn post(&self, body: Value) -> ClientResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Post { body: body.clone() });
        let gofor = body["gofor"].as_str().unwrap_or_default().to_string();
        let canned = self.posts.lock().unwrap().get(&gofor).cloned();
        reply(canned, &gofor).await
    }
}

pub fn client(api: &Arc<FakeApi>) -> PortalClient {
    client_with(api, ClientConfig::default())
}

pub fn client_with(api: &Arc<FakeApi>, config: ClientConfig) -> PortalClient {
    PortalClient::with_api(api.clone() as Arc<dyn PortalApi>, config)
}
