//! Async driver for a [`SelectionChain`]
//!
//! Binds a chain to an [`OptionSource`] that knows which API operation feeds
//! each level. Fetch futures own their inputs, so several may be in flight at
//! once; completions are applied through the chain's staleness guard.

use super::chain::{Applied, FetchTicket, SelectionChain};
use crate::{ClientResult, PortalClient};
use async_trait::async_trait;
use shared::SelectOption;
use std::future::Future;
use std::sync::Arc;

/// Option provider for each level of a chain
#[async_trait]
pub trait OptionSource: Send + Sync + 'static {
    /// Level names, root first
    fn levels(&self) -> &'static [&'static str];

    /// Fetch options for `level`; `parent` is the id chosen one level up
    async fn fetch(
        &self,
        client: &PortalClient,
        level: usize,
        parent: Option<&str>,
    ) -> ClientResult<Vec<SelectOption>>;

    /// Select automatically when `level` resolves to exactly one option
    fn auto_select_single(&self, _level: usize) -> bool {
        false
    }
}

/// Finished fetch, ready to be applied
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<SelectOption>, String>,
}

/// Cascading select form bound to a source
pub struct Cascade<S> {
    client: PortalClient,
    source: Arc<S>,
    chain: SelectionChain,
}

impl<S: OptionSource> Cascade<S> {
    pub fn new(client: PortalClient, source: S) -> Self {
        let chain = SelectionChain::new(source.levels());
        Self {
            client,
            source: Arc::new(source),
            chain,
        }
    }

    pub fn chain(&self) -> &SelectionChain {
        &self.chain
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Selected id at `level`
    pub fn selected(&self, level: usize) -> Option<&str> {
        self.chain.selected(level)
    }

    /// Start a selection without awaiting the dependent fetch
    pub fn select_at(&mut self, level: usize, value: &str) -> ClientResult<Option<FetchTicket>> {
        self.chain.select_at(level, value)
    }

    /// Future performing the fetch for `ticket`
    ///
    /// The future does not borrow the cascade; apply its output with
    /// [`Cascade::complete`].
    pub fn fetch_options_for(
        &self,
        ticket: FetchTicket,
    ) -> impl Future<Output = FetchOutcome> + Send + use<S> {
        let client = self.client.clone();
        let source = Arc::clone(&self.source);
        async move {
            let result = source
                .fetch(&client, ticket.level, ticket.parent.as_deref())
                .await
                .map_err(|e| e.to_string());
            FetchOutcome { ticket, result }
        }
    }

    /// Apply a finished fetch; failures raise an error notification
    pub fn complete(&mut self, outcome: FetchOutcome) -> Applied {
        let failure = outcome.result.as_ref().err().cloned();
        let applied = self.chain.complete(&outcome.ticket, outcome.result);
        if applied == Applied::Failed {
            let name = self
                .chain
                .level(outcome.ticket.level)
                .map(|l| l.name.clone())
                .unwrap_or_default();
            self.client.notifier().error(
                format!("Failed to load {name} list"),
                failure.unwrap_or_default(),
            );
        }
        applied
    }

    /// Run `ticket` to completion, then follow single-option auto-selection
    async fn drive(&mut self, mut ticket: FetchTicket) -> ClientResult<Applied> {
        loop {
            let outcome = self.fetch_options_for(ticket).await;
            let level = outcome.ticket.level;
            let applied = self.complete(outcome);

            if applied != Applied::Populated(1) || !self.source.auto_select_single(level) {
                return Ok(applied);
            }
            let only = self.chain.level(level).map(|l| l.options[0].id.clone());
            let Some(id) = only else {
                return Ok(applied);
            };
            tracing::debug!(level, id = %id, "Auto-selecting single option");
            match self.chain.select_at(level, &id)? {
                Some(next) => ticket = next,
                None => return Ok(applied),
            }
        }
    }

    /// Load the root level options
    pub async fn load_root(&mut self) -> ClientResult<Applied> {
        let ticket = self.chain.begin_root()?;
        self.drive(ticket).await
    }

    /// Select `value` at `level` and load the dependent level
    ///
    /// Returns `None` when no fetch was needed (cleared value or last level).
    pub async fn select(&mut self, level: usize, value: &str) -> ClientResult<Option<Applied>> {
        match self.chain.select_at(level, value)? {
            Some(ticket) => self.drive(ticket).await.map(Some),
            None => Ok(None),
        }
    }

    /// Clear every level
    pub fn reset(&mut self) {
        self.chain.reset();
    }
}
