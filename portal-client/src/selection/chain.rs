//! Cascading selection state machine
//!
//! A chain of N select levels where the options of level `i` depend on the
//! value chosen at level `i - 1`. The chain itself performs no I/O: selecting
//! a value returns a [`FetchTicket`] describing the fetch the caller must run,
//! and the fetch result is handed back through [`SelectionChain::complete`].
//!
//! Every level carries a generation counter. A selection bumps the
//! generation of every level below it, so a completion whose ticket is no
//! longer current (an abandoned parent value) is dropped instead of
//! overwriting newer state.

use crate::{ClientError, ClientResult};
use shared::SelectOption;

/// One select control
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionLevel {
    pub name: String,
    pub selected: Option<String>,
    pub options: Vec<SelectOption>,
    pub loading: bool,
    pub enabled: bool,
    pub generation: u64,
    /// Last fetch failure, cleared on the next fetch
    pub error: Option<String>,
}

impl SelectionLevel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Reset to the disabled empty state and invalidate in-flight fetches
    fn invalidate(&mut self) {
        self.selected = None;
        self.options.clear();
        self.loading = false;
        self.enabled = false;
        self.error = None;
        self.generation += 1;
    }
}

/// A fetch the caller must run for `level`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub level: usize,
    /// Identifier chosen at `level - 1`; `None` for the root level
    pub parent: Option<String>,
    pub generation: u64,
}

/// Result of applying a fetch completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Options stored; carries the option count
    Populated(usize),
    /// Fetch failed; level left empty and enabled for retry
    Failed,
    /// Ticket no longer current; nothing changed
    Stale,
}

/// N-level cascading selection
#[derive(Debug, Clone)]
pub struct SelectionChain {
    levels: Vec<SelectionLevel>,
}

impl SelectionChain {
    /// Create a chain with the given level names, root first
    pub fn new(names: &[&str]) -> Self {
        Self {
            levels: names.iter().map(|n| SelectionLevel::new(n)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[SelectionLevel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&SelectionLevel> {
        self.levels.get(index)
    }

    /// Selected identifier at `index`
    pub fn selected(&self, index: usize) -> Option<&str> {
        self.levels.get(index)?.selected.as_deref()
    }

    /// Selected option (id and label) at `index`
    pub fn selected_option(&self, index: usize) -> Option<&SelectOption> {
        let level = self.levels.get(index)?;
        let id = level.selected.as_deref()?;
        level.options.iter().find(|o| o.id == id)
    }

    /// Level index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == name)
    }

    /// Whether every level has a selection
    pub fn is_complete(&self) -> bool {
        !self.levels.is_empty() && self.levels.iter().all(|l| l.selected.is_some())
    }

    fn check_index(&self, index: usize) -> ClientResult<()> {
        if index >= self.levels.len() {
            return Err(ClientError::NotReady(format!(
                "selection level {index} out of range (chain has {})",
                self.levels.len()
            )));
        }
        Ok(())
    }

    /// Start loading the root level; clears the whole chain
    pub fn begin_root(&mut self) -> ClientResult<FetchTicket> {
        self.check_index(0)?;
        for level in &mut self.levels {
            level.invalidate();
        }
        let root = &mut self.levels[0];
        root.loading = true;
        Ok(FetchTicket {
            level: 0,
            parent: None,
            generation: root.generation,
        })
    }

    /// Select `value` at `index`
    ///
    /// An empty value clears the level. A non-empty value must be one of the
    /// level's current option ids. Every level below `index` is cleared and
    /// disabled before this returns; when a child level exists and the value
    /// is non-empty, the child is marked loading and a ticket for its fetch is
    /// returned.
    pub fn select_at(&mut self, index: usize, value: &str) -> ClientResult<Option<FetchTicket>> {
        self.check_index(index)?;
        let value = value.trim();

        let level = &self.levels[index];
        if !value.is_empty() {
            if !level.enabled {
                return Err(ClientError::NotReady(format!(
                    "{} is not available yet",
                    level.name
                )));
            }
            if !level.options.iter().any(|o| o.id == value) {
                return Err(ClientError::validation(
                    level.name.clone(),
                    format!("'{value}' is not a valid {}", level.name),
                ));
            }
        }

        self.levels[index].selected = (!value.is_empty()).then(|| value.to_string());
        for child in &mut self.levels[index + 1..] {
            child.invalidate();
        }

        if value.is_empty() || index + 1 >= self.levels.len() {
            return Ok(None);
        }

        let child = &mut self.levels[index + 1];
        child.loading = true;
        tracing::debug!(
            level = %child.name,
            parent = value,
            generation = child.generation,
            "Fetching dependent options"
        );
        Ok(Some(FetchTicket {
            level: index + 1,
            parent: Some(value.to_string()),
            generation: child.generation,
        }))
    }

    /// Whether `ticket` still matches the chain's current state
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        let Some(level) = self.levels.get(ticket.level) else {
            return false;
        };
        if level.generation != ticket.generation {
            return false;
        }
        match ticket.level {
            0 => ticket.parent.is_none(),
            i => self.levels[i - 1].selected.as_deref() == ticket.parent.as_deref(),
        }
    }

    /// Apply a fetch completion
    ///
    /// Stale tickets are ignored. Otherwise the level stops loading and
    /// becomes enabled; options are stored in the order received.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<SelectOption>, String>,
    ) -> Applied {
        if !self.is_current(ticket) {
            tracing::debug!(
                level = ticket.level,
                parent = ?ticket.parent,
                generation = ticket.generation,
                "Dropping stale options response"
            );
            return Applied::Stale;
        }

        let level = &mut self.levels[ticket.level];
        level.loading = false;
        level.enabled = true;
        level.selected = None;
        match result {
            Ok(options) => {
                level.error = None;
                level.options = options;
                Applied::Populated(level.options.len())
            }
            Err(message) => {
                level.options.clear();
                level.error = Some(message);
                Applied::Failed
            }
        }
    }

    /// Clear every level
    pub fn reset(&mut self) {
        for level in &mut self.levels {
            level.invalidate();
        }
    }
}
