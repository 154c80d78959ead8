//! Key-value persistence for playbooks and settings.
//!
//! Extraction and rule evaluation never touch a store; callers load a
//! [`Playbook`] through [`PlaybookStore`] and pass it in.

use std::collections::BTreeMap;

use crate::error::{PlaybookError, PlaybookResult};
use crate::rule::Playbook;

/// Key under which all playbooks are stored as one JSON array.
pub const PLAYBOOKS_KEY: &str = "playbooks";

/// Key of the semantic backend API key.
pub const API_KEY: &str = "openai_api_key";

/// String values by string key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> PlaybookResult<()>;
}

/// An in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> PlaybookResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> PlaybookResult<()> {
        (**self).set(key, value)
    }
}

/// Playbooks persisted as a JSON array under [`PLAYBOOKS_KEY`].
#[derive(Debug, Clone, Default)]
pub struct PlaybookStore<S> {
    store: S,
}

impl<S: KeyValueStore> PlaybookStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Every stored playbook; empty when nothing was saved yet.
    pub fn playbooks(&self) -> PlaybookResult<Vec<Playbook>> {
        match self.store.get(PLAYBOOKS_KEY) {
            None => Ok(Vec::new()),
            Some(json) if json.trim().is_empty() => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json).map_err(|source| PlaybookError::Stored {
                key: PLAYBOOKS_KEY.to_string(),
                source,
            }),
        }
    }

    pub fn find(&self, name: &str) -> PlaybookResult<Option<Playbook>> {
        Ok(self.playbooks()?.into_iter().find(|p| p.name == name))
    }

    /// Replace the playbook with the same name, or append it.
    pub fn save(&mut self, playbook: Playbook) -> PlaybookResult<()> {
        let mut playbooks = self.playbooks()?;
        match playbooks.iter_mut().find(|p| p.name == playbook.name) {
            Some(existing) => *existing = playbook,
            None => playbooks.push(playbook),
        }
        let json = serde_json::to_string(&playbooks)?;
        self.store.set(PLAYBOOKS_KEY, json)
    }
}

/// Application settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn api_key(&self) -> Option<String> {
        self.store.get(API_KEY)
    }

    pub fn save_api_key(&mut self, api_key: impl Into<String>) -> PlaybookResult<()> {
        self.store.set(API_KEY, api_key.into())
    }
}
