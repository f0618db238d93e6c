//! Durable collection-id store.
//!
//! The collection is created at most once per deployment; its id must
//! survive restarts so a restarted process does not create a second one.
//! The id lives in a small TOML state file owned by this store, and every
//! write goes through [`CollectionStore::record`]; nothing else mutates
//! configuration.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::platform::types::CollectionId;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    collection_id: Option<String>,
}

/// Owns the durable collection-id state file.
#[derive(Debug)]
pub struct CollectionStore {
    path: PathBuf,
    current: Option<CollectionId>,
}

impl CollectionStore {
    /// Load the store; a missing state file means no collection exists yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let current = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let state: StateFile = toml::from_str(&content)?;
            state.collection_id.map(CollectionId)
        } else {
            None
        };

        Ok(Self { path, current })
    }

    /// The persisted collection id, if any.
    pub fn current(&self) -> Option<&CollectionId> {
        self.current.as_ref()
    }

    /// Persist a newly assigned collection id and update the in-memory copy.
    ///
    /// Called exactly once per deployment, before the process starts
    /// serving traffic.
    pub fn record(&mut self, id: &CollectionId) -> std::io::Result<()> {
        let state = StateFile {
            collection_id: Some(id.0.clone()),
        };
        let content = toml::to_string(&state).map_err(std::io::Error::other)?;
        fs::write(&self.path, content)?;
        self.current = Some(id.clone());

        tracing::info!(collection_id = %id, path = %self.path.display(), "Collection id persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_state_path() -> PathBuf {
        std::env::temp_dir().join(format!("mintgate-state-{}.toml", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_means_no_collection() {
        let store = CollectionStore::load(temp_state_path()).unwrap();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_record_and_reload() {
        let path = temp_state_path();

        let mut store = CollectionStore::load(&path).unwrap();
        store.record(&CollectionId::from("42")).unwrap();
        assert_eq!(store.current().unwrap().0, "42");

        let reloaded = CollectionStore::load(&path).unwrap();
        assert_eq!(reloaded.current().unwrap().0, "42");

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_corrupt_state_file_is_an_error() {
        let path = temp_state_path();
        fs::write(&path, "collection_id = [not toml").unwrap();

        let result = CollectionStore::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_file(path).unwrap_or_default();
    }
}
