use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::storage::traits::{KeyValueStore, StoreError};

/// In-process store, used in tests and when nothing should outlive the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStoreExt;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("user").unwrap(), None);

        store.set("user", "alice").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("alice"));

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn json_helpers() {
        let store = MemoryStore::new();
        store.set_json("favorites", &vec!["1", "3"]).unwrap();
        let favorites: Vec<String> = store.get_json("favorites").unwrap().unwrap();
        assert_eq!(favorites, vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn corrupt_json_is_reported() {
        let store = MemoryStore::new();
        store.set("listings", "{not json").unwrap();
        let err = store.get_json::<Vec<String>>("listings").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "listings"));
    }
}
