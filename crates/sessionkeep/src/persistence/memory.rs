//! In-memory persistence.

use std::collections::HashMap;

use crate::error::PersistenceError;

use super::Persistence;

/// `HashMap`-backed persistence, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    entries: HashMap<String, String>,
}

impl MemoryPersistence {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Persistence for MemoryPersistence {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let mut store = MemoryPersistence::new();
        assert!(store.is_empty());

        store.set("token", "t1").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));

        store.set("token", "t2").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("t2"));

        store.delete("token").unwrap();
        store.delete("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn with_entries_prepopulates() {
        let store = MemoryPersistence::with_entries([("token", "t1")]);
        assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));
    }
}
