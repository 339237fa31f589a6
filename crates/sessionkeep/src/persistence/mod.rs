//! Key-value persistence backends.
//!
//! The session store writes two fixed keys, [`TOKEN_KEY`] and [`USER_KEY`],
//! through the [`Persistence`] trait. Environments without durable storage
//! inject [`NoPersistence`] and keep the session in memory only.

mod file;
mod memory;

pub use file::FilePersistence;
pub use memory::MemoryPersistence;

use crate::error::PersistenceError;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Synchronous key-value storage.
pub trait Persistence {
    /// Read a value, returning `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).delete(key)
    }
}

/// Persistence that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl Persistence for NoPersistence {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn delete(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_persistence_forgets_everything() {
        let mut store = NoPersistence;
        store.set(TOKEN_KEY, "t1").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.delete(TOKEN_KEY).unwrap();
    }

    #[test]
    fn boxed_persistence_delegates() {
        let mut store: Box<dyn Persistence> = Box::new(MemoryPersistence::new());
        store.set(USER_KEY, "{}").unwrap();
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }
}
