use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use setbook_domain::StorageError;

use crate::KeyValueStore;

/// A store that keeps all values in memory.
///
/// Clones share the same values.
#[derive(Clone, Default)]
pub struct Memory {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    unavailable: bool,
}

impl Memory {
    /// A store that rejects every access, like a browser with storage
    /// disabled.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: Arc::default(),
            unavailable: true,
        }
    }

    fn entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        self.entries
            .lock()
            .map_err(|err| StorageError::Other(err.to_string().into()))
    }
}

impl KeyValueStore for Memory {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
