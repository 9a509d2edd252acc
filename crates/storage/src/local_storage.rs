use gloo_storage::Storage as GlooStorage;
use setbook_domain::StorageError;

use crate::KeyValueStore;

/// The browser's local storage.
#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}
