#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::collections::VecDeque;

use setbook_domain::{
    self as domain, DeleteError, ExportError, ImportError, ReadError, State, StorageError,
    StoredState, WriteError,
};
use setbook_web_app::{Settings, SettingsRepository, log};

pub mod document;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;

pub const KEY_STATE: &str = "workout tracker";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_LOG: &str = "log";

/// Number of log entries kept.
pub const LOG_LIMIT: usize = 100;

/// A store of text values under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Persists the state document, the settings and the log in a key-value
/// store.
#[derive(Clone, Default)]
pub struct Repository<S> {
    store: S,
}

impl<S> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> domain::StateRepository for Repository<S> {
    fn read_state(&self) -> Result<Option<StoredState>, ReadError> {
        match self.store.get(KEY_STATE)? {
            Some(text) => document::decode(&text)
                .map(Some)
                .map_err(|err| ReadError::Malformed(err.to_string())),
            None => Ok(None),
        }
    }

    fn write_state(&self, state: &State) -> Result<(), WriteError> {
        let text = document::encode(state).map_err(|err| WriteError::Other(Box::new(err)))?;
        Ok(self.store.set(KEY_STATE, &text)?)
    }

    fn delete_state(&self) -> Result<(), DeleteError> {
        Ok(self.store.remove(KEY_STATE)?)
    }
}

impl<S> domain::DocumentFormat for Repository<S> {
    fn parse_document(&self, text: &str) -> Result<StoredState, ImportError> {
        document::decode(text).map_err(|err| ImportError::Invalid(err.to_string()))
    }

    fn format_document(&self, state: &State) -> Result<String, ExportError> {
        document::encode(state).map_err(|err| ExportError::Other(Box::new(err)))
    }
}

impl<S: KeyValueStore> SettingsRepository for Repository<S> {
    fn read_settings(&self) -> Result<Settings, ReadError> {
        match self.store.get(KEY_SETTINGS)? {
            Some(text) => {
                serde_json::from_str(&text).map_err(|err| ReadError::Malformed(err.to_string()))
            }
            None => Ok(Settings::default()),
        }
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), WriteError> {
        let text =
            serde_json::to_string(settings).map_err(|err| WriteError::Other(Box::new(err)))?;
        Ok(self.store.set(KEY_SETTINGS, &text)?)
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> log::Repository for Repository<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self
            .store
            .get(KEY_LOG)
            .map_err(|err| log::Error::Unknown(err.to_string()))?
        {
            Some(text) => {
                serde_json::from_str(&text).map_err(|err| log::Error::Unknown(err.to_string()))
            }
            None => Ok(VecDeque::new()),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.push_front(entry);
        entries.truncate(LOG_LIMIT);
        let text =
            serde_json::to_string(&entries).map_err(|err| log::Error::Unknown(err.to_string()))?;
        self.store
            .set(KEY_LOG, &text)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
