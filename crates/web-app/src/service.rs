use log::{error, warn};
use setbook_domain::{ReadError, WriteError};

use crate::{Settings, SettingsRepository, SettingsService};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Result<Settings, ReadError> {
        self.repository
            .read_settings()
            .inspect_err(|err| warn!("failed to read settings: {err}"))
    }

    fn set_settings(&self, settings: &Settings) -> Result<(), WriteError> {
        self.repository
            .write_settings(settings)
            .inspect_err(|err| error!("failed to write settings: {err}"))
    }
}
