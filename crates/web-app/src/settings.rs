use log::error;
use setbook_domain::{ReadError, WriteError};

pub trait SettingsService {
    fn get_settings(&self) -> Result<Settings, ReadError>;
    fn set_settings(&self, settings: &Settings) -> Result<(), WriteError>;
}

pub trait SettingsRepository {
    /// Returns the default settings if none have been stored yet.
    fn read_settings(&self) -> Result<Settings, ReadError>;
    fn write_settings(&self, settings: &Settings) -> Result<(), WriteError>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub beep_volume: u8,
    pub vibration: bool,
    pub theme: Theme,
}

impl Settings {
    /// The theme to draw with, resolving [`Theme::System`] through the
    /// preferred color scheme of the browser.
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.theme {
            Theme::System => {
                if prefers_dark_scheme() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            Theme::Light | Theme::Dark => self.theme,
        }
    }
}

fn prefers_dark_scheme() -> bool {
    let Some(window) = web_sys::window() else {
        error!("failed to access window to determine preferred color scheme");
        return false;
    };
    match window.match_media("(prefers-color-scheme: dark)") {
        Ok(Some(media_query_list)) => media_query_list.matches(),
        Ok(None) => {
            error!("failed to determine preferred color scheme");
            false
        }
        Err(err) => {
            error!("failed to match media to determine preferred color scheme: {err:?}");
            false
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beep_volume: 80,
            vibration: true,
            theme: Theme::Light,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Theme {
    System,
    Light,
    Dark,
}
