#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod browser;
pub mod chart;
pub mod history;
pub mod log;
mod service;
mod settings;
pub mod timer;
pub mod tracker;
pub mod view;

pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, Theme};
pub use tracker::{Platform, Prompt, Tracker};
