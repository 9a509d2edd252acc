#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod error;
mod number;
mod program;
mod progress;
mod service;
mod state;
mod statistics;
mod swap;
mod volume;
mod workout;

pub use catalog::{DEFAULT_PROGRAM, GENERIC_STEPS};
pub use error::{DeleteError, ExportError, ImportError, ReadError, StorageError, WriteError};
pub use number::parse_number;
pub use program::{
    Day, DayID, Exercise, ExerciseID, Program, Scheme, SwapCategory, SwapLibrary, search_query,
};
pub use progress::{
    DAY_DONE_THRESHOLD, DayProgress, ExerciseProgress, SetEntry, SetUpdate, day_completion,
    exercise_completion, week_done,
};
pub use service::Service;
pub use state::{State, StoredState};
pub use statistics::{Metric, avg, chronological, date_label, date_labels, series};
pub use swap::SwapError;
pub use volume::{ExerciseVolume, Volume, volume_for_day};
pub use workout::{
    HISTORY_LIMIT, QuickLog, QuickLogField, SetLogEntry, Workout, WorkoutID, record,
};

pub trait StateRepository {
    /// Returns `None` if no state has been stored yet.
    fn read_state(&self) -> Result<Option<StoredState>, ReadError>;
    fn write_state(&self, state: &State) -> Result<(), WriteError>;
    fn delete_state(&self) -> Result<(), DeleteError>;
}

/// Conversion between the state and its textual document form.
pub trait DocumentFormat {
    fn parse_document(&self, text: &str) -> Result<StoredState, ImportError>;
    fn format_document(&self, state: &State) -> Result<String, ExportError>;
}
