use chrono::{DateTime, Local, Utc};
use log::{debug, warn};
use rand::Rng;
use setbook_domain::{
    self as domain, DayID, DocumentFormat, ExerciseID, QuickLogField, SetUpdate, State,
    StateRepository, SwapError, WorkoutID,
};

use crate::{
    Service, Settings, SettingsRepository, SettingsService,
    history::{self, ProgressView},
    timer::{RestTimer, Tick},
    view::{self, EXPORT_FILE_NAME, RESET_CONFIRMATION, SHUFFLE_CONFIRMATION, TrackerView},
};

pub const NO_SWAP_OPTIONS: &str =
    "No swap options available for this category yet. You can edit the code/library to add more.";
pub const UNMATCHED_CHOICE: &str = "Didn’t match an option. Try again.";
pub const IMPORT_SUCCEEDED: &str = "Import successful!";
pub const IMPORT_FAILED: &str =
    "Could not import. Make sure it's a valid JSON export from this app.";
pub const REST_OVER: &str = "Rest over — go!";
pub const SAVE_FAILED: &str = "Could not save your data. Changes may be lost when the page is closed.";
pub const SETTINGS_SAVE_FAILED: &str = "Could not save your settings.";
pub const EXPORT_FAILED: &str = "Could not export your data.";

/// The browser facilities the tracker depends on.
pub trait Platform {
    fn render(&self, view: &TrackerView);
    /// Call [`Tracker::tick`] once per second until the ticks are cancelled.
    fn schedule_ticks(&self);
    fn cancel_ticks(&self);
    fn alarm(&self, settings: &Settings);
    /// Ask a yes/no question.
    fn confirm(&self, text: &str) -> bool;
    /// Ask for a text. `None` if the user cancelled.
    fn prompt(&self, prompt: &Prompt) -> Option<String>;
    fn open_link(&self, url: &str);
    /// Offer a text as a file download.
    fn download(&self, file_name: &str, text: &str);
}

/// A question to the user with a suggested answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub default: String,
}

/// Owner of the state document and the session around it.
///
/// Every transition persists the document if it changed and renders the
/// resulting view.
pub struct Tracker<R, P> {
    service: domain::Service<R>,
    settings_service: Service<R>,
    state: State,
    workout_active: bool,
    timer: RestTimer,
    notification: Option<String>,
    settings: Settings,
    platform: P,
}

impl<R, P> Tracker<R, P>
where
    R: StateRepository + DocumentFormat + SettingsRepository + Clone,
    P: Platform,
{
    pub fn new(repository: R, platform: P) -> Self {
        let service = domain::Service::new(repository.clone());
        let settings_service = Service::new(repository);
        let state = service.load();
        let settings = settings_service.get_settings().unwrap_or_default();
        let tracker = Self {
            service,
            settings_service,
            state,
            workout_active: false,
            timer: RestTimer::default(),
            notification: None,
            settings,
            platform,
        };
        tracker.render();
        tracker
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn is_workout_active(&self) -> bool {
        self.workout_active
    }

    #[must_use]
    pub fn progress_view(&self) -> ProgressView {
        history::progress_view(&self.state.workouts, &Local)
    }

    pub fn view(&self) -> TrackerView {
        view::tracker_view(
            &self.state,
            self.workout_active,
            &self.timer,
            self.notification.as_deref(),
            &Local,
        )
    }

    /// Switch to another day. Any active workout ends.
    pub fn select_day(&mut self, day_id: &DayID) {
        if self.state.select_day(day_id) {
            self.workout_active = false;
            self.persist();
        } else {
            debug!("ignored selection of unknown day {day_id}");
        }
        self.render();
    }

    pub fn begin_workout(&mut self) {
        self.workout_active = true;
        self.render();
    }

    /// Save the active day to the history and end the workout.
    ///
    /// Returns false if no workout is active.
    pub fn finish_workout(&mut self, now: DateTime<Utc>) -> bool {
        if !self.workout_active {
            debug!("ignored finishing while no workout is active");
            return false;
        }
        if self
            .state
            .finish_workout(WorkoutID::random(), now)
            .is_none()
        {
            warn!("failed to finish workout: no active day");
            return false;
        }
        self.workout_active = false;
        self.persist();
        self.render();
        true
    }

    /// Record a change of a set of the active day.
    ///
    /// Sets can only be changed while a workout is active.
    pub fn update_set(
        &mut self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
        idx: usize,
        update: SetUpdate,
    ) -> bool {
        if !self.workout_active {
            debug!("ignored set update while no workout is active");
            return false;
        }
        if *day_id != self.state.active_day_id {
            debug!("ignored set update of inactive day {day_id}");
            return false;
        }
        if !self.state.update_set(day_id, exercise_id, idx, update) {
            debug!("ignored update of set {idx} of {exercise_id}");
            return false;
        }
        self.persist();
        self.render();
        true
    }

    pub fn update_quick_log(&mut self, field: QuickLogField, value: &str) {
        self.state.update_quick_log(field, value);
        self.persist();
        self.render();
    }

    /// The question for choosing a replacement of an exercise.
    ///
    /// Returns `None` if there is nothing to choose from, in which case a
    /// notification is posted.
    pub fn swap_prompt(&mut self, day_id: &DayID, exercise_id: &ExerciseID) -> Option<Prompt> {
        let prompt = match self.state.swap_options(day_id, exercise_id) {
            Ok((muscle_group, options)) if !options.is_empty() => self
                .state
                .program
                .day(day_id)
                .and_then(|d| d.exercise(exercise_id))
                .map(|exercise| Prompt {
                    text: view::swap_prompt(&exercise.name, &muscle_group, &options),
                    default: options[0].clone(),
                }),
            Ok((muscle_group, _)) => {
                self.swap_failed(SwapError::NoOptions(muscle_group));
                None
            }
            Err(err) => {
                self.swap_failed(err);
                None
            }
        };
        self.render();
        prompt
    }

    /// Replace an exercise by the option the user typed in.
    pub fn swap_exercise(&mut self, day_id: &DayID, exercise_id: &ExerciseID, choice: &str) -> bool {
        let result = self
            .state
            .swap_exercise(day_id, exercise_id, choice)
            .map(|_| ());
        let swapped = match result {
            Ok(()) => {
                self.persist();
                true
            }
            Err(err) => {
                self.swap_failed(err);
                false
            }
        };
        self.render();
        swapped
    }

    /// Ask for a replacement of an exercise and swap it.
    pub fn swap(&mut self, day_id: &DayID, exercise_id: &ExerciseID) -> bool {
        let Some(prompt) = self.swap_prompt(day_id, exercise_id) else {
            return false;
        };
        match self.platform.prompt(&prompt) {
            Some(choice) if !choice.trim().is_empty() => {
                self.swap_exercise(day_id, exercise_id, &choice)
            }
            _ => false,
        }
    }

    /// Swap a random accessory of the active day, if the user agrees.
    pub fn shuffle(&mut self, rng: &mut impl Rng) -> bool {
        if !self.platform.confirm(SHUFFLE_CONFIRMATION) {
            return false;
        }
        let day_id = self.state.active_day_id.clone();
        let result = self
            .state
            .shuffle_accessory(&day_id, |n| rng.gen_range(0..n))
            .map(|_| ());
        let shuffled = match result {
            Ok(()) => {
                self.persist();
                true
            }
            Err(err) => {
                self.swap_failed(err);
                false
            }
        };
        self.render();
        shuffled
    }

    pub fn video_prompt(&self, day_id: &DayID, exercise_id: &ExerciseID) -> Option<Prompt> {
        let exercise = self.state.program.day(day_id)?.exercise(exercise_id)?;
        Some(Prompt {
            text: view::video_prompt(&exercise.name),
            default: exercise.video_url.clone().unwrap_or_default(),
        })
    }

    /// Ask for the video URL of an exercise, store it and open the resulting
    /// link.
    pub fn open_video(&mut self, day_id: &DayID, exercise_id: &ExerciseID) -> bool {
        let Some(prompt) = self.video_prompt(day_id, exercise_id) else {
            debug!("ignored video of unknown exercise {exercise_id}");
            return false;
        };
        let Some(url) = self.platform.prompt(&prompt) else {
            return false;
        };
        let Some(link) = self.set_video_url(day_id, exercise_id, &url) else {
            return false;
        };
        self.platform.open_link(&link);
        true
    }

    /// Store the video URL of an exercise and return the link to open.
    pub fn set_video_url(
        &mut self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
        url: &str,
    ) -> Option<String> {
        let link = self.state.set_video_url(day_id, exercise_id, url);
        if link.is_some() {
            self.persist();
            self.render();
        } else {
            debug!("ignored video URL of unknown exercise {exercise_id}");
        }
        link
    }

    pub fn import_document(&mut self, text: &str) -> bool {
        match self.service.import(text) {
            Ok(state) => {
                self.state = state;
                self.notification = Some(IMPORT_SUCCEEDED.to_string());
                self.render();
                true
            }
            Err(_) => {
                self.import_failed();
                false
            }
        }
    }

    /// Report an import whose file could not be read.
    pub fn import_failed(&mut self) {
        self.notification = Some(IMPORT_FAILED.to_string());
        self.render();
    }

    pub fn export_document(&self) -> Option<String> {
        self.service.export(&self.state).ok()
    }

    /// Offer the exported document as a file download.
    pub fn download_export(&mut self) -> bool {
        let Some(text) = self.export_document() else {
            self.notification = Some(EXPORT_FAILED.to_string());
            self.render();
            return false;
        };
        self.platform.download(EXPORT_FILE_NAME, &text);
        true
    }

    /// Discard all data and start over with the default program, if the user
    /// agrees.
    pub fn reset(&mut self) -> bool {
        if !self.platform.confirm(RESET_CONFIRMATION) {
            return false;
        }
        self.state = match self.service.reset() {
            Ok(state) => state,
            Err(_) => {
                self.notification = Some(SAVE_FAILED.to_string());
                State::bootstrap()
            }
        };
        self.workout_active = false;
        self.render();
        true
    }

    /// Start a rest countdown, replacing any running one.
    pub fn start_timer(&mut self, seconds: u32, now: DateTime<Utc>) {
        self.platform.cancel_ticks();
        self.timer.start(seconds, now);
        self.platform.schedule_ticks();
        self.render();
    }

    pub fn stop_timer(&mut self) {
        self.platform.cancel_ticks();
        self.timer.stop();
        self.render();
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        match self.timer.update(now) {
            Tick::Idle => {}
            Tick::Running => self.render(),
            Tick::Finished => {
                self.platform.cancel_ticks();
                self.platform.alarm(&self.settings);
                self.notification = Some(REST_OVER.to_string());
                self.render();
            }
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        self.render();
    }

    pub fn update_settings(&mut self, settings: Settings) {
        if self.settings_service.set_settings(&settings).is_err() {
            self.notification = Some(SETTINGS_SAVE_FAILED.to_string());
        }
        self.settings = settings;
        self.render();
    }

    fn swap_failed(&mut self, err: SwapError) {
        match err {
            SwapError::NoOptions(_) => {
                self.notification = Some(NO_SWAP_OPTIONS.to_string());
            }
            SwapError::UnmatchedChoice(..) => {
                self.notification = Some(UNMATCHED_CHOICE.to_string());
            }
            SwapError::AlreadyInDay(name) => {
                self.notification = Some(format!("“{name}” is already part of this day."));
            }
            SwapError::UnknownDay(_)
            | SwapError::UnknownExercise(_)
            | SwapError::NothingToShuffle => {
                debug!("ignored swap: {err}");
            }
        }
    }

    fn persist(&mut self) {
        if self.service.save(&self.state).is_err() {
            self.notification = Some(SAVE_FAILED.to_string());
        }
    }

    fn render(&self) {
        self.platform.render(&self.view());
    }
}
