use chrono::{DateTime, Utc};

use crate::{
    DEFAULT_PROGRAM, Day, DayID, DayProgress, Exercise, ExerciseID, ExerciseProgress,
    HISTORY_LIMIT, Program, QuickLog, QuickLogField, SetLogEntry, SetUpdate, Volume, Workout,
    WorkoutID, day_completion, exercise_completion, record, volume_for_day, week_done,
};

/// The complete persisted document.
///
/// All mutation goes through the methods below. A `State` obtained from
/// [`State::merge`] always has a program with at least one day, an active day
/// that exists in the program and at most [`HISTORY_LIMIT`] workouts.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub program: Program,
    pub active_day_id: DayID,
    pub workouts: Vec<Workout>,
    pub day_progress: DayProgress,
    pub quick_log: QuickLog,
}

/// A document as read from storage or import, where any part may be missing.
///
/// Parts that are present but structurally unusable are expected to be
/// `None` already.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredState {
    pub program: Option<Program>,
    pub active_day_id: Option<DayID>,
    pub workouts: Option<Vec<Workout>>,
    pub day_progress: Option<DayProgress>,
    pub quick_log: Option<QuickLog>,
}

impl From<State> for StoredState {
    fn from(value: State) -> Self {
        Self {
            program: Some(value.program),
            active_day_id: Some(value.active_day_id),
            workouts: Some(value.workouts),
            day_progress: Some(value.day_progress),
            quick_log: Some(value.quick_log),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::bootstrap()
    }
}

impl State {
    #[must_use]
    pub fn bootstrap() -> Self {
        let program = DEFAULT_PROGRAM.clone();
        let active_day_id = first_day_id(&program);
        Self {
            program,
            active_day_id,
            workouts: vec![],
            day_progress: DayProgress::new(),
            quick_log: QuickLog::default(),
        }
    }

    /// Complete a stored document with defaults.
    ///
    /// A missing program or a program without days is replaced by the
    /// built-in program. A missing active day, or one the program does not
    /// contain, becomes the first day of the program. Missing history,
    /// progress and quick log become empty. The history is cut to
    /// [`HISTORY_LIMIT`] entries.
    ///
    /// Merging is idempotent: merging the stored form of a merged state
    /// yields the same state.
    #[must_use]
    pub fn merge(stored: StoredState) -> Self {
        let program = stored
            .program
            .filter(|p| !p.days.is_empty())
            .unwrap_or_else(|| DEFAULT_PROGRAM.clone());
        let active_day_id = stored
            .active_day_id
            .filter(|id| program.day(id).is_some())
            .unwrap_or_else(|| first_day_id(&program));
        let mut workouts = stored.workouts.unwrap_or_default();
        workouts.truncate(HISTORY_LIMIT);

        Self {
            program,
            active_day_id,
            workouts,
            day_progress: stored.day_progress.unwrap_or_default(),
            quick_log: stored.quick_log.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn active_day(&self) -> Option<&Day> {
        self.program
            .day(&self.active_day_id)
            .or_else(|| self.program.days.first())
    }

    #[must_use]
    pub fn progress(&self, day_id: &DayID, exercise_id: &ExerciseID) -> Option<&ExerciseProgress> {
        self.day_progress.get(day_id)?.get(exercise_id)
    }

    #[must_use]
    pub fn exercise_completion(&self, day_id: &DayID, exercise: &Exercise) -> u8 {
        exercise_completion(self.progress(day_id, &exercise.id), exercise.sets)
    }

    #[must_use]
    pub fn day_completion(&self, day_id: &DayID) -> u8 {
        self.program
            .day(day_id)
            .map_or(0, |day| day_completion(day, self.day_progress.get(day_id)))
    }

    #[must_use]
    pub fn week_done(&self) -> usize {
        week_done(&self.program.days, &self.day_progress)
    }

    #[must_use]
    pub fn volume_for_day(&self, day_id: &DayID) -> Volume {
        self.program
            .day(day_id)
            .map(|day| volume_for_day(day, self.day_progress.get(day_id)))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn set_log_for_day(&self, day_id: &DayID) -> Vec<SetLogEntry> {
        let Some(day) = self.program.day(day_id) else {
            return vec![];
        };
        day.exercises
            .iter()
            .map(|e| SetLogEntry {
                id: e.id.clone(),
                name: e.name.clone(),
                sets: self
                    .progress(day_id, &e.id)
                    .map(|p| p.sets.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Returns false if the program has no such day.
    pub fn select_day(&mut self, day_id: &DayID) -> bool {
        if self.program.day(day_id).is_none() {
            return false;
        }
        self.active_day_id = day_id.clone();
        true
    }

    /// Record a change of a set.
    ///
    /// Returns false if the day has no such exercise or the set position is
    /// outside of the configured sets.
    pub fn update_set(
        &mut self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
        idx: usize,
        update: SetUpdate,
    ) -> bool {
        let Some(exercise) = self
            .program
            .day(day_id)
            .and_then(|d| d.exercise(exercise_id))
        else {
            return false;
        };
        if idx >= exercise.sets as usize {
            return false;
        }
        self.day_progress
            .entry(day_id.clone())
            .or_default()
            .entry(exercise_id.clone())
            .or_default()
            .set_mut(idx)
            .apply(update);
        true
    }

    pub fn update_quick_log(&mut self, field: QuickLogField, value: &str) {
        self.quick_log.set(field, value);
    }

    /// Add a history entry for the active day.
    ///
    /// The entry captures the completion, volume and sets of the day as well
    /// as the quick log at this moment.
    pub fn finish_workout(&mut self, id: WorkoutID, date: DateTime<Utc>) -> Option<&Workout> {
        let day = self.active_day()?;
        let day_id = day.id.clone();
        let day_name = day.name.clone();
        let volume = self.volume_for_day(&day_id);
        self.quick_log = self.quick_log.trimmed();

        let workout = Workout {
            id,
            date,
            completion: Some(self.day_completion(&day_id)),
            quick_log: self.quick_log.clone(),
            total_reps: Some(volume.total_reps),
            tonnage: Some(volume.tonnage),
            per_exercise: volume.per_exercise,
            set_log: self.set_log_for_day(&day_id),
            day_id,
            day_name,
        };
        record(&mut self.workouts, workout);
        self.workouts.first()
    }

    /// Store a video URL for an exercise and return the link to open.
    ///
    /// An empty URL removes the stored one, in which case the search link is
    /// returned.
    pub fn set_video_url(
        &mut self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
        url: &str,
    ) -> Option<String> {
        let exercise = self.program.day(day_id)?.exercise(exercise_id)?;
        let url = url.trim();
        let updated = Exercise {
            video_url: if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            },
            ..exercise.clone()
        };
        let link = updated.demo_url();
        let day = self
            .program
            .day(day_id)?
            .with_exercise_replaced(exercise_id, updated)?;
        self.program = self.program.with_day(day);
        Some(link)
    }
}

fn first_day_id(program: &Program) -> DayID {
    program
        .days
        .first()
        .map_or_else(|| DayID::new(""), |d| d.id.clone())
}
