use std::collections::BTreeMap;

use crate::{Day, DayID, ExerciseID};

/// A day counts as done from this completion on.
pub const DAY_DONE_THRESHOLD: u8 = 85;

/// Recorded progress of all days, keyed by day and exercise.
pub type DayProgress = BTreeMap<DayID, BTreeMap<ExerciseID, ExerciseProgress>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseProgress {
    pub sets: Vec<SetEntry>,
}

impl ExerciseProgress {
    #[must_use]
    pub fn set(&self, idx: usize) -> SetEntry {
        self.sets.get(idx).cloned().unwrap_or_default()
    }

    /// Access the set at the given position, filling any gap with empty sets.
    pub fn set_mut(&mut self, idx: usize) -> &mut SetEntry {
        if self.sets.len() <= idx {
            self.sets.resize_with(idx + 1, SetEntry::default);
        }
        &mut self.sets[idx]
    }
}

/// A single recorded set.
///
/// Weight and reps are kept as entered. They are only interpreted when
/// aggregating (see [`crate::parse_number`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetEntry {
    pub weight: String,
    pub reps: String,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetUpdate<'a> {
    Weight(&'a str),
    Reps(&'a str),
    Done(bool),
}

impl SetEntry {
    pub fn apply(&mut self, update: SetUpdate) {
        match update {
            SetUpdate::Weight(weight) => weight.clone_into(&mut self.weight),
            SetUpdate::Reps(reps) => reps.clone_into(&mut self.reps),
            SetUpdate::Done(done) => self.done = done,
        }
    }
}

/// Percentage of the configured sets of an exercise that are marked as done.
///
/// Only the first `sets` recorded entries are considered, so the result never
/// exceeds 100. An exercise without configured sets has a completion of 0.
#[must_use]
pub fn exercise_completion(progress: Option<&ExerciseProgress>, sets: u32) -> u8 {
    if sets == 0 {
        return 0;
    }
    let done = progress.map_or(0, |p| {
        p.sets
            .iter()
            .take(sets as usize)
            .filter(|s| s.done)
            .count()
    });
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let completion = (done as f64 / f64::from(sets) * 100.).round() as u8;
    completion
}

/// Rounded mean of the completion of all exercises of a day.
#[must_use]
pub fn day_completion(day: &Day, progress: Option<&BTreeMap<ExerciseID, ExerciseProgress>>) -> u8 {
    if day.exercises.is_empty() {
        return 0;
    }
    let sum = day
        .exercises
        .iter()
        .map(|e| u32::from(exercise_completion(progress.and_then(|p| p.get(&e.id)), e.sets)))
        .sum::<u32>();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let completion = (f64::from(sum) / day.exercises.len() as f64).round() as u8;
    completion
}

/// Number of days with a completion of at least [`DAY_DONE_THRESHOLD`].
#[must_use]
pub fn week_done(days: &[Day], progress: &DayProgress) -> usize {
    days.iter()
        .filter(|d| day_completion(d, progress.get(&d.id)) >= DAY_DONE_THRESHOLD)
        .count()
}
