use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};
use uuid::Uuid;

use crate::{DayID, ExerciseID, ExerciseVolume, SetEntry};

/// Maximum number of workouts kept in the history.
pub const HISTORY_LIMIT: usize = 30;

/// A finished workout.
///
/// Entries are created once and never modified. Entries read from older or
/// imported documents may lack the derived metrics, which is why completion,
/// total reps and tonnage are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: DateTime<Utc>,
    pub day_id: DayID,
    pub day_name: String,
    pub completion: Option<u8>,
    pub quick_log: QuickLog,
    pub total_reps: Option<u32>,
    pub tonnage: Option<u32>,
    pub per_exercise: Vec<ExerciseVolume>,
    pub set_log: Vec<SetLogEntry>,
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

/// Session-level notes captured alongside the sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickLog {
    pub body_weight: String,
    pub steps: String,
    pub cardio: String,
    pub notes: String,
}

impl QuickLog {
    #[must_use]
    pub fn trimmed(&self) -> QuickLog {
        QuickLog {
            body_weight: self.body_weight.trim().to_string(),
            steps: self.steps.trim().to_string(),
            cardio: self.cardio.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    pub fn set(&mut self, field: QuickLogField, value: &str) {
        let value = value.trim().to_string();
        match field {
            QuickLogField::BodyWeight => self.body_weight = value,
            QuickLogField::Steps => self.steps = value,
            QuickLogField::Cardio => self.cardio = value,
            QuickLogField::Notes => self.notes = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickLogField {
    BodyWeight,
    Steps,
    Cardio,
    Notes,
}

/// The sets of one exercise as they were when a workout was finished.
#[derive(Debug, Clone, PartialEq)]
pub struct SetLogEntry {
    pub id: ExerciseID,
    pub name: String,
    pub sets: Vec<SetEntry>,
}

/// Prepend a workout to a newest-first history, evicting the oldest entries
/// beyond [`HISTORY_LIMIT`].
pub fn record(history: &mut Vec<Workout>, workout: Workout) {
    history.insert(0, workout);
    history.truncate(HISTORY_LIMIT);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn workout(n: i64) -> Workout {
        Workout {
            id: WorkoutID::new(&n.to_string()),
            date: Utc.timestamp_opt(n * 86_400, 0).unwrap(),
            day_id: DayID::new("d1"),
            day_name: "Chest & Triceps".to_string(),
            completion: Some(100),
            quick_log: QuickLog::default(),
            total_reps: Some(0),
            tonnage: Some(0),
            per_exercise: vec![],
            set_log: vec![],
        }
    }

    #[test]
    fn test_record_is_newest_first_and_bounded() {
        let mut history = vec![];
        for n in 0..45 {
            record(&mut history, workout(n));
            assert!(history.len() <= HISTORY_LIMIT);
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].id, WorkoutID::new("44"));
        assert_eq!(history[HISTORY_LIMIT - 1].id, WorkoutID::new("15"));
        assert!(history.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_random_ids_are_unique() {
        assert_ne!(WorkoutID::random(), WorkoutID::random());
    }

    #[test]
    fn test_quick_log_set_trims() {
        let mut quick_log = QuickLog::default();
        quick_log.set(QuickLogField::BodyWeight, " 181.4 ");
        quick_log.set(QuickLogField::Notes, "felt strong\n");
        assert_eq!(
            quick_log,
            QuickLog {
                body_weight: "181.4".to_string(),
                steps: String::new(),
                cardio: String::new(),
                notes: "felt strong".to_string(),
            }
        );
    }
}
