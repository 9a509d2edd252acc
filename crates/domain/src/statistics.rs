use chrono::{DateTime, TimeZone, Utc};
use strum::EnumIter;

use crate::{Workout, parse_number};

/// A quantity tracked across finished workouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Metric {
    BodyWeight,
    Completion,
    Cardio,
    Steps,
    Reps,
    Tonnage,
}

impl Metric {
    /// The value of the metric for a workout, if it was recorded.
    ///
    /// Quick-log values go through [`parse_number`], so free text that does
    /// not contain a number yields no value.
    #[must_use]
    pub fn value(self, workout: &Workout) -> Option<f64> {
        match self {
            Metric::BodyWeight => parse_number(&workout.quick_log.body_weight),
            Metric::Completion => workout.completion.map(f64::from),
            Metric::Cardio => parse_number(&workout.quick_log.cardio),
            Metric::Steps => parse_number(&workout.quick_log.steps),
            Metric::Reps => workout.total_reps.map(f64::from),
            Metric::Tonnage => workout.tonnage.map(f64::from),
        }
    }
}

/// Workouts ordered from oldest to newest.
#[must_use]
pub fn chronological(workouts: &[Workout]) -> Vec<&Workout> {
    let mut sorted = workouts.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|w| w.date);
    sorted
}

/// The values of a metric in the order of the given workouts.
///
/// Missing values stay in place as `None`, so that positions match the date
/// labels.
#[must_use]
pub fn series(workouts: &[&Workout], metric: Metric) -> Vec<Option<f64>> {
    workouts.iter().map(|w| metric.value(w)).collect()
}

/// Short date labels like "Mar 7" in the given time zone.
#[must_use]
pub fn date_labels<Tz: TimeZone>(workouts: &[&Workout], tz: &Tz) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    workouts.iter().map(|w| date_label(w.date, tz)).collect()
}

#[must_use]
pub fn date_label<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%b %-d").to_string()
}

/// Mean of all present values.
#[must_use]
pub fn avg(values: &[Option<f64>]) -> Option<f64> {
    let present = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    if present.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = present.len() as f64;
    Some(present.iter().sum::<f64>() / count)
}
