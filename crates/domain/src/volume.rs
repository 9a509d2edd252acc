use std::collections::BTreeMap;

use crate::{Day, ExerciseID, ExerciseProgress, parse_number};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Volume {
    pub total_reps: u32,
    pub tonnage: u32,
    pub per_exercise: Vec<ExerciseVolume>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseVolume {
    pub id: ExerciseID,
    pub name: String,
    pub reps: u32,
    pub tonnage: u32,
}

/// Training volume of all recorded sets of a day.
///
/// A set is counted if it is marked as done or if its reps parse to a positive
/// number, so that typed-in reps are not lost when the done flag was forgotten.
/// Only positive reps contribute to the rep total, and only sets with positive
/// reps and positive weight contribute `reps × weight` to the tonnage. A set
/// with a weight but without reps therefore contributes nothing.
///
/// Totals are accumulated unrounded and rounded at the end.
#[must_use]
pub fn volume_for_day(day: &Day, progress: Option<&BTreeMap<ExerciseID, ExerciseProgress>>) -> Volume {
    let mut total_reps = 0.;
    let mut tonnage = 0.;
    let mut per_exercise = vec![];

    for exercise in &day.exercises {
        let mut exercise_reps = 0.;
        let mut exercise_tonnage = 0.;

        for set in progress
            .and_then(|p| p.get(&exercise.id))
            .map(|p| p.sets.as_slice())
            .unwrap_or_default()
        {
            let reps = parse_number(&set.reps).filter(|r| *r > 0.);
            let weight = parse_number(&set.weight).filter(|w| *w > 0.);

            if !set.done && reps.is_none() {
                continue;
            }

            if let Some(reps) = reps {
                exercise_reps += reps;
                if let Some(weight) = weight {
                    exercise_tonnage += reps * weight;
                }
            }
        }

        total_reps += exercise_reps;
        tonnage += exercise_tonnage;
        per_exercise.push(ExerciseVolume {
            id: exercise.id.clone(),
            name: exercise.name.clone(),
            reps: round(exercise_reps),
            tonnage: round(exercise_tonnage),
        });
    }

    Volume {
        total_reps: round(total_reps),
        tonnage: round(tonnage),
        per_exercise,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{DayID, Exercise, Scheme, SetEntry};

    fn day(names: &[&str]) -> Day {
        Day {
            id: DayID::new("d1"),
            label: "Day 1".to_string(),
            name: "Push".to_string(),
            focus: String::new(),
            warmup: String::new(),
            finisher: String::new(),
            exercises: names
                .iter()
                .map(|n| {
                    Exercise::new(
                        n,
                        "",
                        "",
                        Scheme {
                            sets: 3,
                            reps: "8–10",
                            rest: "90s",
                        },
                        &[],
                    )
                })
                .collect(),
        }
    }

    fn set(weight: &str, reps: &str, done: bool) -> SetEntry {
        SetEntry {
            weight: weight.to_string(),
            reps: reps.to_string(),
            done,
        }
    }

    #[rstest]
    #[case::done_without_weight(set("", "10", true), 10, 0)]
    #[case::typed_reps_not_done(set("100", "8", false), 8, 800)]
    #[case::weight_without_reps(set("50", "", false), 0, 0)]
    #[case::done_weight_without_reps(set("50", "", true), 0, 0)]
    #[case::unit_annotated(set("135 lb", "5 reps", true), 5, 675)]
    #[case::zero_reps(set("100", "0", true), 0, 0)]
    #[case::negative_weight(set("-20", "10", true), 10, 0)]
    #[case::unparsable_reps(set("100", "lots", true), 0, 0)]
    #[case::fractional(set("22.5", "7", false), 7, 158)]
    fn test_volume_of_single_set(
        #[case] entry: SetEntry,
        #[case] expected_reps: u32,
        #[case] expected_tonnage: u32,
    ) {
        let d = day(&["Bench press"]);
        let progress = BTreeMap::from([(
            ExerciseID::new("bench-press"),
            ExerciseProgress { sets: vec![entry] },
        )]);
        let volume = volume_for_day(&d, Some(&progress));
        assert_eq!(
            (volume.total_reps, volume.tonnage),
            (expected_reps, expected_tonnage)
        );
    }

    #[test]
    fn test_volume_for_day() {
        let d = day(&["Bench press", "Chest dips", "Cable fly"]);
        let progress = BTreeMap::from([
            (
                ExerciseID::new("bench-press"),
                ExerciseProgress {
                    sets: vec![
                        set("100", "8", true),
                        set("100", "7", true),
                        set("95", "6", false),
                    ],
                },
            ),
            (
                ExerciseID::new("chest-dips"),
                ExerciseProgress {
                    sets: vec![set("", "12", true), set("", "", true)],
                },
            ),
            (
                ExerciseID::new("orphaned"),
                ExerciseProgress {
                    sets: vec![set("500", "10", true)],
                },
            ),
        ]);

        assert_eq!(
            volume_for_day(&d, Some(&progress)),
            Volume {
                total_reps: 33,
                tonnage: 2070,
                per_exercise: vec![
                    ExerciseVolume {
                        id: ExerciseID::new("bench-press"),
                        name: "Bench press".to_string(),
                        reps: 21,
                        tonnage: 2070,
                    },
                    ExerciseVolume {
                        id: ExerciseID::new("chest-dips"),
                        name: "Chest dips".to_string(),
                        reps: 12,
                        tonnage: 0,
                    },
                    ExerciseVolume {
                        id: ExerciseID::new("cable-fly"),
                        name: "Cable fly".to_string(),
                        reps: 0,
                        tonnage: 0,
                    },
                ],
            }
        );
    }

    #[test]
    fn test_volume_rounds_totals_after_summing() {
        let d = day(&["Curl"]);
        let progress = BTreeMap::from([(
            ExerciseID::new("curl"),
            ExerciseProgress {
                sets: vec![set("10.25", "2", true), set("10.25", "2", true)],
            },
        )]);
        // 20.5 + 20.5 = 41, rounding each set first would give 42
        assert_eq!(volume_for_day(&d, Some(&progress)).tonnage, 41);
    }

    #[test]
    fn test_volume_without_progress() {
        let volume = volume_for_day(&day(&["Curl"]), None);
        assert_eq!((volume.total_reps, volume.tonnage), (0, 0));
        assert_eq!(volume.per_exercise.len(), 1);
    }
}
