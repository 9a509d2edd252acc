use crate::{
    DEFAULT_PROGRAM, DayID, Exercise, ExerciseID, GENERIC_STEPS, State, SwapLibrary, search_query,
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SwapError {
    #[error("unknown day {0}")]
    UnknownDay(DayID),
    #[error("unknown exercise {0}")]
    UnknownExercise(ExerciseID),
    #[error("no swap options for {0}")]
    NoOptions(String),
    #[error("{0} is not a swap option for {1}")]
    UnmatchedChoice(String, String),
    #[error("{0} is already part of the day")]
    AlreadyInDay(String),
    #[error("no exercise to shuffle")]
    NothingToShuffle,
}

impl State {
    fn swap_library(&self) -> &SwapLibrary {
        if self.program.swap_library.is_empty() {
            &DEFAULT_PROGRAM.swap_library
        } else {
            &self.program.swap_library
        }
    }

    /// The muscle group and its swap options for an exercise.
    pub fn swap_options(
        &self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
    ) -> Result<(String, Vec<String>), SwapError> {
        let exercise = self.find_exercise(day_id, exercise_id)?;
        let library = self.swap_library();
        let muscle_group = library.muscle_group_of(exercise);
        let options = library.options(&muscle_group).to_vec();
        Ok((muscle_group, options))
    }

    /// Replace an exercise by an option of its muscle group.
    ///
    /// The choice is matched case-insensitively. The new exercise keeps the
    /// scheme, muscle, equipment, caution and cardio flag of the replaced one.
    /// Any progress previously recorded under the new ID is cleared. Progress
    /// of the old ID stays in the document.
    pub fn swap_exercise(
        &mut self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
        choice: &str,
    ) -> Result<&Exercise, SwapError> {
        let (muscle_group, options) = self.swap_options(day_id, exercise_id)?;
        if options.is_empty() {
            return Err(SwapError::NoOptions(muscle_group));
        }
        let choice = choice.trim().to_lowercase();
        let Some(name) = options.into_iter().find(|o| o.to_lowercase() == choice) else {
            return Err(SwapError::UnmatchedChoice(choice, muscle_group));
        };
        self.replace_exercise(day_id, exercise_id, &name)
    }

    /// Swap a random accessory of a day for a random option of the library.
    ///
    /// The first exercise of a day and cardio exercises are never shuffled.
    /// `pick` is called with the number of candidates and must return an index
    /// below it.
    pub fn shuffle_accessory(
        &mut self,
        day_id: &DayID,
        mut pick: impl FnMut(usize) -> usize,
    ) -> Result<&Exercise, SwapError> {
        let day = self
            .program
            .day(day_id)
            .ok_or_else(|| SwapError::UnknownDay(day_id.clone()))?;
        let start = 1.min(day.exercises.len().saturating_sub(1));
        let candidates = day.exercises[start..]
            .iter()
            .filter(|e| !e.is_cardio)
            .map(|e| e.id.clone())
            .collect::<Vec<_>>();
        let options = self.swap_library().all_options().cloned().collect::<Vec<_>>();
        if candidates.is_empty() || options.is_empty() {
            return Err(SwapError::NothingToShuffle);
        }
        let exercise_id = &candidates[pick(candidates.len()).min(candidates.len() - 1)];
        let name = &options[pick(options.len()).min(options.len() - 1)];
        self.replace_exercise(day_id, exercise_id, name)
    }

    fn find_exercise(&self, day_id: &DayID, exercise_id: &ExerciseID) -> Result<&Exercise, SwapError> {
        self.program
            .day(day_id)
            .ok_or_else(|| SwapError::UnknownDay(day_id.clone()))?
            .exercise(exercise_id)
            .ok_or_else(|| SwapError::UnknownExercise(exercise_id.clone()))
    }

    fn replace_exercise(
        &mut self,
        day_id: &DayID,
        exercise_id: &ExerciseID,
        name: &str,
    ) -> Result<&Exercise, SwapError> {
        let new_id = ExerciseID::from_name(name);
        let day = self
            .program
            .day(day_id)
            .ok_or_else(|| SwapError::UnknownDay(day_id.clone()))?;
        if day.exercises.iter().any(|e| e.id == new_id) {
            return Err(SwapError::AlreadyInDay(name.to_string()));
        }
        let current = self.find_exercise(day_id, exercise_id)?;
        let replacement = Exercise {
            id: new_id.clone(),
            name: name.to_string(),
            steps: GENERIC_STEPS.iter().map(ToString::to_string).collect(),
            video_url: None,
            search_query: search_query(name),
            ..current.clone()
        };
        let day = day
            .with_exercise_replaced(exercise_id, replacement)
            .ok_or_else(|| SwapError::UnknownExercise(exercise_id.clone()))?;

        log::info!("swapped {exercise_id} for {new_id} on {day_id}");

        self.program = self.program.with_day(day);
        if let Some(progress) = self.day_progress.get_mut(day_id) {
            progress.remove(&new_id);
        }
        self.find_exercise(day_id, &new_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{SetEntry, SetUpdate};

    fn bench() -> ExerciseID {
        ExerciseID::new("horizontal-barbell-bench-press")
    }

    #[test]
    fn test_swap_options() {
        let state = State::bootstrap();
        assert_eq!(
            state.swap_options(&DayID::new("d1"), &bench()),
            Ok((
                "Chest".to_string(),
                vec![
                    "Dumbbell bench press".to_string(),
                    "Incline dumbbell press".to_string(),
                    "Cable fly (standing)".to_string(),
                    "Pec deck".to_string(),
                ]
            ))
        );
        assert_eq!(
            state
                .swap_options(&DayID::new("d2"), &ExerciseID::new("deadlift"))
                .map(|(group, _)| group),
            Ok("Shoulders".to_string())
        );
    }

    #[test]
    fn test_swap_exercise() {
        let mut state = State::bootstrap();
        let day_id = DayID::new("d1");
        let original = state.program.clone();
        state.update_set(&day_id, &bench(), 0, SetUpdate::Done(true));
        state
            .day_progress
            .entry(day_id.clone())
            .or_default()
            .entry(ExerciseID::new("pec-deck"))
            .or_default()
            .sets
            .push(SetEntry {
                weight: "50".to_string(),
                reps: "10".to_string(),
                done: true,
            });
        state.program.days[0].exercises[0].video_url = Some("https://youtu.be/x".to_string());

        let swapped = state.swap_exercise(&day_id, &bench(), " pec DECK ").unwrap().clone();

        assert_eq!(swapped.id, ExerciseID::new("pec-deck"));
        assert_eq!(swapped.name, "Pec deck");
        assert_eq!(swapped.sets, 4);
        assert_eq!(swapped.reps, "6–8");
        assert_eq!(swapped.rest, "120–180s");
        assert_eq!(swapped.muscle, "Chest");
        assert_eq!(swapped.steps, GENERIC_STEPS.to_vec());
        assert_eq!(swapped.video_url, None);
        assert_eq!(swapped.search_query, "Pec%20deck%20proper%20form");
        assert_eq!(state.program.days[0].exercises[0], swapped);
        assert_eq!(state.exercise_completion(&day_id, &swapped), 0);
        assert_eq!(state.progress(&day_id, &ExerciseID::new("pec-deck")), None);
        // orphaned progress is kept
        assert!(state.progress(&day_id, &bench()).is_some());
        assert_eq!(original.days[0].exercises[0].id, bench());
    }

    #[rstest]
    #[case::unknown_day("d9", "deadlift", "Hammer curls", SwapError::UnknownDay(DayID::new("d9")))]
    #[case::unknown_exercise("d1", "deadlift", "Pec deck", SwapError::UnknownExercise(ExerciseID::new("deadlift")))]
    #[case::unmatched_choice(
        "d1",
        "horizontal-barbell-bench-press",
        "Hack squat",
        SwapError::UnmatchedChoice("hack squat".to_string(), "Chest".to_string())
    )]
    fn test_swap_exercise_error(
        #[case] day_id: &str,
        #[case] exercise_id: &str,
        #[case] choice: &str,
        #[case] expected: SwapError,
    ) {
        let mut state = State::bootstrap();
        let before = state.clone();
        assert_eq!(
            state
                .swap_exercise(&DayID::new(day_id), &ExerciseID::new(exercise_id), choice)
                .map(|e| e.id.clone()),
            Err(expected)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_swap_exercise_already_in_day() {
        let mut state = State::bootstrap();
        let day_id = DayID::new("d1");
        state.swap_exercise(&day_id, &bench(), "Pec deck").unwrap();
        let before = state.clone();
        assert_eq!(
            state
                .swap_exercise(
                    &day_id,
                    &ExerciseID::new("incline-barbell-bench-press"),
                    "Pec deck"
                )
                .map(|e| e.id.clone()),
            Err(SwapError::AlreadyInDay("Pec deck".to_string()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_swap_exercise_without_options() {
        let mut state = State::bootstrap();
        state
            .program
            .swap_library
            .0
            .iter_mut()
            .find(|c| c.muscle_group == "Chest")
            .unwrap()
            .exercises
            .clear();
        assert_eq!(
            state
                .swap_exercise(&DayID::new("d1"), &bench(), "Pec deck")
                .map(|e| e.id.clone()),
            Err(SwapError::NoOptions("Chest".to_string()))
        );
    }

    #[test]
    fn test_swap_exercise_falls_back_to_default_library() {
        let mut state = State::bootstrap();
        state.program.swap_library = SwapLibrary::default();
        assert!(state.swap_exercise(&DayID::new("d1"), &bench(), "Pec deck").is_ok());
    }

    #[test]
    fn test_shuffle_accessory() {
        let mut state = State::bootstrap();
        let day_id = DayID::new("d3");
        let mut picks = vec![5, 7].into_iter();
        let swapped = state
            .shuffle_accessory(&day_id, |_| picks.next().unwrap())
            .unwrap()
            .clone();
        // candidates skip the first exercise and the cardio finisher
        assert_eq!(swapped.name, "Chest-supported row");
        assert_eq!(
            state.program.days[2].exercises[7].name,
            "Incline treadmill walk (finisher)"
        );
        assert_eq!(
            state.program.days[2].exercises[6].id,
            ExerciseID::new("chest-supported-row")
        );
        assert_eq!(state.program.days[2].exercises[0].name, "Seated leg press");
    }

    #[test]
    fn test_shuffle_accessory_never_picks_first_or_cardio() {
        for n in 0..7 {
            let mut state = State::bootstrap();
            let day_id = DayID::new("d3");
            let before = state.program.days[2].clone();
            let mut picks = vec![n, 0].into_iter();
            if state
                .shuffle_accessory(&day_id, |_| picks.next().unwrap())
                .is_ok()
            {
                let after = &state.program.days[2];
                assert_eq!(after.exercises[0], before.exercises[0]);
                assert_eq!(after.exercises[7], before.exercises[7]);
            }
        }
    }

    #[test]
    fn test_shuffle_accessory_unknown_day() {
        let mut state = State::bootstrap();
        assert_eq!(
            state
                .shuffle_accessory(&DayID::new("d9"), |_| 0)
                .map(|e| e.id.clone()),
            Err(SwapError::UnknownDay(DayID::new("d9")))
        );
    }
}
