use derive_more::{AsRef, Deref, Display};

const SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub version: u32,
    pub name: String,
    pub days: Vec<Day>,
    pub swap_library: SwapLibrary,
}

impl Program {
    #[must_use]
    pub fn day(&self, id: &DayID) -> Option<&Day> {
        self.days.iter().find(|d| d.id == *id)
    }

    /// Replace a day by a new value with the same ID.
    ///
    /// The previous program value is left untouched.
    #[must_use]
    pub fn with_day(&self, day: Day) -> Program {
        Program {
            days: self
                .days
                .iter()
                .map(|d| if d.id == day.id { day.clone() } else { d.clone() })
                .collect(),
            ..self.clone()
        }
    }
}

#[derive(AsRef, Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayID(String);

impl DayID {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DayID {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub id: DayID,
    pub label: String,
    pub name: String,
    pub focus: String,
    pub warmup: String,
    pub finisher: String,
    pub exercises: Vec<Exercise>,
}

impl Day {
    #[must_use]
    pub fn exercise(&self, id: &ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == *id)
    }

    /// Replace the exercise with the given ID, keeping its position.
    ///
    /// Returns `None` if the day contains no such exercise.
    #[must_use]
    pub fn with_exercise_replaced(&self, id: &ExerciseID, exercise: Exercise) -> Option<Day> {
        let idx = self.exercises.iter().position(|e| e.id == *id)?;
        let mut exercises = self.exercises.clone();
        exercises[idx] = exercise;
        Some(Day {
            exercises,
            ..self.clone()
        })
    }
}

/// Identifies an exercise within a day.
///
/// The ID is derived from the exercise name: lowercased, every run of
/// characters other than `a-z` and `0-9` collapsed into a single `-`, and
/// leading and trailing dashes removed.
#[derive(AsRef, Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        for c in name.to_lowercase().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                slug.push(c);
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        Self(slug.trim_matches('-').to_string())
    }

    /// Use a stored ID as is.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub muscle: String,
    pub equipment: String,
    pub sets: u32,
    pub reps: String,
    pub rest: String,
    pub steps: Vec<String>,
    pub caution: Option<String>,
    pub is_cardio: bool,
    pub video_url: Option<String>,
    pub search_query: String,
}

impl Exercise {
    #[must_use]
    pub fn new(name: &str, muscle: &str, equipment: &str, scheme: Scheme, steps: &[&str]) -> Self {
        Self {
            id: ExerciseID::from_name(name),
            name: name.to_string(),
            muscle: muscle.to_string(),
            equipment: equipment.to_string(),
            sets: scheme.sets,
            reps: scheme.reps.to_string(),
            rest: scheme.rest.to_string(),
            steps: steps.iter().map(ToString::to_string).collect(),
            caution: None,
            is_cardio: false,
            video_url: None,
            search_query: search_query(name),
        }
    }

    #[must_use]
    pub fn with_caution(self, caution: &str) -> Self {
        Self {
            caution: Some(caution.to_string()),
            ..self
        }
    }

    #[must_use]
    pub fn cardio(self) -> Self {
        Self {
            is_cardio: true,
            ..self
        }
    }

    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{SEARCH_URL}{}", self.search_query)
    }

    /// The link to a demonstration: the stored video URL if there is one,
    /// otherwise a search for the exercise.
    #[must_use]
    pub fn demo_url(&self) -> String {
        match &self.video_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.search_url(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scheme {
    pub sets: u32,
    pub reps: &'static str,
    pub rest: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapLibrary(pub Vec<SwapCategory>);

#[derive(Debug, Clone, PartialEq)]
pub struct SwapCategory {
    pub muscle_group: String,
    pub exercises: Vec<String>,
}

impl SwapLibrary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn options(&self, muscle_group: &str) -> &[String] {
        self.0
            .iter()
            .find(|c| c.muscle_group == muscle_group)
            .map_or(&[], |c| c.exercises.as_slice())
    }

    pub fn all_options(&self) -> impl Iterator<Item = &String> {
        self.0.iter().flat_map(|c| c.exercises.iter())
    }

    /// Guess the muscle group of an exercise.
    ///
    /// The first group whose name occurs in the exercise's muscle is chosen,
    /// then the first group occurring in the exercise's name, and "Shoulders"
    /// if nothing matches.
    #[must_use]
    pub fn muscle_group_of(&self, exercise: &Exercise) -> String {
        let muscle = exercise.muscle.to_lowercase();
        let name = exercise.name.to_lowercase();
        self.0
            .iter()
            .find(|c| muscle.contains(&c.muscle_group.to_lowercase()))
            .or_else(|| {
                self.0
                    .iter()
                    .find(|c| name.contains(&c.muscle_group.to_lowercase()))
            })
            .map_or_else(|| "Shoulders".to_string(), |c| c.muscle_group.clone())
    }
}

/// The URI-component encoded search query for an exercise name.
#[must_use]
pub fn search_query(name: &str) -> String {
    encode_uri_component(&format!("{name} proper form"))
}

fn encode_uri_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
