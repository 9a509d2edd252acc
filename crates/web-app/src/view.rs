use chrono::TimeZone;
use setbook_domain::{DayID, Exercise, ExerciseID, QuickLog, State, Workout};

use crate::timer::{PRESETS, RestTimer};

/// Number of history entries shown below the tracker.
pub const HISTORY_ITEMS: usize = 8;

pub const EMPTY_HISTORY: &str =
    "No workouts saved yet. Hit “Begin workout”, track sets, then “Finish & save”.";
pub const SHUFFLE_CONFIRMATION: &str = "Quick shuffle idea:\n\n\
    1) Keep your main lift first (bench / deadlift / squat / press).\n\
    2) Swap 1–2 accessory moves for variety.\n\n\
    Tap OK to auto-swap ONE accessory (random) from the library.";
pub const RESET_CONFIRMATION: &str = "Reset EVERYTHING (program edits + set logs + history)?";
pub const EXPORT_FILE_NAME: &str = "setbook-export.json";

/// Everything the tracker page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerView {
    pub tabs: Vec<DayTab>,
    pub day: Option<DayView>,
    pub quick_log: QuickLog,
    pub week_done: usize,
    pub session: SessionView,
    pub history: HistoryList,
    pub timer: String,
    /// Rest durations offered for selection, in seconds.
    pub rest_presets: [u32; 3],
    pub notification: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTab {
    pub id: DayID,
    pub text: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub id: DayID,
    pub label: String,
    pub name: String,
    pub focus: String,
    pub warmup: String,
    pub finisher: String,
    pub completion: String,
    pub exercises: Vec<ExerciseCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseCard {
    pub id: ExerciseID,
    pub name: String,
    pub completion: u8,
    pub tags: Vec<String>,
    pub caution: Option<String>,
    pub steps: Vec<String>,
    pub search_url: String,
    pub sets: Vec<SetRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetRow {
    pub index: usize,
    pub label: String,
    pub weight: String,
    pub reps: String,
    pub done: bool,
    pub editable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub status: &'static str,
    pub begin_enabled: bool,
    pub finish_enabled: bool,
    pub rest_enabled: bool,
}

impl SessionView {
    #[must_use]
    pub fn new(workout_active: bool) -> Self {
        Self {
            status: if workout_active {
                "In progress"
            } else {
                "Not started"
            },
            begin_enabled: !workout_active,
            finish_enabled: workout_active,
            rest_enabled: workout_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryList {
    Empty(&'static str),
    Items(Vec<HistoryItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub notes: Option<String>,
}

#[must_use]
pub fn tracker_view<Tz: TimeZone>(
    state: &State,
    workout_active: bool,
    timer: &RestTimer,
    notification: Option<&str>,
    tz: &Tz,
) -> TrackerView
where
    Tz::Offset: std::fmt::Display,
{
    TrackerView {
        tabs: state
            .program
            .days
            .iter()
            .map(|d| DayTab {
                id: d.id.clone(),
                text: format!("{} • {}", d.label, d.name),
                active: d.id == state.active_day_id,
            })
            .collect(),
        day: state.active_day().map(|day| DayView {
            id: day.id.clone(),
            label: day.label.clone(),
            name: day.name.clone(),
            focus: day.focus.clone(),
            warmup: day.warmup.clone(),
            finisher: day.finisher.clone(),
            completion: format!("{}% done", state.day_completion(&day.id)),
            exercises: day
                .exercises
                .iter()
                .map(|e| exercise_card(state, &day.id, e, workout_active))
                .collect(),
        }),
        quick_log: state.quick_log.clone(),
        week_done: state.week_done(),
        session: SessionView::new(workout_active),
        history: history_list(&state.workouts, tz),
        timer: timer.display(),
        rest_presets: PRESETS,
        notification: notification.map(ToString::to_string),
    }
}

fn exercise_card(
    state: &State,
    day_id: &DayID,
    exercise: &Exercise,
    workout_active: bool,
) -> ExerciseCard {
    let completion = state.exercise_completion(day_id, exercise);
    let progress = state.progress(day_id, &exercise.id);
    ExerciseCard {
        id: exercise.id.clone(),
        name: exercise.name.clone(),
        completion,
        tags: vec![
            format!("{completion}%"),
            exercise.muscle.clone(),
            exercise.equipment.clone(),
            format!("Sets: {}", exercise.sets),
            format!("Reps: {}", exercise.reps),
            format!("Rest: {}", exercise.rest),
        ],
        caution: exercise.caution.clone(),
        steps: exercise.steps.clone(),
        search_url: exercise.search_url(),
        sets: (0..exercise.sets as usize)
            .map(|index| {
                let set = progress.map(|p| p.set(index)).unwrap_or_default();
                SetRow {
                    index,
                    label: format!("Set {}", index + 1),
                    weight: set.weight,
                    reps: set.reps,
                    done: set.done,
                    editable: workout_active,
                }
            })
            .collect(),
    }
}

fn history_list<Tz: TimeZone>(workouts: &[Workout], tz: &Tz) -> HistoryList
where
    Tz::Offset: std::fmt::Display,
{
    if workouts.is_empty() {
        return HistoryList::Empty(EMPTY_HISTORY);
    }
    HistoryList::Items(
        workouts
            .iter()
            .take(HISTORY_ITEMS)
            .map(|w| HistoryItem {
                title: w.day_name.clone(),
                date: w.date.with_timezone(tz).format("%b %-d, %Y %H:%M").to_string(),
                summary: format!(
                    "Completion: {}% • BW: {} • Steps: {} • Cardio: {} min",
                    w.completion.map_or("—".to_string(), |c| c.to_string()),
                    or_dash(&w.quick_log.body_weight),
                    or_dash(&w.quick_log.steps),
                    or_dash(&w.quick_log.cardio),
                ),
                notes: if w.quick_log.notes.is_empty() {
                    None
                } else {
                    Some(format!("Notes: {}", w.quick_log.notes))
                },
            })
            .collect(),
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}

/// The question asked before swapping an exercise.
#[must_use]
pub fn swap_prompt(exercise_name: &str, muscle_group: &str, options: &[String]) -> String {
    format!(
        "Swap “{exercise_name}”\nCategory: {muscle_group}\n\nType one of these options exactly:\n- {}",
        options.join("\n- ")
    )
}

/// The question asked before setting the video link of an exercise.
#[must_use]
pub fn video_prompt(exercise_name: &str) -> String {
    format!(
        "Paste a video URL for:\n{exercise_name}\n\nTip: YouTube share links work.\nLeave empty to keep none."
    )
}
