//! JSON form of the state document.
//!
//! Decoding is tolerant: documents written by older versions, partial
//! documents and hand-edited imports are accepted as far as possible. Parts
//! that cannot be interpreted are left out and completed with defaults when
//! the state is merged. A `null` is read like a missing field, and an entry of
//! a list that cannot be read is skipped without affecting its siblings.
//! Numeric fields of stored workouts may be numbers or numeric strings.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use serde_json::{Map, Value};
use setbook_domain::{
    self as domain, Day, DayID, DayProgress, Exercise, ExerciseID, ExerciseProgress,
    ExerciseVolume, Program, QuickLog, SetEntry, SetLogEntry, State, StoredState, SwapCategory,
    SwapLibrary, Workout, WorkoutID, parse_number,
};

/// Upper bound for the number of sets of an exercise.
const SET_LIMIT: u32 = 100;

/// Decode a document.
///
/// Fails only if the text is not JSON. A JSON value other than an object is
/// treated as an empty document.
pub fn decode(text: &str) -> Result<StoredState, serde_json::Error> {
    let Value::Object(mut fields) = serde_json::from_str::<Value>(text)? else {
        debug!("document is not an object");
        return Ok(StoredState::default());
    };

    Ok(StoredState {
        program: fields.remove("program").and_then(decode_program),
        active_day_id: fields
            .remove("activeDayId")
            .and_then(|v| v.as_str().map(DayID::new)),
        workouts: fields.remove("workouts").and_then(decode_workouts),
        day_progress: fields.remove("dayProgress").and_then(decode_day_progress),
        quick_log: fields
            .remove("quickLog")
            .and_then(|v| serde_json::from_value::<QuickLogDocument>(v).ok())
            .map(QuickLog::from),
    })
}

/// Encode a state as indented JSON.
pub fn encode(state: &State) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&StateDocument::from(state))
}

fn decode_program(value: Value) -> Option<Program> {
    serde_json::from_value::<ProgramDocument>(value)
        .inspect_err(|err| debug!("ignoring invalid program: {err}"))
        .ok()
        .map(Program::from)
}

fn decode_workouts(value: Value) -> Option<Vec<Workout>> {
    let Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value::<WorkoutDocument>(item)
                    .inspect_err(|err| debug!("ignoring invalid workout: {err}"))
                    .ok()
            })
            .map(Workout::from)
            .collect(),
    )
}

fn decode_day_progress(value: Value) -> Option<DayProgress> {
    let Value::Object(days) = value else {
        return None;
    };
    Some(
        days.into_iter()
            .filter_map(|(day_id, exercises)| {
                let Value::Object(exercises) = exercises else {
                    return None;
                };
                let exercises = exercises
                    .into_iter()
                    .filter_map(|(exercise_id, progress)| {
                        serde_json::from_value::<ProgressDocument>(progress)
                            .ok()
                            .map(|p| (ExerciseID::new(&exercise_id), ExerciseProgress::from(p)))
                    })
                    .collect::<BTreeMap<_, _>>();
                Some((DayID::new(&day_id), exercises))
            })
            .collect(),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateDocument {
    program: ProgramDocument,
    active_day_id: String,
    workouts: Vec<WorkoutDocument>,
    day_progress: BTreeMap<String, BTreeMap<String, ProgressDocument>>,
    quick_log: QuickLogDocument,
}

impl From<&State> for StateDocument {
    fn from(value: &State) -> Self {
        Self {
            program: ProgramDocument::from(&value.program),
            active_day_id: value.active_day_id.to_string(),
            workouts: value.workouts.iter().map(WorkoutDocument::from).collect(),
            day_progress: value
                .day_progress
                .iter()
                .map(|(day_id, exercises)| {
                    (
                        day_id.to_string(),
                        exercises
                            .iter()
                            .map(|(id, p)| (id.to_string(), ProgressDocument::from(p)))
                            .collect(),
                    )
                })
                .collect(),
            quick_log: QuickLogDocument::from(&value.quick_log),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramDocument {
    #[serde(default = "default_version", deserialize_with = "lenient_version")]
    version: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    program_name: String,
    #[serde(deserialize_with = "lenient_list")]
    days: Vec<DayDocument>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    swap_library: Map<String, Value>,
}

fn default_version() -> u32 {
    1
}

impl From<ProgramDocument> for Program {
    fn from(value: ProgramDocument) -> Self {
        Program {
            version: value.version,
            name: value.program_name,
            days: value.days.into_iter().map(Day::from).collect(),
            swap_library: SwapLibrary(
                value
                    .swap_library
                    .into_iter()
                    .filter_map(|(muscle_group, options)| {
                        let Value::Array(options) = options else {
                            return None;
                        };
                        Some(SwapCategory {
                            muscle_group,
                            exercises: options
                                .into_iter()
                                .filter_map(|o| o.as_str().map(ToString::to_string))
                                .collect(),
                        })
                    })
                    .collect(),
            ),
        }
    }
}

impl From<&Program> for ProgramDocument {
    fn from(value: &Program) -> Self {
        Self {
            version: value.version,
            program_name: value.name.clone(),
            days: value.days.iter().map(DayDocument::from).collect(),
            swap_library: value
                .swap_library
                .0
                .iter()
                .map(|c| {
                    (
                        c.muscle_group.clone(),
                        Value::from(c.exercises.clone()),
                    )
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct DayDocument {
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    focus: String,
    #[serde(default, deserialize_with = "lenient_string")]
    warmup: String,
    #[serde(default, deserialize_with = "lenient_string")]
    finisher: String,
    #[serde(default, deserialize_with = "lenient_list")]
    exercises: Vec<ExerciseDocument>,
}

impl From<DayDocument> for Day {
    fn from(value: DayDocument) -> Self {
        Day {
            id: DayID::new(&value.id),
            label: value.label,
            name: value.name,
            focus: value.focus,
            warmup: value.warmup,
            finisher: value.finisher,
            exercises: value.exercises.into_iter().map(Exercise::from).collect(),
        }
    }
}

impl From<&Day> for DayDocument {
    fn from(value: &Day) -> Self {
        Self {
            id: value.id.to_string(),
            label: value.label.clone(),
            name: value.name.clone(),
            focus: value.focus.clone(),
            warmup: value.warmup.clone(),
            finisher: value.finisher.clone(),
            exercises: value.exercises.iter().map(ExerciseDocument::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseDocument {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    id: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    muscle: String,
    #[serde(default, deserialize_with = "lenient_string")]
    equipment: String,
    #[serde(default, deserialize_with = "lenient_set_count")]
    sets: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    reps: String,
    #[serde(default, deserialize_with = "lenient_string")]
    rest: String,
    #[serde(default, deserialize_with = "lenient_list")]
    steps: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    caution: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_cardio: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    video_url: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    search_query: Option<String>,
}

impl From<ExerciseDocument> for Exercise {
    fn from(value: ExerciseDocument) -> Self {
        Exercise {
            id: value.id.as_deref().map_or_else(
                || ExerciseID::from_name(&value.name),
                ExerciseID::new,
            ),
            search_query: value
                .search_query
                .unwrap_or_else(|| domain::search_query(&value.name)),
            name: value.name,
            muscle: value.muscle,
            equipment: value.equipment,
            sets: value.sets,
            reps: value.reps,
            rest: value.rest,
            steps: value.steps,
            caution: value.caution.filter(|c| !c.is_empty()),
            is_cardio: value.is_cardio,
            video_url: value.video_url.filter(|u| !u.is_empty()),
        }
    }
}

impl From<&Exercise> for ExerciseDocument {
    fn from(value: &Exercise) -> Self {
        Self {
            id: Some(value.id.to_string()),
            name: value.name.clone(),
            muscle: value.muscle.clone(),
            equipment: value.equipment.clone(),
            sets: value.sets,
            reps: value.reps.clone(),
            rest: value.rest.clone(),
            steps: value.steps.clone(),
            caution: value.caution.clone(),
            is_cardio: value.is_cardio,
            video_url: value.video_url.clone(),
            search_query: Some(value.search_query.clone()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutDocument {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(
        default,
        serialize_with = "serialize_date",
        deserialize_with = "lenient_date"
    )]
    date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_string")]
    day_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    day_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_percentage"
    )]
    completion: Option<u8>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    quick_log: QuickLogDocument,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_or_default"
    )]
    volume: Option<VolumeDocument>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount"
    )]
    total_reps: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount"
    )]
    tonnage: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    set_log: Vec<SetLogDocument>,
}

impl From<WorkoutDocument> for Workout {
    fn from(value: WorkoutDocument) -> Self {
        let (volume_reps, volume_tonnage, per_exercise) = value
            .volume
            .map(|v| (v.total_reps, v.tonnage, v.per_exercise))
            .unwrap_or_default();
        Workout {
            id: value
                .id
                .filter(|id| !id.is_empty())
                .map_or_else(WorkoutID::random, |id| WorkoutID::new(&id)),
            date: value.date.unwrap_or(DateTime::UNIX_EPOCH),
            day_id: DayID::new(&value.day_id),
            day_name: value.day_name,
            completion: value.completion,
            quick_log: QuickLog::from(value.quick_log),
            total_reps: volume_reps.or(value.total_reps),
            tonnage: volume_tonnage.or(value.tonnage),
            per_exercise: per_exercise
                .into_iter()
                .map(ExerciseVolume::from)
                .collect(),
            set_log: value.set_log.into_iter().map(SetLogEntry::from).collect(),
        }
    }
}

impl From<&Workout> for WorkoutDocument {
    fn from(value: &Workout) -> Self {
        let has_volume = value.total_reps.is_some()
            || value.tonnage.is_some()
            || !value.per_exercise.is_empty();
        Self {
            id: Some(value.id.to_string()),
            date: Some(value.date),
            day_id: value.day_id.to_string(),
            day_name: value.day_name.clone(),
            completion: value.completion,
            quick_log: QuickLogDocument::from(&value.quick_log),
            volume: has_volume.then(|| VolumeDocument {
                total_reps: value.total_reps,
                tonnage: value.tonnage,
                per_exercise: value
                    .per_exercise
                    .iter()
                    .map(ExerciseVolumeDocument::from)
                    .collect(),
            }),
            total_reps: value.total_reps,
            tonnage: value.tonnage,
            set_log: value.set_log.iter().map(SetLogDocument::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VolumeDocument {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount"
    )]
    total_reps: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_amount"
    )]
    tonnage: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    per_exercise: Vec<ExerciseVolumeDocument>,
}

#[derive(Serialize, Deserialize)]
struct ExerciseVolumeDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    reps: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    tonnage: u32,
}

impl From<ExerciseVolumeDocument> for ExerciseVolume {
    fn from(value: ExerciseVolumeDocument) -> Self {
        ExerciseVolume {
            id: ExerciseID::new(&value.id),
            name: value.name,
            reps: value.reps,
            tonnage: value.tonnage,
        }
    }
}

impl From<&ExerciseVolume> for ExerciseVolumeDocument {
    fn from(value: &ExerciseVolume) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            reps: value.reps,
            tonnage: value.tonnage,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SetLogDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_slots")]
    sets: Vec<Option<SetDocument>>,
}

impl From<SetLogDocument> for SetLogEntry {
    fn from(value: SetLogDocument) -> Self {
        SetLogEntry {
            id: ExerciseID::new(&value.id),
            name: value.name,
            sets: value
                .sets
                .into_iter()
                .map(|s| s.map(SetEntry::from).unwrap_or_default())
                .collect(),
        }
    }
}

impl From<&SetLogEntry> for SetLogDocument {
    fn from(value: &SetLogEntry) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            sets: value.sets.iter().map(|s| Some(SetDocument::from(s))).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ProgressDocument {
    #[serde(default, deserialize_with = "lenient_slots")]
    sets: Vec<Option<SetDocument>>,
}

impl From<ProgressDocument> for ExerciseProgress {
    fn from(value: ProgressDocument) -> Self {
        ExerciseProgress {
            sets: value
                .sets
                .into_iter()
                .map(|s| s.map(SetEntry::from).unwrap_or_default())
                .collect(),
        }
    }
}

impl From<&ExerciseProgress> for ProgressDocument {
    fn from(value: &ExerciseProgress) -> Self {
        Self {
            sets: value.sets.iter().map(|s| Some(SetDocument::from(s))).collect(),
        }
    }
}

/// A set, stored with the short keys `w` and `r`.
#[derive(Serialize, Deserialize)]
struct SetDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    w: String,
    #[serde(default, deserialize_with = "lenient_string")]
    r: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    done: bool,
}

impl From<SetDocument> for SetEntry {
    fn from(value: SetDocument) -> Self {
        SetEntry {
            weight: value.w,
            reps: value.r,
            done: value.done,
        }
    }
}

impl From<&SetEntry> for SetDocument {
    fn from(value: &SetEntry) -> Self {
        Self {
            w: value.weight.clone(),
            r: value.reps.clone(),
            done: value.done,
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
struct QuickLogDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    bw: String,
    #[serde(default, deserialize_with = "lenient_string")]
    steps: String,
    #[serde(default, deserialize_with = "lenient_string")]
    cardio: String,
    #[serde(default, deserialize_with = "lenient_string")]
    notes: String,
}

impl From<QuickLogDocument> for QuickLog {
    fn from(value: QuickLogDocument) -> Self {
        QuickLog {
            body_weight: value.bw,
            steps: value.steps,
            cardio: value.cardio,
            notes: value.notes,
        }
    }
}

impl From<&QuickLog> for QuickLogDocument {
    fn from(value: &QuickLog) -> Self {
        Self {
            bw: value.body_weight.clone(),
            steps: value.steps.clone(),
            cardio: value.cardio.clone(),
            notes: value.notes.clone(),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Read a list, skipping the items that cannot be read.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(vec![]);
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .inspect_err(|err| debug!("ignoring invalid list item: {err}"))
                .ok()
        })
        .collect())
}

/// Read a list whose items are addressed by position.
fn lenient_slots<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(vec![]);
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Read a date given as RFC 3339 text or as milliseconds since the epoch.
fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

#[allow(clippy::ref_option)]
fn serialize_date<S: Serializer>(
    date: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Some(lenient_string(deserializer)?).filter(|id| !id.is_empty()))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_number(&s),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(lenient_number(deserializer)?.map(|n| n.round().clamp(0., f64::from(u32::MAX)) as u32))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(lenient_amount(deserializer)?.unwrap_or_default())
}

fn lenient_set_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(lenient_count(deserializer)?.min(SET_LIMIT))
}

fn lenient_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(lenient_amount(deserializer)?.unwrap_or_else(default_version))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_percentage<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u8>, D::Error> {
    Ok(lenient_number(deserializer)?.map(|n| n.round().clamp(0., 100.) as u8))
}
