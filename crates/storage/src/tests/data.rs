use std::{collections::BTreeMap, sync::LazyLock};

use chrono::{TimeZone, Utc};
use setbook_domain as domain;

pub static PROGRAM: LazyLock<domain::Program> = LazyLock::new(|| domain::Program {
    version: 1,
    name: "Push only".to_string(),
    days: vec![domain::Day {
        id: domain::DayID::new("p1"),
        label: "Day 1".to_string(),
        name: "Push".to_string(),
        focus: "Chest".to_string(),
        warmup: "Walk".to_string(),
        finisher: "None".to_string(),
        exercises: vec![
            domain::Exercise::new(
                "Chest dips",
                "Chest/Triceps",
                "Dip station",
                domain::Scheme {
                    sets: 3,
                    reps: "6–12",
                    rest: "90s",
                },
                &["Lean forward."],
            )
            .with_caution("Shoulders: avoid excessive depth."),
            domain::Exercise {
                video_url: Some("https://youtu.be/walk".to_string()),
                ..domain::Exercise::new(
                    "Incline treadmill walk",
                    "Cardio",
                    "Treadmill",
                    domain::Scheme {
                        sets: 1,
                        reps: "10–15 min",
                        rest: "—",
                    },
                    &[],
                )
                .cardio()
            },
        ],
    }],
    swap_library: domain::SwapLibrary(vec![
        domain::SwapCategory {
            muscle_group: "Chest".to_string(),
            exercises: vec!["Pec deck".to_string(), "Dumbbell bench press".to_string()],
        },
        domain::SwapCategory {
            muscle_group: "Triceps".to_string(),
            exercises: vec!["Close-grip bench press".to_string()],
        },
    ]),
});

pub static SETS: LazyLock<Vec<domain::SetEntry>> = LazyLock::new(|| {
    vec![
        domain::SetEntry {
            weight: String::new(),
            reps: "8".to_string(),
            done: true,
        },
        domain::SetEntry {
            weight: "100".to_string(),
            reps: "8".to_string(),
            done: true,
        },
    ]
});

pub static QUICK_LOG: LazyLock<domain::QuickLog> = LazyLock::new(|| domain::QuickLog {
    body_weight: "181.4".to_string(),
    steps: "9500".to_string(),
    cardio: "15".to_string(),
    notes: "Felt strong".to_string(),
});

pub static WORKOUT: LazyLock<domain::Workout> = LazyLock::new(|| domain::Workout {
    id: domain::WorkoutID::new("w1"),
    date: Utc.with_ymd_and_hms(2024, 3, 8, 17, 30, 0).unwrap(),
    day_id: domain::DayID::new("p1"),
    day_name: "Push".to_string(),
    completion: Some(34),
    quick_log: QUICK_LOG.clone(),
    total_reps: Some(16),
    tonnage: Some(800),
    per_exercise: vec![
        domain::ExerciseVolume {
            id: domain::ExerciseID::new("chest-dips"),
            name: "Chest dips".to_string(),
            reps: 16,
            tonnage: 800,
        },
        domain::ExerciseVolume {
            id: domain::ExerciseID::new("incline-treadmill-walk"),
            name: "Incline treadmill walk".to_string(),
            reps: 0,
            tonnage: 0,
        },
    ],
    set_log: vec![
        domain::SetLogEntry {
            id: domain::ExerciseID::new("chest-dips"),
            name: "Chest dips".to_string(),
            sets: SETS.clone(),
        },
        domain::SetLogEntry {
            id: domain::ExerciseID::new("incline-treadmill-walk"),
            name: "Incline treadmill walk".to_string(),
            sets: vec![],
        },
    ],
});

pub static STATE: LazyLock<domain::State> = LazyLock::new(|| domain::State {
    program: PROGRAM.clone(),
    active_day_id: domain::DayID::new("p1"),
    workouts: vec![WORKOUT.clone()],
    day_progress: domain::DayProgress::from([(
        domain::DayID::new("p1"),
        BTreeMap::from([(
            domain::ExerciseID::new("chest-dips"),
            domain::ExerciseProgress { sets: SETS.clone() },
        )]),
    )]),
    quick_log: QUICK_LOG.clone(),
});

pub const FULL_DOCUMENT: &str = r#"{
  "program": {
    "version": 1,
    "programName": "Push only",
    "days": [
      {
        "id": "p1",
        "label": "Day 1",
        "name": "Push",
        "focus": "Chest",
        "warmup": "Walk",
        "finisher": "None",
        "exercises": [
          {
            "id": "chest-dips",
            "name": "Chest dips",
            "muscle": "Chest/Triceps",
            "equipment": "Dip station",
            "sets": 3,
            "reps": "6–12",
            "rest": "90s",
            "steps": ["Lean forward."],
            "caution": "Shoulders: avoid excessive depth.",
            "isCardio": false,
            "searchQuery": "Chest%20dips%20proper%20form"
          },
          {
            "id": "incline-treadmill-walk",
            "name": "Incline treadmill walk",
            "muscle": "Cardio",
            "equipment": "Treadmill",
            "sets": 1,
            "reps": "10–15 min",
            "rest": "—",
            "steps": [],
            "isCardio": true,
            "videoUrl": "https://youtu.be/walk",
            "searchQuery": "Incline%20treadmill%20walk%20proper%20form"
          }
        ]
      }
    ],
    "swapLibrary": {
      "Chest": ["Pec deck", "Dumbbell bench press"],
      "Triceps": ["Close-grip bench press"]
    }
  },
  "activeDayId": "p1",
  "workouts": [
    {
      "id": "w1",
      "date": "2024-03-08T17:30:00.000Z",
      "dayId": "p1",
      "dayName": "Push",
      "completion": 34,
      "quickLog": { "bw": "181.4", "steps": "9500", "cardio": "15", "notes": "Felt strong" },
      "volume": {
        "totalReps": 16,
        "tonnage": 800,
        "perExercise": [
          { "id": "chest-dips", "name": "Chest dips", "reps": 16, "tonnage": 800 },
          { "id": "incline-treadmill-walk", "name": "Incline treadmill walk", "reps": 0, "tonnage": 0 }
        ]
      },
      "totalReps": 16,
      "tonnage": 800,
      "setLog": [
        {
          "id": "chest-dips",
          "name": "Chest dips",
          "sets": [
            { "w": "", "r": "8", "done": true },
            { "w": "100", "r": "8", "done": true }
          ]
        },
        { "id": "incline-treadmill-walk", "name": "Incline treadmill walk", "sets": [] }
      ]
    }
  ],
  "dayProgress": {
    "p1": {
      "chest-dips": {
        "sets": [
          { "w": "", "r": "8", "done": true },
          { "w": "100", "r": "8", "done": true }
        ]
      }
    }
  },
  "quickLog": { "bw": "181.4", "steps": "9500", "cardio": "15", "notes": "Felt strong" }
}"#;

pub static LEGACY_WORKOUT: LazyLock<domain::Workout> = LazyLock::new(|| domain::Workout {
    id: domain::WorkoutID::new("1709919000000"),
    date: Utc.with_ymd_and_hms(2024, 3, 8, 17, 30, 0).unwrap(),
    day_id: domain::DayID::new("d1"),
    day_name: "Chest & Triceps".to_string(),
    completion: Some(75),
    quick_log: domain::QuickLog {
        body_weight: "182".to_string(),
        steps: String::new(),
        cardio: "20".to_string(),
        notes: String::new(),
    },
    total_reps: Some(96),
    tonnage: Some(5400),
    per_exercise: vec![],
    set_log: vec![],
});

/// A document of an early version: no program, no nested volume, holes in the
/// recorded sets and some unusable parts.
pub const LEGACY_DOCUMENT: &str = r#"{
  "activeDayId": "d4",
  "workouts": [
    {
      "id": "1709919000000",
      "date": "2024-03-08T17:30:00.000Z",
      "dayId": "d1",
      "dayName": "Chest & Triceps",
      "completion": 75,
      "quickLog": { "bw": "182", "steps": "", "cardio": "20", "notes": "" },
      "totalReps": "96",
      "tonnage": 5400
    }
  ],
  "dayProgress": {
    "d1": { "chest-dips": { "sets": [null, { "r": "12", "done": true }] } },
    "d2": "broken"
  },
  "quickLog": 42
}"#;
