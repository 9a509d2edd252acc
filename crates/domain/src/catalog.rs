//! The built-in training program.

use std::sync::LazyLock;

use crate::{Day, DayID, Exercise, Program, Scheme, SwapCategory, SwapLibrary};

/// Cues given to an exercise that replaced a catalog exercise.
pub const GENERIC_STEPS: [&str; 3] = [
    "Use controlled reps and full range of motion.",
    "Keep core braced and avoid swinging.",
    "Stop 1–2 reps before form breaks.",
];

pub static DEFAULT_PROGRAM: LazyLock<Program> = LazyLock::new(|| Program {
    version: 1,
    name: "Lean 5-Day (EoS-friendly)".to_string(),
    days: days(),
    swap_library: swap_library(),
});

const fn scheme(sets: u32, reps: &'static str, rest: &'static str) -> Scheme {
    Scheme { sets, reps, rest }
}

fn category(muscle_group: &str, exercises: &[&str]) -> SwapCategory {
    SwapCategory {
        muscle_group: muscle_group.to_string(),
        exercises: exercises.iter().map(ToString::to_string).collect(),
    }
}

fn swap_library() -> SwapLibrary {
    SwapLibrary(vec![
        category(
            "Chest",
            &[
                "Dumbbell bench press",
                "Incline dumbbell press",
                "Cable fly (standing)",
                "Pec deck",
            ],
        ),
        category(
            "Triceps",
            &[
                "Skull crushers (EZ-bar)",
                "Cable single-arm pushdown",
                "Close-grip bench press",
            ],
        ),
        category(
            "Back",
            &[
                "Chest-supported row",
                "Assisted pull-up",
                "Straight-arm pulldown",
                "Dumbbell row",
            ],
        ),
        category("Biceps", &["Cable curl (bar)", "Hammer curls", "Spider curls"]),
        category(
            "Legs",
            &[
                "Hack squat",
                "Bulgarian split squat",
                "Walking lunges",
                "Leg curl (seated/lying)",
            ],
        ),
        category("Shoulders", &["Dumbbell shoulder press", "Machine shoulder press", "Face pulls"]),
    ])
}

#[allow(clippy::too_many_lines)]
fn days() -> Vec<Day> {
    vec![
        Day {
            id: DayID::new("d1"),
            label: "Day 1".to_string(),
            name: "Chest & Triceps".to_string(),
            focus: "Heavy push + triceps + core".to_string(),
            warmup: "5–7 min incline walk + 2 lighter bench ramp sets".to_string(),
            finisher: "Optional: 10–15 min incline treadmill (easy–moderate)".to_string(),
            exercises: vec![
                Exercise::new(
                    "Horizontal barbell bench press",
                    "Chest",
                    "Barbell/bench",
                    scheme(4, "6–8", "120–180s"),
                    &[
                        "Feet planted, shoulder blades squeezed back, slight arch.",
                        "Lower to mid-chest with control; press up and back.",
                        "Stop 1–2 reps before failure unless spotting.",
                    ],
                ),
                Exercise::new(
                    "Incline barbell bench press",
                    "Upper chest",
                    "Barbell/bench",
                    scheme(3, "8–10", "120s"),
                    &[
                        "Incline ~30° (not too steep).",
                        "Elbows ~45° from torso; controlled touch; drive up.",
                    ],
                ),
                Exercise::new(
                    "Single-arm chest fly on the machine",
                    "Chest",
                    "Machine",
                    scheme(3, "10–12", "60–90s"),
                    &[
                        "Soft elbow bend; big stretch; squeeze across midline.",
                        "Keep shoulders down; avoid shrugging.",
                    ],
                ),
                Exercise::new(
                    "Decline machine chest press",
                    "Lower chest",
                    "Machine",
                    scheme(3, "10–12", "90s"),
                    &[
                        "Set seat so handles line up mid-chest.",
                        "Control down; press without locking shoulders forward.",
                    ],
                ),
                Exercise::new(
                    "Chest dips",
                    "Chest/Triceps",
                    "Dip station",
                    scheme(3, "6–12 (AMRAP)", "90s"),
                    &[
                        "Lean slightly forward for chest emphasis.",
                        "Stop if you feel shoulder pinching; keep reps smooth.",
                    ],
                )
                .with_caution("Shoulders: avoid excessive depth."),
                Exercise::new(
                    "Triceps pushdown (rope attachment)",
                    "Triceps",
                    "Cable",
                    scheme(3, "10–15", "60–75s"),
                    &[
                        "Elbows pinned; spread rope at bottom; full extension.",
                        "No body swing.",
                    ],
                ),
                Exercise::new(
                    "Cable rope overhead triceps extension",
                    "Triceps (long head)",
                    "Cable",
                    scheme(3, "12–15", "60–75s"),
                    &[
                        "Ribs down; elbows point forward; stretch behind head.",
                        "Finish with full extension without flaring elbows.",
                    ],
                ),
                Exercise::new(
                    "Abdominal crunch (machine assisted)",
                    "Abs",
                    "Machine",
                    scheme(3, "12–20", "45–60s"),
                    &[
                        "Exhale hard at the top; slow on the way down.",
                        "Avoid pulling with arms/neck.",
                    ],
                ),
            ],
        },
        Day {
            id: DayID::new("d2"),
            label: "Day 2".to_string(),
            name: "Back & Biceps".to_string(),
            focus: "Pull thickness + lats + biceps + core".to_string(),
            warmup: "5 min rower + 1–2 light warm-up sets on pulldown".to_string(),
            finisher: "Optional: 10 min easy bike or incline walk".to_string(),
            exercises: vec![
                Exercise::new(
                    "Deadlift",
                    "Posterior chain",
                    "Barbell",
                    scheme(3, "3–5", "180s"),
                    &[
                        "Brace hard before lifting; bar stays close.",
                        "Push the floor away; lockout with glutes, not lean-back.",
                        "If fatigue is high, swap to Romanian deadlift.",
                    ],
                )
                .with_caution("Use great form. Stop sets if your back rounds."),
                Exercise::new(
                    "Wide grip lat pulldown",
                    "Lats",
                    "Machine/cable",
                    scheme(4, "8–12", "90s"),
                    &[
                        "Pull elbows down to your pockets; chest proud.",
                        "Control the stretch; no swinging.",
                    ],
                ),
                Exercise::new(
                    "Single-arm cable row",
                    "Mid-back",
                    "Cable",
                    scheme(3, "10–12/side", "60–90s"),
                    &[
                        "Rotate slightly; pull elbow toward hip; pause/squeeze.",
                        "Keep shoulders down; avoid shrugging.",
                    ],
                ),
                Exercise::new(
                    "Reverse wide grip seated cable row",
                    "Upper back",
                    "Cable",
                    scheme(3, "10–12", "75–90s"),
                    &[
                        "Wide overhand grip; pull to upper abs.",
                        "Keep torso stable; squeeze shoulder blades.",
                    ],
                ),
                Exercise::new(
                    "Bent over two arm T-bar row",
                    "Back thickness",
                    "T-bar",
                    scheme(3, "8–10", "120s"),
                    &[
                        "Hips back, torso ~45°; pull to lower chest/upper abs.",
                        "No jerking; control eccentric.",
                    ],
                ),
                Exercise::new(
                    "Barbell curl",
                    "Biceps",
                    "Barbell",
                    scheme(3, "8–12", "60–90s"),
                    &[
                        "Elbows stay near ribs; full range; no sway.",
                        "Slow lower; big squeeze.",
                    ],
                ),
                Exercise::new(
                    "Incline dumbbell twist curl",
                    "Biceps",
                    "Dumbbells/bench",
                    scheme(3, "10–12", "60–75s"),
                    &[
                        "Start neutral; supinate as you curl; keep shoulders back.",
                        "Control the stretch at the bottom.",
                    ],
                ),
                Exercise::new(
                    "Elbow plank",
                    "Core",
                    "Mat",
                    scheme(3, "40–60s", "45–60s"),
                    &[
                        "Ribs down; squeeze glutes; push forearms into floor.",
                        "Stop when form breaks.",
                    ],
                ),
            ],
        },
        Day {
            id: DayID::new("d3"),
            label: "Day 3".to_string(),
            name: "Full Body / Abs".to_string(),
            focus: "Arms + core + one lower + one push (pump + burn)".to_string(),
            warmup: "5–7 min incline walk + shoulder/hip mobility".to_string(),
            finisher: "10–15 min steady cardio (Zone 2)".to_string(),
            exercises: vec![
                Exercise::new(
                    "Seated leg press",
                    "Quads/Glutes",
                    "Machine",
                    scheme(3, "12–15", "90s"),
                    &[
                        "Feet shoulder-width; control depth; no butt lift.",
                        "Drive through mid-foot; don’t lock knees hard.",
                    ],
                ),
                Exercise::new(
                    "Romanian deadlift",
                    "Hamstrings/Glutes",
                    "Barbell",
                    scheme(3, "8–10", "120s"),
                    &[
                        "Soft knees; hips back; feel hamstring stretch.",
                        "Bar stays close; neutral spine.",
                    ],
                ),
                Exercise::new(
                    "Hammer strength seated dips",
                    "Triceps/Chest",
                    "Machine",
                    scheme(3, "8–12", "90s"),
                    &[
                        "Shoulders down; elbows track; full lockout.",
                        "Control down; don’t bounce.",
                    ],
                ),
                Exercise::new(
                    "EZ-bar preacher curl",
                    "Biceps",
                    "EZ-bar/preacher",
                    scheme(3, "10–12", "60–75s"),
                    &[
                        "Slow eccentric; stop 1 rep before losing form.",
                        "Keep upper arm planted.",
                    ],
                ),
                Exercise::new(
                    "Inside grip rope curl",
                    "Biceps",
                    "Cable",
                    scheme(3, "12–15", "60s"),
                    &[
                        "Elbows slightly forward; curl to forehead height; squeeze.",
                        "Keep tension; no swinging.",
                    ],
                ),
                Exercise::new(
                    "EZ-Bar overhead inside-grip tricep extension",
                    "Triceps",
                    "EZ-bar",
                    scheme(3, "10–12", "75s"),
                    &[
                        "Elbows in; deep stretch; extend fully.",
                        "Ribs down; avoid flaring elbows.",
                    ],
                ),
                Exercise::new(
                    "Crunches with legs on an exercise ball",
                    "Abs",
                    "Ball",
                    scheme(3, "15–20", "45–60s"),
                    &[
                        "Exhale at the top; slow down; keep neck neutral.",
                        "Small range but hard squeeze.",
                    ],
                ),
                Exercise::new(
                    "Incline treadmill walk (finisher)",
                    "Cardio",
                    "Treadmill",
                    scheme(1, "10–15 min", "—"),
                    &[
                        "Incline 8–12%, easy pace, nose breathing if possible.",
                        "Goal: steady sweat without gasping.",
                    ],
                )
                .cardio(),
            ],
        },
        Day {
            id: DayID::new("d4"),
            label: "Day 4".to_string(),
            name: "Shoulders & Arms".to_string(),
            focus: "Delts + traps + arm pump".to_string(),
            warmup: "5 min bike + band pull-aparts + light lateral raises".to_string(),
            finisher: "Optional: 8–12 min easy cardio".to_string(),
            exercises: vec![
                Exercise::new(
                    "Standing military press",
                    "Shoulders",
                    "Barbell",
                    scheme(4, "6–8", "120–150s"),
                    &[
                        "Squeeze glutes; ribs down; press straight up.",
                        "Head moves slightly back then through at top.",
                    ],
                ),
                Exercise::new(
                    "Seated barbell shoulder press",
                    "Shoulders",
                    "Barbell/bench",
                    scheme(3, "8–10", "120s"),
                    &[
                        "Set bench upright-ish; don’t overarch.",
                        "Stop 1–2 reps before failure; keep bar path vertical.",
                    ],
                ),
                Exercise::new(
                    "Standing dumbbell lateral raises",
                    "Side delts",
                    "Dumbbells",
                    scheme(3, "12–15", "60–75s"),
                    &[
                        "Lead with elbows; slight forward lean; stop at shoulder height.",
                        "Control down; no swinging.",
                    ],
                ),
                Exercise::new(
                    "Cable front raise",
                    "Front delts",
                    "Cable",
                    scheme(2, "12–15", "60s"),
                    &[
                        "Raise to eye level; ribs down; no momentum.",
                        "Keep shoulder packed (down/back).",
                    ],
                ),
                Exercise::new(
                    "Bent-over dumbbell lateral raise (parallel grip)",
                    "Rear delts",
                    "Dumbbells",
                    scheme(3, "12–15", "60–75s"),
                    &[
                        "Hips back; neutral spine; sweep elbows out.",
                        "Pause at top; slow lower.",
                    ],
                ),
                Exercise::new(
                    "Crossed-cable rear delt fly",
                    "Rear delts",
                    "Cable",
                    scheme(3, "12–15", "60–75s"),
                    &[
                        "Cross handles; slight lean forward; pull wide with soft elbows.",
                        "Don’t shrug; squeeze rear delts.",
                    ],
                ),
                Exercise::new(
                    "Front barbell shrugs",
                    "Traps",
                    "Barbell",
                    scheme(3, "10–12", "75–90s"),
                    &[
                        "Shoulders straight up; 1-sec hold at top.",
                        "No rolling; keep neck neutral.",
                    ],
                ),
                Exercise::new(
                    "Barbell upright row",
                    "Delts/Traps",
                    "Barbell",
                    scheme(2, "10–12", "75s"),
                    &[
                        "Hands just outside hips; pull elbows up/out to mid-chest.",
                        "Stop if you feel shoulder pinching.",
                    ],
                )
                .with_caution("Some people don’t tolerate upright rows — swap if needed."),
            ],
        },
        Day {
            id: DayID::new("d5"),
            label: "Day 5".to_string(),
            name: "Legs".to_string(),
            focus: "Squat pattern + posterior chain + calves".to_string(),
            warmup: "5–7 min bike + hip openers + 2 squat ramp sets".to_string(),
            finisher: "Optional: 10 min incline walk (easy)".to_string(),
            exercises: vec![
                Exercise::new(
                    "Barbell squats",
                    "Quads/Glutes",
                    "Barbell",
                    scheme(4, "6–8", "150–180s"),
                    &[
                        "Brace; sit between hips; knees track toes.",
                        "Depth: as low as you can without losing back position.",
                    ],
                )
                .with_caution("Use safeties/spotter if heavy."),
                Exercise::new(
                    "Romanian deadlift",
                    "Hamstrings/Glutes",
                    "Barbell",
                    scheme(3, "8–10", "120s"),
                    &[
                        "Soft knees; hips back; bar close; big stretch.",
                        "Stop just below kneecap if mobility limited.",
                    ],
                ),
                Exercise::new(
                    "Seated leg press",
                    "Quads/Glutes",
                    "Machine",
                    scheme(4, "10–12", "90–120s"),
                    &[
                        "Control depth; don’t lock knees; drive through mid-foot.",
                    ],
                ),
                Exercise::new(
                    "Seated leg extensions",
                    "Quads",
                    "Machine",
                    scheme(3, "12–15", "60–75s"),
                    &[
                        "Pause at top; slow down; don’t slam the stack.",
                    ],
                ),
                Exercise::new(
                    "Standing bent-over hamstring curl",
                    "Hamstrings",
                    "Machine",
                    scheme(3, "12–15", "60–75s"),
                    &[
                        "Hips square; squeeze hard at top; slow lower.",
                    ],
                ),
                Exercise::new(
                    "Seated calf raises",
                    "Calves (soleus)",
                    "Machine",
                    scheme(4, "12–20", "45–60s"),
                    &[
                        "Full stretch at bottom; big squeeze at top (1 sec).",
                    ],
                ),
                Exercise::new(
                    "Machine calf raises",
                    "Calves (gastrocnemius)",
                    "Machine",
                    scheme(3, "10–15", "45–60s"),
                    &[
                        "Full range; don’t bounce; control the bottom stretch.",
                    ],
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_program_days() {
        assert_eq!(
            DEFAULT_PROGRAM
                .days
                .iter()
                .map(|d| (d.id.as_str(), d.exercises.len()))
                .collect::<Vec<_>>(),
            vec![("d1", 8), ("d2", 8), ("d3", 8), ("d4", 8), ("d5", 7)]
        );
    }

    #[test]
    fn test_default_program_exercise_ids_unique_within_day() {
        for day in &DEFAULT_PROGRAM.days {
            let ids = day.exercises.iter().map(|e| &e.id).collect::<BTreeSet<_>>();
            assert_eq!(ids.len(), day.exercises.len(), "duplicate ID in {}", day.id);
        }
    }

    #[test]
    fn test_default_program_exercise() {
        let dips = &DEFAULT_PROGRAM.days[0].exercises[4];
        assert_eq!(dips.id.as_str(), "chest-dips");
        assert_eq!(dips.sets, 3);
        assert_eq!(dips.reps, "6–12 (AMRAP)");
        assert_eq!(dips.rest, "90s");
        assert_eq!(
            dips.caution.as_deref(),
            Some("Shoulders: avoid excessive depth.")
        );
        assert_eq!(dips.search_query, "Chest%20dips%20proper%20form");
        assert!(!dips.is_cardio);
        assert!(DEFAULT_PROGRAM.days[2].exercises[7].is_cardio);
    }

    #[test]
    fn test_default_swap_library() {
        assert_eq!(
            DEFAULT_PROGRAM
                .swap_library
                .0
                .iter()
                .map(|c| c.muscle_group.as_str())
                .collect::<Vec<_>>(),
            vec!["Chest", "Triceps", "Back", "Biceps", "Legs", "Shoulders"]
        );
        assert_eq!(DEFAULT_PROGRAM.swap_library.all_options().count(), 21);
    }
}
