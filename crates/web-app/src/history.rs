use chrono::TimeZone;
use setbook_domain::{Metric, Workout, avg, chronological, date_label, date_labels, series};
use strum::IntoEnumIterator;

use crate::{
    Settings,
    chart::{self, ValueFormat},
};

/// The progress page: totals, averages and one chart per metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub workouts: String,
    pub last: String,
    pub summary: String,
    pub charts: Vec<MetricChart>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricChart {
    pub metric: Metric,
    pub title: &'static str,
    pub hint: &'static str,
    /// Date labels and values, oldest first.
    pub data: Vec<(String, Option<f64>)>,
}

impl MetricChart {
    pub fn svg(&self, settings: &Settings, dpr: f64) -> Result<String, Box<dyn std::error::Error>> {
        chart::plot(
            &self.data,
            chart::metric_style(self.metric),
            settings.current_theme(),
            dpr,
        )
    }
}

#[must_use]
pub fn title(metric: Metric) -> &'static str {
    match metric {
        Metric::BodyWeight => "Bodyweight (lb)",
        Metric::Completion => "Completion",
        Metric::Cardio => "Cardio minutes",
        Metric::Steps => "Steps",
        Metric::Reps => "Total reps",
        Metric::Tonnage => "Tonnage",
    }
}

fn hint(metric: Metric, has_data: bool) -> &'static str {
    match (metric, has_data) {
        (Metric::BodyWeight, true) => "Goal: ~0.5–1.0 lb/week loss for a lean cut.",
        (Metric::BodyWeight, false) => "No BW entries yet.",
        (Metric::Completion, true) => "Higher completion + consistency = faster progress.",
        (Metric::Completion, false) => "No completion data yet.",
        (Metric::Cardio, true) => "2–4 cardio sessions/week is a great start.",
        (Metric::Cardio, false) => "No cardio entries yet.",
        (Metric::Steps, true) => "Steps drive fat loss when consistent.",
        (Metric::Steps, false) => "No steps entries yet.",
        (Metric::Reps, true) => "More reps (with good form) usually = more total work.",
        (Metric::Reps, false) => "No rep volume saved yet.",
        (Metric::Tonnage, true) => "Tonnage rises as weights & reps improve.",
        (Metric::Tonnage, false) => "No tonnage saved yet.",
    }
}

fn empty_hint(metric: Metric) -> &'static str {
    match metric {
        Metric::BodyWeight => "Add bodyweight in Quick log → BW, then Finish & save.",
        Metric::Completion => "Completion is based on checked sets.",
        Metric::Cardio => "Add cardio minutes in Quick log → Cardio, then Finish & save.",
        Metric::Steps => "Add steps in Quick log → Steps, then Finish & save.",
        Metric::Reps => "Reps are summed from your tracked sets (best if you check Done).",
        Metric::Tonnage => "Tonnage = weight × reps (only when weight is entered).",
    }
}

#[must_use]
pub fn progress_view<Tz: TimeZone>(workouts: &[Workout], tz: &Tz) -> ProgressView
where
    Tz::Offset: std::fmt::Display,
{
    let workouts = chronological(workouts);

    let Some(last) = workouts.last() else {
        return ProgressView {
            workouts: "Workouts: 0".to_string(),
            last: "Last: —".to_string(),
            summary: "No saved workouts yet. Do a workout → Finish & save.".to_string(),
            charts: Metric::iter()
                .map(|metric| MetricChart {
                    metric,
                    title: title(metric),
                    hint: empty_hint(metric),
                    data: vec![("—".to_string(), None)],
                })
                .collect(),
        };
    };

    let labels = date_labels(&workouts, tz);
    let charts = Metric::iter()
        .map(|metric| {
            let values = series(&workouts, metric);
            MetricChart {
                metric,
                title: title(metric),
                hint: hint(metric, avg(&values).is_some()),
                data: labels.iter().cloned().zip(values).collect(),
            }
        })
        .collect::<Vec<_>>();

    ProgressView {
        workouts: format!("Workouts: {}", workouts.len()),
        last: format!("Last: {} • {}", date_label(last.date, tz), last.day_name),
        summary: summary(&workouts),
        charts,
    }
}

fn summary(workouts: &[&Workout]) -> String {
    let average = |metric| avg(&series(workouts, metric));
    let mut parts = vec![];
    if let Some(body_weight) = average(Metric::BodyWeight) {
        parts.push(format!("Avg BW: {body_weight:.1} lb"));
    }
    if let Some(completion) = average(Metric::Completion) {
        parts.push(format!(
            "Avg completion: {}",
            ValueFormat::Percent.format(completion)
        ));
    }
    if let Some(reps) = average(Metric::Reps) {
        parts.push(format!("Avg reps: {}", ValueFormat::Integer.format(reps)));
    }
    if let Some(tonnage) = average(Metric::Tonnage) {
        parts.push(format!(
            "Avg tonnage: {}",
            ValueFormat::Compact.format(tonnage)
        ));
    }
    if parts.is_empty() {
        "Progress loaded".to_string()
    } else {
        parts.join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use setbook_domain::{DayID, QuickLog, WorkoutID};

    use super::*;
    use crate::Theme;

    fn workout(id: &str, date: DateTime<Utc>, body_weight: &str, tonnage: Option<u32>) -> Workout {
        Workout {
            id: WorkoutID::new(id),
            date,
            day_id: DayID::new("d1"),
            day_name: format!("Day {id}"),
            completion: Some(80),
            quick_log: QuickLog {
                body_weight: body_weight.to_string(),
                ..QuickLog::default()
            },
            total_reps: tonnage.map(|_| 100),
            tonnage,
            per_exercise: vec![],
            set_log: vec![],
        }
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 8, 17, 30, 0).unwrap()
    }

    #[test]
    fn test_progress_view_empty() {
        let view = progress_view(&[], &Utc);
        assert_eq!(view.workouts, "Workouts: 0");
        assert_eq!(view.last, "Last: —");
        assert_eq!(
            view.summary,
            "No saved workouts yet. Do a workout → Finish & save."
        );
        assert_eq!(view.charts.len(), 6);
        assert_eq!(
            view.charts[0].hint,
            "Add bodyweight in Quick log → BW, then Finish & save."
        );
        assert!(
            view.charts
                .iter()
                .all(|c| c.data == vec![("—".to_string(), None)])
        );
    }

    #[test]
    fn test_progress_view() {
        // newest first, as stored
        let workouts = vec![
            workout("3", date() + Duration::days(2), "180", Some(12_000)),
            workout("2", date() + Duration::days(1), "", None),
            workout("1", date(), "181", Some(10_000)),
        ];
        let view = progress_view(&workouts, &Utc);

        assert_eq!(view.workouts, "Workouts: 3");
        assert_eq!(view.last, "Last: Mar 10 • Day 3");
        assert_eq!(
            view.summary,
            "Avg BW: 180.5 lb • Avg completion: 80% • Avg reps: 100 • Avg tonnage: 11.0k"
        );
        assert_eq!(
            view.charts.iter().map(|c| c.metric).collect::<Vec<_>>(),
            Metric::iter().collect::<Vec<_>>()
        );

        let body_weight = &view.charts[0];
        assert_eq!(body_weight.hint, "Goal: ~0.5–1.0 lb/week loss for a lean cut.");
        assert_eq!(
            body_weight.data,
            vec![
                ("Mar 8".to_string(), Some(181.)),
                ("Mar 9".to_string(), None),
                ("Mar 10".to_string(), Some(180.)),
            ]
        );

        let steps = view.charts.iter().find(|c| c.metric == Metric::Steps).unwrap();
        assert_eq!(steps.hint, "No steps entries yet.");
    }

    #[test]
    fn test_summary_without_data() {
        let mut workout = workout("1", date(), "", None);
        workout.completion = None;
        assert_eq!(summary(&[&workout]), "Progress loaded");
    }

    #[test]
    fn test_chart_svg() {
        let view = progress_view(
            &[
                workout("2", date() + Duration::days(1), "180", None),
                workout("1", date(), "181", None),
            ],
            &Utc,
        );
        let settings = Settings {
            theme: Theme::Dark,
            ..Settings::default()
        };
        let svg = view.charts[0].svg(&settings, 1.).unwrap();
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("#A9B4C6"));
        let svg = view.charts[5].svg(&Settings::default(), 1.).unwrap();
        assert!(svg.contains(chart::PLACEHOLDER));
    }
}
