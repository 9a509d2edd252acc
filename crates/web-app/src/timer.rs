use chrono::{DateTime, Duration, Utc};

/// Rest durations offered for selection, in seconds.
pub const PRESETS: [u32; 3] = [60, 90, 120];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Running,
    Finished,
}

/// A countdown derived from a wall-clock target time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestTimer {
    remaining_seconds: i64,
    target_time: Option<DateTime<Utc>>,
}

impl RestTimer {
    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target_time.is_some()
    }

    /// Start a new countdown, replacing any running one.
    pub fn start(&mut self, seconds: u32, now: DateTime<Utc>) {
        self.remaining_seconds = i64::from(seconds);
        self.target_time = Some(now + Duration::seconds(self.remaining_seconds));
    }

    pub fn stop(&mut self) {
        self.remaining_seconds = 0;
        self.target_time = None;
    }

    pub fn update(&mut self, now: DateTime<Utc>) -> Tick {
        let Some(target_time) = self.target_time else {
            return Tick::Idle;
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let remaining_seconds = (target_time.signed_duration_since(now).num_milliseconds() as f64
            / 1000.)
            .round() as i64;
        if remaining_seconds <= 0 {
            self.stop();
            Tick::Finished
        } else {
            self.remaining_seconds = remaining_seconds;
            Tick::Running
        }
    }

    /// The remaining time as `mm:ss`.
    #[must_use]
    pub fn display(&self) -> String {
        let seconds = self.remaining_seconds.max(0);
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 8, 17, 30, 0).unwrap()
    }

    #[rstest]
    #[case::zero(0, "00:00")]
    #[case::seconds(9, "00:09")]
    #[case::minute(60, "01:00")]
    #[case::minutes(125, "02:05")]
    fn test_display(#[case] seconds: u32, #[case] expected: &str) {
        let mut timer = RestTimer::default();
        timer.start(seconds, now());
        assert_eq!(timer.display(), expected);
    }

    #[test]
    fn test_countdown() {
        let mut timer = RestTimer::default();
        assert_eq!(timer.update(now()), Tick::Idle);

        timer.start(90, now());
        assert!(timer.is_active());
        assert_eq!(timer.update(now() + Duration::milliseconds(1_020)), Tick::Running);
        assert_eq!(timer.seconds(), 89);
        assert_eq!(timer.update(now() + Duration::seconds(30)), Tick::Running);
        assert_eq!(timer.display(), "01:00");
        assert_eq!(timer.update(now() + Duration::seconds(90)), Tick::Finished);
        assert!(!timer.is_active());
        assert_eq!(timer.seconds(), 0);
        assert_eq!(timer.update(now() + Duration::seconds(91)), Tick::Idle);
    }

    #[test]
    fn test_late_tick_finishes() {
        let mut timer = RestTimer::default();
        timer.start(60, now());
        assert_eq!(timer.update(now() + Duration::seconds(300)), Tick::Finished);
        assert_eq!(timer.display(), "00:00");
    }

    #[test]
    fn test_restart_and_stop() {
        let mut timer = RestTimer::default();
        timer.start(60, now());
        timer.start(120, now() + Duration::seconds(10));
        assert_eq!(timer.update(now() + Duration::seconds(70)), Tick::Running);
        assert_eq!(timer.seconds(), 60);
        timer.stop();
        assert_eq!(timer, RestTimer::default());
        assert_eq!(timer.display(), "00:00");
    }
}
