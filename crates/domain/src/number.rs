/// Parse a free-text numeric field.
///
/// All characters except ASCII digits, `.` and `-` are removed before parsing,
/// so unit-annotated input such as `"135 lb"` yields `135`. Empty input, input
/// without any numeric characters and anything that does not form a finite
/// number (e.g. `"1.2.3"`) yield `None`.
///
/// This is the only place where user-entered text is turned into numbers. Set
/// weights and reps, bodyweight, steps and cardio minutes all go through it.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect::<String>();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
