//! Duration text formats.
//!
//! Three grammars are accepted, tried in order:
//!
//! 1. A bare number, interpreted as seconds (`"90"`, `"1.5"`).
//! 2. An ISO 8601 duration: `PnDTnHnMnS` or the weeks form `PnW`. The
//!    grammar is a superset of the standard in that weeks may be combined
//!    with the other fields (`P1W2D`), matching long-standing accepting
//!    behavior downstream tooling relies on.
//! 3. A natural short form: `n w[eek[s]] n d[ay[s]] n h[our[s]] n
//!    m[inute[s]] n s[econd[s]]`, each field optional, fields in
//!    descending-unit order (`"1 week 2 days"`, `"1 h"`).
//!
//! Rendering always emits all five units in descending order, zeros
//! included: `"1 w 2 d 0 h 0 m 0 s"`.

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Error raised when no duration grammar matches the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not parse '{input}' as a duration")]
pub struct DurationParseError {
    /// The offending raw text.
    pub input: String,
}

static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(?P<weeks>\d+)W)?(?:(?P<days>\d+)D)?(?:T(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+)S)?)?$")
        .expect("ISO 8601 duration pattern is valid")
});

static SHORT_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<weeks>\d+) ?w(?:eek)?s? ?)?(?:(?P<days>\d+) ?d(?:ay)?s? ?)?(?:(?P<hours>\d+) ?h(?:our)?s? ?)?(?:(?P<minutes>\d+) ?m(?:inute)?s? ?)?(?:(?P<seconds>\d+) ?s(?:econd)?s? ?)?$",
    )
    .expect("short-form duration pattern is valid")
});

const UNIT_SECONDS: [(&str, i64); 5] = [
    ("weeks", 604_800),
    ("days", 86_400),
    ("hours", 3_600),
    ("minutes", 60),
    ("seconds", 1),
];

/// Parses duration text through the three grammars in order.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationParseError> {
    let trimmed = input.trim();
    if let Some(delta) = parse_bare_seconds(trimmed) {
        return Ok(delta);
    }
    parse_with_pattern(&ISO_8601, trimmed)
        .or_else(|| parse_with_pattern(&SHORT_FORM, trimmed))
        .ok_or_else(|| DurationParseError { input: input.to_string() })
}

/// Renders a duration as `"{w} w {d} d {h} h {m} m {s} s"`, zeros included.
pub fn render_wdhms(delta: TimeDelta) -> String {
    let weeks = delta.num_days() / 7;
    let days = delta.num_days() % 7;
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;
    let seconds = delta.num_seconds() % 60;
    format!("{weeks} w {days} d {hours} h {minutes} m {seconds} s")
}

fn parse_bare_seconds(input: &str) -> Option<TimeDelta> {
    let seconds: f64 = input.parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    // Sub-second input survives to millisecond precision.
    TimeDelta::try_milliseconds((seconds * 1000.0).round() as i64)
}

fn parse_with_pattern(pattern: &Regex, input: &str) -> Option<TimeDelta> {
    let captures = pattern.captures(input)?;
    delta_from_captures(&captures)
}

/// Sums the named unit groups of a match. `None` when no group matched at
/// all (an empty match is not a duration) or on arithmetic overflow.
fn delta_from_captures(captures: &Captures<'_>) -> Option<TimeDelta> {
    let mut total_seconds: i64 = 0;
    let mut matched_any = false;
    for (group, unit) in UNIT_SECONDS {
        if let Some(field) = captures.name(group) {
            let value: i64 = field.as_str().parse().ok()?;
            total_seconds = total_seconds.checked_add(value.checked_mul(unit)?)?;
            matched_any = true;
        }
    }
    if matched_any {
        TimeDelta::try_seconds(total_seconds)
    } else {
        None
    }
}
