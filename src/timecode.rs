/*!
 * Millisecond-precision timecodes and the SRT timestamp codec.
 *
 * SRT timestamps look like `HH:MM:SS,mmm`. On input the last separator may
 * also be `.` or `:` and the hour field may be wider than two digits, so the
 * fields are located from the right-hand end of the string. Minutes and
 * seconds are not bounded to 0..60; `00:75:00,000` is simply 75 minutes.
 */

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::errors::SubtitleError;

/// Shortest text that still holds `H:MM:SS,mmm` with a two-digit hour field
pub const TIMESTAMP_MIN_LEN: usize = 12;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// A signed span of time with millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode(i64);

impl Timecode {
    pub const ZERO: Timecode = Timecode(0);

    pub const fn from_millis(ms: i64) -> Self {
        Timecode(ms)
    }

    pub const fn from_hms_millis(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Timecode(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
    }

    /// Rounds to the nearest millisecond
    pub fn from_secs_f64(secs: f64) -> Self {
        Timecode((secs * MS_PER_SECOND as f64).round() as i64)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MS_PER_SECOND as f64
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parse an SRT timestamp such as `01:23:04,000`.
    ///
    /// This runs once per timestamp during parsing, so it slices fixed
    /// offsets from the end instead of splitting on separators.
    pub fn parse(ts: &str) -> Result<Self, SubtitleError> {
        if ts.len() < TIMESTAMP_MIN_LEN {
            return Err(SubtitleError::malformed_timestamp(
                ts,
                format!("expected length >= {}, got {}", TIMESTAMP_MIN_LEN, ts.len()),
            ));
        }
        if !ts.is_ascii() {
            return Err(SubtitleError::malformed_timestamp(ts, "non-ASCII characters"));
        }

        let len = ts.len();
        let hours = parse_field(ts, &ts[..len - 10], "hours")?;
        let minutes = parse_field(ts, &ts[len - 9..len - 7], "minutes")?;
        let seconds = parse_field(ts, &ts[len - 6..len - 4], "seconds")?;
        let millis = parse_field(ts, &ts[len - 3..], "milliseconds")?;

        hours
            .checked_mul(MS_PER_HOUR)
            .and_then(|ms| ms.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
            .and_then(|ms| ms.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
            .and_then(|ms| ms.checked_add(millis))
            .map(Timecode)
            .ok_or_else(|| SubtitleError::malformed_timestamp(ts, "value out of range"))
    }

    /// Render as `HH:MM:SS,mmm`, the only form ever written out
    pub fn format(self) -> String {
        self.to_string()
    }
}

fn parse_field(ts: &str, field: &str, name: &str) -> Result<i64, SubtitleError> {
    field
        .parse::<i64>()
        .map_err(|_| SubtitleError::malformed_timestamp(ts, format!("{} field {:?} is not a number", name, field)))
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Floor division keeps every field but the hours non-negative, which
        // parse() reads back to the same value.
        let hours = self.0.div_euclid(MS_PER_HOUR);
        let rest = self.0.rem_euclid(MS_PER_HOUR);
        let minutes = rest / MS_PER_MINUTE;
        let seconds = (rest % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = rest % MS_PER_SECOND;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timecode {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Timecode {
    type Output = Timecode;

    fn add(self, rhs: Timecode) -> Timecode {
        Timecode(self.0 + rhs.0)
    }
}

impl Sub for Timecode {
    type Output = Timecode;

    fn sub(self, rhs: Timecode) -> Timecode {
        Timecode(self.0 - rhs.0)
    }
}
