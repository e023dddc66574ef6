//! Half-open time ranges within a single day, measured in minutes.
//!
//! A [`TimeRange`] is `[start, end)` with `0 <= start <= end <= 1440`. Values are
//! validated on construction (including deserialization), so every range that
//! exists lies inside [`TimeRange::WHOLE_DAY`].

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// First minute of the day.
pub const START_OF_DAY: u32 = 0;

/// Last minute of the day (23:59). Ranges built with `inclusive = true` up to
/// this minute reach the day boundary.
pub const END_OF_DAY: u32 = 1439;

/// Length of the schedulable day, and the exclusive end of [`TimeRange::WHOLE_DAY`].
pub const MINUTES_PER_DAY: u32 = 1440;

/// An immutable `[start, end)` interval in minutes-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TimeRange {
    start: u32,
    end: u32,
}

/// Unvalidated wire shape; converted through [`TryFrom`] so bad input is
/// rejected at the serde boundary.
#[derive(Deserialize)]
struct RawRange {
    start: u32,
    end: u32,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = ScheduleError;

    fn try_from(raw: RawRange) -> Result<Self> {
        TimeRange::from_start_end(raw.start, raw.end, false)
    }
}

impl TimeRange {
    /// The entire schedulable day, `[00:00, 24:00)`.
    pub const WHOLE_DAY: TimeRange = TimeRange {
        start: START_OF_DAY,
        end: MINUTES_PER_DAY,
    };

    /// Build a range from its endpoints.
    ///
    /// With `inclusive = true` the `end` minute itself belongs to the range, so
    /// `from_start_end(0, END_OF_DAY, true)` is the whole day.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidRange`] if `end < start` or the resulting
    /// end lies past the day boundary.
    pub fn from_start_end(start: u32, end: u32, inclusive: bool) -> Result<Self> {
        let exclusive_end = if inclusive { end.checked_add(1) } else { Some(end) };
        match exclusive_end {
            Some(end) if start <= end && end <= MINUTES_PER_DAY => Ok(Self { start, end }),
            _ => Err(ScheduleError::InvalidRange { start, end }),
        }
    }

    /// Build a range from a start minute and a length in minutes.
    pub fn from_start_duration(start: u32, duration: u32) -> Result<Self> {
        let end = start
            .checked_add(duration)
            .ok_or(ScheduleError::InvalidRange { start, end: u32::MAX })?;
        Self::from_start_end(start, end, false)
    }

    /// Construct from endpoints already known to be valid, e.g. pieces of
    /// another validated range.
    pub(crate) fn span(start: u32, end: u32) -> Self {
        debug_assert!(start <= end && end <= MINUTES_PER_DAY, "bad span [{start}, {end})");
        Self { start, end }
    }

    /// Convert a wall-clock hour and minute into a minute-of-day index.
    ///
    /// ```
    /// use meeting_query::TimeRange;
    /// assert_eq!(TimeRange::minutes_of_day(10, 30).unwrap(), 630);
    /// assert!(TimeRange::minutes_of_day(24, 0).is_err());
    /// ```
    pub fn minutes_of_day(hours: u32, minutes: u32) -> Result<u32> {
        if hours >= 24 || minutes >= 60 {
            return Err(ScheduleError::InvalidClockTime(format!(
                "{:02}:{:02}",
                hours, minutes
            )));
        }
        Ok(hours * 60 + minutes)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    /// Exclusive end minute.
    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the two ranges share at least one minute. Adjacent ranges
    /// (`a.end == b.start`) and empty ranges never overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && other.start < self.end
    }

    /// True when `other` lies entirely inside this range.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_point(&self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Order by start ascending, ties broken by end ascending.
    pub fn order_by_start(a: &TimeRange, b: &TimeRange) -> Ordering {
        a.start.cmp(&b.start).then(a.end.cmp(&b.end))
    }

    /// Order by end ascending, ties broken by start ascending.
    pub fn order_by_end(a: &TimeRange, b: &TimeRange) -> Ordering {
        a.end.cmp(&b.end).then(a.start.cmp(&b.start))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

/// Parse an `HH:MM` wall-clock string into a minute-of-day.
///
/// `"24:00"` is accepted and denotes the day boundary (1440), so it can only be
/// used as an exclusive end.
pub fn parse_clock(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    if trimmed == "24:00" {
        return Ok(MINUTES_PER_DAY);
    }
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|e| ScheduleError::InvalidClockTime(format!("'{}': {}", s, e)))?;
    Ok(time.hour() * 60 + time.minute())
}

/// Render a minute-of-day as `HH:MM`; the day boundary renders as `24:00`.
pub fn format_clock(minute: u32) -> String {
    match NaiveTime::from_hms_opt(minute / 60, minute % 60, 0) {
        Some(time) => time.format("%H:%M").to_string(),
        None => "24:00".to_string(),
    }
}
