//! Error types for meeting-query operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// End precedes start, or the range runs past the end of the day.
    #[error("Invalid time range: [{start}, {end}) is not within [0, 1440)")]
    InvalidRange { start: u32, end: u32 },

    #[error("Invalid clock time: {0}")]
    InvalidClockTime(String),

    /// The input document was not valid JSON or did not match the schema.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
