//! JSON document format for callers outside Rust.
//!
//! Times on the wire are `HH:MM` wall-clock strings (`"24:00"` for the end of
//! the day) rather than raw minute indices:
//!
//! ```json
//! {
//!   "events": [
//!     { "title": "Standup", "start": "10:00", "end": "11:00", "attendees": ["A"] }
//!   ],
//!   "request": { "duration": 30, "attendees": ["A"], "optional_attendees": ["B"] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::{Event, MeetingRequest};
use crate::query::{query_detailed, QueryOutcome, Resolution};
use crate::time_range::{format_clock, parse_clock, TimeRange};

/// A whole query: the day's events plus the meeting being requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(default)]
    pub events: Vec<EventInput>,
    pub request: RequestInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    #[serde(default)]
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInput {
    /// Meeting length in minutes.
    pub duration: u32,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub optional_attendees: Vec<String>,
}

/// A slot as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOutput {
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
}

impl From<&TimeRange> for SlotOutput {
    fn from(range: &TimeRange) -> Self {
        Self {
            start: format_clock(range.start()),
            end: format_clock(range.end()),
            duration_minutes: range.duration(),
        }
    }
}

/// Query result as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    pub slots: Vec<SlotOutput>,
    pub resolution: Resolution,
}

impl From<&QueryOutcome> for QueryReport {
    fn from(outcome: &QueryOutcome) -> Self {
        Self {
            slots: outcome.slots.iter().map(SlotOutput::from).collect(),
            resolution: outcome.resolution,
        }
    }
}

impl EventInput {
    /// Validate the clock times and build the domain event.
    pub fn to_event(&self) -> Result<Event> {
        let start = parse_clock(&self.start)?;
        let end = parse_clock(&self.end)?;
        let when = TimeRange::from_start_end(start, end, false)?;
        Ok(Event::new(self.title.clone(), when, self.attendees.iter().cloned()))
    }
}

impl RequestInput {
    pub fn to_request(&self) -> MeetingRequest {
        MeetingRequest::new(self.attendees.iter().cloned(), self.duration)
            .with_optional_attendees(self.optional_attendees.iter().cloned())
    }
}

impl ScheduleInput {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every event and return the domain values.
    ///
    /// # Errors
    /// Fails on the first event whose times do not parse or do not form a
    /// valid range.
    pub fn to_parts(&self) -> Result<(Vec<Event>, MeetingRequest)> {
        let events = self
            .events
            .iter()
            .map(EventInput::to_event)
            .collect::<Result<Vec<_>>>()?;
        Ok((events, self.request.to_request()))
    }

    /// Run the query described by this document.
    pub fn run(&self) -> Result<QueryReport> {
        let (events, request) = self.to_parts()?;
        let outcome = query_detailed(&events, &request);
        Ok(QueryReport::from(&outcome))
    }
}
