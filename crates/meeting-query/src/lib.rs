//! # meeting-query
//!
//! Find every slot in a single day where a meeting of a given length can be
//! held, given the day's committed events and the required and optional
//! attendees of the meeting.
//!
//! ```
//! use meeting_query::{query, Event, MeetingRequest, TimeRange};
//!
//! let standup = TimeRange::from_start_end(600, 660, false).unwrap();
//! let events = vec![Event::new("Standup", standup, ["A"])];
//! let request = MeetingRequest::new(["A"], 30);
//!
//! let slots = query(&events, &request);
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[0].to_string(), "00:00-10:00");
//! assert_eq!(slots[1].to_string(), "11:00-24:00");
//! ```
//!
//! ## Modules
//!
//! - [`time_range`] — Half-open minute ranges within a day
//! - [`event`] — Calendar events and meeting requests
//! - [`merge`] — Merge attendees' busy periods into blocked ranges
//! - [`query`] — Free-time subtraction and optional-attendee optimization
//! - [`wire`] — JSON document format with `HH:MM` times
//! - [`error`] — Error types

pub mod error;
pub mod event;
pub mod merge;
pub mod query;
pub mod time_range;
pub mod wire;

pub use error::ScheduleError;
pub use event::{Event, MeetingRequest};
pub use merge::blocked_ranges;
pub use query::{find_free_time, query, query_detailed, QueryOutcome, Resolution};
pub use time_range::TimeRange;
