//! WASM bindings for meeting-query.
//!
//! Exposes meeting-slot search and blocked-range merging to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings using the
//! document format from `meeting_query::wire`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meeting-query-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/meeting-query-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/meeting_query_wasm.wasm
//! ```

use std::collections::BTreeSet;

use meeting_query::wire::{EventInput, ScheduleInput, SlotOutput};
use meeting_query::{blocked_ranges, Event, ScheduleError};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON plumbing, kept free of `JsValue` so it can be tested natively
// ---------------------------------------------------------------------------

fn slots_for_document(input_json: &str) -> Result<String, ScheduleError> {
    let report = ScheduleInput::from_json(input_json)?.run()?;
    Ok(serde_json::to_string(&report)?)
}

fn blocked_for_attendees(
    events_json: &str,
    attendees_json: &str,
    duration: u32,
) -> Result<String, ScheduleError> {
    let inputs: Vec<EventInput> = serde_json::from_str(events_json)?;
    let attendees: BTreeSet<String> = serde_json::from_str(attendees_json)?;
    let events = inputs
        .iter()
        .map(EventInput::to_event)
        .collect::<Result<Vec<Event>, _>>()?;

    let dtos: Vec<SlotOutput> = blocked_ranges(&events, &attendees, duration)
        .iter()
        .map(SlotOutput::from)
        .collect();
    Ok(serde_json::to_string(&dtos)?)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find every slot where the requested meeting fits.
///
/// `input_json` is a schedule document (`{events, request}`). Returns a JSON
/// string `{slots: [{start, end, duration_minutes}], resolution: {kind, ...}}`.
#[wasm_bindgen(js_name = "findMeetingSlots")]
pub fn find_meeting_slots(input_json: &str) -> Result<String, JsValue> {
    slots_for_document(input_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Merge the busy periods of a group of attendees.
///
/// `events_json` is a JSON array of `{title, start, end, attendees}` objects
/// and `attendees_json` a JSON array of attendee ids. Blocks closer together
/// than `duration` minutes are fused. Returns a JSON array of
/// `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "blockedRanges")]
pub fn blocked_ranges_json(
    events_json: &str,
    attendees_json: &str,
    duration: u32,
) -> Result<String, JsValue> {
    blocked_for_attendees(events_json, attendees_json, duration)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
