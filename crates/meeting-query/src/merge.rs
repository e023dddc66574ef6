//! Merge the busy periods of a group of attendees into blocked ranges.
//!
//! Collects every event that involves at least one attendee of interest, sorts
//! the ranges by start, then sweeps them into an accumulator. Blocks separated
//! by a gap shorter than the meeting duration are fused, since no meeting
//! could be placed between them anyway.

use std::collections::BTreeSet;

use log::trace;

use crate::event::Event;
use crate::time_range::{TimeRange, END_OF_DAY, MINUTES_PER_DAY};

/// Compute the blocked ranges for `attendees`: sorted by start, pairwise
/// disjoint, and separated from each other by at least `duration` minutes.
///
/// Returns an empty list when none of the attendees has an event.
pub fn blocked_ranges(
    events: &[Event],
    attendees: &BTreeSet<String>,
    duration: u32,
) -> Vec<TimeRange> {
    merge_ranges(collect_busy_ranges(events, attendees), duration)
}

/// Each event counts once, however many of `attendees` are in it.
fn collect_busy_ranges(events: &[Event], attendees: &BTreeSet<String>) -> Vec<TimeRange> {
    events
        .iter()
        .filter(|e| !e.when().is_empty() && e.involves_any(attendees))
        .map(Event::when)
        .collect()
}

/// Merge arbitrary busy ranges into a minimal sorted list of blocks.
///
/// A range is folded into the previous block when it overlaps it or starts
/// less than `duration` minutes after it ends. When the range folded in ends
/// at [`END_OF_DAY`], the fused block runs through the day boundary; a lone
/// range keeps its exclusive end.
pub fn merge_ranges(mut ranges: Vec<TimeRange>, duration: u32) -> Vec<TimeRange> {
    ranges.sort_by(TimeRange::order_by_start);

    let mut merged: Vec<TimeRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = merged.last_mut() {
            if range.start() < last.end().saturating_add(duration) {
                let fused = TimeRange::span(last.start(), fused_end(last.end(), range.end()));
                trace!("fused {} and {} into {}", last, range, fused);
                *last = fused;
                continue;
            }
        }
        merged.push(range);
    }

    merged
}

fn fused_end(block_end: u32, range_end: u32) -> u32 {
    if range_end == END_OF_DAY && block_end <= END_OF_DAY {
        MINUTES_PER_DAY
    } else {
        block_end.max(range_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn range(start: u32, end: u32) -> TimeRange {
        TimeRange::from_start_end(start, end, false).unwrap()
    }

    #[test]
    fn shared_event_collected_once() {
        let events = vec![Event::new("sync", range(60, 120), ["A", "B"])];
        let collected = collect_busy_ranges(&events, &people(&["A", "B"]));
        assert_eq!(collected, vec![range(60, 120)]);
    }

    #[test]
    fn events_without_target_attendees_skipped() {
        let events = vec![
            Event::new("a", range(60, 120), ["A"]),
            Event::new("c", range(200, 260), ["C"]),
        ];
        let collected = collect_busy_ranges(&events, &people(&["A"]));
        assert_eq!(collected, vec![range(60, 120)]);
    }

    #[test]
    fn empty_events_block_nothing() {
        let events = vec![Event::new("blip", range(300, 300), ["A"])];
        assert!(collect_busy_ranges(&events, &people(&["A"])).is_empty());
    }

    #[test]
    fn fused_block_ending_last_minute_reaches_boundary() {
        assert_eq!(fused_end(1300, END_OF_DAY), MINUTES_PER_DAY);
        assert_eq!(fused_end(MINUTES_PER_DAY, END_OF_DAY), MINUTES_PER_DAY);
        assert_eq!(fused_end(1300, 1200), 1300);
        assert_eq!(fused_end(1300, 1400), 1400);
    }
}
