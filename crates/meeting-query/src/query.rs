//! Find the slots in a day where a requested meeting can be held.
//!
//! The engine first tries to fit every attendee, required and optional. When
//! that leaves no slot, it falls back to the required attendees' free time and
//! picks the fragments of it that suit the largest number of optional
//! attendees.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::event::{Event, MeetingRequest};
use crate::merge::blocked_ranges;
use crate::time_range::TimeRange;

/// Which attendee policy produced a [`QueryOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The requested duration is longer than a day; nothing was computed.
    DurationTooLong,
    /// Slots fit every attendee in the request.
    AllAttendees,
    /// Slots fit the required attendees; no optional attendee could be added.
    RequiredOnly,
    /// Slots fit the required attendees plus the given number of optional ones,
    /// the most achievable.
    PartialOptional { optional_attendees: usize },
}

/// Slots for a request together with the policy that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Feasible slots, sorted by start and pairwise disjoint.
    pub slots: Vec<TimeRange>,
    pub resolution: Resolution,
}

impl QueryOutcome {
    fn new(slots: Vec<TimeRange>, resolution: Resolution) -> Self {
        debug!("{} slot(s), resolution {:?}", slots.len(), resolution);
        Self { slots, resolution }
    }
}

/// A piece of the required attendees' free time during which one optional
/// attendee is also free.
#[derive(Debug, Clone, Copy)]
struct Fragment<'a> {
    range: TimeRange,
    attendee: &'a str,
}

/// Find every slot of at least `request.duration()` minutes in which the
/// meeting can take place.
///
/// Returns an empty list when nothing fits. See [`query_detailed`] for the
/// policy applied to optional attendees.
pub fn query(events: &[Event], request: &MeetingRequest) -> Vec<TimeRange> {
    query_detailed(events, request).slots
}

/// Like [`query`], also reporting which attendee policy produced the slots.
///
/// 1. A duration longer than the day yields nothing.
/// 2. With no optional or no required attendees, every attendee is blocked
///    against directly.
/// 3. Otherwise slots that fit everyone win outright. Failing that, the
///    required attendees' free time is intersected with each optional
///    attendee's free time and the fragments shared by the most optional
///    attendees are returned. If no optional attendee fits anywhere, the
///    required attendees' free time is returned as is.
pub fn query_detailed(events: &[Event], request: &MeetingRequest) -> QueryOutcome {
    let duration = request.duration();
    if duration > TimeRange::WHOLE_DAY.duration() {
        return QueryOutcome::new(Vec::new(), Resolution::DurationTooLong);
    }

    let candidates = [TimeRange::WHOLE_DAY];
    let all_blocked = blocked_ranges(events, &request.all_attendees(), duration);
    let everyone = find_free_time(&candidates, &all_blocked, duration);

    if request.attendees().is_empty() || request.optional_attendees().is_empty() {
        return QueryOutcome::new(everyone, Resolution::AllAttendees);
    }
    if !everyone.is_empty() {
        return QueryOutcome::new(everyone, Resolution::AllAttendees);
    }

    let required_blocked = blocked_ranges(events, request.attendees(), duration);
    let required_only = find_free_time(&candidates, &required_blocked, duration);
    debug!(
        "optional attendees do not all fit; {} required-only slot(s)",
        required_only.len()
    );

    let fragments = optional_fragments(events, request, &required_only);
    if fragments.is_empty() {
        return QueryOutcome::new(required_only, Resolution::RequiredOnly);
    }

    let (slots, covered) = select_optimal_slots(fragments);
    QueryOutcome::new(
        slots,
        Resolution::PartialOptional {
            optional_attendees: covered,
        },
    )
}

/// Subtract `blocked` from `candidates`, keeping only pieces of at least
/// `duration` minutes.
///
/// A candidate overlapped by a blocked range is replaced by the part before
/// and the part after it, each kept only if long enough. A candidate inside a
/// blocked range disappears. Untouched candidates are kept as they are. The
/// result is sorted by start.
pub fn find_free_time(
    candidates: &[TimeRange],
    blocked: &[TimeRange],
    duration: u32,
) -> Vec<TimeRange> {
    let mut free = candidates.to_vec();

    for block in blocked {
        let mut remaining = Vec::with_capacity(free.len() + 1);
        for candidate in free {
            if !block.overlaps(&candidate) {
                remaining.push(candidate);
                continue;
            }
            if block.contains(&candidate) {
                trace!("{} removes {}", block, candidate);
                continue;
            }
            if block.start() > candidate.start() && block.start() - candidate.start() >= duration {
                remaining.push(TimeRange::span(candidate.start(), block.start()));
            }
            if candidate.end() > block.end() && candidate.end() - block.end() >= duration {
                remaining.push(TimeRange::span(block.end(), candidate.end()));
            }
        }
        free = remaining;
    }

    free.sort_by(TimeRange::order_by_start);
    free
}

/// For each optional attendee, the parts of `required_only` they are free for.
fn optional_fragments<'a>(
    events: &[Event],
    request: &'a MeetingRequest,
    required_only: &[TimeRange],
) -> Vec<Fragment<'a>> {
    let duration = request.duration();
    let mut fragments = Vec::new();

    for attendee in request.optional_attendees() {
        let personal = BTreeSet::from([attendee.clone()]);
        let blocked = blocked_ranges(events, &personal, duration);
        let free = find_free_time(required_only, &blocked, duration);
        trace!("{} fits {} fragment(s)", attendee, free.len());
        fragments.extend(free.into_iter().map(|range| Fragment {
            range,
            attendee: attendee.as_str(),
        }));
    }

    fragments
}

/// Pick the fragments shared by the most optional attendees.
///
/// Fragments are visited in end order. For each one, the following fragments
/// that equal or overlap it are counted by attendee until the first one that
/// does not. The fragments reaching the highest count win. Duplicates are
/// collapsed, and among overlapping winners the earliest-starting one is kept.
///
/// Returns the winning slots and the number of optional attendees they cover.
fn select_optimal_slots(mut fragments: Vec<Fragment<'_>>) -> (Vec<TimeRange>, usize) {
    fragments.sort_by(|a, b| {
        TimeRange::order_by_end(&a.range, &b.range).then_with(|| a.attendee.cmp(b.attendee))
    });

    let mut best = 0;
    let mut winners: Vec<TimeRange> = Vec::new();

    for (i, fragment) in fragments.iter().enumerate() {
        let mut covered = BTreeSet::from([fragment.attendee]);
        for later in &fragments[i + 1..] {
            if later.range != fragment.range && !later.range.overlaps(&fragment.range) {
                break;
            }
            covered.insert(later.attendee);
        }

        match covered.len().cmp(&best) {
            Ordering::Greater => {
                best = covered.len();
                winners = vec![fragment.range];
            }
            Ordering::Equal => winners.push(fragment.range),
            Ordering::Less => {}
        }
    }

    winners.sort_by(TimeRange::order_by_start);
    winners.dedup();

    let mut slots: Vec<TimeRange> = Vec::with_capacity(winners.len());
    for winner in winners {
        if slots.last().is_none_or(|kept| !kept.overlaps(&winner)) {
            slots.push(winner);
        }
    }

    (slots, best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TimeRange {
        TimeRange::from_start_end(start, end, false).unwrap()
    }

    fn fragment(start: u32, end: u32, attendee: &str) -> Fragment<'_> {
        Fragment {
            range: range(start, end),
            attendee,
        }
    }

    #[test]
    fn most_shared_fragment_wins() {
        // B and C are both free inside 09:00-12:00; D is alone in the afternoon.
        let fragments = vec![
            fragment(540, 720, "B"),
            fragment(600, 780, "C"),
            fragment(900, 1000, "D"),
        ];
        let (slots, covered) = select_optimal_slots(fragments);
        assert_eq!(covered, 2);
        assert_eq!(slots, vec![range(540, 720)]);
    }

    #[test]
    fn equal_fragments_count_each_attendee() {
        let fragments = vec![
            fragment(0, 300, "B"),
            fragment(0, 300, "C"),
            fragment(0, 300, "D"),
        ];
        let (slots, covered) = select_optimal_slots(fragments);
        assert_eq!(covered, 3);
        assert_eq!(slots, vec![range(0, 300)]);
    }

    #[test]
    fn same_attendee_counted_once() {
        // C has two fragments overlapping B's; that is still two attendees.
        let fragments = vec![
            fragment(0, 600, "B"),
            fragment(0, 100, "C"),
            fragment(200, 300, "C"),
        ];
        let (_, covered) = select_optimal_slots(fragments);
        assert_eq!(covered, 2);
    }

    #[test]
    fn disjoint_ties_all_returned() {
        let fragments = vec![fragment(0, 100, "B"), fragment(500, 600, "C")];
        let (slots, covered) = select_optimal_slots(fragments);
        assert_eq!(covered, 1);
        assert_eq!(slots, vec![range(0, 100), range(500, 600)]);
    }

    #[test]
    fn overlapping_ties_keep_earliest() {
        // B and C both reach 2; C overlaps B and starts later.
        let fragments = vec![
            fragment(0, 200, "B"),
            fragment(100, 300, "C"),
            fragment(250, 400, "D"),
        ];
        let (slots, covered) = select_optimal_slots(fragments);
        assert_eq!(covered, 2);
        assert_eq!(slots, vec![range(0, 200)]);
    }
}
