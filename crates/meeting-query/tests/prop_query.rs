//! Property-based tests for the query engine using proptest.
//!
//! These tests verify invariants that should hold for *any* set of events and
//! any request, not just the scenarios in `query_tests.rs`.

use meeting_query::{query, query_detailed, Event, MeetingRequest, TimeRange};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies — generate days of events and requests
// ---------------------------------------------------------------------------

const PEOPLE: [&str; 5] = ["ana", "ben", "cho", "dev", "eli"];

fn arb_people() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(PEOPLE.to_vec(), 0..=3)
        .prop_map(|ids| ids.into_iter().map(String::from).collect())
}

/// An event of up to four hours, clipped to the end of the day.
fn arb_event() -> impl Strategy<Value = Event> {
    (0u32..1440, 0u32..=240, arb_people()).prop_map(|(start, len, attendees)| {
        let end = (start + len).min(1440);
        let when = TimeRange::from_start_end(start, end, false).unwrap();
        Event::new(format!("event@{}", start), when, attendees)
    })
}

fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    proptest::collection::vec(arb_event(), 0..12)
}

fn arb_duration() -> impl Strategy<Value = u32> {
    0u32..=240
}

fn arb_request() -> impl Strategy<Value = MeetingRequest> {
    (arb_people(), arb_people(), arb_duration()).prop_map(|(required, optional, duration)| {
        MeetingRequest::new(required, duration).with_optional_attendees(optional)
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: An empty day is entirely free
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_day_is_whole_day(request in arb_request(), duration in 0u32..=1440) {
        let request = MeetingRequest::new(request.attendees().iter().cloned(), duration)
            .with_optional_attendees(request.optional_attendees().iter().cloned());
        prop_assert_eq!(query(&[], &request), vec![TimeRange::WHOLE_DAY]);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Requests longer than a day never fit
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn longer_than_day_is_empty(events in arb_events(), extra in 1u32..10_000) {
        let request = MeetingRequest::new(["ana"], 1440 + extra)
            .with_optional_attendees(["ben"]);
        prop_assert!(query(&events, &request).is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Slots are sorted, disjoint, long enough, and inside the day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_well_formed(events in arb_events(), request in arb_request()) {
        let slots = query(&events, &request);

        for slot in &slots {
            prop_assert!(
                slot.duration() >= request.duration(),
                "slot {} shorter than {} minutes",
                slot,
                request.duration()
            );
            prop_assert!(TimeRange::WHOLE_DAY.contains(slot));
        }
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start() <= pair[1].start(), "not sorted: {:?}", pair);
            prop_assert!(!pair[0].overlaps(&pair[1]), "overlapping slots: {:?}", pair);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: No slot collides with a required attendee's event
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_avoid_required_attendees(events in arb_events(), request in arb_request()) {
        let slots = query(&events, &request);

        for event in events.iter().filter(|e| e.involves_any(request.attendees())) {
            for slot in &slots {
                prop_assert!(
                    !slot.overlaps(&event.when()),
                    "slot {} overlaps required event {}",
                    slot,
                    event.when()
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Requiring fewer people never shrinks the free time
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn fewer_required_attendees_relaxes(events in arb_events(), request in arb_request()) {
        let relaxed = MeetingRequest::new(request.attendees().iter().cloned(), request.duration());
        let strict = MeetingRequest::new(request.all_attendees(), request.duration());

        let relaxed_slots = query(&events, &relaxed);
        let strict_slots = query(&events, &strict);

        for slot in &strict_slots {
            prop_assert!(
                relaxed_slots.iter().any(|r| r.contains(slot)),
                "slot {} missing from relaxed result {:?}",
                slot,
                relaxed_slots
            );
        }
        let minutes = |slots: &[TimeRange]| slots.iter().map(|s| s.duration()).sum::<u32>();
        prop_assert!(minutes(&relaxed_slots) >= minutes(&strict_slots));
    }
}

// ---------------------------------------------------------------------------
// Property 6: Same input, same output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn query_is_deterministic(events in arb_events(), request in arb_request()) {
        prop_assert_eq!(query_detailed(&events, &request), query_detailed(&events, &request));
    }
}
