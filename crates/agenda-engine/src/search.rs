//! Slot search -- walks a horizon with a fixed-duration cursor and collects
//! every window that is open and free of obstacles.
//!
//! The cursor only ever moves forward. At each position the checks run in
//! this order, and the first one that fails moves the cursor and restarts:
//!
//! 1. the window crosses midnight → jump to the midnight it crosses
//! 2. the day is closed → jump to the next midnight
//! 3. no working window contains it → jump to the start of the first window
//!    ending at or after the cursor's end, or to the next midnight if none
//! 4. events overlap it → jump to the latest overlapping end, plus padding
//!
//! A window passing all four is a slot; the cursor then advances by
//! `duration + padding`. Padding is never added to day or window jumps.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::trace;

use crate::cursor::TimeRangeInterval;
use crate::hours::BusinessHours;
use crate::range::{Event, ResourceId, TimeRange};

/// Which events block a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Resources are not tracked: only events without a resource block.
    Untracked,
    /// Search for one resource: only events tied to that resource block it.
    Resource(ResourceId),
}

impl Scope {
    pub fn blocks(&self, event: &Event) -> bool {
        match self {
            Scope::Untracked => event.resource().is_none(),
            Scope::Resource(id) => event.resource() == Some(*id),
        }
    }
}

/// The events that block `scope`.
pub fn obstacles_for(events: &[Event], scope: Scope) -> Vec<&Event> {
    events.iter().filter(|event| scope.blocks(event)).collect()
}

/// Find the bookable slots of one search run.
///
/// Returns non-overlapping slots, each exactly `duration` long and contained
/// in `horizon`, in ascending start order. A non-positive `duration` yields no
/// slots.
pub fn find_slots(
    horizon: &TimeRange,
    duration: Duration,
    padding: Option<Duration>,
    hours: &BusinessHours,
    obstacles: &[&Event],
) -> Vec<TimeRange> {
    let mut slots = Vec::new();
    if duration <= Duration::zero() {
        return slots;
    }

    let mut cursor = TimeRangeInterval::new(horizon.start(), duration, padding);

    while let Some(window) = cursor.time_range().filter(|w| horizon.contains(w)) {
        if !window.same_day() {
            trace!(%window, "window crosses midnight");
            cursor = cursor.rebase(midnight_of(window.end().date()));
            continue;
        }

        let date = window.start().date();
        let Some(day_ranges) = hours.open_ranges(date) else {
            trace!(%date, "closed day");
            let Some(next) = next_midnight(date) else { break };
            cursor = cursor.rebase(next);
            continue;
        };

        if !day_ranges.iter().any(|range| range.contains(&window)) {
            match day_ranges.iter().find(|range| range.end() >= window.end()) {
                Some(near) => {
                    trace!(%window, near = %near, "jumping to working range");
                    cursor = cursor.rebase(near.start());
                }
                None => {
                    trace!(%window, "no working range left today");
                    let Some(next) = next_midnight(date) else { break };
                    cursor = cursor.rebase(next);
                }
            }
            continue;
        }

        let latest_end = obstacles
            .iter()
            .filter(|event| event.range().overlap(&window))
            .map(|event| event.range().end())
            .max();
        if let Some(end) = latest_end {
            trace!(%window, %end, "window blocked by events");
            let Some(start) = end.checked_add_signed(cursor.padding()) else { break };
            cursor = cursor.rebase(start);
            continue;
        }

        slots.push(window);
        let Some(next) = cursor.next() else { break };
        cursor = next;
    }

    slots
}

fn midnight_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn next_midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.succ_opt().map(midnight_of)
}
