//! Merge per-resource slot lists into one annotated list.
//!
//! Slots with the same start and end across resources collapse into a single
//! [`BookableTimeRange`] listing every resource free for it. The result is
//! ordered by start, then end.

use std::collections::{BTreeMap, BTreeSet};

use crate::range::{BookableTimeRange, ResourceId, TimeRange};

/// Wrap slots from an untracked run.
pub fn untracked_ranges(slots: Vec<TimeRange>) -> Vec<BookableTimeRange> {
    slots.into_iter().map(BookableTimeRange::untracked).collect()
}

/// Fold the slot lists of each resource into tracked bookable ranges.
///
/// Every returned range lists at least one resource, and only resources that
/// produced that exact window.
pub fn merge_resource_slots<I>(runs: I) -> Vec<BookableTimeRange>
where
    I: IntoIterator<Item = (ResourceId, Vec<TimeRange>)>,
{
    let merged = runs.into_iter().fold(
        BTreeMap::<TimeRange, BTreeSet<ResourceId>>::new(),
        |mut acc, (resource, slots)| {
            for slot in slots {
                acc.entry(slot).or_default().insert(resource);
            }
            acc
        },
    );

    merged
        .into_iter()
        .map(|(range, resources)| BookableTimeRange::tracked(range, resources))
        .collect()
}
