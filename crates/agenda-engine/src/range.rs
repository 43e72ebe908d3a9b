//! Interval value types: plain time ranges, occupied events and bookable ranges.
//!
//! All types are immutable values. Operations that look like mutation return a
//! new value; the only in-place edits are the resource-set helpers on
//! [`BookableTimeRange`], which fail when resources are not tracked.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{AgendaError, Result};

/// Identifier of an interchangeable resource (a workstation).
pub type ResourceId = u32;

/// Reference date used to anchor time-of-day windows built with
/// [`TimeRange::from_times`].
const TIME_OF_DAY_ANCHOR: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date,
    None => panic!("invalid anchor date"),
};

/// A half-open time range `[start, end)` with `end > start`.
///
/// Ranges order by start, then by end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Build a range, failing with [`AgendaError::InvalidTimeRange`] unless
    /// `end` is strictly after `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(AgendaError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range whose ordering the caller already guarantees.
    pub(crate) fn from_ordered(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(end > start, "unordered range {start} - {end}");
        Self { start, end }
    }

    /// Build a time-of-day window, for use as a weekly or special working range.
    ///
    /// Only the time of day matters to the business-hours resolver; the range
    /// is anchored on a fixed reference date.
    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        Self::new(
            TIME_OF_DAY_ANCHOR.and_time(start),
            TIME_OF_DAY_ANCHOR.and_time(end),
        )
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when start and end fall on the same calendar date.
    pub fn same_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    pub fn equal(&self, other: &TimeRange) -> bool {
        self.start == other.start && self.end == other.end
    }

    /// Inclusive containment: `other` lies entirely within `self`.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Open-interval overlap. Ranges that only touch at an endpoint do not
    /// overlap.
    pub fn overlap(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Same times of day, moved onto `date`.
    pub fn with_date(&self, date: NaiveDate) -> Result<Self> {
        self.with_dates(date, date)
    }

    /// Same times of day, with the start moved onto `start_date` and the end
    /// onto `end_date`. Fails if the result is no longer ordered.
    pub fn with_dates(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        Self::new(
            start_date.and_time(self.start.time()),
            end_date.and_time(self.end.time()),
        )
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// A pre-existing occupied interval that the slot search must avoid.
///
/// An event without a resource only blocks searches that do not track
/// resources; an event tied to a resource only blocks that resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Event {
    #[serde(flatten)]
    range: TimeRange,
    resource: Option<ResourceId>,
}

impl Event {
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            resource: None,
        }
    }

    pub fn on_resource(range: TimeRange, resource: ResourceId) -> Self {
        Self {
            range,
            resource: Some(resource),
        }
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn resource(&self) -> Option<ResourceId> {
        self.resource
    }
}

/// Resource association of a bookable range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resources {
    /// Resource tracking is off for this calculation.
    Untracked,
    /// The resources free for the whole window.
    Tracked(BTreeSet<ResourceId>),
}

impl Resources {
    pub fn is_untracked(&self) -> bool {
        matches!(self, Resources::Untracked)
    }
}

/// A slot a new event can be booked into, with the resources free for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookableTimeRange {
    #[serde(flatten)]
    range: TimeRange,
    #[serde(skip_serializing_if = "Resources::is_untracked")]
    resources: Resources,
}

impl BookableTimeRange {
    pub fn untracked(range: TimeRange) -> Self {
        Self {
            range,
            resources: Resources::Untracked,
        }
    }

    /// Build a tracked range. Duplicate ids collapse.
    pub fn tracked<I>(range: TimeRange, ids: I) -> Self
    where
        I: IntoIterator<Item = ResourceId>,
    {
        Self {
            range,
            resources: Resources::Tracked(ids.into_iter().collect()),
        }
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn start(&self) -> NaiveDateTime {
        self.range.start()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.range.end()
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn is_tracked(&self) -> bool {
        !self.resources.is_untracked()
    }

    /// The free resources in ascending order.
    pub fn resource_ids(&self) -> Result<Vec<ResourceId>> {
        Ok(self.tracked_set()?.iter().copied().collect())
    }

    pub fn has_resource(&self, id: ResourceId) -> Result<bool> {
        Ok(self.tracked_set()?.contains(&id))
    }

    pub fn push_resource(&mut self, id: ResourceId) -> Result<()> {
        self.tracked_set_mut()?.insert(id);
        Ok(())
    }

    pub fn remove_resource(&mut self, id: ResourceId) -> Result<()> {
        self.tracked_set_mut()?.remove(&id);
        Ok(())
    }

    fn tracked_set(&self) -> Result<&BTreeSet<ResourceId>> {
        match &self.resources {
            Resources::Tracked(ids) => Ok(ids),
            Resources::Untracked => Err(AgendaError::ResourcesNotTracked),
        }
    }

    fn tracked_set_mut(&mut self) -> Result<&mut BTreeSet<ResourceId>> {
        match &mut self.resources {
            Resources::Tracked(ids) => Ok(ids),
            Resources::Untracked => Err(AgendaError::ResourcesNotTracked),
        }
    }
}

impl fmt::Display for BookableTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range)?;
        if let Resources::Tracked(ids) = &self.resources {
            let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            write!(f, " [{}]", ids.join(", "))?;
        }
        Ok(())
    }
}
