//! The validated calculator: runs the slot search once, or once per resource,
//! and merges the results.

use chrono::Duration;
use tracing::debug;

use crate::error::{AgendaError, Result};
use crate::hours::BusinessHours;
use crate::merge::{merge_resource_slots, untracked_ranges};
use crate::range::{BookableTimeRange, Event, ResourceId, TimeRange};
use crate::search::{find_slots, obstacles_for, Scope};

/// A validated slot calculation. Build it directly or through
/// [`Agenda`](crate::Agenda).
#[derive(Debug, Clone)]
pub struct AgendaCalculator {
    horizon: TimeRange,
    duration: Duration,
    padding: Option<Duration>,
    events: Vec<Event>,
    resources: Vec<ResourceId>,
    hours: BusinessHours,
}

impl AgendaCalculator {
    /// Validate the slot duration and padding and take ownership of the
    /// inputs. Repeated resource ids are dropped, keeping the first occurrence.
    ///
    /// An empty `resources` list turns resource tracking off.
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidInterval`] when `duration` is not
    /// positive and under 24 hours, or when `padding` is negative.
    pub fn new(
        horizon: TimeRange,
        duration: Duration,
        padding: Option<Duration>,
        events: Vec<Event>,
        resources: Vec<ResourceId>,
        hours: BusinessHours,
    ) -> Result<Self> {
        if duration <= Duration::zero() || duration >= Duration::hours(24) {
            return Err(AgendaError::InvalidInterval(format!(
                "slot duration must be positive and less than 24 hours, got {} minutes",
                duration.num_minutes()
            )));
        }
        if let Some(padding) = padding {
            if padding < Duration::zero() {
                return Err(AgendaError::InvalidInterval(format!(
                    "padding must not be negative, got {} minutes",
                    padding.num_minutes()
                )));
            }
        }

        let mut unique = Vec::with_capacity(resources.len());
        for id in resources {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        Ok(Self {
            horizon,
            duration,
            padding,
            events,
            resources: unique,
            hours,
        })
    }

    pub fn horizon(&self) -> &TimeRange {
        &self.horizon
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn padding(&self) -> Option<Duration> {
        self.padding
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    /// Compute every bookable range in the horizon.
    ///
    /// Without resources, each slot is untracked. With resources, each slot
    /// lists the resources free for it, and the list is sorted by start, then
    /// end.
    pub fn calculate(&self) -> Vec<BookableTimeRange> {
        let ranges = if self.resources.is_empty() {
            untracked_ranges(self.slots_for(Scope::Untracked))
        } else {
            merge_resource_slots(
                self.resources
                    .iter()
                    .map(|&id| (id, self.slots_for(Scope::Resource(id)))),
            )
        };

        debug!(
            horizon = %self.horizon,
            resources = self.resources.len(),
            found = ranges.len(),
            "calculated bookable ranges"
        );
        ranges
    }

    /// The slots of a single search run.
    pub fn slots_for(&self, scope: Scope) -> Vec<TimeRange> {
        let obstacles = obstacles_for(&self.events, scope);
        let slots = find_slots(
            &self.horizon,
            self.duration,
            self.padding,
            &self.hours,
            &obstacles,
        );
        debug!(?scope, obstacles = obstacles.len(), slots = slots.len(), "search run");
        slots
    }
}
