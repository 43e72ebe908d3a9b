//! The fixed-duration window the slot search steps through a horizon.

use chrono::{Duration, NaiveDateTime};

use crate::range::TimeRange;

/// A `duration`-long window plus the padding applied when stepping.
///
/// Every move of the search is a [`rebase`](Self::rebase), [`next`](Self::next)
/// or [`previous`](Self::previous); none of them change the duration or padding.
/// Moves and bounds that fall outside the representable date range give `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeInterval {
    start: NaiveDateTime,
    duration: Duration,
    padding: Duration,
}

impl TimeRangeInterval {
    /// `duration` must be positive; callers validate it beforehand.
    pub fn new(start: NaiveDateTime, duration: Duration, padding: Option<Duration>) -> Self {
        Self {
            start,
            duration,
            padding: padding.unwrap_or_else(Duration::zero),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.start.checked_add_signed(self.duration)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn padding(&self) -> Duration {
        self.padding
    }

    pub fn same_day(&self) -> bool {
        self.end().is_some_and(|end| end.date() == self.start.date())
    }

    /// The plain range covered by the window.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.end().map(|end| TimeRange::from_ordered(self.start, end))
    }

    /// Advance by `duration + padding`.
    pub fn next(&self) -> Option<Self> {
        self.end()
            .and_then(|end| end.checked_add_signed(self.padding))
            .map(|start| self.rebase(start))
    }

    /// Retreat by `duration + padding`.
    pub fn previous(&self) -> Option<Self> {
        self.start
            .checked_sub_signed(self.duration)
            .and_then(|start| start.checked_sub_signed(self.padding))
            .map(|start| self.rebase(start))
    }

    /// Same duration and padding, new start.
    pub fn rebase(&self, start: NaiveDateTime) -> Self {
        Self { start, ..*self }
    }
}
