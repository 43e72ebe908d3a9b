//! Business-hours resolution: is a date open, and if so, when.
//!
//! Closure precedence, first match wins:
//!
//! 1. festive day → closed
//! 2. special working range for the date → open with those windows (an empty
//!    list is still open, just without usable time)
//! 3. weekly working range for the weekday → open with those windows
//! 4. otherwise → closed

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{AgendaError, Result};
use crate::range::TimeRange;

/// Validated weekly schedule, date overrides and festive days.
#[derive(Debug, Clone, Default)]
pub struct BusinessHours {
    /// Indexed by days from Sunday.
    weekly: [Option<Vec<TimeRange>>; 7],
    special: BTreeMap<NaiveDate, Vec<TimeRange>>,
    festive: BTreeSet<NaiveDate>,
}

impl BusinessHours {
    /// Validate and sort the weekly and special working ranges.
    ///
    /// # Errors
    /// Returns [`AgendaError::InvalidRangeSet`] when a list has a window that
    /// spans two days, windows on different days, or overlapping windows.
    pub fn new<W, S>(weekly: W, special: S) -> Result<Self>
    where
        W: IntoIterator<Item = (Weekday, Vec<TimeRange>)>,
        S: IntoIterator<Item = (NaiveDate, Vec<TimeRange>)>,
    {
        let mut hours = Self::default();

        for (weekday, ranges) in weekly {
            let ranges = validate_ranges(ranges, &format!("weekly {weekday}"))?;
            hours.weekly[weekday.num_days_from_sunday() as usize] = Some(ranges);
        }

        for (date, ranges) in special {
            let ranges = validate_ranges(ranges, &format!("special {date}"))?;
            hours.special.insert(date, ranges);
        }

        Ok(hours)
    }

    /// Dates closed regardless of any other configuration.
    pub fn with_festive_days<I>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.festive.extend(days);
        self
    }

    /// True when no booking can start on `date`.
    ///
    /// A date whose special range is an empty list is open, not closed.
    pub fn is_closed(&self, date: NaiveDate) -> bool {
        self.schedule_for(date).is_none()
    }

    /// The working windows of an open date, anchored on that date and sorted
    /// by start.
    ///
    /// # Errors
    /// Returns [`AgendaError::MissingWorkingHours`] for a closed date.
    pub fn working_ranges(&self, date: NaiveDate) -> Result<Vec<TimeRange>> {
        self.open_ranges(date).ok_or(AgendaError::MissingWorkingHours(date))
    }

    /// `None` when closed, otherwise the anchored windows.
    pub(crate) fn open_ranges(&self, date: NaiveDate) -> Option<Vec<TimeRange>> {
        self.schedule_for(date).map(|ranges| {
            ranges
                .iter()
                .map(|r| {
                    TimeRange::from_ordered(
                        date.and_time(r.start().time()),
                        date.and_time(r.end().time()),
                    )
                })
                .collect()
        })
    }

    fn schedule_for(&self, date: NaiveDate) -> Option<&[TimeRange]> {
        if self.festive.contains(&date) {
            return None;
        }
        if let Some(ranges) = self.special.get(&date) {
            return Some(ranges);
        }
        self.weekly[date.weekday().num_days_from_sunday() as usize].as_deref()
    }
}

/// Check a day's windows and return them sorted by start.
fn validate_ranges(mut ranges: Vec<TimeRange>, label: &str) -> Result<Vec<TimeRange>> {
    if ranges.is_empty() {
        return Ok(ranges);
    }
    let day = ranges[0].start().date();

    for range in &ranges {
        if !range.same_day() {
            return Err(AgendaError::InvalidRangeSet(format!(
                "{label}: range {range} spans two days"
            )));
        }
        if range.start().date() != day {
            return Err(AgendaError::InvalidRangeSet(format!(
                "{label}: range {range} is not on the same day as the others"
            )));
        }
    }

    ranges.sort_by_key(|r| r.start());

    // Sorted by start, so any overlap shows up between neighbours.
    if let Some(pair) = ranges.windows(2).find(|pair| pair[0].overlap(&pair[1])) {
        return Err(AgendaError::InvalidRangeSet(format!(
            "{label}: ranges {} and {} overlap",
            pair[0], pair[1]
        )));
    }

    Ok(ranges)
}
