//! Fluent builder that gathers the calculation inputs before validation.

use chrono::{Duration, NaiveDate, Weekday};

use crate::calculator::AgendaCalculator;
use crate::error::{AgendaError, Result};
use crate::hours::BusinessHours;
use crate::range::{BookableTimeRange, Event, ResourceId, TimeRange};

/// Collects the inputs of a calculation. Nothing is checked until
/// [`build`](Self::build).
///
/// ```rust
/// use agenda_engine::{Agenda, TimeRange};
/// use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
///
/// let day = NaiveDate::from_ymd_opt(2015, 9, 7).unwrap();
/// let horizon = TimeRange::new(
///     day.and_hms_opt(0, 0, 0).unwrap(),
///     day.and_hms_opt(23, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let morning = TimeRange::from_times(
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// let slots = Agenda::new()
///     .horizon(horizon)
///     .duration(Duration::minutes(60))
///     .weekly_hours(Weekday::Mon, vec![morning])
///     .calculate()
///     .unwrap();
/// assert_eq!(slots.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    horizon: Option<TimeRange>,
    duration: Option<Duration>,
    padding: Option<Duration>,
    events: Vec<Event>,
    resource_ids: Vec<i64>,
    weekly: Vec<(Weekday, Vec<TimeRange>)>,
    special: Vec<(NaiveDate, Vec<TimeRange>)>,
    festive: Vec<NaiveDate>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    /// The window searched for slots. Required.
    pub fn horizon(mut self, horizon: TimeRange) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// The length of every slot. Required.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Gap kept after each slot and after each blocking event.
    pub fn padding(mut self, padding: Option<Duration>) -> Self {
        self.padding = padding;
        self
    }

    pub fn events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        self.events = events.into_iter().collect();
        self
    }

    /// Resources to search. Leaving this empty turns resource tracking off.
    pub fn resource_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.resource_ids = ids.into_iter().collect();
        self
    }

    /// Working windows for a weekday. Calling it again for the same weekday
    /// replaces the earlier windows.
    pub fn weekly_hours(mut self, weekday: Weekday, ranges: Vec<TimeRange>) -> Self {
        self.weekly.retain(|(day, _)| *day != weekday);
        self.weekly.push((weekday, ranges));
        self
    }

    /// Working windows for one date, replacing its weekly windows.
    pub fn special_hours(mut self, date: NaiveDate, ranges: Vec<TimeRange>) -> Self {
        self.special.retain(|(day, _)| *day != date);
        self.special.push((date, ranges));
        self
    }

    pub fn festive_days<I>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.festive = days.into_iter().collect();
        self
    }

    /// Validate everything and produce the calculator.
    ///
    /// # Errors
    /// - [`AgendaError::MissingField`] without a horizon or duration
    /// - [`AgendaError::InvalidResourceId`] for a negative or oversized id
    /// - [`AgendaError::InvalidRangeSet`] for malformed working ranges
    /// - [`AgendaError::InvalidInterval`] for a bad duration or padding
    pub fn build(self) -> Result<AgendaCalculator> {
        let horizon = self.horizon.ok_or(AgendaError::MissingField("horizon"))?;
        let duration = self.duration.ok_or(AgendaError::MissingField("duration"))?;

        let resources = self
            .resource_ids
            .into_iter()
            .map(|id| ResourceId::try_from(id).map_err(|_| AgendaError::InvalidResourceId(id)))
            .collect::<Result<Vec<_>>>()?;

        let hours = BusinessHours::new(self.weekly, self.special)?
            .with_festive_days(self.festive);

        AgendaCalculator::new(horizon, duration, self.padding, self.events, resources, hours)
    }

    /// Build and run the calculation in one step.
    pub fn calculate(self) -> Result<Vec<BookableTimeRange>> {
        Ok(self.build()?.calculate())
    }
}
