//! JSON configuration document and output rendering.
//!
//! The document mirrors the [`Agenda`] builder with plain strings and numbers:
//!
//! ```json
//! {
//!   "horizon": { "start": "2015-09-07", "end": "2015-09-14 13:30" },
//!   "duration_minutes": 60,
//!   "padding_minutes": 5,
//!   "weekly_hours": { "1": [{ "start": "09:00", "end": "12:00" }] },
//!   "special_hours": { "2015-09-10": [{ "start": "10:00", "end": "12:00" }] },
//!   "festive_days": ["2015-09-08"],
//!   "events": [{ "start": "2015-09-07 10:00", "end": "2015-09-07 11:00", "resource": 1 }],
//!   "resource_ids": [1, 2],
//!   "timezone": "Europe/Rome"
//! }
//! ```
//!
//! Weekday keys run from `0` (Sunday) to `6` (Saturday).

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::builder::Agenda;
use crate::error::{AgendaError, Result};
use crate::range::{BookableTimeRange, Event, ResourceId, Resources, TimeRange};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// A `{start, end}` pair of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub start: String,
    pub end: String,
    /// Absent for a global event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaConfig {
    #[serde(default)]
    pub horizon: Option<RangeConfig>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub padding_minutes: Option<i64>,
    #[serde(default)]
    pub events: Vec<EventConfig>,
    #[serde(default)]
    pub resource_ids: Vec<i64>,
    #[serde(default)]
    pub weekly_hours: BTreeMap<u8, Vec<RangeConfig>>,
    #[serde(default)]
    pub special_hours: BTreeMap<String, Vec<RangeConfig>>,
    #[serde(default)]
    pub festive_days: Vec<String>,
    /// IANA zone the naive timestamps are read in, used only for output.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl AgendaConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse every string and load the result into a builder.
    ///
    /// # Errors
    /// - [`AgendaError::InvalidTimestamp`] for an unparseable date or time
    /// - [`AgendaError::InvalidTimeRange`] for a range whose end is not after its start
    /// - [`AgendaError::InvalidWeekday`] for a weekday key above 6
    /// - [`AgendaError::InvalidRangeSet`] for a special key that is not `YYYY-MM-DD`
    /// - [`AgendaError::InvalidResourceId`] for a negative event resource
    /// - [`AgendaError::InvalidInterval`] for minutes too large to represent
    pub fn into_agenda(&self) -> Result<Agenda> {
        let mut agenda = Agenda::new();

        if let Some(horizon) = &self.horizon {
            agenda = agenda.horizon(TimeRange::new(
                parse_datetime(&horizon.start)?,
                parse_datetime(&horizon.end)?,
            )?);
        }
        if let Some(minutes) = self.duration_minutes {
            agenda = agenda.duration(minutes_to_duration(minutes, "duration")?);
        }
        let padding = self
            .padding_minutes
            .map(|minutes| minutes_to_duration(minutes, "padding"))
            .transpose()?;
        agenda = agenda.padding(padding);

        let events = self
            .events
            .iter()
            .map(parse_event)
            .collect::<Result<Vec<_>>>()?;
        agenda = agenda
            .events(events)
            .resource_ids(self.resource_ids.iter().copied());

        for (&key, ranges) in &self.weekly_hours {
            agenda = agenda.weekly_hours(weekday_from_sunday(key)?, parse_day_ranges(ranges)?);
        }
        for (key, ranges) in &self.special_hours {
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|_| {
                AgendaError::InvalidRangeSet(format!(
                    "special range key '{key}' is not a YYYY-MM-DD date"
                ))
            })?;
            agenda = agenda.special_hours(date, parse_day_ranges(ranges)?);
        }

        let festive = self
            .festive_days
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(agenda.festive_days(festive))
    }

    /// The configured output zone, if any.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| AgendaError::InvalidTimezone(name.to_string()))
            })
            .transpose()
    }
}

/// One bookable range as written by [`render_ranges`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeReport {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceId>>,
}

/// Format bookable ranges for output.
///
/// Without a zone, timestamps are written as `YYYY-MM-DDTHH:MM:SS`. With a
/// zone, they are read as local time there and written as RFC 3339.
///
/// # Errors
/// Returns [`AgendaError::InvalidTimestamp`] for a local time that does not
/// exist in `timezone` (a DST gap).
pub fn render_ranges(
    ranges: &[BookableTimeRange],
    timezone: Option<Tz>,
) -> Result<Vec<RangeReport>> {
    ranges
        .iter()
        .map(|range| {
            Ok(RangeReport {
                start: format_datetime(range.start(), timezone)?,
                end: format_datetime(range.end(), timezone)?,
                resources: match range.resources() {
                    Resources::Tracked(ids) => Some(ids.iter().copied().collect()),
                    Resources::Untracked => None,
                },
            })
        })
        .collect()
}

fn format_datetime(dt: NaiveDateTime, timezone: Option<Tz>) -> Result<String> {
    match timezone {
        None => Ok(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Some(tz) => tz
            .from_local_datetime(&dt)
            .earliest()
            .map(|local| local.to_rfc3339())
            .ok_or_else(|| {
                AgendaError::InvalidTimestamp(format!("{dt} does not exist in {tz}"))
            }),
    }
}

fn parse_event(config: &EventConfig) -> Result<Event> {
    let range = TimeRange::new(parse_datetime(&config.start)?, parse_datetime(&config.end)?)?;
    match config.resource {
        None => Ok(Event::new(range)),
        Some(id) => {
            let id = ResourceId::try_from(id).map_err(|_| AgendaError::InvalidResourceId(id))?;
            Ok(Event::on_resource(range, id))
        }
    }
}

fn minutes_to_duration(minutes: i64, field: &str) -> Result<Duration> {
    Duration::try_minutes(minutes).ok_or_else(|| {
        AgendaError::InvalidInterval(format!("{field} of {minutes} minutes is out of range"))
    })
}

fn parse_day_ranges(ranges: &[RangeConfig]) -> Result<Vec<TimeRange>> {
    ranges
        .iter()
        .map(|r| TimeRange::from_times(parse_time(&r.start)?, parse_time(&r.end)?))
        .collect()
}

/// Accepts full timestamps and bare dates (read as midnight).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| AgendaError::InvalidTimestamp(s.to_string()))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AgendaError::InvalidTimestamp(s.to_string()))
}

pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AgendaError::InvalidTimestamp(s.to_string()))
}

/// `0` is Sunday, `6` is Saturday.
pub fn weekday_from_sunday(day: u8) -> Result<Weekday> {
    match day {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(AgendaError::InvalidWeekday(other)),
    }
}
