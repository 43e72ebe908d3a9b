//! Error types for agenda-engine operations.
//!
//! Every variant is raised while values or configuration are being
//! constructed. The slot search itself never fails once it has a validated
//! [`AgendaCalculator`](crate::AgendaCalculator).

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    /// The slot duration is not positive and strictly below 24 hours, or the
    /// padding is negative.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// A working-range list has a window spanning two days, windows on
    /// different days, overlapping windows, or a malformed date key.
    #[error("Invalid range set: {0}")]
    InvalidRangeSet(String),

    /// The resolver was asked for the windows of a date it reports as closed.
    #[error("No working hours for {0}")]
    MissingWorkingHours(NaiveDate),

    #[error("Invalid resource id: {0}")]
    InvalidResourceId(i64),

    /// Resource membership was queried on a range built without resource
    /// tracking.
    #[error("Resources are not tracked on this range")]
    ResourcesNotTracked,

    #[error("Invalid time range: end {end} is not after start {start}")]
    InvalidTimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid weekday: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(u8),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The configuration document was not valid JSON for [`AgendaConfig`](crate::AgendaConfig).
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
