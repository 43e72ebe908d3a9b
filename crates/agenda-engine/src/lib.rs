//! # agenda-engine
//!
//! Bookable slot search for calendars with business hours.
//!
//! Given a horizon, a fixed slot duration, optional padding, weekly working
//! hours, date-specific overrides, closures, pre-existing events and an
//! optional set of interchangeable resources, the engine answers: which
//! slots can a new event be booked into, and on which resources?
//!
//! ## Modules
//!
//! - [`range`] — `TimeRange`, `Event` and `BookableTimeRange` value types
//! - [`cursor`] — the fixed-duration stepping window used by the search
//! - [`hours`] — business-hours resolution (weekly, special, festive)
//! - [`search`] — the forward slot search for one resource
//! - [`merge`] — merging per-resource slots into annotated ranges
//! - [`calculator`] — validated calculation entry point
//! - [`builder`] — fluent `Agenda` builder
//! - [`config`] — JSON configuration document and output rendering
//! - [`error`] — Error types

pub mod builder;
pub mod calculator;
pub mod config;
pub mod cursor;
pub mod error;
pub mod hours;
pub mod merge;
pub mod range;
pub mod search;

pub use builder::Agenda;
pub use calculator::AgendaCalculator;
pub use config::{render_ranges, AgendaConfig, RangeReport};
pub use cursor::TimeRangeInterval;
pub use error::AgendaError;
pub use hours::BusinessHours;
pub use range::{BookableTimeRange, Event, ResourceId, Resources, TimeRange};
pub use search::{find_slots, Scope};
