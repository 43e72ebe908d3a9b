//! Tests for the interval value types and the search cursor.

use agenda_engine::{AgendaError, BookableTimeRange, Event, TimeRange, TimeRangeInterval};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn tr(start: &str, end: &str) -> TimeRange {
    TimeRange::new(at(start), at(end)).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── TimeRange ───────────────────────────────────────────────────────────────

#[test]
fn end_must_be_after_start() {
    let err = TimeRange::new(at("2015-09-07 10:00"), at("2015-09-07 10:00")).unwrap_err();
    assert!(matches!(err, AgendaError::InvalidTimeRange { .. }));

    let err = TimeRange::new(at("2015-09-07 11:00"), at("2015-09-07 10:00")).unwrap_err();
    assert!(matches!(err, AgendaError::InvalidTimeRange { .. }));
}

#[test]
fn contains_is_inclusive_at_both_ends() {
    let outer = tr("2015-09-07 09:00", "2015-09-07 12:00");

    assert!(outer.contains(&outer));
    assert!(outer.contains(&tr("2015-09-07 09:00", "2015-09-07 10:00")));
    assert!(outer.contains(&tr("2015-09-07 11:00", "2015-09-07 12:00")));
    assert!(!outer.contains(&tr("2015-09-07 11:30", "2015-09-07 12:30")));
    assert!(!outer.contains(&tr("2015-09-07 08:59", "2015-09-07 10:00")));
}

#[test]
fn touching_ranges_do_not_overlap() {
    let a = tr("2015-09-07 09:00", "2015-09-07 10:00");
    let b = tr("2015-09-07 10:00", "2015-09-07 11:00");
    let c = tr("2015-09-07 09:30", "2015-09-07 10:30");

    assert!(!a.overlap(&b));
    assert!(!b.overlap(&a));
    assert!(a.overlap(&c));
    assert!(c.overlap(&b));
}

#[test]
fn equal_compares_both_bounds() {
    let a = tr("2015-09-07 09:00", "2015-09-07 10:00");
    assert!(a.equal(&tr("2015-09-07 09:00", "2015-09-07 10:00")));
    assert!(!a.equal(&tr("2015-09-07 09:00", "2015-09-07 10:01")));
}

#[test]
fn same_day_detects_midnight_crossing() {
    assert!(tr("2015-09-07 09:00", "2015-09-07 23:59").same_day());
    assert!(!tr("2015-09-07 23:00", "2015-09-08 00:00").same_day());
}

#[test]
fn with_date_keeps_time_of_day() {
    let window = TimeRange::from_times(
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
    )
    .unwrap();

    let anchored = window.with_date(date("2016-03-30")).unwrap();
    assert_eq!(anchored, tr("2016-03-30 09:00", "2016-03-30 12:30"));
    assert_eq!(anchored.duration(), Duration::minutes(210));
}

#[test]
fn with_dates_fails_when_order_flips() {
    let window = tr("2015-09-07 22:00", "2015-09-08 02:00");

    let moved = window.with_dates(date("2015-09-10"), date("2015-09-11")).unwrap();
    assert_eq!(moved, tr("2015-09-10 22:00", "2015-09-11 02:00"));

    let err = window.with_date(date("2015-09-10")).unwrap_err();
    assert!(matches!(err, AgendaError::InvalidTimeRange { .. }));
}

#[test]
fn display_shows_both_bounds() {
    let range = tr("2015-09-07 09:00", "2015-09-07 10:00");
    assert_eq!(range.to_string(), "2015-09-07 09:00:00 - 2015-09-07 10:00:00");
}

// ── Event ───────────────────────────────────────────────────────────────────

#[test]
fn event_resource_is_optional() {
    let range = tr("2015-09-07 09:00", "2015-09-07 10:00");
    assert_eq!(Event::new(range).resource(), None);
    assert_eq!(Event::on_resource(range, 4).resource(), Some(4));
    assert_eq!(Event::on_resource(range, 4).range(), &range);
}

// ── BookableTimeRange ───────────────────────────────────────────────────────

#[test]
fn untracked_range_rejects_resource_queries() {
    let mut range = BookableTimeRange::untracked(tr("2015-09-07 09:00", "2015-09-07 10:00"));

    assert!(!range.is_tracked());
    assert!(matches!(range.resource_ids(), Err(AgendaError::ResourcesNotTracked)));
    assert!(matches!(range.has_resource(1), Err(AgendaError::ResourcesNotTracked)));
    assert!(matches!(range.push_resource(1), Err(AgendaError::ResourcesNotTracked)));
    assert!(matches!(range.remove_resource(1), Err(AgendaError::ResourcesNotTracked)));
}

#[test]
fn tracked_range_with_no_resources_is_not_untracked() {
    let range = BookableTimeRange::tracked(tr("2015-09-07 09:00", "2015-09-07 10:00"), []);
    assert!(range.is_tracked());
    assert_eq!(range.resource_ids().unwrap(), Vec::<u32>::new());
}

#[test]
fn tracked_range_deduplicates_and_sorts_ids() {
    let mut range =
        BookableTimeRange::tracked(tr("2015-09-07 09:00", "2015-09-07 10:00"), [3, 1, 3, 2]);
    assert_eq!(range.resource_ids().unwrap(), vec![1, 2, 3]);

    range.push_resource(2).unwrap();
    range.push_resource(7).unwrap();
    assert_eq!(range.resource_ids().unwrap(), vec![1, 2, 3, 7]);

    range.remove_resource(1).unwrap();
    assert!(!range.has_resource(1).unwrap());
    assert!(range.has_resource(7).unwrap());
}

#[test]
fn bookable_range_serializes_resources_only_when_tracked() {
    let window = tr("2015-09-07 09:00", "2015-09-07 10:00");

    let untracked = serde_json::to_value(BookableTimeRange::untracked(window)).unwrap();
    assert_eq!(
        untracked,
        serde_json::json!({"start": "2015-09-07T09:00:00", "end": "2015-09-07T10:00:00"})
    );

    let tracked = serde_json::to_value(BookableTimeRange::tracked(window, [2, 1])).unwrap();
    assert_eq!(
        tracked,
        serde_json::json!({
            "start": "2015-09-07T09:00:00",
            "end": "2015-09-07T10:00:00",
            "resources": [1, 2]
        })
    );
}

#[test]
fn bookable_range_display_lists_resources() {
    let window = tr("2015-09-07 09:00", "2015-09-07 10:00");
    assert_eq!(
        BookableTimeRange::tracked(window, [2, 1]).to_string(),
        "2015-09-07 09:00:00 - 2015-09-07 10:00:00 [1, 2]"
    );
    assert_eq!(
        BookableTimeRange::untracked(window).to_string(),
        "2015-09-07 09:00:00 - 2015-09-07 10:00:00"
    );
}

// ── TimeRangeInterval ───────────────────────────────────────────────────────

#[test]
fn cursor_steps_by_duration_plus_padding() {
    let cursor = TimeRangeInterval::new(
        at("2015-09-07 09:00"),
        Duration::minutes(60),
        Some(Duration::minutes(5)),
    );
    assert_eq!(cursor.time_range(), Some(tr("2015-09-07 09:00", "2015-09-07 10:00")));

    let next = cursor.next().unwrap();
    assert_eq!(next.time_range(), Some(tr("2015-09-07 10:05", "2015-09-07 11:05")));
    assert_eq!(next.previous(), Some(cursor));
}

#[test]
fn cursor_without_padding_steps_by_duration() {
    let cursor = TimeRangeInterval::new(at("2015-09-07 09:00"), Duration::minutes(30), None);
    assert_eq!(cursor.padding(), Duration::zero());
    assert_eq!(cursor.next().unwrap().start(), at("2015-09-07 09:30"));
    assert_eq!(cursor.previous().unwrap().start(), at("2015-09-07 08:30"));
}

#[test]
fn rebase_keeps_duration_and_padding() {
    let cursor = TimeRangeInterval::new(
        at("2015-09-07 09:00"),
        Duration::minutes(45),
        Some(Duration::minutes(10)),
    );
    let moved = cursor.rebase(at("2015-09-07 23:30"));

    assert_eq!(moved.duration(), Duration::minutes(45));
    assert_eq!(moved.padding(), Duration::minutes(10));
    assert_eq!(moved.end(), Some(at("2015-09-08 00:15")));
    assert!(!moved.same_day());
}

#[test]
fn cursor_past_the_last_representable_instant_has_no_range() {
    let late = NaiveDate::MAX.and_hms_opt(23, 30, 0).unwrap();
    let cursor = TimeRangeInterval::new(late, Duration::minutes(60), None);

    assert_eq!(cursor.end(), None);
    assert_eq!(cursor.time_range(), None);
    assert_eq!(cursor.next(), None);
    assert!(!cursor.same_day());

    let early = NaiveDate::MIN.and_hms_opt(0, 30, 0).unwrap();
    let cursor = TimeRangeInterval::new(early, Duration::minutes(60), None);
    assert_eq!(cursor.previous(), None);
}
