use chrono::NaiveDate;
use headway::gtfs::models::{GtfsCalendar, GtfsCalendarDate, GtfsRoute, GtfsTrip};
use headway::policy::{ActiveServiceSet, AgencyPolicy, ServiceWindow};

fn window() -> ServiceWindow {
    // 2026-01-05 is a Monday.
    ServiceWindow::new(
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
    )
}

fn calendar(service_id: &str, weekdays: [u8; 7], start: &str, end: &str) -> GtfsCalendar {
    GtfsCalendar {
        service_id: service_id.to_string(),
        monday: weekdays[0],
        tuesday: weekdays[1],
        wednesday: weekdays[2],
        thursday: weekdays[3],
        friday: weekdays[4],
        saturday: weekdays[5],
        sunday: weekdays[6],
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

#[test]
fn weekday_calendar_inside_window_is_active() {
    let calendars = [calendar(
        "wk",
        [1, 1, 1, 1, 1, 0, 0],
        "20260101",
        "20261231",
    )];
    let active = ActiveServiceSet::build(&window(), &calendars, &[]).unwrap();
    assert!(active.contains("wk"));
    assert_eq!(active.len(), 1);
}

#[test]
fn weekend_only_calendar_misses_a_weekday_window() {
    let calendars = [calendar(
        "sat",
        [0, 0, 0, 0, 0, 1, 1],
        "20260101",
        "20261231",
    )];
    let active = ActiveServiceSet::build(&window(), &calendars, &[]).unwrap();
    assert!(!active.contains("sat"));
    assert!(active.is_empty());
}

#[test]
fn calendar_outside_window_is_inactive() {
    let calendars = [calendar(
        "old",
        [1, 1, 1, 1, 1, 1, 1],
        "20250101",
        "20250630",
    )];
    let active = ActiveServiceSet::build(&window(), &calendars, &[]).unwrap();
    assert!(!active.contains("old"));
}

#[test]
fn added_calendar_date_inside_window_activates() {
    let exceptions = [GtfsCalendarDate {
        service_id: "extra".to_string(),
        date: "20260107".to_string(),
        exception_type: 1,
    }];
    let active = ActiveServiceSet::build(&window(), &[], &exceptions).unwrap();
    assert!(active.contains("extra"));
}

#[test]
fn removed_calendar_date_never_activates() {
    let exceptions = [GtfsCalendarDate {
        service_id: "gone".to_string(),
        date: "20260107".to_string(),
        exception_type: 2,
    }];
    let active = ActiveServiceSet::build(&window(), &[], &exceptions).unwrap();
    assert!(!active.contains("gone"));
}

#[test]
fn policy_predicates_follow_the_active_set() {
    let calendars = [
        calendar("wk", [1, 1, 1, 1, 1, 0, 0], "20260101", "20261231"),
        calendar("old", [1, 1, 1, 1, 1, 0, 0], "20250101", "20250630"),
    ];
    let active = ActiveServiceSet::build(&window(), &calendars, &[]).unwrap();
    let policy = AgencyPolicy::new("9", window());

    assert!(policy.keep_calendar(&calendars[0], &active));
    assert!(!policy.keep_calendar(&calendars[1], &active));

    let exception = GtfsCalendarDate {
        service_id: "wk".to_string(),
        date: "20260107".to_string(),
        exception_type: 2,
    };
    assert!(policy.keep_calendar_date(&exception, &active));

    let trip = GtfsTrip {
        route_id: "pg-1".to_string(),
        service_id: "old".to_string(),
        trip_id: "t1".to_string(),
        trip_headsign: None,
        trip_short_name: None,
        direction_id: Some(0),
        block_id: None,
        shape_id: None,
    };
    assert!(!policy.keep_trip(&trip, &active));

    let foreign = GtfsRoute {
        route_id: "x-1".to_string(),
        agency_id: "7".to_string(),
        route_short_name: Some("1".to_string()),
        route_long_name: None,
        route_desc: None,
        route_type: 3,
        route_color: None,
        route_text_color: None,
    };
    assert!(!policy.keep_route(&foreign));
}

#[test]
fn malformed_service_date_is_fatal() {
    let calendars = [calendar(
        "bad",
        [1, 1, 1, 1, 1, 1, 1],
        "2026-01-01",
        "20261231",
    )];
    assert!(ActiveServiceSet::build(&window(), &calendars, &[]).is_err());
}
