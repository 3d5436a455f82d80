use chrono::NaiveDate;
use headway::clean::LabelCleaner;
use headway::policy::{ServiceWindow, prince_george};

fn window() -> ServiceWindow {
    ServiceWindow::new(
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
    )
}

fn cleaner() -> LabelCleaner {
    LabelCleaner::new(prince_george(window()).overrides.clone())
}

#[test]
fn headsign_strips_leading_label_and_via() {
    let cleaner = cleaner();
    assert_eq!(cleaner.clean_trip_headsign("Heritage - Via Rainbow"), "Rainbow");
}

#[test]
fn headsign_keeps_destination_and_casing_overrides() {
    let cleaner = cleaner();
    assert_eq!(
        cleaner.clean_trip_headsign("Heritage - Via 5th & Ospika"),
        "5th & Ospika"
    );
}

#[test]
fn headsign_keeps_destination_after_to() {
    let cleaner = cleaner();
    assert_eq!(cleaner.clean_trip_headsign("UNBC to Downtown"), "Downtown");
}

#[test]
fn headsign_drops_leading_route_number() {
    let cleaner = cleaner();
    assert_eq!(cleaner.clean_trip_headsign("15 Westgate Mall"), "Westgate Mall");
}

#[test]
fn headsign_applies_acronym_casing_late() {
    let cleaner = cleaner();
    assert_eq!(cleaner.clean_trip_headsign("unbc exchange"), "UNBC Exch");
}

#[test]
fn stop_name_normalizes_connectors() {
    let cleaner = cleaner();
    assert_eq!(
        cleaner.clean_stop_name("Douglas St at 15th Ave"),
        "Douglas St @ 15th Ave"
    );
    assert_eq!(
        cleaner.clean_stop_name("5th and Tabor"),
        "5th & Tabor"
    );
}

#[test]
fn stop_name_strips_leading_bound_and_abbreviates() {
    let cleaner = cleaner();
    assert_eq!(
        cleaner.clean_stop_name("Eastbound Victoria Street"),
        "Victoria St"
    );
}

#[test]
fn route_long_name_normalizes_slashes_and_street_types() {
    let cleaner = cleaner();
    assert_eq!(
        cleaner.clean_route_long_name("Heritage / College Heights"),
        "Heritage/College Hts"
    );
}

#[test]
fn pipelines_are_idempotent() {
    let cleaner = cleaner();
    let inputs = [
        "Heritage - Via Rainbow",
        "Heritage - Via 5th & Ospika",
        "  eastbound   DOUGLAS st  at 5TH ave ",
        "UNBC Exchange to Downtown",
        "Westgate ( Mall )",
        "10th and Central",
        "",
    ];
    for input in inputs {
        let headsign = cleaner.clean_trip_headsign(input);
        assert_eq!(cleaner.clean_trip_headsign(&headsign), headsign);

        let stop = cleaner.clean_stop_name(input);
        assert_eq!(cleaner.clean_stop_name(&stop), stop);

        let route = cleaner.clean_route_long_name(input);
        assert_eq!(cleaner.clean_route_long_name(&route), route);
    }
}
