use chrono::NaiveDate;
use headway::engine::ColorTable;
use headway::policy::{ServiceWindow, prince_george};

#[test]
fn feed_color_wins_unchanged() {
    let table = ColorTable::new([(1, "004B8D")]);
    let color = table.resolve(1, Some("FFFFFF")).unwrap();
    assert_eq!(&*color, "FFFFFF");
}

#[test]
fn empty_feed_color_falls_through_to_the_table() {
    let table = ColorTable::new([(1, "004B8D")]);
    let color = table.resolve(1, Some("")).unwrap();
    assert_eq!(&*color, "004B8D");
}

#[test]
fn unconfigured_route_has_no_color() {
    let table = ColorTable::new([(1, "004B8D")]);
    assert!(table.resolve(99, None).is_none());
}

#[test]
fn fallback_color_is_opt_in() {
    let table = ColorTable::new([(1, "004B8D")]).with_fallback("002C77");
    let color = table.resolve(99, None).unwrap();
    assert_eq!(&*color, "002C77");
}

#[test]
fn configured_table_resolves_every_known_route() {
    let window = ServiceWindow::new(
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
    );
    let policy = prince_george(window);
    for route_id in [1, 5, 10, 11, 12, 15, 16, 17, 18, 46, 47, 55, 88, 89, 91, 96, 97] {
        let color = policy.colors.resolve(route_id, None).unwrap();
        assert!(!color.is_empty());
    }
    assert!(policy.colors.resolve(2, None).is_none());
}
