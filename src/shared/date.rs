use chrono::NaiveDate;

/// Parses a GTFS `YYYYMMDD` service date.
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
}

#[test]
fn parse_valid_date() {
    let date = parse_service_date("20260115").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
}

#[test]
fn parse_rejects_dashes() {
    assert!(parse_service_date("2026-01-15").is_none());
}

#[test]
fn parse_rejects_short_input() {
    assert!(parse_service_date("202601").is_none());
}

#[test]
fn parse_rejects_bad_month() {
    assert!(parse_service_date("20261315").is_none());
}
