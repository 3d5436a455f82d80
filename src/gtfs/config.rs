#[derive(Debug)]
pub struct Config {
    pub agency_path: String,
    pub routes_path: String,
    pub stops_path: String,
    pub trips_path: String,
    pub stop_times_path: String,
    pub calendar_path: String,
    pub calendar_dates_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agency_path: "agency.txt".into(),
            routes_path: "routes.txt".into(),
            stops_path: "stops.txt".into(),
            trips_path: "trips.txt".into(),
            stop_times_path: "stop_times.txt".into(),
            calendar_path: "calendar.txt".into(),
            calendar_dates_path: "calendar_dates.txt".into(),
        }
    }
}
