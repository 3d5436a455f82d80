use crate::gtfs::models::{GtfsCalendar, GtfsCalendarDate};
use crate::shared::date::parse_service_date;
use chrono::{Datelike, NaiveDate, Weekday};
use std::{cmp, collections::HashSet, sync::Arc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("service {service_id}: invalid service date {raw:?}")]
    InvalidDate { service_id: String, raw: String },
}

/// The date range trips have to be in service for to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ServiceWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The service ids that run at least one day inside the window.
/// Built once from the calendar tables before any filtering starts and
/// never mutated after; every keep/drop predicate borrows it.
#[derive(Debug, Clone, Default)]
pub struct ActiveServiceSet {
    ids: HashSet<Arc<str>>,
}

impl ActiveServiceSet {
    pub fn build(
        window: &ServiceWindow,
        calendars: &[GtfsCalendar],
        calendar_dates: &[GtfsCalendarDate],
    ) -> Result<Self, ServiceError> {
        let mut ids: HashSet<Arc<str>> = HashSet::new();
        for calendar in calendars {
            let start = parse_date(&calendar.service_id, &calendar.start_date)?;
            let end = parse_date(&calendar.service_id, &calendar.end_date)?;
            let from = cmp::max(start, window.start);
            let until = cmp::min(end, window.end);
            let mut day = from;
            while day <= until {
                if runs_on(calendar, day.weekday()) {
                    ids.insert(calendar.service_id.as_str().into());
                    break;
                }
                let Some(next) = day.succ_opt() else { break };
                day = next;
            }
        }
        for exception in calendar_dates {
            // A removal exception never activates a service id.
            if exception.exception_type != 1 {
                continue;
            }
            let date = parse_date(&exception.service_id, &exception.date)?;
            if window.contains(date) {
                ids.insert(exception.service_id.as_str().into());
            }
        }
        Ok(Self { ids })
    }

    pub fn contains(&self, service_id: &str) -> bool {
        self.ids.contains(service_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn parse_date(service_id: &str, raw: &str) -> Result<NaiveDate, ServiceError> {
    parse_service_date(raw).ok_or_else(|| ServiceError::InvalidDate {
        service_id: service_id.to_string(),
        raw: raw.to_string(),
    })
}

fn runs_on(calendar: &GtfsCalendar, weekday: Weekday) -> bool {
    let flag = match weekday {
        Weekday::Mon => calendar.monday,
        Weekday::Tue => calendar.tuesday,
        Weekday::Wed => calendar.wednesday,
        Weekday::Thu => calendar.thursday,
        Weekday::Fri => calendar.friday,
        Weekday::Sat => calendar.saturday,
        Weekday::Sun => calendar.sunday,
    };
    flag == 1
}
