use std::{collections::HashMap, sync::Arc};

use crate::{
    clean::CleanOverrides,
    direction::DirectionSpec,
    engine::{ColorTable, EquivalenceTable},
    gtfs::models::{GtfsCalendar, GtfsCalendarDate, GtfsRoute, GtfsTrip},
};

mod prince_george;
mod service;
pub use prince_george::*;
pub use service::*;

/// GTFS route type for buses.
pub const ROUTE_TYPE_BUS: i32 = 3;

/// Everything the engine needs to know about one agency: which feed rows to
/// keep and the override tables the cleaning and classification stages run
/// on. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct AgencyPolicy {
    pub agency_id: Arc<str>,
    pub route_type: i32,
    pub window: ServiceWindow,
    pub colors: ColorTable,
    pub equivalences: EquivalenceTable,
    pub overrides: CleanOverrides,
    direction_specs: HashMap<u16, DirectionSpec>,
}

impl AgencyPolicy {
    pub fn new(agency_id: &str, window: ServiceWindow) -> Self {
        Self {
            agency_id: agency_id.into(),
            route_type: ROUTE_TYPE_BUS,
            window,
            colors: Default::default(),
            equivalences: Default::default(),
            overrides: Default::default(),
            direction_specs: Default::default(),
        }
    }

    pub fn with_route_type(mut self, route_type: i32) -> Self {
        self.route_type = route_type;
        self
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_equivalences(mut self, equivalences: EquivalenceTable) -> Self {
        self.equivalences = equivalences;
        self
    }

    pub fn with_overrides(mut self, overrides: CleanOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_direction_spec(mut self, route_id: u16, spec: DirectionSpec) -> Self {
        self.direction_specs.insert(route_id, spec);
        self
    }

    pub fn direction_spec(&self, route_id: u16) -> Option<&DirectionSpec> {
        self.direction_specs.get(&route_id)
    }

    /// Only rows belonging to the configured agency survive.
    pub fn keep_route(&self, route: &GtfsRoute) -> bool {
        route.agency_id.as_str() == &*self.agency_id
    }

    pub fn keep_calendar(&self, calendar: &GtfsCalendar, active: &ActiveServiceSet) -> bool {
        active.contains(&calendar.service_id)
    }

    pub fn keep_calendar_date(
        &self,
        calendar_date: &GtfsCalendarDate,
        active: &ActiveServiceSet,
    ) -> bool {
        active.contains(&calendar_date.service_id)
    }

    pub fn keep_trip(&self, trip: &GtfsTrip, active: &ActiveServiceSet) -> bool {
        active.contains(&trip.service_id)
    }
}
