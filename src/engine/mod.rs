use rayon::prelude::*;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    sync::Arc,
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, warn};

mod color;
mod headsign;
mod models;
pub use color::*;
pub use headsign::*;
pub use models::*;

use crate::{
    clean::LabelCleaner,
    direction::{
        ClassifyError, Direction, DirectionSpec, Pattern, SplitLabels, anchor_positions,
    },
    gtfs::{
        Feed,
        models::{GtfsRoute, GtfsStop, GtfsTrip},
    },
    policy::{ActiveServiceSet, AgencyPolicy, ServiceError},
};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("route {route_id}: id {raw:?} is not numeric")]
    InvalidRouteId { route_id: Arc<str>, raw: String },
    #[error("route {0}: id collides with another route after parsing")]
    DuplicateRouteId(u16),
    #[error("route {0}: no color in the feed and none configured")]
    MissingColor(u16),
    #[error("trip {trip_id}: stop time references unknown stop {stop_id}")]
    MissingStop {
        trip_id: Arc<str>,
        stop_id: Arc<str>,
    },
    #[error("route {route_id}, trip {trip_id}: no direction flag and no direction spec")]
    MissingDirection { route_id: u16, trip_id: Arc<str> },
    #[error("route {route_id}, trip {trip_id}: invalid direction flag {value}")]
    InvalidDirection {
        route_id: u16,
        trip_id: Arc<str>,
        value: u8,
    },
    #[error("route {route_id}, trip {trip_id}: {source}")]
    Unclassifiable {
        route_id: u16,
        trip_id: Arc<str>,
        source: ClassifyError,
    },
    #[error("route {route_id}, direction {direction}: cannot merge headsigns {labels:?}")]
    UnmergeableHeadsigns {
        route_id: u16,
        direction: Direction,
        labels: Vec<Arc<str>>,
    },
}

/// A kept trip before classification, with its stop visits in feed order.
struct RawTrip {
    id: Arc<str>,
    headsign: Option<String>,
    direction_flag: Option<u8>,
    visits: Vec<Arc<str>>,
    sequences: Vec<u32>,
}

/// Runs the full batch pass: filter the feed by the agency policy, clean
/// every label, classify every trip into a direction, and unify headsigns.
/// The first fatal error aborts the whole run; there is no partial output.
#[derive(Debug, Clone)]
pub struct Engine {
    policy: AgencyPolicy,
    cleaner: LabelCleaner,
}

impl Engine {
    pub fn new(policy: AgencyPolicy) -> Self {
        let cleaner = LabelCleaner::new(policy.overrides.clone());
        Self { policy, cleaner }
    }

    pub fn process(&self, feed: Feed) -> Result<Dataset, ProcessError> {
        let started = Instant::now();

        let active =
            ActiveServiceSet::build(&self.policy.window, &feed.calendars, &feed.calendar_dates)?;
        debug!("{} service ids active inside the window", active.len());

        let kept_routes: Vec<&GtfsRoute> = feed
            .routes
            .iter()
            .filter(|route| self.policy.keep_route(route))
            .collect();
        let (routes, route_ids) = self.build_routes(&kept_routes)?;
        debug!("Kept {} of {} routes", routes.len(), feed.routes.len());

        let kept_trips: Vec<&GtfsTrip> = feed
            .trips
            .iter()
            .filter(|trip| route_ids.contains_key(trip.route_id.as_str()))
            .filter(|trip| self.policy.keep_trip(trip, &active))
            .collect();
        debug!("Kept {} of {} trips", kept_trips.len(), feed.trips.len());

        let stop_map: HashMap<&str, &GtfsStop> = feed
            .stops
            .iter()
            .map(|stop| (stop.stop_id.as_str(), stop))
            .collect();
        let (mut visits, referenced) = collect_visits(&feed, &kept_trips, &stop_map)?;
        let stops = self.build_stops(&referenced, &stop_map);

        let mut groups: HashMap<u16, Vec<RawTrip>> = HashMap::new();
        for trip in &kept_trips {
            let route_id = route_ids[trip.route_id.as_str()];
            let (sequences, stop_ids): (Vec<u32>, Vec<Arc<str>>) = visits
                .remove(trip.trip_id.as_str())
                .unwrap_or_default()
                .into_iter()
                .unzip();
            groups.entry(route_id).or_default().push(RawTrip {
                id: trip.trip_id.as_str().into(),
                headsign: trip.trip_headsign.clone(),
                direction_flag: trip.direction_id,
                visits: stop_ids,
                sequences,
            });
        }
        let mut groups: Vec<(u16, Vec<RawTrip>)> = groups.into_iter().collect();
        groups.sort_by_key(|(route_id, _)| *route_id);

        let route_index: HashMap<u16, usize> = routes
            .iter()
            .enumerate()
            .map(|(index, route)| (route.id, index))
            .collect();

        // Each route only reads the shared policy tables, so routes
        // classify independently.
        let per_route: Vec<Vec<Trip>> = groups
            .into_par_iter()
            .map(|(route_id, trips)| {
                let route = &routes[route_index[&route_id]];
                self.classify_route(route, trips)
            })
            .collect::<Result<_, ProcessError>>()?;

        let mut trips: Vec<Trip> = per_route.into_iter().flatten().collect();
        trips.sort_by(|a, b| {
            (a.route_id, a.direction, &a.id).cmp(&(b.route_id, b.direction, &b.id))
        });

        debug!("Processing took {:?}", started.elapsed());
        Ok(Dataset {
            routes: routes.into(),
            stops: stops.into(),
            trips: trips.into(),
        })
    }

    fn build_routes(
        &self,
        kept: &[&GtfsRoute],
    ) -> Result<(Vec<Route>, HashMap<String, u16>), ProcessError> {
        let mut routes = Vec::with_capacity(kept.len());
        let mut route_ids: HashMap<String, u16> = HashMap::new();
        let mut seen: HashSet<u16> = HashSet::new();
        for route in kept {
            let numeric_source = route
                .route_short_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(&route.route_id);
            let id: u16 =
                numeric_source
                    .parse()
                    .map_err(|_| ProcessError::InvalidRouteId {
                        route_id: route.route_id.as_str().into(),
                        raw: numeric_source.to_string(),
                    })?;
            if !seen.insert(id) {
                return Err(ProcessError::DuplicateRouteId(id));
            }
            let color = self
                .policy
                .colors
                .resolve(id, route.route_color.as_deref())
                .ok_or(ProcessError::MissingColor(id))?;
            let long_name = self
                .cleaner
                .clean_route_long_name(route.route_long_name.as_deref().unwrap_or_default());
            routes.push(Route {
                id,
                short_name: numeric_source.into(),
                long_name: long_name.into(),
                color,
                route_type: self.policy.route_type,
            });
            route_ids.insert(route.route_id.clone(), id);
        }
        routes.sort_by_key(|route| route.id);
        Ok((routes, route_ids))
    }

    fn build_stops(
        &self,
        referenced: &BTreeSet<Arc<str>>,
        stop_map: &HashMap<&str, &GtfsStop>,
    ) -> Vec<Stop> {
        referenced
            .iter()
            .filter_map(|stop_id| {
                let stop = stop_map.get(&**stop_id)?;
                Some(Stop {
                    id: stop_id.clone(),
                    name: self.cleaner.clean_stop_name(&stop.stop_name).into(),
                })
            })
            .collect()
    }

    fn classify_route(
        &self,
        route: &Route,
        mut trips: Vec<RawTrip>,
    ) -> Result<Vec<Trip>, ProcessError> {
        trips.retain(|trip| {
            if trip.visits.is_empty() {
                warn!("Dropping trip {} with no stop times", trip.id);
                return false;
            }
            true
        });

        let spec = self.policy.direction_spec(route.id);
        let mut assigned: Vec<(RawTrip, Direction)> = Vec::with_capacity(trips.len());
        for trip in trips {
            let direction = match spec {
                Some(spec) => {
                    spec.classify(&trip.visits)
                        .map_err(|source| ProcessError::Unclassifiable {
                            route_id: route.id,
                            trip_id: trip.id.clone(),
                            source,
                        })?
                }
                None => match trip.direction_flag {
                    Some(flag) => {
                        Direction::from_id(flag).ok_or(ProcessError::InvalidDirection {
                            route_id: route.id,
                            trip_id: trip.id.clone(),
                            value: flag,
                        })?
                    }
                    None => {
                        return Err(ProcessError::MissingDirection {
                            route_id: route.id,
                            trip_id: trip.id.clone(),
                        });
                    }
                },
            };
            assigned.push((trip, direction));
        }

        if let Some(spec) = spec
            && let Some(labels) = spec.split_labels()
        {
            let distinct: HashSet<&str> = assigned
                .iter()
                .filter_map(|(trip, _)| trip.headsign.as_deref())
                .filter(|headsign| !headsign.is_empty())
                .collect();
            if distinct.len() <= 1 {
                return Ok(self.split_route(route, spec, labels, &assigned));
            }
        }

        let mut observed: HashMap<Direction, BTreeSet<Arc<str>>> = HashMap::new();
        for (trip, direction) in &assigned {
            if let Some(raw) = trip.headsign.as_deref() {
                let cleaned = self.cleaner.clean_trip_headsign(raw);
                if !cleaned.is_empty() {
                    observed
                        .entry(*direction)
                        .or_default()
                        .insert(cleaned.into());
                }
            }
        }
        let mut canonical: HashMap<Direction, Arc<str>> = HashMap::new();
        for direction in [Direction::Outbound, Direction::Inbound] {
            let Some(labels) = observed.get(&direction) else {
                continue;
            };
            match self.policy.equivalences.merge(route.id, labels) {
                Some(label) => {
                    canonical.insert(direction, label);
                }
                None => {
                    return Err(ProcessError::UnmergeableHeadsigns {
                        route_id: route.id,
                        direction,
                        labels: labels.iter().cloned().collect(),
                    });
                }
            }
        }

        let mut out = Vec::with_capacity(assigned.len());
        for (trip, direction) in assigned {
            let pattern = spec.map(|spec| spec.pattern(direction));
            let visits = order_visits(pattern, &trip);
            // Trips with no usable headsign fall back to the route name.
            let headsign = canonical
                .get(&direction)
                .cloned()
                .unwrap_or_else(|| route.long_name.clone());
            out.push(Trip {
                id: trip.id,
                route_id: route.id,
                direction,
                headsign,
                visits,
            });
        }
        Ok(out)
    }

    /// Re-groups a shared-headsign loop into one derived trip per
    /// direction, attaching every original stop visit to its assigned side.
    fn split_route(
        &self,
        route: &Route,
        spec: &DirectionSpec,
        labels: &SplitLabels,
        assigned: &[(RawTrip, Direction)],
    ) -> Vec<Trip> {
        let mut out = Vec::with_capacity(2);
        for direction in [Direction::Outbound, Direction::Inbound] {
            let pattern = spec.pattern(direction);
            let mut merged: BTreeMap<u32, Arc<str>> = BTreeMap::new();
            for (trip, assigned_direction) in assigned {
                if *assigned_direction != direction {
                    continue;
                }
                if let Some(anchored) = anchor_positions(pattern, &trip.visits) {
                    for (index, position) in anchored.iter().enumerate() {
                        merged
                            .entry(*position)
                            .or_insert_with(|| trip.visits[index].clone());
                    }
                }
            }
            if merged.is_empty() {
                continue;
            }
            let visits: Box<[StopVisit]> = merged
                .into_values()
                .enumerate()
                .map(|(index, stop_id)| StopVisit {
                    stop_id,
                    sequence: index as u32 + 1,
                })
                .collect();
            // Derived trips get synthetic ids: route id scaled by ten plus
            // the direction flag.
            let id: Arc<str> = (route.id as u32 * 10 + direction.id() as u32)
                .to_string()
                .into();
            out.push(Trip {
                id,
                route_id: route.id,
                direction,
                headsign: labels.label(direction).clone(),
                visits,
            });
        }
        out
    }
}

/// Sorts one trip's visits for display. With a canonical pattern the
/// anchored pattern positions decide; the feed sequence only breaks ties.
/// Without one the feed sequence is the order.
fn order_visits(pattern: Option<&Pattern>, trip: &RawTrip) -> Box<[StopVisit]> {
    let order: Vec<usize> = match pattern.and_then(|pattern| anchor_positions(pattern, &trip.visits))
    {
        Some(anchored) => {
            let mut indexes: Vec<usize> = (0..trip.visits.len()).collect();
            indexes.sort_by_key(|&index| (anchored[index], trip.sequences[index]));
            indexes
        }
        None => (0..trip.visits.len()).collect(),
    };
    order
        .into_iter()
        .enumerate()
        .map(|(display, index)| StopVisit {
            stop_id: trip.visits[index].clone(),
            sequence: display as u32 + 1,
        })
        .collect()
}

type TripVisits = HashMap<Arc<str>, Vec<(u32, Arc<str>)>>;

fn collect_visits(
    feed: &Feed,
    kept_trips: &[&GtfsTrip],
    stop_map: &HashMap<&str, &GtfsStop>,
) -> Result<(TripVisits, BTreeSet<Arc<str>>), ProcessError> {
    let kept_ids: HashSet<&str> = kept_trips.iter().map(|trip| trip.trip_id.as_str()).collect();
    let mut visits: TripVisits = HashMap::new();
    let mut referenced: BTreeSet<Arc<str>> = BTreeSet::new();
    for stop_time in &feed.stop_times {
        if !kept_ids.contains(stop_time.trip_id.as_str()) {
            continue;
        }
        if !stop_map.contains_key(stop_time.stop_id.as_str()) {
            return Err(ProcessError::MissingStop {
                trip_id: stop_time.trip_id.as_str().into(),
                stop_id: stop_time.stop_id.as_str().into(),
            });
        }
        let stop_id: Arc<str> = stop_time.stop_id.as_str().into();
        referenced.insert(stop_id.clone());
        visits
            .entry(stop_time.trip_id.as_str().into())
            .or_default()
            .push((stop_time.stop_sequence, stop_id));
    }
    for stop_times in visits.values_mut() {
        stop_times.sort_by_key(|(sequence, _)| *sequence);
    }
    Ok((visits, referenced))
}
