use crate::direction::Direction;
use serde::Serialize;
use std::sync::Arc;

/// A kept route after cleaning: the id is the numeric id parsed from the
/// feed, the color is always resolved, the long name is cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub id: u16,
    pub short_name: Arc<str>,
    pub long_name: Arc<str>,
    pub color: Arc<str>,
    pub route_type: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub id: Arc<str>,
    pub name: Arc<str>,
}

/// One stop call of a trip. Owned by its trip; `sequence` is the final
/// display order, renumbered from 1 after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopVisit {
    pub stop_id: Arc<str>,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    pub id: Arc<str>,
    pub route_id: u16,
    pub direction: Direction,
    pub headsign: Arc<str>,
    pub visits: Box<[StopVisit]>,
}

/// The cleaned, direction-labelled dataset handed to an external writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub routes: Box<[Route]>,
    pub stops: Box<[Stop]>,
    pub trips: Box<[Trip]>,
}
