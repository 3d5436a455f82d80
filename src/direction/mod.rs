use serde::{Serialize, Serializer};
use std::{fmt, sync::Arc};
use thiserror::Error;

mod order;
mod pattern;
pub use order::*;
pub use pattern::*;

/// One of the exactly two canonical travel directions of a route.
/// Serializes as the GTFS direction flag (0/1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    pub const fn id(self) -> u8 {
        match self {
            Self::Outbound => 0,
            Self::Inbound => 1,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Outbound),
            1 => Some(Self::Inbound),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

/// Display labels for the two halves of a split loop route
/// (e.g. "Clockwise" / "Counter Clockwise").
#[derive(Debug, Clone)]
pub struct SplitLabels {
    pub outbound: Arc<str>,
    pub inbound: Arc<str>,
}

impl SplitLabels {
    pub fn new(outbound: &str, inbound: &str) -> Self {
        Self {
            outbound: outbound.into(),
            inbound: inbound.into(),
        }
    }

    pub fn label(&self, direction: Direction) -> &Arc<str> {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Inbound => &self.inbound,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("stop sequence matches neither direction pattern")]
    Unmatched,
    #[error("stop sequence matches both direction patterns")]
    Ambiguous,
}

/// The static reference data for one route whose feed records do not
/// reliably tell its two directions apart. Loaded once at startup and never
/// mutated.
#[derive(Debug, Clone, Default)]
pub struct DirectionSpec {
    outbound: Pattern,
    inbound: Pattern,
    split_labels: Option<SplitLabels>,
}

impl DirectionSpec {
    pub fn new(outbound: Pattern, inbound: Pattern) -> Self {
        Self {
            outbound,
            inbound,
            split_labels: None,
        }
    }

    /// Marks the route as a shared-headsign loop: classified trips are
    /// re-grouped into one derived trip per direction, labelled with these
    /// strings instead of the raw headsign.
    pub fn with_split_labels(mut self, labels: SplitLabels) -> Self {
        self.split_labels = Some(labels);
        self
    }

    pub fn pattern(&self, direction: Direction) -> &Pattern {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Inbound => &self.inbound,
        }
    }

    pub fn split_labels(&self) -> Option<&SplitLabels> {
        self.split_labels.as_ref()
    }

    /// Assigns a trip to the single direction whose pattern its stop
    /// sequence aligns with. A sequence both patterns accept, or neither
    /// does, means the static patterns have drifted from the live feed;
    /// the classifier reports it instead of guessing.
    pub fn classify(&self, visits: &[Arc<str>]) -> Result<Direction, ClassifyError> {
        let outbound = self.outbound.aligns(visits);
        let inbound = self.inbound.aligns(visits);
        match (outbound, inbound) {
            (true, false) => Ok(Direction::Outbound),
            (false, true) => Ok(Direction::Inbound),
            (true, true) => Err(ClassifyError::Ambiguous),
            (false, false) => Err(ClassifyError::Unmatched),
        }
    }
}
