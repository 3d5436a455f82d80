//! Headway turns a raw GTFS feed for one agency into a cleaned,
//! direction-labeled dataset ready for a rider-facing app.

pub mod clean;
pub mod direction;
pub mod engine;
pub mod gtfs;
pub mod policy;
pub mod shared;

pub mod prelude {
    pub use crate::clean::{CleanOverrides, CleanRules, LabelCleaner, Rule, RuleSet};
    pub use crate::direction::{Direction, DirectionSpec, Pattern, SplitLabels};
    pub use crate::engine::{
        ColorTable, Dataset, Engine, EquivalenceTable, ProcessError, Route, Stop, StopVisit, Trip,
    };
    pub use crate::gtfs::{Feed, FeedLoader};
    pub use crate::policy::{ActiveServiceSet, AgencyPolicy, ServiceWindow};
}
