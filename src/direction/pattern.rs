use std::{collections::HashMap, sync::Arc};

/// The canonical ordered stop sequence for one travel direction of a route.
/// A stop id may occur more than once (loop routes pass a terminus twice),
/// so every occurrence keeps its own position.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    stops: Box<[Arc<str>]>,
    positions: HashMap<Arc<str>, Box<[u32]>>,
}

impl Pattern {
    pub fn new<I, S>(stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let stops: Box<[Arc<str>]> = stops.into_iter().map(Into::into).collect();
        let mut positions: HashMap<Arc<str>, Vec<u32>> = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            positions.entry(stop.clone()).or_default().push(i as u32);
        }
        let positions = positions
            .into_iter()
            .map(|(stop, occurrences)| (stop, occurrences.into()))
            .collect();
        Self { stops, positions }
    }

    pub fn stops(&self) -> &[Arc<str>] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All positions at which the stop occurs, in ascending order.
    pub fn positions(&self, stop_id: &str) -> Option<&[u32]> {
        self.positions.get(stop_id).map(|val| &**val)
    }

    pub fn contains(&self, stop_id: &str) -> bool {
        self.positions.contains_key(stop_id)
    }

    /// True when the visited stops can be matched against this pattern at
    /// strictly increasing positions. Pattern stops the trip skips are fine;
    /// a stop the pattern does not know, or one that would have to move
    /// backwards, is not. Matching is order-sensitive on purpose: a stop id
    /// shared by both directions of a loop is told apart by where it sits in
    /// the surrounding sequence.
    pub fn aligns(&self, visits: &[Arc<str>]) -> bool {
        let mut cursor = 0u32;
        for stop in visits {
            let Some(occurrences) = self.positions(stop) else {
                return false;
            };
            match occurrences.iter().find(|&&position| position >= cursor) {
                Some(&position) => cursor = position + 1,
                None => return false,
            }
        }
        true
    }
}
