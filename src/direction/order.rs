use crate::direction::Pattern;
use std::sync::Arc;

/// The outcome of comparing two stop visits against a canonical pattern.
/// `Unordered` means the pattern cannot tell the visits apart and the caller
/// should fall back to the feed's own sequence numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDecision {
    Before,
    After,
    Unordered,
}

/// Resolves every visit of one trip to a position in the pattern.
///
/// A stop that occurs more than once in the pattern is anchored to the
/// occurrence nearest the previous visit's resolved position, never blindly
/// to the first or last one. On an exact distance tie the occurrence ahead
/// of the anchor wins, since the trip is travelling forward. Returns `None`
/// when some visited stop is not on the pattern at all.
pub fn anchor_positions(pattern: &Pattern, visits: &[Arc<str>]) -> Option<Vec<u32>> {
    let mut anchored = Vec::with_capacity(visits.len());
    let mut previous: Option<u32> = None;
    for stop in visits {
        let occurrences = pattern.positions(stop)?;
        let position = match previous {
            None => *occurrences.first()?,
            Some(anchor) => nearest_occurrence(occurrences, anchor),
        };
        anchored.push(position);
        previous = Some(position);
    }
    Some(anchored)
}

fn nearest_occurrence(occurrences: &[u32], anchor: u32) -> u32 {
    occurrences
        .iter()
        .copied()
        .min_by_key(|&position| (position.abs_diff(anchor), position < anchor))
        .unwrap_or(anchor)
}

/// Decides which of two stop visits on the same route comes first, by
/// resolving each visit's stop id to a position in the canonical pattern of
/// the trips' assigned direction. The visits may come from different trips;
/// each one is identified by its trip's full visit sequence plus an index
/// into it.
pub fn compare_early(
    pattern: &Pattern,
    visits_a: &[Arc<str>],
    index_a: usize,
    visits_b: &[Arc<str>],
    index_b: usize,
) -> OrderDecision {
    let Some(anchored_a) = anchor_positions(pattern, visits_a) else {
        return OrderDecision::Unordered;
    };
    let Some(anchored_b) = anchor_positions(pattern, visits_b) else {
        return OrderDecision::Unordered;
    };
    match (anchored_a.get(index_a), anchored_b.get(index_b)) {
        (Some(a), Some(b)) if a < b => OrderDecision::Before,
        (Some(a), Some(b)) if a > b => OrderDecision::After,
        _ => OrderDecision::Unordered,
    }
}
