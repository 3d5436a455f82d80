use std::{collections::HashMap, sync::Arc};

/// Per-route display colors for routes the feed leaves uncolored.
/// Lookups that miss are a configuration gap the engine treats as fatal;
/// the agency-wide fallback only exists as an explicit opt-in.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    entries: HashMap<u16, Arc<str>>,
    fallback: Option<Arc<str>>,
}

impl ColorTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<Arc<str>>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(route_id, color)| (route_id, color.into()))
                .collect(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, color: &str) -> Self {
        self.fallback = Some(color.into());
        self
    }

    /// A color the feed supplies wins unchanged; otherwise the table
    /// decides. `None` means the table has no answer for this route.
    pub fn resolve(&self, route_id: u16, feed_color: Option<&str>) -> Option<Arc<str>> {
        if let Some(color) = feed_color
            && !color.is_empty()
        {
            return Some(color.into());
        }
        self.entries
            .get(&route_id)
            .or(self.fallback.as_ref())
            .cloned()
    }
}
