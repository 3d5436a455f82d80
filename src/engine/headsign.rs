use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

#[derive(Debug, Clone)]
struct EquivalenceClass {
    variants: Box<[Arc<str>]>,
    canonical: Arc<str>,
}

/// Per-route equivalence classes of headsign labels known to mean the same
/// destination. Label drift across service changes collapses to one
/// canonical label; anything the table cannot cover stays unresolved for
/// the engine to report.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceTable {
    classes: HashMap<u16, Vec<EquivalenceClass>>,
}

impl EquivalenceTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn class(mut self, route_id: u16, variants: &[&str], canonical: &str) -> Self {
        self.classes
            .entry(route_id)
            .or_default()
            .push(EquivalenceClass {
                variants: variants.iter().map(|val| Arc::from(*val)).collect(),
                canonical: canonical.into(),
            });
        self
    }

    /// Picks the single label representing `observed`. One distinct label
    /// is its own canonical form; several unify only when one configured
    /// class covers them all.
    pub fn merge(&self, route_id: u16, observed: &BTreeSet<Arc<str>>) -> Option<Arc<str>> {
        if observed.len() == 1 {
            return observed.first().cloned();
        }
        let classes = self.classes.get(&route_id)?;
        classes
            .iter()
            .find(|class| {
                observed
                    .iter()
                    .all(|label| class.variants.iter().any(|variant| variant == label))
            })
            .map(|class| class.canonical.clone())
    }
}
