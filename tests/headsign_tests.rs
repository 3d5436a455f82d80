use headway::engine::EquivalenceTable;
use std::{collections::BTreeSet, sync::Arc};

fn observed(labels: &[&str]) -> BTreeSet<Arc<str>> {
    labels.iter().map(|label| Arc::from(*label)).collect()
}

fn table() -> EquivalenceTable {
    EquivalenceTable::new()
        .class(89, &["Hart", "Hart Ctr"], "Hart Ctr")
        .class(
            16,
            &["UNBC", "College Hgts", "UNBC/College Hts"],
            "UNBC/College Hts",
        )
}

#[test]
fn configured_variants_unify_to_canonical_label() {
    let merged = table().merge(89, &observed(&["Hart", "Hart Ctr"])).unwrap();
    assert_eq!(&*merged, "Hart Ctr");
}

#[test]
fn subset_of_a_class_unifies() {
    let merged = table()
        .merge(16, &observed(&["UNBC", "UNBC/College Hts"]))
        .unwrap();
    assert_eq!(&*merged, "UNBC/College Hts");
}

#[test]
fn single_label_is_its_own_canonical_form() {
    let merged = table().merge(5, &observed(&["Downtown"])).unwrap();
    assert_eq!(&*merged, "Downtown");
}

#[test]
fn uncovered_label_sets_stay_unresolved() {
    assert!(table().merge(89, &observed(&["Hart", "Westgate"])).is_none());
    assert!(table().merge(5, &observed(&["Foo", "Bar"])).is_none());
}
