use crate::integration::support::{ids, set, Fixture};
use nesting_index::{IndexStore, ReindexMode};

#[test]
fn orphan_owns_its_trivial_path() {
    let fx = Fixture::new().indexed("A", &[]);
    let record = fx.record("A");
    assert!(record.parent_ids.is_empty());
    assert_eq!(record.pathnames, set(&["A"]));
    assert!(record.ancestors.is_empty());
}

#[test]
fn chain_scenario_rebuilds_in_dependency_order() {
    let fx = Fixture::new()
        .indexed("A", &[])
        .indexed("B", &["A"])
        .indexed("C", &["B"]);

    let report = fx.reindex("A", ReindexMode::Full).unwrap();
    assert_eq!(report.written, ids(&["A", "B", "C"]));
    assert_eq!(report.enqueued, 3);

    let a = fx.record("A");
    assert_eq!(a.pathnames, set(&["A"]));
    assert!(a.ancestors.is_empty());

    let b = fx.record("B");
    assert_eq!(b.parent_ids, set(&["A"]));
    assert_eq!(b.pathnames, set(&["A/B"]));
    assert_eq!(b.ancestors, set(&["A"]));

    let c = fx.record("C");
    assert_eq!(c.parent_ids, set(&["B"]));
    assert_eq!(c.pathnames, set(&["A/B/C"]));
    assert_eq!(c.ancestors, set(&["A", "A/B"]));
    assert_eq!(fx.index.len(), 3);
}

#[test]
fn multi_parent_fan_in_keeps_each_path() {
    let fx = Fixture::new()
        .indexed("A", &[])
        .indexed("B", &[])
        .indexed("C", &["A", "B"]);

    let c = fx.record("C");
    assert_eq!(c.parent_ids, set(&["A", "B"]));
    assert_eq!(c.pathnames, set(&["A/C", "B/C"]));
    assert!(c.ancestors.is_superset(&set(&["A", "B"])));
}

#[test]
fn shared_ancestor_is_deduplicated() {
    let fx = Fixture::new()
        .indexed("R", &[])
        .indexed("L", &["R"])
        .indexed("M", &["R"])
        .indexed("C", &["L", "M"]);

    let report = fx.reindex("R", ReindexMode::Full).unwrap();
    // C is reached once through each parent
    assert_eq!(report.written, ids(&["R", "L", "M", "C", "C"]));

    let c = fx.record("C");
    assert_eq!(c.pathnames, set(&["R/L/C", "R/M/C"]));
    assert_eq!(c.ancestors, set(&["R", "R/L", "R/M"]));
}

#[test]
fn breadth_order_uses_freshly_written_parents() {
    let fx = Fixture::new()
        .indexed("root", &[])
        .indexed("child1", &["root"])
        .indexed("grandchild1", &["child1"]);

    // Nest the whole chain under a new top-level collection
    let fx = fx.indexed("top", &[]);
    fx.preserve("root", &["top"]);
    let report = fx.reindex("root", ReindexMode::Full).unwrap();

    assert_eq!(report.written, ids(&["root", "child1", "grandchild1"]));
    assert_eq!(fx.record("child1").pathnames, set(&["top/root/child1"]));
    let grandchild = fx.record("grandchild1");
    assert_eq!(grandchild.pathnames, set(&["top/root/child1/grandchild1"]));
    assert!(grandchild.ancestors.contains("top/root/child1"));
    assert!(!grandchild.ancestors.contains("root/child1"));
}

#[test]
fn removing_a_parent_drops_its_paths_below() {
    let fx = Fixture::new()
        .indexed("A", &[])
        .indexed("B", &[])
        .indexed("C", &["A", "B"])
        .indexed("D", &["C"]);

    fx.preserve("C", &["B"]);
    fx.reindex("C", ReindexMode::Full).unwrap();

    assert_eq!(fx.record("C").pathnames, set(&["B/C"]));
    let d = fx.record("D");
    assert_eq!(d.pathnames, set(&["B/C/D"]));
    assert_eq!(d.ancestors, set(&["B", "B/C"]));
    assert!(fx.index.find_children("A").unwrap().is_empty());
}

#[test]
fn traversal_only_reaches_previously_indexed_children() {
    let fx = Fixture::new().indexed("A", &[]);
    // B declares A as parent but has never been indexed
    fx.preserve("B", &["A"]);
    let report = fx.reindex("A", ReindexMode::Full).unwrap();
    assert_eq!(report.written, ids(&["A"]));
    assert!(fx.index.find_index_record("B").is_err());
}

#[test]
fn second_full_pass_is_byte_identical() {
    let fx = Fixture::new()
        .indexed("A", &[])
        .indexed("B", &["A"])
        .indexed("X", &[])
        .indexed("C", &["B", "X"])
        .indexed("D", &["C", "A"]);

    fx.reindex("A", ReindexMode::Full).unwrap();
    let first = fx.index.snapshot();
    fx.reindex("A", ReindexMode::Full).unwrap();
    let second = fx.index.snapshot();

    assert_eq!(first, second);
    for (id, record) in &first {
        assert_eq!(
            bincode::serialize(record).unwrap(),
            bincode::serialize(&second[id]).unwrap()
        );
    }
}

#[test]
fn unknown_object_in_preservation_is_not_found() {
    let fx = Fixture::new().indexed("A", &[]).indexed("B", &["A"]);
    fx.preservation.remove("B");
    let err = fx.reindex("A", ReindexMode::Full).unwrap_err();
    assert!(matches!(
        err,
        nesting_index::IndexerError::NotFound { ref id, .. } if id == "B"
    ));
    // A was written before the failure and stays written
    assert_eq!(fx.record("A").pathnames, set(&["A"]));
}
