use crate::integration::support::set;
use nesting_index::config::ReindexConfig;
use nesting_index::store::persistence::SledStore;
use nesting_index::{IndexStore, NestingIndexer, PreservationRecord};
use tempfile::TempDir;

fn seed(store: &SledStore, id: &str, parents: &[&str]) {
    store
        .put_preservation_record(&PreservationRecord::new(id, parents.iter().copied()))
        .unwrap();
}

#[test]
fn sled_store_runs_passes_and_persists_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store");

    {
        let store = SledStore::open(&path).unwrap();
        let indexer = NestingIndexer::new(store.clone(), store.clone(), ReindexConfig::default());
        seed(&store, "A", &[]);
        seed(&store, "B", &["A"]);
        seed(&store, "C", &["A", "B"]);
        for id in ["A", "B", "C"] {
            indexer.reindex_relationships(id).unwrap();
        }
        let report = indexer.reindex_relationships("A").unwrap();
        assert_eq!(report.written_count(), 4);
        store.flush().unwrap();
    }

    let store = SledStore::open(&path).unwrap();
    let c = store.find_index_record("C").unwrap();
    assert_eq!(c.pathnames, set(&["A/B/C", "A/C"]));
    assert_eq!(c.ancestors, set(&["A", "A/B"]));

    let children: Vec<String> = store
        .find_children("A")
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(children, vec!["B".to_string(), "C".to_string()]);
}

#[test]
fn sled_store_descendants_pass() {
    let store = SledStore::temporary().unwrap();
    let indexer = NestingIndexer::new(store.clone(), store.clone(), ReindexConfig::default());
    seed(&store, "A", &[]);
    seed(&store, "B", &["A"]);
    indexer.reindex_relationships("A").unwrap();
    indexer.reindex_relationships("B").unwrap();

    let report = indexer.reindex_descendants("A").unwrap();
    assert_eq!(report.written, vec!["B".to_string()]);
    assert_eq!(store.find_index_record("B").unwrap().pathnames, set(&["A/B"]));
}
