use crate::integration::support::Fixture;
use nesting_index::closure::path_prefixes;
use nesting_index::ReindexMode;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Node i may only declare parents among nodes 0..i, so every graph is acyclic.
fn dag() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(any::<u8>(), 1..8).prop_map(|masks| {
        masks
            .iter()
            .enumerate()
            .map(|(i, mask)| (0..i).filter(|j| mask & (1 << j) != 0).collect())
            .collect()
    })
}

fn build(graph: &[Vec<usize>]) -> Fixture {
    let mut fx = Fixture::new();
    for (i, parents) in graph.iter().enumerate() {
        let parent_ids: Vec<String> = parents.iter().map(|j| format!("n{j}")).collect();
        let parent_refs: Vec<&str> = parent_ids.iter().map(String::as_str).collect();
        fx = fx.indexed(&format!("n{i}"), &parent_refs);
    }
    fx
}

proptest! {
    #[test]
    fn ancestors_are_exactly_strict_prefixes_of_pathnames(graph in dag()) {
        let fx = build(&graph);
        for (id, record) in fx.index.snapshot() {
            let mut expected = BTreeSet::new();
            for pathname in &record.pathnames {
                prop_assert!(pathname.ends_with(id.as_str()));
                expected.extend(
                    path_prefixes(pathname)
                        .filter(|prefix| *prefix != pathname.as_str())
                        .map(str::to_string),
                );
            }
            prop_assert_eq!(&record.ancestors, &expected);
        }
    }

    #[test]
    fn orphans_have_only_their_own_path(graph in dag()) {
        let fx = build(&graph);
        for (i, parents) in graph.iter().enumerate() {
            let id = format!("n{i}");
            let record = fx.record(&id);
            if parents.is_empty() {
                prop_assert_eq!(record.pathnames.len(), 1);
                prop_assert!(record.pathnames.contains(&id));
                prop_assert!(record.ancestors.is_empty());
            } else {
                prop_assert_eq!(record.parent_ids.len(), parents.len());
                prop_assert!(!record.pathnames.contains(&id));
            }
        }
    }

    #[test]
    fn full_passes_from_roots_are_idempotent(graph in dag()) {
        let fx = build(&graph);
        let before = fx.index.snapshot();
        for (i, parents) in graph.iter().enumerate() {
            if parents.is_empty() {
                fx.reindex(&format!("n{i}"), ReindexMode::Full).unwrap();
            }
        }
        prop_assert_eq!(before, fx.index.snapshot());
    }
}
