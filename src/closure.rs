//! Closure Builder
//!
//! Computes an object's index record from its declared parents and the
//! current index records of those parents. The parents' records must already
//! reflect the running pass; the traversal order guarantees that.

use crate::error::{IndexerError, StorageError};
use crate::store::{IndexRecord, IndexStore, PreservationRecord};
use crate::types::PATH_SEPARATOR;
use std::collections::BTreeSet;

/// Build the index record for `record`, resolving parents through `lookup`.
///
/// A parent that `lookup` reports as not found fails with
/// [`IndexerError::MissingParentIndex`]. Objects without parents receive the
/// trivial pathname equal to their own id and no ancestors.
pub fn build_index_record<F>(
    record: &PreservationRecord,
    mut lookup: F,
) -> Result<IndexRecord, IndexerError>
where
    F: FnMut(&str) -> Result<IndexRecord, StorageError>,
{
    let mut parent_ids = BTreeSet::new();
    let mut pathnames = BTreeSet::new();
    let mut ancestors = BTreeSet::new();

    for parent_id in &record.parent_ids {
        let parent = lookup(parent_id.as_str()).map_err(|err| match err {
            StorageError::NotFound { .. } => IndexerError::MissingParentIndex {
                id: record.id.clone(),
                parent_id: parent_id.clone(),
            },
            other => IndexerError::from(other),
        })?;

        parent_ids.insert(parent_id.clone());
        for pathname in &parent.pathnames {
            pathnames.insert(join_path(pathname, &record.id));
            ancestors.extend(path_prefixes(pathname).map(str::to_string));
        }
        ancestors.extend(parent.ancestors);
    }

    if parent_ids.is_empty() {
        pathnames.insert(record.id.clone());
    }

    Ok(IndexRecord {
        id: record.id.clone(),
        parent_ids,
        pathnames,
        ancestors,
    })
}

/// [`build_index_record`] with parents resolved from an index store
pub fn build_from_index(
    record: &PreservationRecord,
    index: &dyn IndexStore,
) -> Result<IndexRecord, IndexerError> {
    build_index_record(record, |parent_id| index.find_index_record(parent_id))
}

/// `parent/id`
pub fn join_path(parent_pathname: &str, id: &str) -> String {
    let mut joined = String::with_capacity(parent_pathname.len() + id.len() + 1);
    joined.push_str(parent_pathname);
    joined.push(PATH_SEPARATOR);
    joined.push_str(id);
    joined
}

/// Cumulative non-empty prefixes of `pathname`, shortest first, ending with the pathname itself
pub fn path_prefixes(pathname: &str) -> impl Iterator<Item = &str> {
    pathname
        .match_indices(PATH_SEPARATOR)
        .map(move |(at, _)| &pathname[..at])
        .chain(std::iter::once(pathname))
        .filter(|prefix| !prefix.is_empty())
}
