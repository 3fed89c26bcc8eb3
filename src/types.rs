//! Core types for the nesting index.

/// Id: opaque token naming one repository object (a PID). Compared by exact string equality.
pub type Id = String;

/// Separator between ids in a materialized pathname
pub const PATH_SEPARATOR: char = '/';

/// Default remaining-hops budget for the seed of a reindexing pass
pub const DEFAULT_HOP_CEILING: u32 = 15;
