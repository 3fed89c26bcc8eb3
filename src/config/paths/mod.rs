//! Platform paths for config and data.

pub mod xdg_root;
