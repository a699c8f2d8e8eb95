//! Strongly-typed IDs used across the workspace.
//!
//! Kept as a separate module for the crate's re-export surface; the
//! canonical definitions live in `autoimport-ids`.

pub use autoimport_ids::*;
