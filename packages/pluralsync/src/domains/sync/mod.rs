//! Source → mirror synchronization of member profiles and fronters.
//!
//! Pipeline: load rosters → index → match → sync profiles → sync fronters.
//! Matching and diffing are pure; only the two sync steps write.

pub mod actions;
pub mod models;
pub mod workflows;

pub use models::{Correspondence, MatchKind, MemberMatch, SyncFailure, SyncReport, SyncStep};
pub use workflows::run_sync::{run_sync, SyncOptions};
