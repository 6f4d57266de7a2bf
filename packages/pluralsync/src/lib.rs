// pluralsync - Core
//
// Mirrors member profiles and the current fronters from Simply Plural
// (source of truth) to PluralKit. A run is a single sequential pipeline;
// see domains::sync::workflows::run_sync.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
