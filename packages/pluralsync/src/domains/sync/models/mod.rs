pub mod correspondence;
pub mod report;

pub use correspondence::{Correspondence, MatchKind, MemberMatch};
pub use report::{SyncFailure, SyncReport, SyncStep};
