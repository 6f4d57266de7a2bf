//! Kernel module - service seams and their implementations.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PluralKitAdapter, SimplyPluralAdapter};
pub use test_dependencies::{MockMirrorService, MockSourceService};
pub use traits::*;

/// Member record of the source service (Simply Plural).
pub type SourceMember = simplyplural_client::Member;

/// Member record of the mirror service (PluralKit).
pub type MirrorMember = pluralkit_client::Member;

pub use pluralkit_client::MemberPatch;
