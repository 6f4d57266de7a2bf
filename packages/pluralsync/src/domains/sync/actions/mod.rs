pub mod match_members;
pub mod sync_fronters;
pub mod sync_profiles;

pub use match_members::{is_eligible, match_members, MatchOutcome};
pub use sync_fronters::{plan_switch, sync_fronters};
pub use sync_profiles::{diff_member, strip_color_prefix, sync_profiles, ProfileUpdate};
