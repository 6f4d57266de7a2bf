// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Matching and diffing live in domains::sync and only talk to these traits.
//
// Naming convention: Base* for trait names (e.g., BaseSourceService)

use anyhow::Result;
use async_trait::async_trait;

use super::{MemberPatch, MirrorMember, SourceMember};

// =============================================================================
// Source Service Trait (read-only source of truth)
// =============================================================================

#[async_trait]
pub trait BaseSourceService: Send + Sync {
    /// Full member roster, in service order
    async fn list_members(&self) -> Result<Vec<SourceMember>>;

    /// Member ids of the current fronters, in service order
    async fn list_current_fronters(&self) -> Result<Vec<String>>;
}

// =============================================================================
// Mirror Service Trait (kept in sync with the source)
// =============================================================================

#[async_trait]
pub trait BaseMirrorService: Send + Sync {
    /// Full member roster, in service order
    async fn list_members(&self) -> Result<Vec<MirrorMember>>;

    /// Member ids of the current fronters, in service order
    async fn list_current_fronters(&self) -> Result<Vec<String>>;

    /// Apply a partial profile update
    async fn update_member(&self, patch: &MemberPatch) -> Result<()>;

    /// Replace the fronting lineup with exactly these members
    async fn set_fronters(&self, member_ids: &[String]) -> Result<()>;
}
