//! Shared fixtures for sync integration tests.

#![allow(dead_code)]

use pluralsync_core::kernel::test_dependencies::{mirror_member, source_member};
use pluralsync_core::kernel::{MirrorMember, SourceMember};

/// Initialize tracing once; respects RUST_LOG.
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn public_source(id: &str, name: &str) -> SourceMember {
    source_member(id, name)
}

pub fn source_with(id: &str, name: &str, pronouns: &str, color: &str) -> SourceMember {
    let mut member = source_member(id, name);
    member.content.pronouns = Some(pronouns.to_string());
    member.content.color = Some(color.to_string());
    member
}

pub fn private_source(id: &str, name: &str) -> SourceMember {
    let mut member = source_member(id, name);
    member.content.private = Some(true);
    member
}

pub fn plain_mirror(id: &str, name: &str) -> MirrorMember {
    mirror_member(id, name)
}

pub fn mirror_with(id: &str, name: &str, pronouns: &str, color: &str) -> MirrorMember {
    MirrorMember {
        pronouns: Some(pronouns.to_string()),
        color: Some(color.to_string()),
        ..mirror_member(id, name)
    }
}
