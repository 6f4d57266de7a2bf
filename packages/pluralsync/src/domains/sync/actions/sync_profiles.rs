//! Push differing profile fields from source members to their mirror members.
//!
//! Compared fields: display name, pronouns, color, avatar URL and description.
//! The member name itself is never synced. A source value that is empty or
//! absent leaves the mirror value alone.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::domains::sync::models::{Correspondence, SyncReport, SyncStep};
use crate::kernel::{BaseMirrorService, MemberPatch, MirrorMember, SourceMember};

/// A patch for one mirror member plus the names of the fields it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub patch: MemberPatch,
    pub changed: Vec<&'static str>,
}

/// Drop exactly one leading `#`.
pub fn strip_color_prefix(color: &str) -> &str {
    color.strip_prefix('#').unwrap_or(color)
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit())
}

/// Source value to push, or `None` if it is blank or already equal.
fn differing<'a>(source: Option<&'a str>, mirror: Option<&str>) -> Option<&'a str> {
    match source {
        Some(value) if !value.is_empty() && Some(value) != mirror => Some(value),
        _ => None,
    }
}

/// Compute the minimal update for one matched pair, or `None` if nothing differs.
pub fn diff_member(source: &SourceMember, mirror: &MirrorMember) -> Option<ProfileUpdate> {
    let mut patch = MemberPatch::for_member(mirror);
    let mut changed = Vec::new();

    // Only overwrite display names the mirror never customised.
    let display_name = if mirror.display_name() == mirror.name() {
        source.name()
    } else {
        None
    };
    if let Some(value) = differing(display_name, mirror.display_name()) {
        patch.display_name = Some(value.to_string());
        changed.push("display_name");
    }

    if let Some(value) = differing(source.pronouns(), mirror.pronouns()) {
        patch.pronouns = Some(value.to_string());
        changed.push("pronouns");
    }

    if let Some(raw) = source.color().filter(|c| !c.is_empty()) {
        let color = strip_color_prefix(raw);
        // PluralKit stores hex lowercased, so case alone is not a change.
        let same = mirror
            .color()
            .is_some_and(|current| current.eq_ignore_ascii_case(color));
        if !is_hex_color(color) {
            warn!(
                member = source.name().unwrap_or(source.id()),
                color = raw,
                "Ignoring source color that is not 6 hex digits"
            );
        } else if !same {
            patch.color = Some(color.to_string());
            changed.push("color");
        }
    }

    if let Some(value) = differing(source.avatar_url(), mirror.avatar_url()) {
        patch.avatar_url = Some(value.to_string());
        changed.push("avatar_url");
    }

    if let Some(value) = differing(source.description(), mirror.description()) {
        patch.description = Some(value.to_string());
        changed.push("description");
    }

    if changed.is_empty() {
        return None;
    }
    Some(ProfileUpdate { patch, changed })
}

/// Diff every matched pair and send the resulting updates.
///
/// A failed update is recorded in `report` and the remaining pairs are still
/// processed. With `dry_run` the updates are only logged.
pub async fn sync_profiles(
    mirror_service: &dyn BaseMirrorService,
    source: &HashMap<&str, &SourceMember>,
    mirror: &HashMap<&str, &MirrorMember>,
    correspondence: &Correspondence,
    dry_run: bool,
    report: &mut SyncReport,
) {
    for entry in correspondence.iter() {
        let (Some(source_member), Some(mirror_member)) = (
            source.get(entry.source_id.as_str()),
            mirror.get(entry.mirror_id.as_str()),
        ) else {
            warn!(
                source_id = %entry.source_id,
                mirror_id = %entry.mirror_id,
                "Matched member missing from roster index"
            );
            continue;
        };

        let label = source_member.name().unwrap_or(source_member.id());

        let Some(update) = diff_member(source_member, mirror_member) else {
            debug!(member = label, mirror_id = %entry.mirror_id, "Member already in sync");
            report.unchanged += 1;
            continue;
        };

        info!(
            member = label,
            mirror_id = %entry.mirror_id,
            matched_by = %entry.kind,
            fields = ?update.changed,
            dry_run,
            "Syncing member profile"
        );
        debug!(
            patch = %serde_json::to_string(&update.patch).unwrap_or_default(),
            "Member patch"
        );

        if dry_run {
            report.updated.push(entry.mirror_id.clone());
            continue;
        }

        match mirror_service.update_member(&update.patch).await {
            Ok(()) => report.updated.push(entry.mirror_id.clone()),
            Err(e) => {
                warn!(member = label, error = %e, "Failed to update mirror member");
                report.record_failure(SyncStep::UpdateMember, label, &e);
            }
        }
    }
}
