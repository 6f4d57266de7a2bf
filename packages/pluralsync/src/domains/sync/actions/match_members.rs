//! Pair source members with mirror members.
//!
//! Private and deleted source members never take part. Explicit links
//! (`pkId`) are resolved for the whole roster before any name match, so a link
//! always beats a name match on the same mirror member. Within a tier the
//! first source member in roster order wins. A later name claimant takes the
//! next free mirror member of that name, or is left unmatched with a warning.

use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::domains::sync::models::{Correspondence, MatchKind, MemberMatch};
use crate::kernel::{MirrorMember, SourceMember};

pub struct MatchOutcome {
    pub correspondence: Correspondence,
    /// Names (or ids, for unnamed members) of eligible members left unmatched
    pub unmatched: Vec<String>,
}

/// Whether a source member may be synced at all.
pub fn is_eligible(member: &SourceMember) -> bool {
    !member.is_private() && !member.is_deleted()
}

pub fn match_members(source: &[SourceMember], mirror: &[MirrorMember]) -> MatchOutcome {
    let eligible: Vec<&SourceMember> = source.iter().filter(|m| is_eligible(m)).collect();

    let mirror_ids: HashSet<&str> = mirror.iter().map(|m| m.id()).collect();
    // name -> mirror ids carrying it, in mirror roster order
    let mut mirror_by_name: HashMap<&str, Vec<&str>> = HashMap::new();
    for member in mirror {
        if let Some(name) = member.name() {
            mirror_by_name.entry(name).or_default().push(member.id());
        }
    }

    // mirror id -> source id that claimed it
    let mut claimed: HashMap<&str, &str> = HashMap::new();
    let mut chosen: HashMap<&str, (&str, MatchKind)> = HashMap::new();

    for &member in &eligible {
        let Some(link) = member.pluralkit_id() else {
            continue;
        };
        if !mirror_ids.contains(link) {
            continue;
        }
        claim(member, link, MatchKind::Link, &mut claimed, &mut chosen);
    }

    for &member in &eligible {
        if chosen.contains_key(member.id()) {
            continue;
        }
        let Some(candidates) = member.name().and_then(|name| mirror_by_name.get(name)) else {
            continue;
        };
        // First unclaimed namesake; if all are taken, the first one reports the collision.
        let target = candidates
            .iter()
            .copied()
            .find(|id| !claimed.contains_key(id))
            .unwrap_or(candidates[0]);
        claim(member, target, MatchKind::Name, &mut claimed, &mut chosen);
    }

    let mut correspondence = Correspondence::new();
    let mut unmatched = Vec::new();

    for member in eligible {
        match chosen.get(member.id()) {
            Some(&(mirror_id, kind)) => {
                correspondence.insert(MemberMatch {
                    source_id: member.id().to_string(),
                    mirror_id: mirror_id.to_string(),
                    kind,
                });
            }
            None => {
                let label = member.name().unwrap_or(member.id()).to_string();
                info!(member = %label, "No correspondence for source member");
                unmatched.push(label);
            }
        }
    }

    MatchOutcome {
        correspondence,
        unmatched,
    }
}

fn claim<'a>(
    member: &'a SourceMember,
    mirror_id: &'a str,
    kind: MatchKind,
    claimed: &mut HashMap<&'a str, &'a str>,
    chosen: &mut HashMap<&'a str, (&'a str, MatchKind)>,
) {
    if let Some(owner) = claimed.get(mirror_id) {
        warn!(
            member = member.name().unwrap_or(member.id()),
            mirror_id,
            claimed_by = owner,
            kind = %kind,
            "Mirror member already matched, skipping"
        );
        return;
    }
    claimed.insert(mirror_id, member.id());
    chosen.insert(member.id(), (mirror_id, kind));
}
