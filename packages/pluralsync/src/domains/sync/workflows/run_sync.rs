//! One full sync run
//!
//! 1. Load both rosters (fatal on failure)
//! 2. Index them by id
//! 3. Match source members to mirror members
//! 4. Sync profiles (per-member failures are collected)
//! 5. Sync fronters (failure is collected)

use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::domains::sync::actions::{match_members, sync_fronters, sync_profiles};
use crate::domains::sync::models::{SyncReport, SyncStep};
use crate::kernel::{BaseMirrorService, BaseSourceService, MirrorMember, SourceMember};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Log updates and switches instead of sending them
    pub dry_run: bool,
}

pub async fn run_sync(
    source_service: &dyn BaseSourceService,
    mirror_service: &dyn BaseMirrorService,
    options: SyncOptions,
) -> Result<SyncReport> {
    let source_members = source_service
        .list_members()
        .await
        .context("Failed to load source roster")?;
    let mirror_members = mirror_service
        .list_members()
        .await
        .context("Failed to load mirror roster")?;

    for member in &source_members {
        debug!(fields = %render(&member.display_fields()), "Source member");
    }
    for member in &mirror_members {
        debug!(fields = %render(&member.display_fields()), "Mirror member");
    }

    let source_index: HashMap<&str, &SourceMember> =
        source_members.iter().map(|m| (m.id(), m)).collect();
    let mirror_index: HashMap<&str, &MirrorMember> =
        mirror_members.iter().map(|m| (m.id(), m)).collect();

    let outcome = match_members(&source_members, &mirror_members);
    info!(
        matched = outcome.correspondence.len(),
        unmatched = outcome.unmatched.len(),
        "Built member correspondence"
    );

    let mut report = SyncReport {
        matched: outcome.correspondence.len(),
        unmatched: outcome.unmatched,
        ..Default::default()
    };

    sync_profiles(
        mirror_service,
        &source_index,
        &mirror_index,
        &outcome.correspondence,
        options.dry_run,
        &mut report,
    )
    .await;

    match sync_fronters(
        source_service,
        mirror_service,
        &outcome.correspondence,
        options.dry_run,
    )
    .await
    {
        Ok(switch) => report.switch = switch,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Fronter sync failed");
            report.record_failure(SyncStep::SyncFronters, "fronters", &e);
        }
    }

    info!(
        matched = report.matched,
        updated = report.updated.len(),
        unchanged = report.unchanged,
        switched = report.switch.is_some(),
        failures = report.failures.len(),
        dry_run = options.dry_run,
        "Sync finished"
    );

    Ok(report)
}

fn render(fields: &[(&'static str, Option<&str>)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.unwrap_or("-")))
        .collect::<Vec<_>>()
        .join(" ")
}
