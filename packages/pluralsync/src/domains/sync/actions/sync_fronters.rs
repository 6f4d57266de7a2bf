//! Make the mirror's fronting lineup equal the source's.
//!
//! Lineups are compared as ordered sequences; any difference replaces the
//! mirror lineup wholesale with one switch.

use anyhow::{Context, Result};
use tracing::info;

use crate::domains::sync::models::Correspondence;
use crate::kernel::{BaseMirrorService, BaseSourceService};

/// Lineup to send to the mirror, or `None` if it already matches.
///
/// Source fronters without a mirror counterpart are dropped.
pub fn plan_switch(
    source_fronters: &[String],
    mirror_fronters: &[String],
    correspondence: &Correspondence,
) -> Option<Vec<String>> {
    let translated = correspondence.translate(source_fronters);
    if translated.as_slice() == mirror_fronters {
        return None;
    }
    Some(translated)
}

/// Fetch both lineups and record a switch on the mirror if they differ.
///
/// Returns the lineup that was sent (or would be, with `dry_run`).
pub async fn sync_fronters(
    source_service: &dyn BaseSourceService,
    mirror_service: &dyn BaseMirrorService,
    correspondence: &Correspondence,
    dry_run: bool,
) -> Result<Option<Vec<String>>> {
    let source_fronters = source_service
        .list_current_fronters()
        .await
        .context("Failed to fetch source fronters")?;
    let mirror_fronters = mirror_service
        .list_current_fronters()
        .await
        .context("Failed to fetch mirror fronters")?;

    info!(source = ?source_fronters, mirror = ?mirror_fronters, "Current fronters");

    let Some(lineup) = plan_switch(&source_fronters, &mirror_fronters, correspondence) else {
        info!("Fronters already in sync");
        return Ok(None);
    };

    info!(fronters = ?lineup, dry_run, "Updating mirror fronters");
    if !dry_run {
        mirror_service
            .set_fronters(&lineup)
            .await
            .context("Failed to record switch")?;
    }

    Ok(Some(lineup))
}
