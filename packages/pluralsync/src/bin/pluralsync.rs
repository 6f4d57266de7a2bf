// Entry point: one sync run from Simply Plural to PluralKit

use anyhow::{Context, Result};
use pluralsync_core::domains::sync::{run_sync, SyncOptions};
use pluralsync_core::kernel::{PluralKitAdapter, SimplyPluralAdapter};
use pluralsync_core::{mask, Config};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pluralsync_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        path = %config.credentials_path.display(),
        simplyplural_token = %mask(&config.credentials.sp_token),
        pluralkit_token = %mask(&config.credentials.pk_token),
        dry_run = config.dry_run,
        "Configuration loaded"
    );

    let source = SimplyPluralAdapter::from_config(&config);
    let mirror = PluralKitAdapter::from_config(&config);

    let report = run_sync(
        &source,
        &mirror,
        SyncOptions {
            dry_run: config.dry_run,
        },
    )
    .await?;

    if report.is_success() {
        return Ok(ExitCode::SUCCESS);
    }

    for failure in &report.failures {
        tracing::error!(
            step = %failure.step,
            subject = %failure.subject,
            error = %failure.error,
            "Sync step failed"
        );
    }
    Ok(ExitCode::FAILURE)
}
