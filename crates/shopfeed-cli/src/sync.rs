//! The sync pipeline: credentials, backup, fetch, normalize, write.

use std::fmt;

use anyhow::Context;
use shopfeed_catalog::build_catalog;
use shopfeed_core::{AppConfig, ColumnSchema};
use shopfeed_sheets::{authenticate, load_credentials, SheetsClient};
use shopfeed_store::{backup_existing, write_if_changed};

/// Stages of one sync run, in execution order.
///
/// A failure in any stage aborts the run; the stage name is prepended to
/// the error so the log reads `sync failed while <stage>: <cause>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncStage {
    ValidatingCredentials,
    CreatingBackup,
    Fetching,
    Normalizing,
    Writing,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::ValidatingCredentials => "validating credentials",
            SyncStage::CreatingBackup => "creating backup",
            SyncStage::Fetching => "fetching rows",
            SyncStage::Normalizing => "normalizing rows",
            SyncStage::Writing => "writing catalog",
        };
        f.write_str(name)
    }
}

fn stage_context(stage: SyncStage) -> String {
    format!("sync failed while {stage}")
}

/// What one completed run produced. Logged at the end of [`run_sync`] and
/// returned so tests can assert on it.
#[derive(Debug)]
pub(crate) struct SyncReport {
    pub products: usize,
    pub skipped: usize,
    pub changed: bool,
}

/// Runs the full pipeline against the production Sheets endpoint.
///
/// Stage order: validate credentials, back up the existing catalog, fetch
/// the configured range, normalize the data rows, write the catalog
/// document. Row-level problems surface as skips inside the normalize
/// stage and never abort the run; stage-level failures always do.
///
/// # Errors
///
/// Returns an error naming the failed stage for any fatal condition:
/// unreadable or rejected credentials, backup-copy failure, a Sheets API
/// or transport error, an entirely empty range, or a catalog write
/// failure.
pub(crate) async fn run_sync(config: &AppConfig, sheet_id: &str) -> anyhow::Result<SyncReport> {
    run_sync_inner(config, sheet_id, None).await
}

async fn run_sync_inner(
    config: &AppConfig,
    sheet_id: &str,
    sheets_base_url: Option<&str>,
) -> anyhow::Result<SyncReport> {
    let stage = SyncStage::ValidatingCredentials;
    tracing::info!(%stage, path = %config.credentials_path.display(), "starting stage");
    let key = load_credentials(&config.credentials_path).with_context(|| stage_context(stage))?;
    let token = authenticate(&key, config.request_timeout_secs)
        .await
        .with_context(|| stage_context(stage))?;

    let stage = SyncStage::CreatingBackup;
    tracing::info!(%stage, "starting stage");
    backup_existing(&config.output_path, &config.backup_dir)
        .with_context(|| stage_context(stage))?;

    let stage = SyncStage::Fetching;
    tracing::info!(%stage, sheet = sheet_id, range = %config.sheet_range, "starting stage");
    let client = match sheets_base_url {
        Some(url) => SheetsClient::with_base_url(token, url, config.request_timeout_secs),
        None => SheetsClient::new(token, config.request_timeout_secs),
    }
    .with_context(|| stage_context(stage))?;
    let rows = client
        .fetch_rows(sheet_id, &config.sheet_range)
        .await
        .with_context(|| stage_context(stage))?;
    if rows.is_empty() {
        anyhow::bail!("{}: no data found in sheet", stage_context(stage));
    }
    // The first row is the header; the fixed layout ignores its content.
    let data_rows = &rows[1..];

    let stage = SyncStage::Normalizing;
    tracing::info!(%stage, rows = data_rows.len(), "starting stage");
    let summary = build_catalog(data_rows, &ColumnSchema::fixed());
    for (category, count) in &summary.category_counts {
        tracing::info!(category = %category, count, "category");
    }

    let stage = SyncStage::Writing;
    tracing::info!(%stage, products = summary.products.len(), "starting stage");
    let outcome = write_if_changed(&summary.products, &config.output_path)
        .with_context(|| stage_context(stage))?;

    let report = SyncReport {
        products: outcome.count,
        skipped: summary.skipped.len(),
        changed: outcome.changed,
    };
    tracing::info!(
        products = report.products,
        skipped = report.skipped,
        changed = report.changed,
        "sync complete"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
