//! Preflight checks for the `check` subcommand.

use anyhow::Result;
use shopfeed_core::AppConfig;
use shopfeed_sheets::{authenticate, load_credentials, SheetsClient};

/// Verifies credentials, token exchange and sheet access without writing
/// anything, printing an `ok:` or `error:` line per step.
///
/// # Errors
///
/// Returns an error naming the first step that failed.
pub(crate) async fn run_check(config: &AppConfig, sheet_id: &str) -> Result<()> {
    run_check_inner(config, sheet_id, None).await
}

async fn run_check_inner(
    config: &AppConfig,
    sheet_id: &str,
    sheets_base_url: Option<&str>,
) -> Result<()> {
    let key = match load_credentials(&config.credentials_path) {
        Ok(key) => {
            println!("ok: credentials for {} ({})", key.client_email, key.project_id);
            key
        }
        Err(err) => return fail_step("credentials", err),
    };

    let token = match authenticate(&key, config.request_timeout_secs).await {
        Ok(token) => {
            println!("ok: token exchange");
            token
        }
        Err(err) => return fail_step("token exchange", err),
    };

    let client = match sheets_base_url {
        Some(base_url) => SheetsClient::with_base_url(token, base_url, config.request_timeout_secs),
        None => SheetsClient::new(token, config.request_timeout_secs),
    };
    let client = match client {
        Ok(client) => client,
        Err(err) => return fail_step("client setup", err),
    };

    match client.fetch_spreadsheet_title(sheet_id).await {
        Ok(title) => println!("ok: spreadsheet \"{title}\" is reachable"),
        Err(err) => return fail_step("spreadsheet metadata", err),
    }

    match client.fetch_rows(sheet_id, &config.sheet_range).await {
        Ok(rows) => {
            let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
            println!(
                "ok: range {} holds {} rows x {} columns",
                config.sheet_range,
                rows.len(),
                columns
            );
        }
        Err(err) => return fail_step("range values", err),
    }

    println!("all checks passed");
    Ok(())
}

fn fail_step<T>(step: &str, err: impl Into<anyhow::Error>) -> Result<T> {
    let err = err.into();
    eprintln!("error: {step}: {err:#}");
    Err(anyhow::anyhow!("check failed at {step}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
