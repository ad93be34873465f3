use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::normalize::{self, Whitelist};
use crate::stats::StatsClient;
use crate::{export, tabulate, tag};
use anyhow::{Result, bail};
use std::fs;
use tracing::{info, warn};

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        None | Some(Commands::Export) => run_export(&config).await,
        Some(Commands::Tag { top_n }) => run_tag(&config, top_n).await,
    }
}

/// Run the full pipeline: fetch → snapshot → tabulate → export raw →
/// normalize in memory → rewrite the workbook with canonical rows.
///
/// 1. Fetches the per-period usage counts (fail-fast, nothing written on error).
/// 2. Writes the raw JSON snapshot and the flat CSV.
/// 3. Writes the raw workbook, one sheet per period.
/// 4. Normalizes model names against the optional whitelist and overwrites
///    the workbook with the aggregated rows.
pub async fn run_export(config: &Config) -> Result<()> {
    info!(url = %config.api_url, "fetching usage statistics");
    let client = StatsClient::new(&config.api_url, config.timeout_secs);
    let stats = client.fetch().await?;

    fs::create_dir_all(&config.data_dir)?;
    export::write_snapshot(&stats, &config.snapshot_path())?;

    let records = tabulate::flatten(&stats);
    info!(
        records = records.len(),
        periods = stats.len(),
        "tabulated usage records"
    );
    export::write_flat_csv(&records, &config.flat_csv_path())?;
    export::write_raw_workbook(&records, &config.workbook_path())?;

    let whitelist = Whitelist::load_optional(&config.whitelist_path())?;
    match &whitelist {
        Some(list) => info!(entries = list.len(), "loaded model whitelist"),
        None => warn!(
            path = %config.whitelist_path().display(),
            "no whitelist found, cleaning names without it"
        ),
    }

    let canonical = normalize::canonicalize(&records, whitelist.as_ref());
    info!(rows = canonical.len(), "normalized and merged model names");
    export::write_canonical_workbook(&canonical, &config.workbook_path())?;

    info!(dir = %config.data_dir.display(), "export complete");
    Ok(())
}

/// Fetch current usage and refresh the whitelist's popularity tags.
pub async fn run_tag(config: &Config, top_n: Option<usize>) -> Result<()> {
    let whitelist_path = config.whitelist_path();
    if !whitelist_path.exists() {
        bail!(
            "whitelist {} is required for tagging",
            whitelist_path.display()
        );
    }

    let cutoff = top_n.unwrap_or(config.top_n);
    info!(url = %config.api_url, top_n = cutoff, "fetching usage statistics for tagging");
    let client = StatsClient::new(&config.api_url, config.timeout_secs);
    let stats = client.fetch().await?;

    fs::create_dir_all(&config.data_dir)?;
    let records = tabulate::flatten(&stats);
    let top = tag::top_models(&records, cutoff);
    tag::write_top_csv(&top, &config.top_models_path())?;

    let tagged = tag::apply_tags(&whitelist_path, &top)?;
    info!(tagged, top_n = cutoff, "whitelist tags updated");
    Ok(())
}
