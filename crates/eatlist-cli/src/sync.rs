//! Snapshot run orchestration.
//!
//! Anything wrong with the sheet itself (unreachable, empty, missing a
//! column) aborts the run before a single Places request is made and before
//! the previous snapshot is touched. Per-place failures are recorded on the
//! row and counted, never propagated.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use eatlist_core::{AppConfig, Restaurant, RunCounts, Snapshot};
use eatlist_places::{enrich, PlacesClient};
use eatlist_sheet::{map_row, parse_csv, HeaderMap, SheetClient, SheetError};

use crate::snapshot;

/// CLI overrides for a `sync` run.
#[derive(Debug, Default)]
pub(crate) struct SyncArgs {
    pub csv_url: Option<String>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
}

/// A fetched sheet whose header has been validated.
pub(crate) struct LoadedSheet {
    pub headers: HeaderMap,
    /// Data rows, header excluded, in file order.
    pub rows: Vec<Vec<String>>,
}

/// Full run: credential check, fetch, enrich, then write or print.
///
/// # Errors
///
/// Returns an error if the API key or sheet URL is missing, the sheet cannot
/// be loaded, or the snapshot cannot be written.
pub(crate) async fn run_sync(config: &AppConfig, args: SyncArgs) -> anyhow::Result<()> {
    let api_key = config.require_places_api_key()?;
    let csv_url = resolve_csv_url(args.csv_url.as_deref(), config)?;

    let sheet = SheetClient::new(config.request_timeout_secs, &config.user_agent)
        .context("building sheet HTTP client")?;
    let places = PlacesClient::with_base_url(
        api_key,
        &config.places_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("building Places API client")?;

    let snapshot = build_snapshot(&sheet, &places, &csv_url, Utc::now()).await?;

    if args.stdout {
        print!("{}", snapshot::render(&snapshot)?);
    } else {
        let output = args.output.unwrap_or_else(|| config.output_path.clone());
        snapshot::write_snapshot(&output, &snapshot).await?;
        tracing::info!(path = %output.display(), "snapshot written");
    }

    Ok(())
}

/// Fetches and validates the sheet, then reports what a sync would process.
///
/// # Errors
///
/// Returns an error if the sheet URL is missing or the sheet cannot be loaded.
pub(crate) async fn run_check(config: &AppConfig, csv_url: Option<&str>) -> anyhow::Result<()> {
    let csv_url = resolve_csv_url(csv_url, config)?;
    let sheet = SheetClient::new(config.request_timeout_secs, &config.user_agent)
        .context("building sheet HTTP client")?;
    let loaded = load_sheet(&sheet, &csv_url).await?;

    let records: Vec<_> = loaded
        .rows
        .iter()
        .filter_map(|row| map_row(&loaded.headers, row))
        .collect();
    let with_place_id = records.iter().filter(|r| r.has_place_id()).count();

    println!("sheet:          {csv_url}");
    println!("data rows:      {}", loaded.rows.len());
    println!("restaurants:    {}", records.len());
    println!("with place_id:  {with_place_id}");
    println!("blank skipped:  {}", loaded.rows.len() - records.len());
    Ok(())
}

/// Fetches, parses and header-validates the sheet at `csv_url`.
///
/// # Errors
///
/// Returns an error if the request fails, the sheet is empty, or a required
/// column is missing.
pub(crate) async fn load_sheet(sheet: &SheetClient, csv_url: &str) -> anyhow::Result<LoadedSheet> {
    let text = sheet
        .fetch_csv(csv_url)
        .await
        .with_context(|| format!("fetching sheet CSV from {csv_url}"))?;

    let mut grid = parse_csv(&text).into_iter();
    let header = grid.next().ok_or_else(|| SheetError::Empty {
        url: csv_url.to_owned(),
    })?;
    let headers = HeaderMap::from_header_row(&header)?;
    let rows: Vec<Vec<String>> = grid.collect();

    tracing::info!(csv_url, rows = rows.len(), "sheet loaded");
    Ok(LoadedSheet { headers, rows })
}

/// Builds the snapshot for one run. Places requests go out one at a time in
/// row order.
///
/// # Errors
///
/// Returns an error only for sheet-level failures; see [`load_sheet`].
pub(crate) async fn build_snapshot(
    sheet: &SheetClient,
    places: &PlacesClient,
    csv_url: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<Snapshot> {
    let loaded = load_sheet(sheet, csv_url).await?;

    let mut counts = RunCounts::default();
    let mut restaurants: Vec<Restaurant> = Vec::with_capacity(loaded.rows.len());

    for (idx, row) in loaded.rows.iter().enumerate() {
        let Some(base) = map_row(&loaded.headers, row) else {
            tracing::debug!(row = idx + 2, "skipping blank row");
            continue;
        };

        let record = if base.has_place_id() {
            let outcome = enrich(places, base, now).await;
            if outcome.is_ok() {
                counts.places_ok += 1;
            } else {
                counts.places_failed += 1;
            }
            outcome.into_record()
        } else {
            tracing::debug!(row = idx + 2, name = %base.name, "no place_id; passing through");
            Restaurant::pass_through(base)
        };

        restaurants.push(record);
    }
    counts.total_rows = restaurants.len();

    tracing::info!(
        total_rows = counts.total_rows,
        places_ok = counts.places_ok,
        places_failed = counts.places_failed,
        "snapshot built"
    );

    Ok(Snapshot {
        generated_at: now,
        source_csv: csv_url.to_owned(),
        counts,
        restaurants,
    })
}

fn resolve_csv_url(cli_value: Option<&str>, config: &AppConfig) -> anyhow::Result<String> {
    cli_value
        .map(str::to_owned)
        .or_else(|| config.sheet_csv_url.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no sheet URL: pass --csv-url or set EATLIST_SHEET_CSV_URL")
        })
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
