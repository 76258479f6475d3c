//! `rankwatch app`: one App Store product page appended to a growing file.

use std::path::Path;

use rankwatch_core::{AppConfig, AppPageInfo};
use rankwatch_scraper::{extract_app_page, PageFetcher};
use rankwatch_sink::{CsvLayout, CsvSink, APP_PAGE_FILE};

use crate::runner;

pub(crate) const APP_PAGE_COLUMNS: [&str; 3] = ["Name", "Rank", "Timestamp"];

/// Fetches one product page and appends its row to `sink`.
///
/// Returns `None` (after a warning) when the fetch fails or the page has no
/// title; nothing is written in either case.
///
/// # Errors
///
/// Returns an error only when the row cannot be written.
pub(crate) async fn capture_app_page<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    sink: &CsvSink,
) -> anyhow::Result<Option<AppPageInfo>> {
    let Some(page) = runner::fetch_page(fetcher, "app page", url).await else {
        return Ok(None);
    };

    let info = match extract_app_page(&page.document, page.fetched_at) {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(url, error = %e, "unreadable app page; skipping");
            return Ok(None);
        }
    };
    if info.chart_position.is_none() {
        tracing::warn!(url, name = %info.name, "app page has no chart position badge");
    }

    sink.append(&[info.to_row()])
        .map_err(|e| anyhow::anyhow!("failed to write app page row: {e}"))?;
    Ok(Some(info))
}

/// # Errors
///
/// Returns an error if the HTTP fetcher cannot be built or the row cannot be
/// written. Fetch and page-shape failures are logged and skipped.
pub(crate) async fn run_app(
    config: &AppConfig,
    url: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let fetcher = runner::http_fetcher(config)?;
    let path = runner::output_path(config, output, APP_PAGE_FILE);
    let sink = CsvSink::new(path, CsvLayout::simple(APP_PAGE_COLUMNS));

    match capture_app_page(&fetcher, url, &sink).await? {
        Some(info) => println!(
            "{}: {} -> {}",
            info.name,
            info.chart_position.as_deref().unwrap_or("unranked"),
            sink.path().display()
        ),
        None => println!("could not read {url}; nothing written"),
    }
    Ok(())
}
