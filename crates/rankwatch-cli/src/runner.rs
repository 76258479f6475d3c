//! Shared per-target plumbing for the command handlers.
//!
//! Targets run strictly one after another. A fetch failure is logged and the
//! target skipped; everything downstream of a successful fetch is the
//! caller's business.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use rankwatch_core::AppConfig;
use rankwatch_scraper::{
    BrowserFetcher, BrowserSession, DelayPolicy, HttpFetcher, HttpOptions, PageFetcher,
};
use scraper::Html;

/// A fetched page, stamped when its content was read.
pub(crate) struct FetchedPage {
    pub document: Html,
    pub fetched_at: DateTime<Local>,
}

pub(crate) fn delay_policy(config: &AppConfig) -> DelayPolicy {
    DelayPolicy::from_millis(config.delay_min_ms, config.delay_max_ms)
}

pub(crate) fn http_fetcher(config: &AppConfig) -> anyhow::Result<HttpFetcher> {
    HttpFetcher::new(&HttpOptions::from_config(config), delay_policy(config))
        .map_err(|e| anyhow::anyhow!("failed to build HTTP fetcher: {e}"))
}

/// Applies the configured settle delay to a session preset.
pub(crate) fn browser_fetcher(
    config: &AppConfig,
    session: BrowserSession,
) -> anyhow::Result<BrowserFetcher> {
    let session = session.with_settle(Duration::from_millis(config.browser_settle_ms));
    BrowserFetcher::new(session, config.chrome_path.clone(), delay_policy(config))
        .map_err(|e| anyhow::anyhow!("failed to build browser fetcher: {e}"))
}

/// Fetches and parses one page; `None` (after a warning) when the fetch fails.
pub(crate) async fn fetch_page<F: PageFetcher>(
    fetcher: &F,
    label: &str,
    url: &str,
) -> Option<FetchedPage> {
    match fetcher.fetch(url).await {
        Ok(html) => {
            let fetched_at = Local::now();
            Some(FetchedPage {
                document: Html::parse_document(&html),
                fetched_at,
            })
        }
        Err(e) => {
            tracing::warn!(target_label = label, url, error = %e, "fetch failed; skipping target");
            None
        }
    }
}

/// `output` if given, else `file_name` under the results directory.
pub(crate) fn output_path(config: &AppConfig, output: Option<&Path>, file_name: &str) -> PathBuf {
    output.map_or_else(|| config.results_dir.join(file_name), Path::to_path_buf)
}
