//! `rankwatch track`: tracked app ranks across stores as one wide CSV row.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use rankwatch_core::{AppConfig, Target, TrackedAppIndex, TrackedRanks};
use rankwatch_scraper::{
    leaderboard_url, tracked_targets, BrowserSession, LeaderboardExtractor, PageFetcher,
};
use rankwatch_sink::{ColumnGroup, CsvLayout, CsvSink, TRACKED_RANKS_FILE};

use crate::runner;

/// `Date, Time`, then one column group per target with a column per identity.
pub(crate) fn tracked_layout(targets: &[Target], index: &TrackedAppIndex) -> CsvLayout {
    let columns: Vec<String> = index.identities().into_iter().map(str::to_owned).collect();
    let groups = targets
        .iter()
        .map(|target| ColumnGroup::new(target.group_label(), columns.clone()))
        .collect();
    CsvLayout::grouped(["Date", "Time"], groups)
}

/// One data row: date, time, then each target's rank cells in order.
pub(crate) fn wide_row(at: DateTime<Local>, per_target: &[TrackedRanks]) -> Vec<String> {
    let mut row = vec![
        at.format("%Y-%m-%d").to_string(),
        at.format("%H:%M:%S").to_string(),
    ];
    for ranks in per_target {
        row.extend(ranks.to_cells());
    }
    row
}

/// Per-target ranks for one run, stamped when the first page was read.
pub(crate) struct TrackedRun {
    pub per_target: Vec<TrackedRanks>,
    /// `None` when every fetch failed.
    pub captured_at: Option<DateTime<Local>>,
}

/// Fetches every target in order. A failed target contributes unset ranks.
pub(crate) async fn collect_tracked<F: PageFetcher>(
    fetcher: &F,
    targets: &[Target],
    extractor: &LeaderboardExtractor,
    index: &TrackedAppIndex,
) -> TrackedRun {
    let mut per_target = Vec::with_capacity(targets.len());
    let mut captured_at = None;
    for target in targets {
        let label = target.to_string();
        let url = leaderboard_url(target);
        let ranks = match runner::fetch_page(fetcher, &label, &url).await {
            Some(page) => {
                captured_at.get_or_insert(page.fetched_at);
                let ranks = extractor.extract_tracked(&page.document, index);
                tracing::info!(
                    target_label = %label,
                    found = ranks.found_count(),
                    tracked = index.len(),
                    "tracked ranks extracted"
                );
                ranks
            }
            None => TrackedRanks::empty_for(index),
        };
        per_target.push(ranks);
    }
    TrackedRun {
        per_target,
        captured_at,
    }
}

/// # Errors
///
/// Returns an error if the browser fetcher cannot be built or the row cannot
/// be written. Targets whose fetch fails contribute empty cells.
pub(crate) async fn run_track(
    config: &AppConfig,
    output: Option<&Path>,
    max_rank: Option<u32>,
) -> anyhow::Result<()> {
    let index = TrackedAppIndex::crypto_wallets();
    let targets = tracked_targets();
    let extractor = LeaderboardExtractor::appfigures_links()?.with_max_rank(max_rank);
    let session = BrowserSession::tracked()
        .with_timeout(Duration::from_secs(config.browser_timeout_secs));
    let fetcher = runner::browser_fetcher(config, session)?;

    let run = collect_tracked(&fetcher, &targets, &extractor, &index).await;
    let Some(captured_at) = run.captured_at else {
        tracing::warn!(targets = targets.len(), "every target failed to fetch; no row written");
        println!("no targets fetched; nothing written");
        return Ok(());
    };

    let path = runner::output_path(config, output, TRACKED_RANKS_FILE);
    let sink = CsvSink::new(path, tracked_layout(&targets, &index));
    let row = wide_row(captured_at, &run.per_target);
    sink.append(std::slice::from_ref(&row))
        .map_err(|e| anyhow::anyhow!("failed to write tracked ranks: {e}"))?;

    for (target, ranks) in targets.iter().zip(&run.per_target) {
        let summary: Vec<String> = ranks
            .iter()
            .map(|(identity, rank)| match rank {
                Some(rank) => format!("{identity} #{rank}"),
                None => format!("{identity} -"),
            })
            .collect();
        println!("{}: {}", target.group_label(), summary.join(", "));
    }
    println!("appended 1 row -> {}", sink.path().display());
    Ok(())
}
