//! `rankwatch top`: full leaderboards into one fresh file per country.

use rankwatch_core::{AppConfig, ScrapeSnapshot, Store, Target};
use rankwatch_scraper::{
    leaderboard_url, BrowserSession, Fetcher, LeaderboardExtractor, DEFAULT_COUNTRIES,
};
use rankwatch_sink::{timestamped_file_name, CsvLayout, CsvSink};

use crate::runner;

pub(crate) const TOP_COLUMNS: [&str; 4] = ["Rank", "Name", "Pricing", "Developer"];

#[derive(Debug, Clone)]
pub(crate) struct TopArgs {
    pub countries: Vec<String>,
    pub store: Store,
    pub max_rank: Option<u32>,
    pub browser: bool,
    pub scroll_passes: Option<u32>,
    pub pricing_selector: Option<String>,
    pub developer_selector: Option<String>,
    pub json: bool,
}

impl TopArgs {
    /// Requested countries, or the defaults when none were given.
    pub(crate) fn targets(&self) -> Vec<Target> {
        if self.countries.is_empty() {
            DEFAULT_COUNTRIES
                .iter()
                .map(|country| Target::new(*country, self.store))
                .collect()
        } else {
            self.countries
                .iter()
                .map(|country| Target::new(country.trim().to_ascii_lowercase(), self.store))
                .collect()
        }
    }

    fn session(&self) -> BrowserSession {
        match self.scroll_passes {
            Some(passes) => BrowserSession::infinite_scroll().with_scroll_passes(passes),
            None => BrowserSession::top_apps(),
        }
    }

    fn extractor(&self) -> anyhow::Result<LeaderboardExtractor> {
        let mut extractor = LeaderboardExtractor::appfigures_top_apps()?;
        if let Some(css) = &self.pricing_selector {
            extractor = extractor.with_pricing_selector(css)?;
        }
        if let Some(css) = &self.developer_selector {
            extractor = extractor.with_developer_selector(css)?;
        }
        Ok(extractor.with_max_rank(self.max_rank))
    }
}

/// File name for one target's snapshot. iOS keeps the bare country name.
pub(crate) fn snapshot_file_name(snapshot: &ScrapeSnapshot) -> String {
    let country = snapshot.target.country.as_str();
    match snapshot.target.store {
        Store::Ios => timestamped_file_name("apps", &[country], &snapshot.timestamp),
        Store::Play => timestamped_file_name("apps", &[country, "play"], &snapshot.timestamp),
    }
}

/// # Errors
///
/// Returns an error if the fetcher or extractor cannot be built, or if a CSV
/// file cannot be written. Per-target fetch failures are logged and skipped.
pub(crate) async fn run_top(config: &AppConfig, args: &TopArgs) -> anyhow::Result<()> {
    let extractor = args.extractor()?;
    let fetcher: Fetcher = if args.browser {
        runner::browser_fetcher(config, args.session())?.into()
    } else {
        runner::http_fetcher(config)?.into()
    };

    let targets = args.targets();
    tracing::info!(
        targets = targets.len(),
        strategy = fetcher.describe(),
        max_rank = ?args.max_rank,
        "starting top-apps run"
    );

    let mut written = 0usize;
    for target in targets {
        let label = target.to_string();
        let url = leaderboard_url(&target);
        let Some(page) = runner::fetch_page(&fetcher, &label, &url).await else {
            continue;
        };

        let records = extractor.extract(&page.document);
        let snapshot = ScrapeSnapshot::new(page.fetched_at, target, records);
        if snapshot.is_empty() {
            tracing::warn!(target_label = %label, url = %url, "no leaderboard entries extracted");
        }

        let path = config.results_dir.join(snapshot_file_name(&snapshot));
        let sink = CsvSink::new(&path, CsvLayout::simple(TOP_COLUMNS));
        sink.append(&snapshot.rows())
            .map_err(|e| anyhow::anyhow!("failed to write {label} results: {e}"))?;
        written += 1;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!(
                "{label}: {} entries -> {}",
                snapshot.records.len(),
                sink.path().display()
            );
        }
    }

    tracing::info!(written, "top-apps run complete");
    Ok(())
}
