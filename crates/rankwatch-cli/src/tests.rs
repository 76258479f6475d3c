use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use rankwatch_core::{AppConfig, ScrapeSnapshot, Target, TrackedAppIndex};
use rankwatch_scraper::{
    leaderboard_url, tracked_targets, FetchError, LeaderboardExtractor, PageFetcher,
};
use rankwatch_sink::{CsvLayout, CsvSink};

use super::*;

/// Serves canned HTML per URL; any other URL fails like a refused connection.
struct ScriptedFetcher {
    pages: HashMap<String, String>,
    calls: RefCell<Vec<DateTime<Local>>>,
}

impl ScriptedFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| ((*url).to_owned(), (*html).to_owned()))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// When each fetch started, in call order.
    fn calls(&self) -> Vec<DateTime<Local>> {
        self.calls.borrow().clone()
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(Local::now());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NetworkFailure {
                url: url.to_owned(),
                reason: "connection refused".to_owned(),
            })
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        results_dir: PathBuf::from("results"),
        request_timeout_secs: 30,
        user_agent: "rankwatch-test/0.1".to_string(),
        accept_invalid_certs: true,
        delay_min_ms: 0,
        delay_max_ms: 0,
        browser_timeout_secs: 30,
        browser_settle_ms: 2_000,
        chrome_path: None,
    }
}

fn top_args(countries: &[&str], store: Store) -> top::TopArgs {
    top::TopArgs {
        countries: countries.iter().map(ToString::to_string).collect(),
        store,
        max_rank: None,
        browser: false,
        scroll_passes: None,
        pricing_selector: None,
        developer_selector: None,
        json: false,
    }
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["rankwatch"]).is_err());
}

#[test]
fn top_defaults() {
    let cli = Cli::try_parse_from(["rankwatch", "top"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Top {
            ref countries,
            store: Store::Ios,
            max_rank: None,
            browser: false,
            scroll_passes: None,
            json: false,
            ..
        } if countries.is_empty()
    ));
}

#[test]
fn top_with_repeated_countries_and_threshold() {
    let cli = Cli::try_parse_from([
        "rankwatch",
        "top",
        "--country",
        "germany",
        "--country",
        "france",
        "--store",
        "play",
        "--max-rank",
        "70",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Top {
            ref countries,
            store: Store::Play,
            max_rank: Some(70),
            ..
        } if countries == &["germany", "france"]
    ));
}

#[test]
fn top_rejects_unknown_store() {
    assert!(Cli::try_parse_from(["rankwatch", "top", "--store", "windows"]).is_err());
}

#[test]
fn scroll_passes_requires_browser() {
    assert!(Cli::try_parse_from(["rankwatch", "top", "--scroll-passes", "10"]).is_err());

    let cli = Cli::try_parse_from(["rankwatch", "top", "--browser", "--scroll-passes", "10"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Top {
            browser: true,
            scroll_passes: Some(10),
            ..
        }
    ));
}

#[test]
fn track_with_output() {
    let cli = Cli::try_parse_from(["rankwatch", "track", "--output", "/tmp/ranks.csv"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Track { output: Some(ref p), max_rank: None } if p == Path::new("/tmp/ranks.csv")
    ));
}

#[test]
fn app_defaults_to_coinbase_page() {
    let cli = Cli::try_parse_from(["rankwatch", "app"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::App { ref url, output: None } if url == DEFAULT_APP_PAGE_URL
    ));
}

#[test]
fn top_targets_fall_back_to_default_countries() {
    let targets = top_args(&[], Store::Ios).targets();
    let labels: Vec<String> = targets.iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["united-states/ios", "united-kingdom/ios"]);
}

#[test]
fn top_targets_normalise_country_slugs() {
    let targets = top_args(&[" Germany "], Store::Play).targets();
    assert_eq!(targets, vec![Target::new("germany", Store::Play)]);
}

#[test]
fn snapshot_file_names_distinguish_stores() {
    let at = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let ios = ScrapeSnapshot::new(at, Target::new("united-states", Store::Ios), Vec::new());
    let play = ScrapeSnapshot::new(at, Target::new("united-states", Store::Play), Vec::new());
    assert_eq!(
        top::snapshot_file_name(&ios),
        "apps_united-states_2024-05-01_12-00-00.csv"
    );
    assert_eq!(
        top::snapshot_file_name(&play),
        "apps_united-states_play_2024-05-01_12-00-00.csv"
    );
}

#[test]
fn output_path_defaults_under_results_dir() {
    let config = test_config();
    assert_eq!(
        runner::output_path(&config, None, "apps_ranks.csv"),
        PathBuf::from("results/apps_ranks.csv")
    );
    assert_eq!(
        runner::output_path(&config, Some(Path::new("/tmp/x.csv")), "apps_ranks.csv"),
        PathBuf::from("/tmp/x.csv")
    );
}

#[test]
fn delay_policy_follows_config() {
    let mut config = test_config();
    config.delay_min_ms = 2_000;
    config.delay_max_ms = 3_000;
    let policy = runner::delay_policy(&config);
    assert_eq!(policy.min(), std::time::Duration::from_secs(2));
    assert_eq!(policy.max(), std::time::Duration::from_secs(3));
}

const APP_URL: &str = "https://apps.example.com/us/app/coinbase/id886427730";

fn app_sink(dir: &tempfile::TempDir) -> CsvSink {
    CsvSink::new(
        dir.path().join("appleappcoinbase.csv"),
        CsvLayout::simple(app::APP_PAGE_COLUMNS),
    )
}

#[tokio::test]
async fn app_page_without_title_is_skipped_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let sink = app_sink(&dir);
    let fetcher = ScriptedFetcher::new(&[(APP_URL, "<html><body><p>gone</p></body></html>")]);

    let captured = app::capture_app_page(&fetcher, APP_URL, &sink)
        .await
        .expect("missing title must not be fatal");

    assert!(captured.is_none());
    assert!(!sink.path().exists());
}

#[tokio::test]
async fn app_page_fetch_failure_is_skipped_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let sink = app_sink(&dir);
    let fetcher = ScriptedFetcher::new(&[]);

    let captured = app::capture_app_page(&fetcher, APP_URL, &sink).await.unwrap();

    assert!(captured.is_none());
    assert!(!sink.path().exists());
}

#[tokio::test]
async fn app_page_row_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let sink = app_sink(&dir);
    let html = r#"<h1 class="product-header__title">Coinbase: Buy Bitcoin &amp; Ether</h1>
        <a class="inline-list__item">#3 in Finance</a>"#;
    let fetcher = ScriptedFetcher::new(&[(APP_URL, html)]);

    let info = app::capture_app_page(&fetcher, APP_URL, &sink)
        .await
        .unwrap()
        .expect("page has a title");
    assert_eq!(info.chart_position.as_deref(), Some("#3 in Finance"));

    let content = std::fs::read_to_string(sink.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Name,Rank,Timestamp");
    assert!(lines[1].starts_with("Coinbase: Buy Bitcoin & Ether,#3 in Finance,"));
}

#[tokio::test]
async fn tracked_run_is_stamped_when_first_page_is_read() {
    let targets = tracked_targets();
    let page = r#"<a class="s-4262409-0">3. Coinbase: Buy Bitcoin &amp; Ether</a>"#;
    let uk_ios = leaderboard_url(&targets[1]);
    let us_play = leaderboard_url(&targets[2]);
    // The first target fails; the stamp comes from the second.
    let fetcher = ScriptedFetcher::new(&[(uk_ios.as_str(), page), (us_play.as_str(), page)]);
    let index = TrackedAppIndex::crypto_wallets();
    let extractor = LeaderboardExtractor::appfigures_links().unwrap();

    let run = track::collect_tracked(&fetcher, &targets, &extractor, &index).await;

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 4);
    let captured_at = run.captured_at.expect("two targets fetched");
    assert!(captured_at >= calls[1] && captured_at <= calls[2]);

    assert_eq!(run.per_target.len(), 4);
    assert_eq!(run.per_target[0].to_cells(), vec!["", "", ""]);
    assert_eq!(run.per_target[1].get("Coinbase"), Some(3));
    assert_eq!(run.per_target[3].found_count(), 0);
}

#[tokio::test]
async fn tracked_run_without_any_fetch_has_no_stamp() {
    let targets = tracked_targets();
    let fetcher = ScriptedFetcher::new(&[]);
    let index = TrackedAppIndex::crypto_wallets();
    let extractor = LeaderboardExtractor::appfigures_links().unwrap();

    let run = track::collect_tracked(&fetcher, &targets, &extractor, &index).await;

    assert!(run.captured_at.is_none());
    assert!(run.per_target.iter().all(|ranks| ranks.found_count() == 0));
}
