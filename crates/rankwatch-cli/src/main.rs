mod app;
mod runner;
mod top;
mod track;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rankwatch_core::Store;
use rankwatch_scraper::DEFAULT_APP_PAGE_URL;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rankwatch")]
#[command(about = "Scrape app-store finance leaderboards into CSV", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Full leaderboard per country, one fresh timestamped CSV each.
    Top {
        /// Country slug as used in leaderboard URLs (repeatable).
        /// Defaults to united-states and united-kingdom.
        #[arg(long = "country", value_name = "SLUG")]
        countries: Vec<String>,
        #[arg(long, default_value = "ios")]
        store: Store,
        /// Keep only entries ranked at or above this position.
        #[arg(long, value_name = "N")]
        max_rank: Option<u32>,
        /// Render the page in headless Chrome instead of a plain GET.
        #[arg(long)]
        browser: bool,
        /// Scroll passes for lazily loaded lists; implies a longer session.
        #[arg(long, value_name = "N", requires = "browser")]
        scroll_passes: Option<u32>,
        #[arg(long, value_name = "CSS")]
        pricing_selector: Option<String>,
        #[arg(long, value_name = "CSS")]
        developer_selector: Option<String>,
        /// Print each snapshot as JSON instead of a summary line.
        #[arg(long)]
        json: bool,
    },
    /// Ranks of the tracked wallet apps across US/UK iOS and Play, one wide row per run.
    Track {
        /// Defaults to `<results dir>/apps_ranks.csv`.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_name = "N")]
        max_rank: Option<u32>,
    },
    /// Name and chart position from a single App Store product page.
    App {
        #[arg(long, default_value = DEFAULT_APP_PAGE_URL)]
        url: String,
        /// Defaults to `<results dir>/appleappcoinbase.csv`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = rankwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let result = match cli.command {
        Commands::Top {
            countries,
            store,
            max_rank,
            browser,
            scroll_passes,
            pricing_selector,
            developer_selector,
            json,
        } => {
            let args = top::TopArgs {
                countries,
                store,
                max_rank,
                browser,
                scroll_passes,
                pricing_selector,
                developer_selector,
                json,
            };
            top::run_top(&config, &args).await
        }
        Commands::Track { output, max_rank } => {
            track::run_track(&config, output.as_deref(), max_rank).await
        }
        Commands::App { url, output } => app::run_app(&config, &url, output.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "run aborted");
    }
    result
}

#[cfg(test)]
mod tests;
