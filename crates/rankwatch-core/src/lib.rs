//! Shared data model and configuration for the rankwatch leaderboard scraper.

pub mod app_config;
pub mod config;
pub mod records;
pub mod target;
pub mod tracked;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{AppPageInfo, AppRecord, ScrapeSnapshot};
pub use target::{Store, Target};
pub use tracked::{AppMatcher, TrackedApp, TrackedAppIndex, TrackedRanks};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("rank must be a positive integer, got {0}")]
    NonPositiveRank(u32),

    #[error("app name must be non-empty")]
    EmptyName,
}
