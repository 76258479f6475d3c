use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::target::Target;
use crate::RecordError;

/// One leaderboard entry at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// 1-based leaderboard position.
    pub rank: u32,
    /// Display name as scraped, e.g. `"Coinbase: Buy Bitcoin & Ether"`.
    pub name: String,
    pub pricing: Option<String>,
    pub developer: Option<String>,
}

impl AppRecord {
    /// Builds a record, enforcing a positive rank and a non-empty name.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NonPositiveRank`] for rank 0 and
    /// [`RecordError::EmptyName`] when `name` is blank.
    pub fn new(rank: u32, name: impl Into<String>) -> Result<Self, RecordError> {
        let name = name.into();
        if rank == 0 {
            return Err(RecordError::NonPositiveRank(rank));
        }
        if name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        Ok(Self {
            rank,
            name,
            pricing: None,
            developer: None,
        })
    }

    #[must_use]
    pub fn with_pricing(mut self, pricing: Option<String>) -> Self {
        self.pricing = pricing.filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn with_developer(mut self, developer: Option<String>) -> Self {
        self.developer = developer.filter(|s| !s.is_empty());
        self
    }

    /// Renders the record as a `Rank, Name, Pricing, Developer` row.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.name.clone(),
            self.pricing.clone().unwrap_or_default(),
            self.developer.clone().unwrap_or_default(),
        ]
    }
}

/// One run's results for a single target.
///
/// `timestamp` is fixed when the page content is read, not per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSnapshot {
    pub timestamp: DateTime<Local>,
    pub target: Target,
    /// Page order; never re-sorted.
    pub records: Vec<AppRecord>,
}

impl ScrapeSnapshot {
    #[must_use]
    pub fn new(timestamp: DateTime<Local>, target: Target, records: Vec<AppRecord>) -> Self {
        Self {
            timestamp,
            target,
            records,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(AppRecord::to_row).collect()
    }
}

/// Name and category chart position from a single App Store product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPageInfo {
    pub name: String,
    /// Chart badge text as shown, e.g. `"#3 in Finance"`.
    pub chart_position: Option<String>,
    pub captured_at: DateTime<Local>,
}

impl AppPageInfo {
    /// Renders the `Name, Rank, Timestamp` row.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.chart_position.clone().unwrap_or_default(),
            self.captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}
