//! Leaderboard extraction from fetched HTML.
//!
//! [`LeaderboardExtractor`] walks every node matched by its entry selector,
//! normalises the label text, parses `"<rank>. <name>"` and assembles
//! [`AppRecord`]s. A malformed entry is logged and skipped; it never aborts
//! the scrape.

use chrono::{DateTime, Local};
use rankwatch_core::{AppPageInfo, AppRecord, RecordError, TrackedAppIndex, TrackedRanks};
use scraper::{ElementRef, Html, Selector};

use crate::error::{MalformedReason, ParseError, ScraperError};
use crate::normalize::normalize_text;
use crate::parse::parse_rank_name;
use crate::targets::{
    APPLE_CHART_SELECTOR, APPLE_TITLE_SELECTOR, RANK_NAME_LINK_SELECTOR,
    TOP_APPS_ENTRY_SELECTOR,
};

/// Raw, normalised fields of one matched leaderboard node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCandidate {
    /// Normalised `"<rank>. <name>"` label text.
    pub text: String,
    /// `title` attribute of the label element, when present.
    pub title: Option<String>,
    pub pricing: Option<String>,
    pub developer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LeaderboardExtractor {
    entry: Selector,
    /// Resolved inside each entry; `None` means the entry itself is the label.
    label: Option<Selector>,
    pricing: Option<Selector>,
    developer: Option<Selector>,
    max_rank: Option<u32>,
}

impl LeaderboardExtractor {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if `entry_selector` is not valid CSS.
    pub fn new(entry_selector: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            entry: parse_selector(entry_selector)?,
            label: None,
            pricing: None,
            developer: None,
            max_rank: None,
        })
    }

    /// Top-apps blocks on appfigures: one `div` per app with the rank/name link inside.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in selectors; the `Result` mirrors [`Self::new`].
    pub fn appfigures_top_apps() -> Result<Self, ScraperError> {
        Self::new(TOP_APPS_ENTRY_SELECTOR)?.with_label_selector(RANK_NAME_LINK_SELECTOR)
    }

    /// The rank/name links themselves, whose `title` attribute helps identity matching.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in selector; the `Result` mirrors [`Self::new`].
    pub fn appfigures_links() -> Result<Self, ScraperError> {
        Self::new(RANK_NAME_LINK_SELECTOR)
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for invalid CSS.
    pub fn with_label_selector(mut self, selector: &str) -> Result<Self, ScraperError> {
        self.label = Some(parse_selector(selector)?);
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for invalid CSS.
    pub fn with_pricing_selector(mut self, selector: &str) -> Result<Self, ScraperError> {
        self.pricing = Some(parse_selector(selector)?);
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for invalid CSS.
    pub fn with_developer_selector(mut self, selector: &str) -> Result<Self, ScraperError> {
        self.developer = Some(parse_selector(selector)?);
        Ok(self)
    }

    /// Keep only entries with `rank <= max_rank`. Every node is still visited.
    #[must_use]
    pub fn with_max_rank(mut self, max_rank: Option<u32>) -> Self {
        self.max_rank = max_rank;
        self
    }

    /// Normalised text and attributes of every matched entry, in document order.
    #[must_use]
    pub fn candidates(&self, document: &Html) -> Vec<EntryCandidate> {
        document
            .select(&self.entry)
            .enumerate()
            .map(|(position, entry)| {
                let candidate = self.candidate(entry);
                tracing::debug!(
                    position,
                    text = %candidate.text,
                    title = candidate.title.as_deref().unwrap_or(""),
                    "leaderboard candidate"
                );
                candidate
            })
            .collect()
    }

    fn candidate(&self, entry: ElementRef<'_>) -> EntryCandidate {
        let label = match &self.label {
            Some(selector) => entry.select(selector).next(),
            None => Some(entry),
        };

        let (text, title) = match label {
            Some(label) => (
                normalize_text(&label.text().collect::<String>()),
                label
                    .value()
                    .attr("title")
                    .map(normalize_text)
                    .filter(|t| !t.is_empty()),
            ),
            None => (String::new(), None),
        };

        EntryCandidate {
            text,
            title,
            pricing: self.pricing.as_ref().and_then(|s| first_text(entry, s)),
            developer: self.developer.as_ref().and_then(|s| first_text(entry, s)),
        }
    }

    /// Extracts every well-formed entry within the rank threshold, in page order.
    #[must_use]
    pub fn extract(&self, document: &Html) -> Vec<AppRecord> {
        let candidates = self.candidates(document);
        tracing::debug!(candidates = candidates.len(), "matched leaderboard entries");

        candidates
            .into_iter()
            .enumerate()
            .filter_map(|(position, candidate)| {
                let record = self.accept(position, &candidate)?;
                Some(
                    record
                        .with_pricing(candidate.pricing)
                        .with_developer(candidate.developer),
                )
            })
            .collect()
    }

    /// Identity-matching mode: ranks for each tracked app, unset when absent.
    ///
    /// An entry is attributed to the first identity whose matcher accepts its
    /// name or `title`. The first occurrence on the page wins.
    #[must_use]
    pub fn extract_tracked(&self, document: &Html, index: &TrackedAppIndex) -> TrackedRanks {
        let mut ranks = TrackedRanks::empty_for(index);
        if index.is_empty() {
            return ranks;
        }

        for (position, candidate) in self.candidates(document).into_iter().enumerate() {
            let Some(record) = self.accept(position, &candidate) else {
                continue;
            };
            let Some(identity) = index.identify(&record.name, candidate.title.as_deref()) else {
                continue;
            };
            if ranks.record_first(identity, record.rank) {
                tracing::info!(identity, rank = record.rank, name = %record.name, "tracked app found");
            } else {
                tracing::debug!(identity, rank = record.rank, "tracked app already ranked; ignoring later entry");
            }
        }

        ranks
    }

    /// Parses one candidate and applies the threshold filter.
    fn accept(&self, position: usize, candidate: &EntryCandidate) -> Option<AppRecord> {
        let (rank, name) = match parse_rank_name(&candidate.text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(position, error = %e, "skipping malformed leaderboard entry");
                return None;
            }
        };

        if self.max_rank.is_some_and(|max| rank > max) {
            tracing::debug!(position, rank, max_rank = ?self.max_rank, "entry above rank threshold");
            return None;
        }

        match AppRecord::new(rank, name) {
            Ok(record) => Some(record),
            Err(RecordError::NonPositiveRank(_)) => {
                let e = ParseError::malformed(&candidate.text, MalformedReason::NonPositiveRank);
                tracing::warn!(position, error = %e, "skipping malformed leaderboard entry");
                None
            }
            Err(RecordError::EmptyName) => {
                let e = ParseError::malformed(&candidate.text, MalformedReason::EmptyName);
                tracing::warn!(position, error = %e, "skipping malformed leaderboard entry");
                None
            }
        }
    }
}

/// Reads the app name and chart badge from an App Store product page.
///
/// The name is the title heading's own text nodes, which excludes the
/// nested age-rating badge. The chart position joins the text of every
/// chart badge link in document order.
///
/// # Errors
///
/// Returns [`ScraperError::MissingElement`] when the title heading is absent
/// or empty.
pub fn extract_app_page(
    document: &Html,
    captured_at: DateTime<Local>,
) -> Result<AppPageInfo, ScraperError> {
    let title_selector = parse_selector(APPLE_TITLE_SELECTOR)?;
    let chart_selector = parse_selector(APPLE_CHART_SELECTOR)?;

    let name = document
        .select(&title_selector)
        .next()
        .map(|h1| {
            let own_text = h1
                .children()
                .filter_map(|node| node.value().as_text())
                .map(|text| &**text)
                .collect::<String>();
            normalize_text(&own_text)
        })
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ScraperError::MissingElement {
            selector: APPLE_TITLE_SELECTOR.to_owned(),
            context: "app product page".to_owned(),
        })?;

    let chart_text = document
        .select(&chart_selector)
        .map(|a| normalize_text(&a.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let chart_position = Some(chart_text).filter(|text| !text.is_empty());

    Ok(AppPageInfo {
        name,
        chart_position,
        captured_at,
    })
}

fn parse_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

fn first_text(entry: ElementRef<'_>, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .map(|el| normalize_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
