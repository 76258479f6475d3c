//! Declarative identity matching for the multi-app leaderboard runs.
//!
//! A [`TrackedAppIndex`] is an ordered list of `(identity, matcher)` pairs.
//! Order matters: when an entry satisfies several matchers, the first one in
//! the index claims it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AppMatcher {
    /// Matches when the entry name or its `title` attribute contains the needle.
    Contains(String),
    /// Matches when the parsed entry name equals the value exactly.
    ExactName(String),
}

impl AppMatcher {
    #[must_use]
    pub fn matches(&self, name: &str, title: Option<&str>) -> bool {
        match self {
            AppMatcher::Contains(needle) => {
                name.contains(needle.as_str())
                    || title.is_some_and(|t| t.contains(needle.as_str()))
            }
            AppMatcher::ExactName(expected) => name == expected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedApp {
    /// Canonical identity, also used as the CSV column header.
    pub identity: String,
    pub matcher: AppMatcher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedAppIndex {
    apps: Vec<TrackedApp>,
}

impl TrackedAppIndex {
    /// Builds an index, rejecting empty identities, empty needles and duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first offending entry.
    pub fn new(apps: Vec<TrackedApp>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for app in &apps {
            if app.identity.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "tracked app identity must be non-empty".to_string(),
                ));
            }
            let needle = match &app.matcher {
                AppMatcher::Contains(n) | AppMatcher::ExactName(n) => n,
            };
            if needle.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "tracked app '{}' has an empty matcher",
                    app.identity
                )));
            }
            if !seen.insert(app.identity.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate tracked app identity: '{}'",
                    app.identity
                )));
            }
        }
        Ok(Self { apps })
    }

    /// Coinbase, OKX and Trust Wallet, matched by substring on name or title.
    #[must_use]
    pub fn crypto_wallets() -> Self {
        Self {
            apps: vec![
                TrackedApp {
                    identity: "Coinbase".to_string(),
                    matcher: AppMatcher::Contains("Coinbase".to_string()),
                },
                TrackedApp {
                    identity: "OKX".to_string(),
                    matcher: AppMatcher::Contains("OKX".to_string()),
                },
                TrackedApp {
                    identity: "Trust Wallet".to_string(),
                    matcher: AppMatcher::Contains("Trust".to_string()),
                },
            ],
        }
    }

    #[must_use]
    pub fn apps(&self) -> &[TrackedApp] {
        &self.apps
    }

    #[must_use]
    pub fn identities(&self) -> Vec<&str> {
        self.apps.iter().map(|a| a.identity.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// First identity whose matcher accepts the entry.
    #[must_use]
    pub fn identify(&self, name: &str, title: Option<&str>) -> Option<&str> {
        self.apps
            .iter()
            .find(|a| a.matcher.matches(name, title))
            .map(|a| a.identity.as_str())
    }
}

/// Observed ranks for every identity of a [`TrackedAppIndex`], in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRanks {
    entries: Vec<(String, Option<u32>)>,
}

impl TrackedRanks {
    /// All identities start unset.
    #[must_use]
    pub fn empty_for(index: &TrackedAppIndex) -> Self {
        Self {
            entries: index
                .apps()
                .iter()
                .map(|a| (a.identity.clone(), None))
                .collect(),
        }
    }

    /// Sets the rank for `identity` unless one was already recorded.
    /// Returns `true` when the value was stored.
    pub fn record_first(&mut self, identity: &str, rank: u32) -> bool {
        match self.entries.iter_mut().find(|(id, _)| id == identity) {
            Some((_, slot @ None)) => {
                *slot = Some(rank);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn get(&self, identity: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(id, _)| id == identity)
            .and_then(|(_, rank)| *rank)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u32>)> {
        self.entries.iter().map(|(id, rank)| (id.as_str(), *rank))
    }

    /// Ranks as CSV cells; unset identities become empty strings.
    #[must_use]
    pub fn to_cells(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, rank)| rank.map(|r| r.to_string()).unwrap_or_default())
            .collect()
    }

    #[must_use]
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_some()).count()
    }
}

#[cfg(test)]
#[path = "tracked_test.rs"]
mod tests;
