use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Ios,
    Play,
}

impl Store {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Store::Ios => "ios",
            Store::Play => "play",
        }
    }

    /// Human-readable store name used in grouped CSV headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Store::Ios => "iOS App Store",
            Store::Play => "Google Play Store",
        }
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Store {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" | "app-store" | "appstore" => Ok(Store::Ios),
            "play" | "google-play" | "android" => Ok(Store::Play),
            other => Err(format!("unknown store \"{other}\"; expected ios or play")),
        }
    }
}

/// A `(country, store)` leaderboard source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Slug as used in leaderboard URLs, e.g. `"united-kingdom"`.
    pub country: String,
    pub store: Store,
}

impl Target {
    #[must_use]
    pub fn new(country: impl Into<String>, store: Store) -> Self {
        Self {
            country: country.into(),
            store,
        }
    }

    /// Title-cased country name: `"united-states"` → `"United States"`.
    #[must_use]
    pub fn country_label(&self) -> String {
        self.country
            .split('-')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Group title for wide CSV layouts, e.g. `"United States - iOS App Store"`.
    #[must_use]
    pub fn group_label(&self) -> String {
        format!("{} - {}", self.country_label(), self.store.label())
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.country, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_from_str_accepts_aliases() {
        assert_eq!("iOS".parse::<Store>().unwrap(), Store::Ios);
        assert_eq!("google-play".parse::<Store>().unwrap(), Store::Play);
        assert!("windows".parse::<Store>().is_err());
    }

    #[test]
    fn country_label_title_cases_slug() {
        let target = Target::new("united-kingdom", Store::Ios);
        assert_eq!(target.country_label(), "United Kingdom");
    }

    #[test]
    fn group_label_matches_wide_header() {
        assert_eq!(
            Target::new("united-states", Store::Ios).group_label(),
            "United States - iOS App Store"
        );
        assert_eq!(
            Target::new("united-kingdom", Store::Play).group_label(),
            "United Kingdom - Google Play Store"
        );
    }

    #[test]
    fn display_joins_country_and_store() {
        assert_eq!(
            Target::new("canada", Store::Play).to_string(),
            "canada/play"
        );
    }
}
