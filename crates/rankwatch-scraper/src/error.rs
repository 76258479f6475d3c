use thiserror::Error;

/// Failure to obtain a page, from either fetch strategy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, TLS, connection reset, browser launch or CDP error.
    #[error("network failure fetching {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    NonSuccessStatus { status: u16, url: String },

    /// The request or browser session exceeded its time budget.
    #[error("timed out after {timeout_secs}s fetching {url}")]
    Timeout { url: String, timeout_secs: u64 },
}

impl FetchError {
    /// Maps a `reqwest` failure to `Timeout` or `NetworkFailure`.
    pub(crate) fn from_reqwest(url: &str, timeout_secs: u64, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_owned(),
                timeout_secs,
            }
        } else {
            FetchError::NetworkFailure {
                url: url.to_owned(),
                reason: err.to_string(),
            }
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            FetchError::NetworkFailure { url, .. }
            | FetchError::NonSuccessStatus { url, .. }
            | FetchError::Timeout { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    Empty,
    NoPeriod,
    InvalidRank,
    EmptyName,
    NonPositiveRank,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            MalformedReason::Empty => "entry text is empty",
            MalformedReason::NoPeriod => "no period separating rank and name",
            MalformedReason::InvalidRank => "rank prefix is not a non-negative integer",
            MalformedReason::EmptyName => "name after the period is empty",
            MalformedReason::NonPositiveRank => "rank must be at least 1",
        };
        f.write_str(msg)
    }
}

/// A single leaderboard row that does not have the `"<rank>. <name>"` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed leaderboard entry \"{text}\": {reason}")]
    MalformedEntry {
        text: String,
        reason: MalformedReason,
    },
}

impl ParseError {
    pub(crate) fn malformed(text: &str, reason: MalformedReason) -> Self {
        ParseError::MalformedEntry {
            text: text.to_owned(),
            reason,
        }
    }

    #[must_use]
    pub fn reason(&self) -> MalformedReason {
        match self {
            ParseError::MalformedEntry { reason, .. } => *reason,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid CSS selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("required element \"{selector}\" not found on {context}")]
    MissingElement { selector: String, context: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid browser configuration: {0}")]
    BrowserConfig(String),
}
