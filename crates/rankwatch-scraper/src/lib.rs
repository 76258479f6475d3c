pub mod delay;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod targets;

pub use delay::{DelayPolicy, PolitenessGate};
pub use error::{FetchError, MalformedReason, ParseError, ScraperError};
pub use extract::{extract_app_page, EntryCandidate, LeaderboardExtractor};
pub use fetch::browser::{BrowserFetcher, BrowserSession, ScrollMode};
pub use fetch::http::{HttpFetcher, HttpOptions};
pub use fetch::{Fetcher, PageFetcher};
pub use normalize::normalize_text;
pub use parse::parse_rank_name;
pub use targets::{leaderboard_url, tracked_targets, DEFAULT_APP_PAGE_URL, DEFAULT_COUNTRIES};
