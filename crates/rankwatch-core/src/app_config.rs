use std::path::PathBuf;

/// Default browser-like user agent sent by the direct HTTP fetcher.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    /// Directory every CSV output lands in; created on first write.
    pub results_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Skip TLS certificate validation for endpoints with broken chains.
    pub accept_invalid_certs: bool,
    /// Lower bound of the randomized politeness pause between fetches.
    pub delay_min_ms: u64,
    /// Upper bound (inclusive) of the politeness pause. Always `>= delay_min_ms`.
    pub delay_max_ms: u64,
    /// Overall budget for one headless browser session.
    pub browser_timeout_secs: u64,
    /// Settle delay after each scroll pass.
    pub browser_settle_ms: u64,
    pub chrome_path: Option<PathBuf>,
}
