//! Page fetch strategies.
//!
//! Two interchangeable strategies return the same thing, the page's HTML:
//! a direct HTTP GET ([`HttpFetcher`]) and a headless browser session that
//! waits for client-side rendering ([`BrowserFetcher`]).

pub mod browser;
pub mod http;

use std::future::Future;

use crate::error::FetchError;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// Something that turns a URL into page HTML.
pub trait PageFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, non-2xx status or timeout.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Runtime-selected fetch strategy.
#[derive(Debug)]
pub enum Fetcher {
    Http(HttpFetcher),
    Browser(BrowserFetcher),
}

impl Fetcher {
    /// Short strategy name for log lines.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Fetcher::Http(_) => "http",
            Fetcher::Browser(_) => "browser",
        }
    }
}

impl PageFetcher for Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self {
            Fetcher::Http(http) => http.fetch(url).await,
            Fetcher::Browser(browser) => browser.fetch(url).await,
        }
    }
}

impl From<HttpFetcher> for Fetcher {
    fn from(fetcher: HttpFetcher) -> Self {
        Fetcher::Http(fetcher)
    }
}

impl From<BrowserFetcher> for Fetcher {
    fn from(fetcher: BrowserFetcher) -> Self {
        Fetcher::Browser(fetcher)
    }
}
