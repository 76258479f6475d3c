//! Headless Chrome fetch for client-side rendered leaderboards.
//!
//! A [`BrowserSession`] is a small script: navigate, poll until the ready
//! selector is visible, optionally settle, run N scroll passes with a settle
//! after each, then capture the rendered HTML. The whole script runs under one
//! overall timeout and the browser is closed whatever the outcome.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;

use super::PageFetcher;
use crate::delay::{DelayPolicy, PolitenessGate};
use crate::error::{FetchError, ScraperError};
use crate::targets::{RANK_NAME_LINK_SELECTOR, TOP_APPS_ENTRY_SELECTOR};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// How one scroll pass moves through the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    ToBottom,
    /// Half the page height first, then the bottom, settling in between.
    HalfThenBottom,
}

impl ScrollMode {
    /// Scripts evaluated in order for one pass.
    #[must_use]
    pub fn steps(self) -> &'static [&'static str] {
        match self {
            ScrollMode::ToBottom => &["window.scrollTo(0, document.body.scrollHeight); true"],
            ScrollMode::HalfThenBottom => &[
                "window.scrollTo(0, document.body.scrollHeight / 2); true",
                "window.scrollTo(0, document.body.scrollHeight); true",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSession {
    pub ready_selector: String,
    pub timeout: Duration,
    pub initial_settle: Duration,
    pub scroll_passes: u32,
    pub settle: Duration,
    pub scroll: ScrollMode,
}

impl BrowserSession {
    /// One pass to the bottom, for pages that render their list up front.
    #[must_use]
    pub fn top_apps() -> Self {
        Self {
            ready_selector: TOP_APPS_ENTRY_SELECTOR.to_owned(),
            timeout: Duration::from_secs(15),
            initial_settle: Duration::ZERO,
            scroll_passes: 1,
            settle: Duration::from_secs(2),
            scroll: ScrollMode::ToBottom,
        }
    }

    /// Repeated passes for lists that load more entries as you scroll.
    #[must_use]
    pub fn infinite_scroll() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            scroll_passes: 10,
            ..Self::top_apps()
        }
    }

    /// Session used for identity tracking across stores.
    #[must_use]
    pub fn tracked() -> Self {
        Self {
            ready_selector: RANK_NAME_LINK_SELECTOR.to_owned(),
            timeout: Duration::from_secs(30),
            initial_settle: Duration::from_secs(5),
            scroll_passes: 1,
            settle: Duration::from_secs(3),
            scroll: ScrollMode::HalfThenBottom,
        }
    }

    #[must_use]
    pub fn with_scroll_passes(mut self, passes: u32) -> Self {
        self.scroll_passes = passes;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Script returning `true` once the ready selector matches a rendered element.
    #[must_use]
    pub fn visibility_script(&self) -> String {
        // JSON string literals are valid JS string literals.
        let selector = serde_json::Value::String(self.ready_selector.clone()).to_string();
        format!(
            r"(() => {{
                const el = document.querySelector({selector});
                if (!el) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none' || style.visibility === 'hidden') return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 || rect.height > 0;
            }})()"
        )
    }
}

#[derive(Debug)]
pub struct BrowserFetcher {
    session: BrowserSession,
    chrome_path: Option<PathBuf>,
    gate: PolitenessGate,
}

impl BrowserFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::BrowserConfig`] if the session has a zero timeout
    /// or a blank ready selector.
    pub fn new(
        session: BrowserSession,
        chrome_path: Option<PathBuf>,
        delay: DelayPolicy,
    ) -> Result<Self, ScraperError> {
        if session.timeout.is_zero() {
            return Err(ScraperError::BrowserConfig(
                "session timeout must be non-zero".to_owned(),
            ));
        }
        if session.ready_selector.trim().is_empty() {
            return Err(ScraperError::BrowserConfig(
                "ready selector must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            session,
            chrome_path,
            gate: PolitenessGate::new(delay),
        })
    }

    fn launch_config(&self, url: &str) -> Result<BrowserConfig, FetchError> {
        let mut builder = BrowserConfig::builder();
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(|reason| FetchError::NetworkFailure {
            url: url.to_owned(),
            reason: format!("browser config: {reason}"),
        })
    }

    async fn drive(&self, browser: &Browser, url: &str) -> Result<String, CdpError> {
        let page = browser.new_page(url).await?;
        self.wait_until_visible(&page).await?;

        if !self.session.initial_settle.is_zero() {
            tokio::time::sleep(self.session.initial_settle).await;
        }

        for pass in 0..self.session.scroll_passes {
            for step in self.session.scroll.steps() {
                page.evaluate(*step).await?;
                tokio::time::sleep(self.session.settle).await;
            }
            tracing::debug!(url, pass = pass + 1, "scroll pass complete");
        }

        page.content().await
    }

    /// Polls until the ready selector is visible. Bounded by the outer session timeout.
    async fn wait_until_visible(&self, page: &Page) -> Result<(), CdpError> {
        let script = self.session.visibility_script();
        loop {
            let visible = page
                .evaluate(script.as_str())
                .await?
                .into_value::<bool>()
                .unwrap_or(false);
            if visible {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.gate.wait_turn().await;
        tracing::debug!(url, timeout_secs = self.session.timeout.as_secs(), "browser fetch");

        let network = |e: CdpError| FetchError::NetworkFailure {
            url: url.to_owned(),
            reason: e.to_string(),
        };

        let (mut browser, mut handler) = Browser::launch(self.launch_config(url)?)
            .await
            .map_err(network)?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!(error = %e, "browser handler event error");
                }
            }
        });

        let outcome = tokio::time::timeout(self.session.timeout, self.drive(&browser, url)).await;

        match tokio::time::timeout(CLOSE_TIMEOUT, browser.close()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!(url, error = %e, "failed to close browser"),
            Err(_) => tracing::warn!(url, "timed out closing browser"),
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!(url, error = %e, "browser process wait failed");
        }
        handler_task.abort();

        match outcome {
            Ok(Ok(html)) => {
                tracing::debug!(url, bytes = html.len(), "browser fetch complete");
                Ok(html)
            }
            Ok(Err(e)) => Err(network(e)),
            Err(_) => Err(FetchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.session.timeout.as_secs(),
            }),
        }
    }
}
