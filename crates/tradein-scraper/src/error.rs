use thiserror::Error;

/// Failure of a single navigation or read step.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("timed out after {timeout_secs}s waiting for {locator}")]
    Timeout { locator: String, timeout_secs: u64 },

    #[error("element not found: {locator}")]
    NotFound { locator: String },

    /// A handle fetched before the last navigation was used after it.
    #[error("stale element reference")]
    StaleElement,

    #[error("script execution failed: {0}")]
    Script(String),

    #[error("browser session lost: {0}")]
    SessionLost(String),
}

impl NavError {
    /// Returns `true` when the navigation capability itself is unusable.
    ///
    /// Everything else is a dead end for the current branch only.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, NavError::SessionLost(_))
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Navigation(#[from] NavError),

    #[error("failed to connect to WebDriver at {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("site profile has no entry for brand {0}")]
    UnknownBrand(String),
}
