//! WebDriver-backed [`Navigator`] and scoped session acquisition.

use std::time::{Duration, Instant};

use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder};
use tradein_core::Locator;

use crate::error::{NavError, ScrapeError};
use crate::navigator::Navigator;

/// How often a clickable wait re-checks visibility once the element exists.
const CLICKABLE_POLL: Duration = Duration::from_millis(250);

/// Tiles on the trade-in page intercept native clicks, so clicks are
/// dispatched from script.
const SCRIPT_CLICK: &str = "arguments[0].click();";

/// One browser session driving one page.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Opens a new browser session on the WebDriver server at `webdriver_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Connect`] if no session can be created.
    pub async fn connect(webdriver_url: &str) -> Result<Self, ScrapeError> {
        let client = ClientBuilder::native()
            .connect(webdriver_url)
            .await
            .map_err(|e| ScrapeError::Connect {
                url: webdriver_url.to_string(),
                reason: e.to_string(),
            })?;

        if let Err(e) = client.maximize_window().await {
            tracing::debug!(error = %e, "could not maximize browser window");
        }
        tracing::info!(url = webdriver_url, "webdriver session opened");

        Ok(Self { client })
    }

    /// Ends the browser session.
    ///
    /// # Errors
    ///
    /// Returns a [`NavError`] if the WebDriver server rejects the close.
    pub async fn close(self) -> Result<(), NavError> {
        self.client.close().await.map_err(|e| nav_error(e, "close"))
    }
}

/// Runs `f` with a fresh session and always closes the session afterward.
///
/// The result of `f` is returned as-is; a failure to close is only logged.
///
/// # Errors
///
/// Returns [`ScrapeError::Connect`] if the session cannot be opened, or
/// whatever `f` returns.
pub async fn with_session<T, F>(webdriver_url: &str, f: F) -> Result<T, ScrapeError>
where
    F: AsyncFnOnce(&mut WebDriverSession) -> Result<T, ScrapeError>,
{
    let mut session = WebDriverSession::connect(webdriver_url).await?;
    let result = f(&mut session).await;
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "failed to close webdriver session");
    }
    result
}

fn to_fantoccini(selector: &(bool, String)) -> fantoccini::Locator<'_> {
    let (is_xpath, value) = selector;
    if *is_xpath {
        fantoccini::Locator::XPath(value)
    } else {
        fantoccini::Locator::Css(value)
    }
}

fn nav_error(err: CmdError, locator: &str) -> NavError {
    match err {
        ref e if e.is_no_such_element() => NavError::NotFound {
            locator: locator.to_string(),
        },
        CmdError::Standard(ref wd) if wd.error == ErrorStatus::StaleElementReference => {
            NavError::StaleElement
        }
        CmdError::Standard(ref wd)
            if wd.error == ErrorStatus::InvalidSessionId
                || wd.error == ErrorStatus::NoSuchWindow =>
        {
            NavError::SessionLost(err.to_string())
        }
        CmdError::Lost(_) => NavError::SessionLost(err.to_string()),
        other => NavError::Script(other.to_string()),
    }
}

fn timeout_error(err: CmdError, locator: &Locator, timeout: Duration) -> NavError {
    match err {
        CmdError::WaitTimeout => NavError::Timeout {
            locator: locator.to_string(),
            timeout_secs: timeout.as_secs(),
        },
        other => nav_error(other, &locator.to_string()),
    }
}

/// Visible and enabled. A fatal error ends the wait at once; anything else
/// counts as not clickable yet.
async fn is_clickable(element: &Element, locator: &Locator) -> Result<bool, NavError> {
    let displayed = element.is_displayed().await;
    let enabled = match displayed {
        Ok(true) => element.is_enabled().await,
        Ok(false) => Ok(false),
        Err(e) => Err(e),
    };
    match enabled {
        Ok(clickable) => Ok(clickable),
        Err(e) => {
            let err = nav_error(e, &locator.to_string());
            if err.is_fatal() {
                return Err(err);
            }
            tracing::trace!(%locator, error = %err, "clickable check failed; retrying");
            Ok(false)
        }
    }
}

impl Navigator for WebDriverSession {
    type Element = Element;

    async fn open(&mut self, url: &str) -> Result<(), NavError> {
        tracing::trace!(url, "open");
        self.client.goto(url).await.map_err(|e| nav_error(e, url))
    }

    async fn click(&mut self, element: &Element) -> Result<(), NavError> {
        let arg = serde_json::to_value(element).map_err(|e| NavError::Script(e.to_string()))?;
        self.client
            .execute(SCRIPT_CLICK, vec![arg])
            .await
            .map(|_| ())
            .map_err(|e| nav_error(e, "script click"))
    }

    async fn wait_until_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Element, NavError> {
        let deadline = Instant::now() + timeout;
        let element = self.wait_until_present(locator, timeout).await?;
        loop {
            if is_clickable(&element, locator).await? {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(NavError::Timeout {
                    locator: locator.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            tokio::time::sleep(CLICKABLE_POLL).await;
        }
    }

    async fn wait_until_present(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Element, NavError> {
        let selector = locator.selector();
        self.client
            .wait()
            .at_most(timeout)
            .for_element(to_fantoccini(&selector))
            .await
            .map_err(|e| timeout_error(e, locator, timeout))
    }

    async fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<Element>, NavError> {
        self.wait_until_present(locator, timeout).await?;
        let selector = locator.selector();
        self.client
            .find_all(to_fantoccini(&selector))
            .await
            .map_err(|e| nav_error(e, &locator.to_string()))
    }

    async fn read_text(&mut self, element: &Element) -> Result<String, NavError> {
        element
            .text()
            .await
            .map_err(|e| nav_error(e, "element text"))
    }
}
