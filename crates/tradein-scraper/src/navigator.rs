//! The navigation capability the traversal is written against.
//!
//! Implementations drive one page. Every method takes `&mut self`: a page is
//! a single shared mutable resource and calls are issued strictly one after
//! another.

use std::time::Duration;

use tradein_core::Locator;

use crate::error::NavError;

#[allow(async_fn_in_trait)]
pub trait Navigator {
    /// Handle to an element on the current page. Invalid after any navigation.
    type Element;

    /// Loads `url`, discarding all page state.
    async fn open(&mut self, url: &str) -> Result<(), NavError>;

    /// Activates an element resolved since the last navigation.
    async fn click(&mut self, element: &Self::Element) -> Result<(), NavError>;

    /// Waits up to `timeout` for `locator` to be visible and enabled.
    async fn wait_until_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Self::Element, NavError>;

    /// Waits up to `timeout` for `locator` to exist in the DOM.
    async fn wait_until_present(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Self::Element, NavError>;

    /// Waits up to `timeout` for at least one match, then returns every match
    /// in document order.
    async fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<Self::Element>, NavError>;

    async fn read_text(&mut self, element: &Self::Element) -> Result<String, NavError>;
}

/// Waits for `locator` to become clickable and clicks it.
///
/// # Errors
///
/// Returns the [`NavError`] of whichever step failed.
pub async fn wait_and_click<N: Navigator>(
    nav: &mut N,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), NavError> {
    let element = nav.wait_until_clickable(locator, timeout).await?;
    nav.click(&element).await
}
