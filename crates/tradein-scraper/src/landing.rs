//! Returning the page to the root of a brand's selection tree.
//!
//! The flow keeps its state in the DOM, not the URL, so the only reliable
//! way back to the root is to reload the start page and click through the
//! fixed preamble again: device category, purchase model, selected model,
//! trade-in tile, brand logo.

use tradein_core::Locator;

use crate::error::NavError;
use crate::navigator::{wait_and_click, Navigator};
use crate::traverse::{settle, TraversalPlan};

/// Reloads the start page and clicks through to the brand's first level.
///
/// Non-fatal step failures are logged and skipped: if the preamble did not
/// complete, the first sibling fetch fails and the caller treats that as a
/// dead end.
///
/// # Errors
///
/// Returns a [`NavError`] only when it is fatal (the session is gone).
pub async fn reset_to_root<N: Navigator>(
    nav: &mut N,
    plan: &TraversalPlan<'_>,
) -> Result<(), NavError> {
    let wait = plan.timeouts.wait;

    if let Err(err) = nav.open(&plan.site.start_url).await {
        tolerate("open start page", err)?;
    }

    let preamble = [
        Locator::SpanText(plan.site.category_label.clone()),
        Locator::SpanText(plan.purchase_device_model.to_string()),
        Locator::SpanText(plan.selected_model.to_string()),
        plan.site.category_tile.clone(),
    ];
    for locator in &preamble {
        if let Err(err) = wait_and_click(nav, locator, wait).await {
            tolerate(&locator.to_string(), err)?;
        }
    }

    settle(plan.timeouts.settle).await;

    let logo = plan.brand.logo_locator();
    let clicked = match nav.wait_until_present(&logo, wait).await {
        Ok(element) => nav.click(&element).await,
        Err(err) => Err(err),
    };
    if let Err(err) = clicked {
        tolerate("brand logo", err)?;
    }

    Ok(())
}

fn tolerate(step: &str, err: NavError) -> Result<(), NavError> {
    if err.is_fatal() {
        return Err(err);
    }
    tracing::warn!(step, error = %err, "landing step failed; continuing");
    Ok(())
}
