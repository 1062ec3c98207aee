//! Brand-level orchestration: one session per brand, failures isolated.

use std::time::Instant;

use chrono::NaiveDate;
use tradein_core::{AppConfig, Brand, QuoteRecord, SiteProfile};

use crate::error::ScrapeError;
use crate::navigator::Navigator;
use crate::session::with_session;
use crate::traverse::{enumerate, Timeouts, TraversalPlan};

/// Records captured by a run, plus the brands that could not be scraped.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub records: Vec<QuoteRecord>,
    pub failed_brands: Vec<Brand>,
}

/// Builds the traversal plan for `brand` from process config and site profile.
///
/// # Errors
///
/// Returns [`ScrapeError::UnknownBrand`] if the profile has no tree for `brand`.
pub fn plan_for<'a>(
    config: &'a AppConfig,
    site: &'a SiteProfile,
    brand: Brand,
    captured_on: NaiveDate,
) -> Result<TraversalPlan<'a>, ScrapeError> {
    let profile = site
        .brand(brand)
        .ok_or_else(|| ScrapeError::UnknownBrand(brand.to_string()))?;
    Ok(TraversalPlan {
        site,
        brand: profile,
        purchase_device_model: &config.purchase_device_model,
        selected_model: &config.selected_model,
        captured_on,
        timeouts: Timeouts::from_config(config),
    })
}

/// Traverses one brand's tree on an already-open page.
///
/// # Errors
///
/// Propagates fatal navigation errors from [`enumerate`].
pub async fn scrape_brand<N: Navigator>(
    nav: &mut N,
    plan: &TraversalPlan<'_>,
) -> Result<Vec<QuoteRecord>, ScrapeError> {
    let brand = plan.brand.brand;
    tracing::info!(%brand, depth = plan.brand.depth(), "extracting quotes");

    let started = Instant::now();
    let records = enumerate(nav, plan).await?;

    tracing::info!(
        %brand,
        records = records.len(),
        elapsed_secs = started.elapsed().as_secs(),
        "brand traversal finished"
    );
    Ok(records)
}

/// Scrapes each brand in `brands` order, each in its own WebDriver session.
///
/// A brand that fails (no profile, no session, lost session) is logged and
/// listed in [`ScrapeReport::failed_brands`]; the remaining brands still run.
pub async fn scrape_all(
    config: &AppConfig,
    site: &SiteProfile,
    brands: &[Brand],
    captured_on: NaiveDate,
) -> ScrapeReport {
    let mut report = ScrapeReport::default();

    for &brand in brands {
        let outcome = match plan_for(config, site, brand, captured_on) {
            Ok(plan) => {
                with_session(&config.webdriver_url, async |session| {
                    scrape_brand(session, &plan).await
                })
                .await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(records) => report.records.extend(records),
            Err(e) => {
                tracing::error!(%brand, error = %e, "brand scrape failed; skipping");
                report.failed_brands.push(brand);
            }
        }
    }

    report
}
