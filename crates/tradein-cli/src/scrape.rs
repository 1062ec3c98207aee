//! `scrape` command handler.
//!
//! Brands are scraped in order, each in its own browser session. A brand
//! that fails is logged and skipped; whatever the other brands captured is
//! still written before the command reports the failure.

use std::path::PathBuf;

use anyhow::Context;
use tradein_core::{AppConfig, Brand};

/// Brands to visit for an optional `--brand` filter, in capture order.
pub(crate) fn brands_for(filter: Option<Brand>) -> Vec<Brand> {
    filter.map_or_else(|| Brand::ALL.to_vec(), |brand| vec![brand])
}

/// Scrape the configured site and write the raw capture table.
///
/// Returns the path of the raw table, or `None` when nothing was captured
/// (no file is written in that case).
///
/// # Errors
///
/// Returns an error if the site profile cannot be loaded, the output cannot
/// be written, or any brand failed to scrape.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    brand: Option<Brand>,
    also_clean: bool,
) -> anyhow::Result<Option<PathBuf>> {
    let site = tradein_core::load_site_profile(&config.site_path)
        .with_context(|| format!("loading site profile {}", config.site_path.display()))?;
    let brands = brands_for(brand);
    let captured_on = chrono::Local::now().date_naive();

    let report = tradein_scraper::scrape_all(config, &site, &brands, captured_on).await;

    let raw_path = if report.records.is_empty() {
        tracing::warn!("no quotes captured; nothing written");
        None
    } else {
        std::fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("creating {}", config.output_dir.display()))?;
        let path = config
            .output_dir
            .join(tradein_clean::raw_file_name(captured_on));
        tradein_clean::write_raw_file(&path, &report.records)?;
        tracing::info!(
            path = %path.display(),
            records = report.records.len(),
            "raw capture written"
        );
        if also_clean {
            crate::clean::run_clean(&path, None)?;
        }
        Some(path)
    };

    if !report.failed_brands.is_empty() {
        let names: Vec<String> = report.failed_brands.iter().map(ToString::to_string).collect();
        anyhow::bail!("scrape failed for: {}", names.join(", "));
    }

    Ok(raw_path)
}
