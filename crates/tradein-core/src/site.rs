//! Site profile: where the trade-in flow lives and how each brand's
//! selection tree is laid out on the page.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::quotes::{Brand, PathField};
use crate::ConfigError;

/// How to find an element on the page.
///
/// YAML form: `{ by: class_name, value: custom-model-item }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Locator {
    Xpath(String),
    Css(String),
    ClassName(String),
    /// A `<span>` whose text is exactly this label.
    SpanText(String),
}

impl Locator {
    /// Renders the locator as an XPath or CSS selector string.
    ///
    /// Returns `(is_xpath, selector)`.
    #[must_use]
    pub fn selector(&self) -> (bool, String) {
        match self {
            Locator::Xpath(xpath) => (true, xpath.clone()),
            Locator::Css(css) => (false, css.clone()),
            Locator::ClassName(class) => (false, format!(".{class}")),
            Locator::SpanText(label) => (true, format!("//span[text()={}]", xpath_literal(label))),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Xpath(xpath) => write!(f, "xpath:{xpath}"),
            Locator::Css(css) => write!(f, "css:{css}"),
            Locator::ClassName(class) => write!(f, "class:{class}"),
            Locator::SpanText(label) => write!(f, "span:{label}"),
        }
    }
}

/// Quotes `s` as an XPath string literal. Labels containing both quote kinds
/// fall back to `concat()`.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        return format!("'{s}'");
    }
    if !s.contains('"') {
        return format!("\"{s}\"");
    }
    let parts: Vec<String> = s.split('\'').map(|p| format!("'{p}'")).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// One level of a brand's selection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Column the chosen label is recorded under.
    pub field: PathField,
    /// Matches every sibling option shown at this level.
    pub locator: Locator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub brand: Brand,
    /// `src` of the brand logo tile that opens this brand's tree.
    pub logo_src: String,
    /// Levels from root to leaf; the last one is always the condition.
    pub levels: Vec<LevelSpec>,
}

impl BrandProfile {
    #[must_use]
    pub fn logo_locator(&self) -> Locator {
        Locator::Xpath(format!("//img[@src={}]", xpath_literal(&self.logo_src)))
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub start_url: String,
    /// Label of the device category tile, e.g. `"Mobile Phones"`.
    pub category_label: String,
    /// The trade-in category tile clicked after choosing the purchase model.
    pub category_tile: Locator,
    /// Where the quoted price appears once a condition is chosen.
    pub price: Locator,
    pub brands: Vec<BrandProfile>,
}

impl SiteProfile {
    #[must_use]
    pub fn brand(&self, brand: Brand) -> Option<&BrandProfile> {
        self.brands.iter().find(|b| b.brand == brand)
    }
}

/// Load and validate the site profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_site_profile(path: &Path) -> Result<SiteProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SiteFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: SiteProfile = serde_yaml::from_str(&content)?;

    validate_site_profile(&profile)?;

    Ok(profile)
}

fn validate_site_profile(profile: &SiteProfile) -> Result<(), ConfigError> {
    if profile.start_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "start_url must be non-empty".to_string(),
        ));
    }

    let mut seen_brands = HashSet::new();
    for brand in &profile.brands {
        if !seen_brands.insert(brand.brand) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand: '{}'",
                brand.brand
            )));
        }

        if brand.logo_src.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has an empty logo_src",
                brand.brand
            )));
        }

        let Some(last) = brand.levels.last() else {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has no levels",
                brand.brand
            )));
        };
        if last.field != PathField::Condition {
            return Err(ConfigError::Validation(format!(
                "brand '{}' must end with the condition level, found '{}'",
                brand.brand, last.field
            )));
        }

        let mut seen_fields = HashSet::new();
        for level in &brand.levels {
            if !seen_fields.insert(level.field) {
                return Err(ConfigError::Validation(format!(
                    "brand '{}' lists level '{}' twice",
                    brand.brand, level.field
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
