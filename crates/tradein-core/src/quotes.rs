//! Domain types for captured trade-in quotes and their cleaned, pivoted form.
//!
//! A quote path is always stored against the five-column schema
//! (`Series nm`, `Series`, `Model`, `Storage`, `Condition`). Brands whose
//! selection tree is shallower leave the columns they never visit empty.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in both the raw and the cleaned tables (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Device brand whose trade-in catalog is traversed.
///
/// Encoded in the output tables as a flag: `0` for Samsung, `1` for Apple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Samsung,
    Apple,
}

impl Brand {
    /// Traversal order for a full run.
    pub const ALL: [Brand; 2] = [Brand::Samsung, Brand::Apple];

    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            Brand::Samsung => 0,
            Brand::Apple => 1,
        }
    }

    #[must_use]
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Brand::Samsung),
            1 => Some(Brand::Apple),
            _ => None,
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brand::Samsung => write!(f, "Samsung"),
            Brand::Apple => write!(f, "Apple"),
        }
    }
}

impl FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "samsung" => Ok(Brand::Samsung),
            "apple" => Ok(Brand::Apple),
            other => Err(format!("unknown brand '{other}'; expected samsung or apple")),
        }
    }
}

/// One column of the selection path. Each level of a brand's tree fills
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathField {
    SeriesName,
    Series,
    Model,
    Storage,
    Condition,
}

impl PathField {
    pub const ALL: [PathField; 5] = [
        PathField::SeriesName,
        PathField::Series,
        PathField::Model,
        PathField::Storage,
        PathField::Condition,
    ];

    /// Header used for this field in the output tables.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            PathField::SeriesName => "Series nm",
            PathField::Series => "Series",
            PathField::Model => "Model",
            PathField::Storage => "Storage",
            PathField::Condition => "Condition",
        }
    }
}

impl fmt::Display for PathField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathField::SeriesName => "series_name",
            PathField::Series => "series",
            PathField::Model => "model",
            PathField::Storage => "storage",
            PathField::Condition => "condition",
        };
        f.write_str(name)
    }
}

/// An option enumerated at one level of the tree. Position is the only
/// stable identity; the label is whatever the page rendered at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionNode {
    pub position: usize,
    pub label: String,
}

/// Labels chosen from root to leaf, padded to the five-column schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectionPath {
    pub series_name: String,
    pub series: String,
    pub model: String,
    pub storage: String,
    pub condition: String,
}

impl SelectionPath {
    /// Builds a path from `(field, label)` pairs; unnamed fields stay empty.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (PathField, S)>,
        S: Into<String>,
    {
        let mut path = Self::default();
        for (field, label) in fields {
            path.set(field, label.into());
        }
        path
    }

    pub fn set(&mut self, field: PathField, label: String) {
        match field {
            PathField::SeriesName => self.series_name = label,
            PathField::Series => self.series = label,
            PathField::Model => self.model = label,
            PathField::Storage => self.storage = label,
            PathField::Condition => self.condition = label,
        }
    }

    #[must_use]
    pub fn get(&self, field: PathField) -> &str {
        match field {
            PathField::SeriesName => &self.series_name,
            PathField::Series => &self.series,
            PathField::Model => &self.model,
            PathField::Storage => &self.storage,
            PathField::Condition => &self.condition,
        }
    }
}

/// One captured leaf: the full path and the price text exactly as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub captured_on: NaiveDate,
    pub brand: Brand,
    pub path: SelectionPath,
    /// Raw price text, e.g. `"1,202 AED"`.
    pub raw_price: String,
}

impl QuoteRecord {
    #[must_use]
    pub fn date_text(&self) -> String {
        self.captured_on.format(DATE_FORMAT).to_string()
    }
}

/// A price column value. Text that carries no number passes through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Price {
    Amount(i64),
    Text(String),
}

impl Default for Price {
    /// Missing condition columns are zero-filled.
    fn default() -> Self {
        Price::Amount(0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{amount}"),
            Price::Text(text) => f.write_str(text),
        }
    }
}

/// Condition bucket derived from the free-text condition description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    Flawless,
    Average,
    Broken,
    /// Description matched none of the known buckets; carries the original text.
    Unclassified(String),
}

impl Condition {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Condition::Flawless => "Flawless",
            Condition::Average => "Average",
            Condition::Broken => "Broken",
            Condition::Unclassified(text) => text,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A path with one price column per condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideQuoteRecord {
    pub captured_on: NaiveDate,
    pub brand: Brand,
    pub series_name: String,
    pub series: String,
    pub model: String,
    pub storage: String,
    pub flawless: Price,
    pub broken: Price,
    pub average: Price,
}

impl WideQuoteRecord {
    #[must_use]
    pub fn date_text(&self) -> String {
        self.captured_on.format(DATE_FORMAT).to_string()
    }
}
