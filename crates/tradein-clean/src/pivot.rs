//! Long-to-wide pivot of captured quotes.

use std::collections::HashMap;

use chrono::NaiveDate;
use tradein_core::{Brand, Condition, Price, QuoteRecord, WideQuoteRecord};

use crate::condition::classify_condition;
use crate::price::extract_numerical_price;

/// Identity of a wide row: everything in the path except the condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RowKey<'a> {
    captured_on: NaiveDate,
    brand: Brand,
    series_name: &'a str,
    series: &'a str,
    model: &'a str,
    storage: &'a str,
}

impl<'a> RowKey<'a> {
    fn of(record: &'a QuoteRecord) -> Self {
        Self {
            captured_on: record.captured_on,
            brand: record.brand,
            series_name: &record.path.series_name,
            series: &record.path.series,
            model: &record.path.model,
            storage: &record.path.storage,
        }
    }

    fn into_row(self) -> WideQuoteRecord {
        WideQuoteRecord {
            captured_on: self.captured_on,
            brand: self.brand,
            series_name: self.series_name.to_string(),
            series: self.series.to_string(),
            model: self.model.to_string(),
            storage: self.storage.to_string(),
            flawless: Price::default(),
            broken: Price::default(),
            average: Price::default(),
        }
    }
}

/// Row under construction, tracking which condition columns are filled.
struct Pending {
    row: WideQuoteRecord,
    flawless: bool,
    broken: bool,
    average: bool,
}

impl Pending {
    /// Fills the column for `condition`; returns `false` if it was already set.
    fn fill(&mut self, condition: &Condition, price: Price) -> bool {
        let (slot, filled) = match condition {
            Condition::Flawless => (&mut self.row.flawless, &mut self.flawless),
            Condition::Broken => (&mut self.row.broken, &mut self.broken),
            Condition::Average => (&mut self.row.average, &mut self.average),
            Condition::Unclassified(_) => return false,
        };
        if *filled {
            return false;
        }
        *slot = price;
        *filled = true;
        true
    }
}

/// Pivots captured quotes into one row per (date, brand, path minus condition).
///
/// Each condition bucket becomes its own price column; a bucket with no
/// quote for a row stays `0`. Records whose condition is unclassified are
/// dropped from the output. If a row sees the same bucket twice, the first
/// captured price is kept. Rows come out in the order their key first
/// appears in `records` (the capture's DFS order), not sorted by key as an
/// outer merge in a dataframe library would emit them.
#[must_use]
pub fn clean(records: &[QuoteRecord]) -> Vec<WideQuoteRecord> {
    let mut index: HashMap<RowKey<'_>, usize> = HashMap::new();
    let mut rows: Vec<Pending> = Vec::new();
    let mut unclassified = 0usize;

    for record in records {
        let condition = classify_condition(&record.path.condition);
        if let Condition::Unclassified(text) = &condition {
            tracing::debug!(
                brand = %record.brand,
                model = %record.path.model,
                condition = %text,
                "unclassified condition; excluded from pivot"
            );
            unclassified += 1;
            continue;
        }

        let key = RowKey::of(record);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(Pending {
                row: key.into_row(),
                flawless: false,
                broken: false,
                average: false,
            });
            rows.len() - 1
        });

        let price = extract_numerical_price(&record.raw_price);
        if !rows[slot].fill(&condition, price) {
            tracing::warn!(
                brand = %record.brand,
                model = %record.path.model,
                storage = %record.path.storage,
                condition = %condition,
                "duplicate quote for condition; keeping first"
            );
        }
    }

    if unclassified > 0 {
        tracing::warn!(count = unclassified, "records with unclassified condition dropped");
    }

    rows.into_iter().map(|pending| pending.row).collect()
}

#[cfg(test)]
#[path = "pivot_test.rs"]
mod tests;
