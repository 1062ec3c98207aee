//! CSV artifacts: the raw capture table and the cleaned wide table.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use tradein_core::{Brand, PathField, QuoteRecord, SelectionPath, WideQuoteRecord, DATE_FORMAT};

use crate::error::CleanError;

pub const RAW_HEADERS: [&str; 8] = [
    "Date",
    "Brand",
    "Series nm",
    "Series",
    "Model",
    "Storage",
    "Condition",
    "Price (in AED)",
];

pub const WIDE_HEADERS: [&str; 9] = [
    "Date",
    "Brand",
    "Series nm",
    "Series",
    "Model",
    "Storage",
    "Flawless",
    "Broken",
    "Average",
];

/// Default raw capture file name, e.g. `Scraped_Phone_Details_27-01-2025.csv`.
#[must_use]
pub fn raw_file_name(captured_on: NaiveDate) -> String {
    format!(
        "Scraped_Phone_Details_{}.csv",
        captured_on.format("%d-%m-%Y")
    )
}

/// Default cleaned file name for a raw capture file: `Clean_<name>`.
#[must_use]
pub fn clean_file_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map_or_else(|| input.to_string_lossy(), |n| n.to_string_lossy());
    format!("Clean_{name}")
}

/// Writes raw capture rows with the header row first.
///
/// # Errors
///
/// Returns [`CleanError::Csv`] if a row cannot be written or flushed.
pub fn write_raw<W: Write>(out: W, records: &[QuoteRecord]) -> Result<(), CleanError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(RAW_HEADERS)?;
    for record in records {
        let flag = record.brand.flag().to_string();
        let date = record.date_text();
        let mut row = vec![date.as_str(), flag.as_str()];
        row.extend(PathField::ALL.iter().map(|&field| record.path.get(field)));
        row.push(record.raw_price.as_str());
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads raw capture rows written by [`write_raw`].
///
/// # Errors
///
/// Returns [`CleanError::Csv`] on malformed CSV (including a wrong column
/// count) and [`CleanError::InvalidRow`] when the header is not the raw
/// capture header or a row has a bad date or brand flag.
pub fn read_raw<R: Read>(input: R) -> Result<Vec<QuoteRecord>, CleanError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?;
    if !headers.iter().eq(RAW_HEADERS) {
        return Err(CleanError::InvalidRow {
            line: 1,
            reason: format!(
                "header {:?} is not a raw capture header (expected {:?})",
                headers.iter().collect::<Vec<_>>(),
                RAW_HEADERS
            ),
        });
    }
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        let field = |i: usize| row.get(i).unwrap_or_default();

        let captured_on = NaiveDate::parse_from_str(field(0), DATE_FORMAT).map_err(|e| {
            CleanError::InvalidRow {
                line,
                reason: format!("bad date {:?}: {e}", field(0)),
            }
        })?;
        let brand = field(1)
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Brand::from_flag)
            .ok_or_else(|| CleanError::InvalidRow {
                line,
                reason: format!("bad brand flag {:?}", field(1)),
            })?;
        let path = SelectionPath::from_fields(
            PathField::ALL
                .iter()
                .enumerate()
                .map(|(i, &f)| (f, field(i + 2))),
        );

        records.push(QuoteRecord {
            captured_on,
            brand,
            path,
            raw_price: field(7).to_string(),
        });
    }

    Ok(records)
}

/// Writes cleaned rows with the header row first.
///
/// # Errors
///
/// Returns [`CleanError::Csv`] if a row cannot be written or flushed.
pub fn write_wide<W: Write>(out: W, rows: &[WideQuoteRecord]) -> Result<(), CleanError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(WIDE_HEADERS)?;
    for row in rows {
        writer.write_record([
            row.date_text(),
            row.brand.flag().to_string(),
            row.series_name.clone(),
            row.series.clone(),
            row.model.clone(),
            row.storage.clone(),
            row.flawless.to_string(),
            row.broken.to_string(),
            row.average.to_string(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates `path` and writes raw capture rows to it.
///
/// # Errors
///
/// Returns [`CleanError::Io`] if the file cannot be created, otherwise as
/// [`write_raw`].
pub fn write_raw_file(path: &Path, records: &[QuoteRecord]) -> Result<(), CleanError> {
    write_raw(create(path)?, records)
}

/// Reads raw capture rows from `path`.
///
/// # Errors
///
/// Returns [`CleanError::Io`] if the file cannot be opened, otherwise as
/// [`read_raw`].
pub fn read_raw_file(path: &Path) -> Result<Vec<QuoteRecord>, CleanError> {
    let file = File::open(path).map_err(|source| CleanError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_raw(file)
}

/// Creates `path` and writes cleaned rows to it.
///
/// # Errors
///
/// Returns [`CleanError::Io`] if the file cannot be created, otherwise as
/// [`write_wide`].
pub fn write_wide_file(path: &Path, rows: &[WideQuoteRecord]) -> Result<(), CleanError> {
    write_wide(create(path)?, rows)
}

fn create(path: &Path) -> Result<File, CleanError> {
    File::create(path).map_err(|source| CleanError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
