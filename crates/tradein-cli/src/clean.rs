//! `clean` command handler.

use std::path::{Path, PathBuf};

/// Where the cleaned table goes when no `--output` is given.
pub(crate) fn default_output(input: &Path) -> PathBuf {
    input.with_file_name(tradein_clean::clean_file_name(input))
}

/// Read a raw capture table, pivot it, and write the cleaned table.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the output
/// cannot be written.
pub(crate) fn run_clean(input: &Path, output: Option<&Path>) -> anyhow::Result<PathBuf> {
    let records = tradein_clean::read_raw_file(input)?;
    let rows = tradein_clean::clean(&records);

    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    tradein_clean::write_wide_file(&output, &rows)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        records = records.len(),
        rows = rows.len(),
        "cleaned table written"
    );
    Ok(output)
}
