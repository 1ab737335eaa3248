use std::path::{Path, PathBuf};
use tracing::info;

use super::{load_csv, write::write_csv};
use crate::error::ResetError;

pub const DEFAULT_INPUT: &str = "../data.csv";
pub const DEFAULT_OUTPUT: &str = "data.csv";
pub const DEFAULT_COLUMN: &str = "nodeid";
pub const DEFAULT_VALUE: &str = "1";

/// What a successful reset did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetSummary {
    pub rows: usize,
    pub columns: usize,
    pub output: PathBuf,
}

/// Read `input`, set `column` to `value` in every row, write the table to
/// `output`.
///
/// Nothing is written unless the read and the column lookup both succeed.
/// `input` and `output` may be the same file.
#[tracing::instrument(
    level = "info",
    skip(input, output),
    fields(input = %input.as_ref().display(), output = %output.as_ref().display())
)]
pub fn reset_column<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    column: &str,
    value: &str,
) -> Result<ResetSummary, ResetError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut table = load_csv(input)?;

    let indices = table.column_indices(column);
    if indices.is_empty() {
        return Err(ResetError::MissingColumn {
            column: column.to_string(),
            path: input.to_path_buf(),
            available: table.column_names(),
        });
    }

    table.fill_columns(&indices, value);
    write_csv(&table, output)?;

    info!(
        rows = table.num_rows(),
        matched_columns = indices.len(),
        "column reset"
    );
    Ok(ResetSummary {
        rows: table.num_rows(),
        columns: table.num_columns(),
        output: output.to_path_buf(),
    })
}
