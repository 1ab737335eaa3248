use std::{io, path::PathBuf};

/// Every way a column reset can fail.
///
/// Read-side variants are raised before anything is written, so the
/// destination is untouched whenever one of them comes back.
#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    /// The source path does not resolve to a readable file.
    #[error("input file not found or unreadable: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be parsed as a header plus rows that fit under it.
    #[error("malformed CSV in {}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },

    /// Not even a header row.
    #[error("no header row in {}", path.display())]
    EmptyInput { path: PathBuf },

    /// The target column is absent from the parsed header.
    #[error(
        "column `{column}` not found in {} (available: {})",
        path.display(),
        available.join(", ")
    )]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: Vec<String>,
    },

    #[error("failed to write {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a readable file was still rejected as tabular data.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// More fields than header columns; short rows are padded instead.
    #[error("record {record} (line {line}) has {found} fields, header has {expected}")]
    TooWide {
        record: u64,
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl ResetError {
    /// True for the "cannot be parsed as tabular data" class, which covers
    /// both a bad record and a file with no header at all.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ResetError::MalformedInput { .. } | ResetError::EmptyInput { .. }
        )
    }
}
