// src/process/mod.rs
use csv::{ByteRecord, ReaderBuilder};

use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};
use tracing::{debug, info};

use crate::error::{ParseFailure, ResetError};

pub mod reset;
pub mod write;

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names from the first row of the file, in file order.
    pub headers: ByteRecord,
    /// Each data row, exactly one field per header column.
    pub rows: Vec<ByteRecord>,
}

impl Table {
    /// Header names decoded for display; non-UTF-8 bytes are replaced.
    pub fn column_names(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect()
    }

    /// Positions of every header exactly equal to `name`.
    pub fn column_indices(&self, name: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == name.as_bytes())
            .map(|(i, _)| i)
            .collect()
    }

    /// Overwrite the fields at `indices` with `value` in every row.
    pub fn fill_columns(&mut self, indices: &[usize], value: &str) {
        for row in &mut self.rows {
            let mut filled = ByteRecord::with_capacity(row.as_slice().len(), row.len());
            for (i, field) in row.iter().enumerate() {
                if indices.contains(&i) {
                    filled.push_field(value.as_bytes());
                } else {
                    filled.push_field(field);
                }
            }
            *row = filled;
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }
}

/// Read the whole CSV at `path` into memory.
///
/// - The first row is the header; it must not be empty.
/// - Rows shorter than the header are padded with empty fields.
/// - Rows wider than the header are rejected.
/// - Blank lines are skipped, `\r\n` and `\n` line endings both work.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table, ResetError> {
    let path = path.as_ref();

    // 1) Open; any failure here means there is nothing to read
    let file = File::open(path).map_err(|source| ResetError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    // 2) Header row
    let headers = rdr
        .byte_headers()
        .map_err(|e| read_error(path, e))?
        .clone();
    if headers.is_empty() {
        return Err(ResetError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    debug!(columns = headers.len(), "read header");

    // 3) Data rows, in file order, squared up to the header width
    let width = headers.len();
    let mut rows = Vec::new();
    let mut padded = 0usize;
    for result in rdr.byte_records() {
        let mut record = result.map_err(|e| read_error(path, e))?;
        if record.len() > width {
            let (record_no, line) = record
                .position()
                .map(|p| (p.record(), p.line()))
                .unwrap_or_default();
            return Err(ResetError::MalformedInput {
                path: path.to_path_buf(),
                source: ParseFailure::TooWide {
                    record: record_no,
                    line,
                    expected: width,
                    found: record.len(),
                },
            });
        }
        if record.len() < width {
            padded += 1;
            while record.len() < width {
                record.push_field(b"");
            }
        }
        rows.push(record);
    }
    if padded > 0 {
        debug!(padded, "padded short rows");
    }

    let table = Table { headers, rows };
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "parsing complete"
    );
    Ok(table)
}

/// I/O failures while reading mean the input is unreadable; everything
/// else the reader reports is a parse problem.
fn read_error(path: &Path, err: csv::Error) -> ResetError {
    let io_kind = match err.kind() {
        csv::ErrorKind::Io(e) => Some(e.kind()),
        _ => None,
    };
    match io_kind {
        Some(kind) => ResetError::InputNotFound {
            path: path.to_path_buf(),
            source: io::Error::new(kind, err),
        },
        None => ResetError::MalformedInput {
            path: path.to_path_buf(),
            source: ParseFailure::Csv(err),
        },
    }
}
