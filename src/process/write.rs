use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile, PersistError};
use tracing::{debug, warn};

use super::Table;
use crate::error::ResetError;

/// Write `table` to `path` as CSV: header first, then every row, `\n`
/// terminated, quoting only fields that need it. No index column.
///
/// Each call writes its own hidden temp file next to `path` and renames it
/// over the destination, so readers see either the old file or a complete
/// new one, and concurrent writers end with the last rename winning.
/// An existing destination keeps its permission bits; ownership is not
/// carried over.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display()))]
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), ResetError> {
    let path = path.as_ref();
    let failed = |source: io::Error| ResetError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    // 1) ".<name>.XXXXXX.tmp" next to the destination
    let (dir, name) = tmp_location(path).map_err(failed)?;
    let mut tmp = Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(failed)?;

    // 2) Serialize everything into it
    if let Err(e) = write_records(table, &mut tmp).and_then(|()| match_permissions(&tmp, path)) {
        discard(tmp);
        return Err(failed(e));
    }

    // 3) Swap it into place
    tmp.persist(path).map_err(|PersistError { error, file }| {
        discard(file);
        failed(io::Error::new(
            error.kind(),
            format!("renaming temp file over {:?}: {}", path, error),
        ))
    })?;

    debug!(rows = table.num_rows(), "wrote table");
    Ok(())
}

fn write_records(table: &Table, tmp: &mut NamedTempFile) -> io::Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(tmp.as_file_mut());

    wtr.write_byte_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_byte_record(row)?;
    }
    wtr.flush()
}

/// Give the temp file the destination's current permissions, or the usual
/// `rw-r--r--` when there is no destination yet (temp files start private).
fn match_permissions(tmp: &NamedTempFile, path: &Path) -> io::Result<()> {
    match fs::metadata(path) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(tmp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn new_file_permissions(tmp: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(_tmp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}

fn discard(tmp: NamedTempFile) {
    let tmp_path = tmp.path().to_path_buf();
    if let Err(rm) = tmp.close() {
        warn!(tmp = %tmp_path.display(), error = %rm, "failed to remove temp file");
    }
}

/// Directory to create the temp file in, and the destination's file name.
fn tmp_location(path: &Path) -> io::Result<(PathBuf, String)> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path {:?} has no file name", path),
        )
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name.to_string_lossy().into_owned()))
}
