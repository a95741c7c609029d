// src/file.rs

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let msg = format!("path exists but is not a directory: {}", dir.display());
        return Err(Error::io(dir, std::io::Error::other(msg)));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

/// Replace `path` with `contents` in one step: write a temp file next to it,
/// then rename over the target. Readers see the old file or the new one,
/// never a torn write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_directory(dir)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        out.write_all(contents).map_err(|e| Error::io(path, e))?;
        out.flush().map_err(|e| Error::io(path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| Error::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| Error::Persist { path: path.to_path_buf(), source: e.error })?;
    Ok(())
}

/// Render rows as CSV with an explicit header line. The header is written
/// even when there are no rows.
pub fn to_csv_bytes<T: Serialize>(headers: &[&str], rows: &[T]) -> Result<Vec<u8>> {
    let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record(headers)?;
    for row in rows {
        w.serialize(row)?;
    }
    w.into_inner()
        .map_err(|e| Error::io("<csv buffer>", std::io::Error::other(e.to_string())))
}

/// Atomically write `rows` as CSV to `path`.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let bytes = to_csv_bytes(headers, rows)?;
    write_atomic(path, &bytes)
}

/// Read a whole CSV file (header row required) into typed rows.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_csv(&text)
}

pub fn parse_csv<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text); // spreadsheet BOM
    let mut r = csv::ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for rec in r.deserialize() {
        rows.push(rec?);
    }
    Ok(rows)
}
