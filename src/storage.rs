use crate::error::{NotifyError, Result};
use csv::StringRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

fn open_reader(path: &Path, required: &[&str]) -> Result<(csv::Reader<std::fs::File>, StringRecord)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(NotifyError::MissingField {
                column: column.to_string(),
                path: path.display().to_string(),
            });
        }
    }
    Ok((reader, headers))
}

fn create_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(csv::Writer::from_path(path)?)
}

/// Reads every row of a CSV table with a header, checking `required` columns first.
///
/// Columns not named by `T` are ignored, so later stages can read the
/// wider tables produced by earlier ones.
pub fn read_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let (mut reader, _) = open_reader(path, required)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Writes `rows` to `path` as CSV, header first, replacing any existing file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = create_writer(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Reads the header and untyped rows of a CSV table, keeping every column.
pub fn read_records(path: &Path, required: &[&str]) -> Result<(StringRecord, Vec<StringRecord>)> {
    let (mut reader, headers) = open_reader(path, required)?;
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;

    debug!("Read {} records from {}", records.len(), path.display());
    Ok((headers, records))
}

/// Writes `headers` then `records` to `path` verbatim.
pub fn write_records(path: &Path, headers: &StringRecord, records: &[StringRecord]) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
