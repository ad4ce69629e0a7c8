//! CSV persistence of the repository dataset.
//!
//! Every stage reads the whole dataset, transforms it and writes it back.
//! All cells are read as strings, so group identifiers such as `007` are
//! never coerced into numbers.

mod error;
mod record;

pub use error::DatasetError;
pub use record::RepositoryRecord;

use crate::stage::Stage;
use std::path::Path;
use tracing::debug;

/// Reads the dataset a stage consumes.
///
/// # Errors
///
/// Returns [`DatasetError::MissingInput`] if the file does not exist and
/// [`DatasetError::MissingColumn`] if a column `stage` needs is absent; both
/// tell the user which stages to run first.
pub fn read_records(path: &Path, stage: Stage) -> Result<Vec<RepositoryRecord>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::MissingInput {
            path: path.display().to_string(),
            hint: stage.prerequisite_hint(),
        });
    }

    let csv_error = |source: csv::Error| DatasetError::CsvError {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    if let Some(column) = stage
        .required_columns()
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DatasetError::MissingColumn {
            path: path.display().to_string(),
            column: (*column).to_string(),
            hint: stage.prerequisite_hint(),
        });
    }

    let records = reader
        .deserialize::<RepositoryRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    debug!(path = %path.display(), count = records.len(), "Loaded dataset");
    Ok(records)
}

/// Writes the full dataset, replacing any existing file.
///
/// The header row is always written, even for an empty dataset.
///
/// # Errors
///
/// Returns [`DatasetError`] if the directory cannot be created or the file
/// cannot be written.
pub fn write_records(path: &Path, records: &[RepositoryRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DatasetError::IoError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let csv_error = |source: csv::Error| DatasetError::CsvError {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    writer
        .write_record(RepositoryRecord::COLUMNS)
        .map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| DatasetError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), count = records.len(), "Saved dataset");
    Ok(())
}
