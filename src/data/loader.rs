use std::io;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{source_id}': {err}")]
    Io {
        source_id: String,
        #[source]
        err: io::Error,
    },
    #[error("malformed CSV in '{source_id}': {err}")]
    Csv {
        source_id: String,
        #[source]
        err: csv::Error,
    },
    #[error("'{0}' has no header row")]
    MissingHeader(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a CSV dataset, logging and swallowing any failure.
///
/// `None` means "unavailable": callers skip whatever depends on it.
/// Every call re-reads the file.
pub fn load(path: &Path) -> Option<Dataset> {
    match try_load(path) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            log::error!("Error loading CSV data: {e}");
            None
        }
    }
}

/// Load a CSV dataset from disk.
pub fn try_load(path: &Path) -> Result<Dataset, LoadError> {
    let source_id = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|err| LoadError::Io {
        source_id: source_id.clone(),
        err,
    })?;
    load_from_reader(&source_id, io::BufReader::new(file))
}

/// Parse CSV from any reader. The first row names the columns; every
/// field stays a string.
pub fn load_from_reader<R: io::Read>(source_id: &str, reader: R) -> Result<Dataset, LoadError> {
    let csv_err = |err: csv::Error| LoadError::Csv {
        source_id: source_id.to_string(),
        err,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let column_names: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if column_names.is_empty() {
        return Err(LoadError::MissingHeader(source_id.to_string()));
    }

    let columns: Arc<[String]> = column_names.clone().into();
    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        let values = row.iter().map(|v| v.to_string()).collect();
        records.push(Record::new(Arc::clone(&columns), values));
    }

    log::info!(
        "Loaded {} records from {source_id} with columns {column_names:?}",
        records.len()
    );

    Ok(Dataset {
        source: source_id.to_string(),
        column_names,
        records,
    })
}
