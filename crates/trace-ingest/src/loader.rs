//! CSV Trace Loading

use crate::error::IngestError;
use signal_table::Table;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List the CSV files directly inside `dir`, sorted by path
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::Io {
        file: dir.display().to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::Io {
            file: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "csv") {
            paths.push(path);
        }
    }
    paths.sort();

    debug!("discovered {} CSV files in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Load one CSV file into a [`Table`]
///
/// The first row is the header; every further row is parsed as `f64`
/// cells. An empty cell is recorded as missing rather than rejected.
pub fn load_table(path: &Path) -> Result<Table, IngestError> {
    let file = file_name_of(path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            file: file.clone(),
            source,
        })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            file: file.clone(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<Option<f64>>> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            file: file.clone(),
            source,
        })?;

        let mut row = Vec::with_capacity(columns.len());
        for (j, raw) in record.iter().enumerate() {
            let cell = raw.trim();
            if cell.is_empty() {
                row.push(None);
            } else {
                let value = cell.parse::<f64>().map_err(|_| IngestError::Parse {
                    file: file.clone(),
                    row: i + 1,
                    column: columns.get(j).cloned().unwrap_or_else(|| format!("#{j}")),
                    value: cell.to_string(),
                })?;
                row.push(Some(value));
            }
        }
        rows.push(row);
    }

    Table::from_rows(columns, rows).map_err(|source| IngestError::Shape { file, source })
}

/// Load every CSV file in `dir` as a `(file_id, Table)` batch
///
/// The file id is the file's base name and the batch is ordered by it.
/// The policy for unreadable or malformed files is fail-fast: the first
/// bad file aborts the whole batch with an error naming it.
pub fn load_batch(dir: &Path) -> Result<Vec<(String, Table)>, IngestError> {
    let paths = discover(dir)?;

    let mut batch = Vec::with_capacity(paths.len());
    for path in &paths {
        let table = load_table(path)?;
        batch.push((file_name_of(path), table));
    }
    batch.sort_by(|a, b| a.0.cmp(&b.0));

    info!("loaded {} trace files from {}", batch.len(), dir.display());
    Ok(batch)
}
