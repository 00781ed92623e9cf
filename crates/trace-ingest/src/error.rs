//! Ingestion Error Types

use thiserror::Error;

/// Errors while discovering or loading trace files
///
/// Every variant names the offending file so a failed batch can be
/// attributed without re-running it.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Filesystem access failed
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file
    #[error("malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A cell could not be parsed as a number
    #[error("{file}: data row {row}, column {column}: cannot parse {value:?} as a number")]
    Parse {
        file: String,
        row: usize,
        column: String,
        value: String,
    },

    /// The parsed rows do not form a rectangular table
    #[error("{file}: {source}")]
    Shape {
        file: String,
        #[source]
        source: signal_table::TableError,
    },
}
