//! Source readers and I/O errors
//!
//! A reader loads a whole source up front and then hands out its schema and
//! rows. `open_path` picks the reader from the file extension.

use std::path::{Path, PathBuf};

use socialplot_stats::StatsError;
use thiserror::Error;

use crate::csv_reader::CsvReader;
use crate::schema::{DataSchema, Row};

/// Errors raised while loading a source
#[derive(Debug, Error)]
pub enum IoError {
    #[error("No such file: {0}")]
    FileNotFound(PathBuf),

    #[error("Cannot open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed source: {0}")]
    InvalidFormat(String),

    #[error("Source has no column '{0}'")]
    ColumnNotFound(String),

    #[error("Invalid record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: StatsError,
    },

    #[error("Read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// The statistics error behind an invalid record, if any
    pub fn stats_error(&self) -> Option<&StatsError> {
        match self {
            IoError::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type IoResult<T> = Result<T, IoError>;

/// Extensions `open_path` understands, with their field delimiters
pub const SUPPORTED_EXTENSIONS: &[(&str, u8)] = &[("csv", b','), ("tsv", b'\t')];

/// A fully loaded tabular source
pub trait DataReader {
    /// Header layout and inferred column types
    fn schema(&self) -> &DataSchema;

    /// Every data row in file order
    fn rows(&self) -> Vec<Row>;

    /// File the data came from, if any
    fn source(&self) -> Option<&Path> {
        None
    }

    fn format_name(&self) -> &'static str;
}

pub type BoxedReader = Box<dyn DataReader>;

/// Open `path` with the reader matching its extension
pub fn open_path(path: &Path) -> IoResult<BoxedReader> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let delimiter = SUPPORTED_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, delimiter)| *delimiter)
        .ok_or_else(|| {
            IoError::InvalidFormat(format!(
                "unsupported extension '{}' for {}",
                extension,
                path.display()
            ))
        })?;

    Ok(Box::new(CsvReader::open_with_delimiter(path, delimiter)?))
}
