//! Delimited text reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{ColumnDescriptor, ColumnType, DataSchema, Row};

/// Leading rows sampled for column type inference
const INFERENCE_SAMPLE_ROWS: usize = 100;

/// Header row plus every record of a delimited source
pub struct CsvReader {
    path: Option<PathBuf>,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
    schema: DataSchema,
}

impl CsvReader {
    /// Open a comma-separated file
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        Self::open_with_delimiter(path, b',')
    }

    /// Open a file separated by `delimiter`
    pub fn open_with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| IoError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = Self::from_reader(BufReader::new(file), delimiter)?;
        reader.path = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            rows = reader.records.len(),
            columns = reader.headers.len(),
            "Loaded source"
        );
        Ok(reader)
    }

    /// Parse delimited text from any reader; the first line is the header
    pub fn from_reader<R: Read>(source: R, delimiter: u8) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(source);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(IoError::InvalidFormat("missing header row".to_string()));
        }

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        let schema = infer_schema(&headers, &records);
        for column in &schema.columns {
            debug!(column = %column.name, dtype = column.dtype.name(), "Inferred column type");
        }

        Ok(Self {
            path: None,
            headers,
            records,
            schema,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl DataReader for CsvReader {
    fn schema(&self) -> &DataSchema {
        &self.schema
    }

    fn rows(&self) -> Vec<Row> {
        self.records
            .iter()
            .map(|record| {
                Row::from_pairs(
                    self.headers
                        .iter()
                        .zip(record.iter())
                        .map(|(h, v)| (h.as_str(), v)),
                )
            })
            .collect()
    }

    fn source(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

fn csv_error(err: csv::Error) -> IoError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => IoError::Io(io),
        _ => IoError::InvalidFormat(message),
    }
}

fn infer_schema(headers: &[String], records: &[csv::StringRecord]) -> DataSchema {
    let sample = &records[..records.len().min(INFERENCE_SAMPLE_ROWS)];
    let columns = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<&str> = sample.iter().filter_map(|r| r.get(i)).collect();
            ColumnDescriptor::new(name.clone(), ColumnType::infer(&values))
        })
        .collect();

    DataSchema::new(columns, records.len())
}
