//! Error types for socialplot-core
//!
//! Provides error handling for:
//! - Chart construction (statistics and data loading failures)
//! - SVG export
//! - Configuration loading and validation

use std::path::PathBuf;
use thiserror::Error;

use socialplot_io::IoError;
use socialplot_stats::StatsError;

/// Main error type for chart operations
#[derive(Error, Debug)]
pub enum ChartError {
    /// Statistics engine errors (empty input, non-finite values)
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Data loading errors
    #[error("Failed to load data: {0}")]
    DataLoad(#[from] IoError),

    /// Export errors
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A label that the scale's domain does not contain
    #[error("Label '{0}' is not in the scale domain")]
    UnknownLabel(String),

    /// Invalid chart configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors related to export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Invalid output path
    #[error("Not a file path: {path}")]
    InvalidPath { path: PathBuf },

    /// Invalid dimensions
    #[error("Canvas {width}x{height} is empty or too large")]
    InvalidDimensions { width: u32, height: u32 },

    /// Writing the document failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[error("Cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// JSON syntax or schema error
    #[error("Cannot parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Value is out of its valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Required field is missing or empty
    #[error("Missing field: {0}")]
    MissingField(String),
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Largest canvas edge the exporter accepts, in pixels
pub const MAX_CANVAS_EDGE: u32 = 16384;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Both canvas edges must lie in `1..=MAX_CANVAS_EDGE`
    pub fn validate_dimensions(width: u32, height: u32) -> ExportResult<()> {
        let edges = 1..=MAX_CANVAS_EDGE;
        if edges.contains(&width) && edges.contains(&height) {
            Ok(())
        } else {
            Err(ExportError::InvalidDimensions { width, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_error_from_stats() {
        let err: ChartError = StatsError::invalid("empty observation sequence").into();
        assert!(matches!(err, ChartError::Stats(_)));
        assert!(err.to_string().contains("empty observation sequence"));
    }

    #[test]
    fn test_canvas_error_names_size() {
        let err = ExportError::InvalidDimensions {
            width: 0,
            height: 500,
        };
        assert!(err.to_string().contains("0x500"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::OutOfRange("width must be positive".to_string());
        assert!(err.to_string().contains("width must be positive"));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validation::validate_dimensions(800, 500).is_ok());
        assert!(validation::validate_dimensions(MAX_CANVAS_EDGE, 1).is_ok());
        assert!(validation::validate_dimensions(0, 500).is_err());
        assert!(validation::validate_dimensions(800, MAX_CANVAS_EDGE + 1).is_err());
    }
}
