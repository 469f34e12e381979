//! Column layout of a tabular source and its rows

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::reader::{IoError, IoResult};

/// Header-derived layout of a source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Columns in header order
    pub columns: Vec<ColumnDescriptor>,

    /// Data rows, header excluded
    pub num_records: usize,
}

impl DataSchema {
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Descriptor of `name`, if the header has it
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Zero-based header position of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Fail with `ColumnNotFound` on the first of `required` the header lacks
    pub fn require(&self, required: &[&str]) -> IoResult<()> {
        match required.iter().find(|name| self.column(name).is_none()) {
            Some(missing) => Err(IoError::ColumnNotFound(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// Name and inferred type of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub dtype: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Type inferred from a column's sampled values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    String,
}

impl ColumnType {
    /// Narrowest type that fits every non-blank sample
    ///
    /// Blank samples are ignored; a column of blanks is `String`.
    pub fn infer(samples: &[&str]) -> Self {
        let values: Vec<&str> = samples
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if values.is_empty() {
            ColumnType::String
        } else if values.iter().all(|s| s.parse::<i64>().is_ok()) {
            ColumnType::Int64
        } else if values.iter().all(|s| s.parse::<f64>().is_ok()) {
            ColumnType::Float64
        } else if values.iter().all(|s| {
            matches!(
                s.to_ascii_lowercase().as_str(),
                "true" | "false" | "yes" | "no"
            )
        }) {
            ColumnType::Bool
        } else {
            ColumnType::String
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
        }
    }
}

/// One data row: column name to raw field text, in header order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    fields: IndexMap<String, String>,
}

impl Row {
    /// Build a row from (column, value) pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw text of a column, if present
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likes_schema() -> DataSchema {
        DataSchema::new(
            vec![
                ColumnDescriptor::new("Platform", ColumnType::String),
                ColumnDescriptor::new("Likes", ColumnType::Int64),
            ],
            16,
        )
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = likes_schema();
        assert_eq!(schema.position("Likes"), Some(1));
        assert_eq!(schema.position("Shares"), None);
        assert_eq!(schema.column("Platform").map(|c| c.dtype), Some(ColumnType::String));
        assert_eq!(schema.names(), vec!["Platform", "Likes"]);
    }

    #[test]
    fn test_require_reports_first_missing_column() {
        let schema = likes_schema();
        assert!(schema.require(&["Likes", "Platform"]).is_ok());
        match schema.require(&["Platform", "Date", "Shares"]) {
            Err(IoError::ColumnNotFound(column)) => assert_eq!(column, "Date"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_infer() {
        assert_eq!(ColumnType::infer(&["1", "2", "3"]), ColumnType::Int64);
        assert_eq!(ColumnType::infer(&["1.5", "2", " 3.14 "]), ColumnType::Float64);
        assert_eq!(ColumnType::infer(&["true", "No", "yes"]), ColumnType::Bool);
        assert_eq!(ColumnType::infer(&["Instagram", "12"]), ColumnType::String);
        assert_eq!(ColumnType::infer(&["", " "]), ColumnType::String);
        assert_eq!(ColumnType::infer(&["412", ""]), ColumnType::Int64);
        assert!(ColumnType::Float64.is_numeric());
        assert!(!ColumnType::Bool.is_numeric());
    }

    #[test]
    fn test_row_keeps_header_order() {
        let row = Row::from_pairs([("Date", "3/1/2024"), ("AvgLikes", "120")]);
        assert_eq!(row.get("AvgLikes"), Some("120"));
        assert_eq!(row.get("Platform"), None);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["Date", "AvgLikes"]);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_serializes_as_ordered_object() {
        let row = Row::from_pairs([("Platform", "Twitter"), ("Likes", "98")]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"fields":{"Platform":"Twitter","Likes":"98"}}"#);

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
