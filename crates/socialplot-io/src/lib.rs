//! socialplot-io - Data I/O for chart sources
//!
//! This crate turns delimited text into validated observations:
//!
//! - **Readers**: CSV and TSV files with a header row, column types inferred
//!   from the leading rows
//! - **Observations**: row-to-record conversion with per-row error reporting
//!
//! # Design
//!
//! Readers implement the `DataReader` trait and load a source in one pass.
//! The parse functions never coerce bad values: a blank or non-numeric field
//! fails the whole read with the offending row number.

pub mod csv_reader;
pub mod parse;
pub mod reader;
pub mod schema;

pub use csv_reader::CsvReader;
pub use parse::*;
pub use reader::*;
pub use schema::*;
