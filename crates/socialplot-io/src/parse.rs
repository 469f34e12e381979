//! Row-to-observation conversion
//!
//! Every function checks that the requested columns exist before touching
//! any row, then parses rows in order and stops at the first bad record.
//! Row numbers in errors are 1-based and count data rows only.

use crate::reader::{IoError, IoResult};
use crate::schema::Row;
use socialplot_stats::{NestedObservation, Observation, StatsResult, TimedObservation};
use tracing::debug;

/// Parse `(category, value)` observations
pub fn parse_observations(
    rows: &[Row],
    category_col: &str,
    value_col: &str,
) -> IoResult<Vec<Observation>> {
    require_columns(rows, &[category_col, value_col])?;
    parse_rows(rows, |row| {
        Observation::parse(row.get(category_col), row.get(value_col))
    })
}

/// Parse `(group, category, value)` observations
pub fn parse_nested_observations(
    rows: &[Row],
    group_col: &str,
    category_col: &str,
    value_col: &str,
) -> IoResult<Vec<NestedObservation>> {
    require_columns(rows, &[group_col, category_col, value_col])?;
    parse_rows(rows, |row| {
        NestedObservation::parse(row.get(group_col), row.get(category_col), row.get(value_col))
    })
}

/// Parse `(timestamp, value)` observations
///
/// `date_format` is a chrono format applied to the text before the first
/// space of the date field.
pub fn parse_timed_observations(
    rows: &[Row],
    date_col: &str,
    value_col: &str,
    date_format: &str,
) -> IoResult<Vec<TimedObservation>> {
    require_columns(rows, &[date_col, value_col])?;
    parse_rows(rows, |row| {
        TimedObservation::parse(row.get(date_col), row.get(value_col), date_format)
    })
}

fn parse_rows<T, F>(rows: &[Row], parse: F) -> IoResult<Vec<T>>
where
    F: Fn(&Row) -> StatsResult<T>,
{
    let parsed = rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse(row).map_err(|source| IoError::InvalidRecord { row: i + 1, source }))
        .collect::<IoResult<Vec<T>>>()?;
    debug!(count = parsed.len(), "Parsed observations");
    Ok(parsed)
}

/// Fail with `ColumnNotFound` if the first row lacks one of `columns`
///
/// All rows of a reader share the header, so the first row is enough. An
/// empty row set passes; the engine rejects it later as empty input.
fn require_columns(rows: &[Row], columns: &[&str]) -> IoResult<()> {
    if let Some(first) = rows.first() {
        for column in columns {
            if first.get(column).is_none() {
                return Err(IoError::ColumnNotFound(column.to_string()));
            }
        }
    }
    Ok(())
}
