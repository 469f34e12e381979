//! Validated observation records
//!
//! Observations are the engine's only input. They are built from raw
//! strings by the data source and are immutable afterwards: a category must
//! be present and non-empty, and the value must parse to a finite number.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Default date format of the time-series source (`3/1/2024`)
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Anything carrying a single numeric measurement
pub trait Measured {
    /// The measured value (always finite for validated observations)
    fn value(&self) -> f64;
}

/// A labeled measurement, e.g. likes per platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub category: String,
    pub value: f64,
}

impl Observation {
    /// Create an observation, rejecting empty categories and non-finite values
    pub fn new(category: impl Into<String>, value: f64) -> StatsResult<Self> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(StatsError::invalid("observation category is empty"));
        }
        Ok(Self {
            category,
            value: ensure_finite("value", value)?,
        })
    }

    /// Parse an observation from raw field text
    pub fn parse(category: Option<&str>, value: Option<&str>) -> StatsResult<Self> {
        let category = require_field("category", category)?;
        let value = parse_value("value", value)?;
        Self::new(category, value)
    }
}

impl Measured for Observation {
    fn value(&self) -> f64 {
        self.value
    }
}

/// A measurement labeled by a group and a category within that group,
/// e.g. average likes per (platform, post type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedObservation {
    pub group: String,
    pub category: String,
    pub value: f64,
}

impl NestedObservation {
    /// Create a nested observation
    pub fn new(
        group: impl Into<String>,
        category: impl Into<String>,
        value: f64,
    ) -> StatsResult<Self> {
        let group = group.into();
        let category = category.into();
        if group.trim().is_empty() {
            return Err(StatsError::invalid("observation group is empty"));
        }
        if category.trim().is_empty() {
            return Err(StatsError::invalid("observation category is empty"));
        }
        Ok(Self {
            group,
            category,
            value: ensure_finite("value", value)?,
        })
    }

    /// Parse a nested observation from raw field text
    pub fn parse(
        group: Option<&str>,
        category: Option<&str>,
        value: Option<&str>,
    ) -> StatsResult<Self> {
        let group = require_field("group", group)?;
        let category = require_field("category", category)?;
        let value = parse_value("value", value)?;
        Self::new(group, category, value)
    }
}

impl Measured for NestedObservation {
    fn value(&self) -> f64 {
        self.value
    }
}

/// A measurement at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedObservation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl TimedObservation {
    /// Create a timed observation
    pub fn new(timestamp: NaiveDateTime, value: f64) -> StatsResult<Self> {
        Ok(Self {
            timestamp,
            value: ensure_finite("value", value)?,
        })
    }

    /// Parse a timed observation from raw field text
    ///
    /// Only the text before the first space is read as the date, so
    /// `"3/1/2024 (Friday)"` and `"3/1/2024 08:00"` both land on midnight
    /// of March 1st.
    pub fn parse(date: Option<&str>, value: Option<&str>, format: &str) -> StatsResult<Self> {
        let timestamp = parse_date("timestamp", date, format)?;
        let value = parse_value("value", value)?;
        Self::new(timestamp, value)
    }
}

impl Measured for TimedObservation {
    fn value(&self) -> f64 {
        self.value
    }
}

/// Return the trimmed field text, or `InvalidInput` if it is missing or blank
pub fn require_field<'a>(field: &str, raw: Option<&'a str>) -> StatsResult<&'a str> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(StatsError::invalid(format!("missing required field '{}'", field))),
    }
}

/// Parse a finite number from field text
pub fn parse_value(field: &str, raw: Option<&str>) -> StatsResult<f64> {
    let text = require_field(field, raw)?;
    let value: f64 = text
        .parse()
        .map_err(|_| StatsError::non_finite(field, text))?;
    if !value.is_finite() {
        return Err(StatsError::non_finite(field, text));
    }
    Ok(value)
}

/// Parse the date portion of field text into a midnight timestamp
pub fn parse_date(field: &str, raw: Option<&str>, format: &str) -> StatsResult<NaiveDateTime> {
    let text = require_field(field, raw)?;
    let date_text = text.split(' ').next().unwrap_or(text);
    let date = NaiveDate::parse_from_str(date_text, format).map_err(|e| {
        StatsError::invalid(format!(
            "field '{}': cannot parse {:?} as a date with format {:?}: {}",
            field, date_text, format, e
        ))
    })?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn ensure_finite(field: &str, value: f64) -> StatsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::non_finite(field, value.to_string()))
    }
}
