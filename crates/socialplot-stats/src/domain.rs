//! Axis domains derived from observations
//!
//! A domain is the value range (or label set) that a scale maps onto a
//! drawing surface. Domains are derived once from the full observation set
//! before anything is drawn.

use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Kind of domain to derive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainKind {
    Numeric,
    Categorical,
    Temporal,
}

impl DomainKind {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            DomainKind::Numeric => "numeric",
            DomainKind::Categorical => "categorical",
            DomainKind::Temporal => "temporal",
        }
    }
}

/// A value extracted from an observation for domain derivation
#[derive(Clone, Debug, PartialEq)]
pub enum AxisValue {
    Number(f64),
    Label(String),
    Time(NaiveDateTime),
}

impl AxisValue {
    fn kind(&self) -> DomainKind {
        match self {
            AxisValue::Number(_) => DomainKind::Numeric,
            AxisValue::Label(_) => DomainKind::Categorical,
            AxisValue::Time(_) => DomainKind::Temporal,
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Number(value)
    }
}

impl From<String> for AxisValue {
    fn from(label: String) -> Self {
        AxisValue::Label(label)
    }
}

impl From<&str> for AxisValue {
    fn from(label: &str) -> Self {
        AxisValue::Label(label.to_string())
    }
}

impl From<NaiveDateTime> for AxisValue {
    fn from(time: NaiveDateTime) -> Self {
        AxisValue::Time(time)
    }
}

/// The range or label set of one axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AxisDomain {
    /// Closed numeric interval `[min, max]`
    Numeric { min: f64, max: f64 },
    /// Distinct labels in first-seen order
    Categorical(Vec<String>),
    /// Closed time interval `[start, end]`
    Temporal {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl AxisDomain {
    /// Kind of this domain
    pub fn kind(&self) -> DomainKind {
        match self {
            AxisDomain::Numeric { .. } => DomainKind::Numeric,
            AxisDomain::Categorical(_) => DomainKind::Categorical,
            AxisDomain::Temporal { .. } => DomainKind::Temporal,
        }
    }

    /// Numeric bounds, if this is a numeric domain
    pub fn as_numeric(&self) -> Option<(f64, f64)> {
        match self {
            AxisDomain::Numeric { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    /// Labels, if this is a categorical domain
    pub fn as_categorical(&self) -> Option<&[String]> {
        match self {
            AxisDomain::Categorical(labels) => Some(labels),
            _ => None,
        }
    }

    /// Time bounds, if this is a temporal domain
    pub fn as_temporal(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self {
            AxisDomain::Temporal { start, end } => Some((*start, *end)),
            _ => None,
        }
    }
}

/// Derive the domain of `kind` from the values extracted from `observations`
///
/// Fails with `InvalidInput` if the sequence is empty, if an extracted value
/// does not match `kind`, or if a numeric value is not finite.
pub fn derive_domain<T, F>(
    observations: &[T],
    extract_fn: F,
    kind: DomainKind,
) -> StatsResult<AxisDomain>
where
    F: Fn(&T) -> AxisValue,
{
    if observations.is_empty() {
        return Err(StatsError::invalid(format!(
            "cannot derive a {} domain from an empty sequence",
            kind.name()
        )));
    }

    let values = observations
        .iter()
        .map(|o| {
            let value = extract_fn(o);
            if value.kind() == kind {
                Ok(value)
            } else {
                Err(StatsError::invalid(format!(
                    "expected a {} value, got {:?}",
                    kind.name(),
                    value
                )))
            }
        })
        .collect::<StatsResult<Vec<_>>>()?;

    match kind {
        DomainKind::Numeric => {
            let numbers: Vec<f64> = values
                .into_iter()
                .filter_map(|v| match v {
                    AxisValue::Number(n) => Some(n),
                    _ => None,
                })
                .collect();
            numeric_domain(&numbers, |n| *n)
        }
        DomainKind::Categorical => {
            let labels: Vec<String> = values
                .into_iter()
                .filter_map(|v| match v {
                    AxisValue::Label(l) => Some(l),
                    _ => None,
                })
                .collect();
            categorical_domain(&labels, |l| l.clone())
        }
        DomainKind::Temporal => {
            let times: Vec<NaiveDateTime> = values
                .into_iter()
                .filter_map(|v| match v {
                    AxisValue::Time(t) => Some(t),
                    _ => None,
                })
                .collect();
            temporal_domain(&times, |t| *t)
        }
    }
}

/// `[min, max]` of the extracted numbers
pub fn numeric_domain<T, F>(observations: &[T], extract_fn: F) -> StatsResult<AxisDomain>
where
    F: Fn(&T) -> f64,
{
    let mut iter = observations.iter().map(&extract_fn);
    let first = iter
        .next()
        .ok_or_else(|| StatsError::invalid("cannot derive a numeric domain from an empty sequence"))?;
    if !first.is_finite() {
        return Err(StatsError::non_finite("domain", first.to_string()));
    }

    let (min, max) = iter.try_fold((first, first), |(lo, hi), v| {
        if v.is_finite() {
            Ok((lo.min(v), hi.max(v)))
        } else {
            Err(StatsError::non_finite("domain", v.to_string()))
        }
    })?;

    Ok(AxisDomain::Numeric { min, max })
}

/// Distinct extracted labels in first-seen order
pub fn categorical_domain<T, F>(observations: &[T], extract_fn: F) -> StatsResult<AxisDomain>
where
    F: Fn(&T) -> String,
{
    if observations.is_empty() {
        return Err(StatsError::invalid(
            "cannot derive a categorical domain from an empty sequence",
        ));
    }

    let labels: IndexSet<String> = observations.iter().map(extract_fn).collect();
    Ok(AxisDomain::Categorical(labels.into_iter().collect()))
}

/// `[earliest, latest]` of the extracted timestamps
pub fn temporal_domain<T, F>(observations: &[T], extract_fn: F) -> StatsResult<AxisDomain>
where
    F: Fn(&T) -> NaiveDateTime,
{
    let start = observations.iter().map(&extract_fn).min();
    let end = observations.iter().map(&extract_fn).max();

    match (start, end) {
        (Some(start), Some(end)) => Ok(AxisDomain::Temporal { start, end }),
        _ => Err(StatsError::invalid(
            "cannot derive a temporal domain from an empty sequence",
        )),
    }
}
