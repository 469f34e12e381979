//! socialplot-stats - Summary statistics for chart layout
//!
//! This crate is the statistical core behind the socialplot charts:
//!
//! - **Observations**: validated `(category, value)`, `(group, category, value)`
//!   and `(timestamp, value)` records
//! - **Grouping**: insertion-ordered `group_by` / `rollup`
//! - **Summaries**: five-number summaries with linearly interpolated quantiles
//! - **Domains**: numeric, categorical and temporal axis domains
//!
//! # Design Philosophy
//!
//! Everything here is a pure function of its input. Empty input is always an
//! error rather than a degenerate default, and non-finite values are rejected
//! before they can reach a quantile computation.

pub mod domain;
pub mod error;
pub mod group;
pub mod observation;
pub mod summary;

pub use domain::*;
pub use error::*;
pub use group::*;
pub use observation::*;
pub use summary::*;
