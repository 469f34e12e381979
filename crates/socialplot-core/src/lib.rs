//! socialplot-core - Chart construction for social media engagement data
//!
//! This crate turns parsed observations into charts and writes them as SVG.
//!
//! # Key Components
//!
//! - **ChartConfig**: size, margins and labels of one chart, with presets
//! - **PlotConfig**: which sources feed which charts, loaded from TOML
//! - **Scales**: linear (with nice rounding), band, time and ordinal color
//! - **Axis**: tick generation and label formatting
//! - **Scene**: retained tree of lines, rectangles, paths and text
//! - **SvgExporter**: scene serialization
//!
//! # Charts
//!
//! - **Boxplot**: five-number summary per category
//! - **Grouped bar**: one bar per (group, category) pair with a legend
//! - **Line**: values over time drawn as a natural cubic spline

pub mod axis;
pub mod chart;
pub mod colormap;
pub mod config;
pub mod curve;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod scale;
pub mod scene;

pub use axis::*;
pub use chart::*;
pub use colormap::*;
pub use config::*;
pub use curve::natural_curve_path;
pub use error::*;
pub use export::SvgExporter;
pub use pipeline::{render_all, render_chart, summarize_file};
pub use scale::*;
pub use scene::*;
