//! Chart and source configuration
//!
//! `ChartConfig` carries the drawing surface (size, margins, labels) for one
//! chart. `PlotConfig` is the file-level configuration naming each chart's
//! data source and columns; it loads from TOML or JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::colormap::{post_type_palette, Color};
use crate::error::{ConfigError, ConfigResult};
use socialplot_stats::DEFAULT_DATE_FORMAT;

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "socialplot.toml";

/// The three supported chart kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Boxplot,
    Barplot,
    Lineplot,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Boxplot => "boxplot",
            ChartKind::Barplot => "barplot",
            ChartKind::Lineplot => "lineplot",
        }
    }

    /// Default output file name
    pub fn default_output(&self) -> String {
        format!("{}.svg", self.name())
    }
}

/// Space between the SVG border and the plot area
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Drawing surface and labels of one chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    /// Distance of the x-axis title below the axis line
    pub x_label_offset: f64,
    /// Distance of the y-axis title left of the axis line
    pub y_label_offset: f64,
    /// Colors for categorical series (grouped bar plot)
    pub palette: Vec<Color>,
}

impl ChartConfig {
    /// Defaults of a chart kind
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Boxplot => Self::boxplot(),
            ChartKind::Barplot => Self::barplot(),
            ChartKind::Lineplot => Self::lineplot(),
        }
    }

    /// Likes per platform
    pub fn boxplot() -> Self {
        Self {
            margin: Margin::new(20.0, 30.0, 40.0, 50.0),
            x_label: "Platform".to_string(),
            y_label: "Likes".to_string(),
            x_label_offset: 35.0,
            ..Self::default()
        }
    }

    /// Average likes per platform and post type
    pub fn barplot() -> Self {
        Self {
            margin: Margin::new(40.0, 30.0, 60.0, 50.0),
            x_label: "Platform".to_string(),
            y_label: "Average Likes".to_string(),
            x_label_offset: 40.0,
            ..Self::default()
        }
    }

    /// Average likes over time
    pub fn lineplot() -> Self {
        Self {
            margin: Margin::new(20.0, 30.0, 60.0, 50.0),
            x_label: "Date".to_string(),
            y_label: "Average Likes".to_string(),
            x_label_offset: 50.0,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Horizontal pixel range of the plot area
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width as f64 - self.margin.right)
    }

    /// Vertical pixel range of the plot area, bottom to top
    pub fn y_range(&self) -> (f64, f64) {
        (self.height as f64 - self.margin.bottom, self.margin.top)
    }

    /// Width of the plot area
    pub fn inner_width(&self) -> f64 {
        self.width as f64 - self.margin.left - self.margin.right
    }

    /// Height of the plot area
    pub fn inner_height(&self) -> f64 {
        self.height as f64 - self.margin.top - self.margin.bottom
    }

    /// Check that the plot area is non-empty and the palette usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::OutOfRange(format!(
                "chart size {}x{} must be positive",
                self.width, self.height
            )));
        }
        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::OutOfRange(
                "margins must be finite and non-negative".to_string(),
            ));
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ConfigError::OutOfRange(format!(
                "margins leave no plot area in a {}x{} chart",
                self.width, self.height
            )));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::MissingField("palette".to_string()));
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            margin: Margin::new(20.0, 30.0, 40.0, 50.0),
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            x_label_offset: 35.0,
            y_label_offset: 35.0,
            palette: post_type_palette(),
        }
    }
}

/// Optional per-chart overrides in the config file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub palette: Option<Vec<Color>>,
}

impl ChartOverrides {
    /// Apply overrides on top of a kind's defaults
    pub fn apply(&self, mut config: ChartConfig) -> ChartConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = &self.title {
            config.title = Some(title.clone());
        }
        if let Some(x_label) = &self.x_label {
            config.x_label = x_label.clone();
        }
        if let Some(y_label) = &self.y_label {
            config.y_label = y_label.clone();
        }
        if let Some(palette) = &self.palette {
            config.palette = palette.clone();
        }
        config
    }
}

fn default_platform() -> String {
    "Platform".to_string()
}

fn default_post_type() -> String {
    "PostType".to_string()
}

fn default_likes() -> String {
    "Likes".to_string()
}

fn default_avg_likes() -> String {
    "AvgLikes".to_string()
}

fn default_date() -> String {
    "Date".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Boxplot source: one row per post
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxplotSource {
    pub source: PathBuf,
    #[serde(default = "default_platform")]
    pub category: String,
    #[serde(default = "default_likes")]
    pub value: String,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub chart: ChartOverrides,
}

impl BoxplotSource {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            category: default_platform(),
            value: default_likes(),
            output: None,
            chart: ChartOverrides::default(),
        }
    }
}

/// Grouped bar plot source
///
/// With `average = true` the source holds raw per-post rows and the averages
/// are computed per (group, category); otherwise every row is one bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarplotSource {
    pub source: PathBuf,
    #[serde(default = "default_platform")]
    pub group: String,
    #[serde(default = "default_post_type")]
    pub category: String,
    #[serde(default = "default_avg_likes")]
    pub value: String,
    #[serde(default)]
    pub average: bool,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub chart: ChartOverrides,
}

impl BarplotSource {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            group: default_platform(),
            category: default_post_type(),
            value: default_avg_likes(),
            average: false,
            output: None,
            chart: ChartOverrides::default(),
        }
    }
}

/// Line plot source: one row per date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineplotSource {
    pub source: PathBuf,
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_avg_likes")]
    pub value: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub chart: ChartOverrides,
}

impl LineplotSource {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            date: default_date(),
            value: default_avg_likes(),
            date_format: default_date_format(),
            output: None,
            chart: ChartOverrides::default(),
        }
    }
}

/// File-level configuration: which charts to render from which sources
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Directory for rendered charts; relative outputs resolve against it
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    pub boxplot: Option<BoxplotSource>,
    pub barplot: Option<BarplotSource>,
    pub lineplot: Option<LineplotSource>,
}

impl PlotConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a TOML file
    ///
    /// Relative source paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        debug!(path = %path.display(), charts = config.chart_kinds().len(), "Loaded plot config");
        Ok(config)
    }

    /// Find a config file: `./socialplot.toml`, then the user config directory
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("socialplot").join("config.toml"))
            .filter(|path| path.is_file())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() && !base.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        };
        if let Some(source) = &mut self.boxplot {
            resolve(&mut source.source);
        }
        if let Some(source) = &mut self.barplot {
            resolve(&mut source.source);
        }
        if let Some(source) = &mut self.lineplot {
            resolve(&mut source.source);
        }
        if let Some(out_dir) = &mut self.out_dir {
            resolve(out_dir);
        }
    }

    /// Charts present in this configuration
    pub fn chart_kinds(&self) -> Vec<ChartKind> {
        let mut kinds = Vec::new();
        if self.boxplot.is_some() {
            kinds.push(ChartKind::Boxplot);
        }
        if self.barplot.is_some() {
            kinds.push(ChartKind::Barplot);
        }
        if self.lineplot.is_some() {
            kinds.push(ChartKind::Lineplot);
        }
        kinds
    }

    /// Output path of a chart: explicit output or `<kind>.svg`, under `out_dir`
    pub fn output_path(&self, kind: ChartKind) -> PathBuf {
        let explicit = match kind {
            ChartKind::Boxplot => self.boxplot.as_ref().and_then(|s| s.output.clone()),
            ChartKind::Barplot => self.barplot.as_ref().and_then(|s| s.output.clone()),
            ChartKind::Lineplot => self.lineplot.as_ref().and_then(|s| s.output.clone()),
        };
        let file = explicit.unwrap_or_else(|| PathBuf::from(kind.default_output()));
        match &self.out_dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.chart_kinds().is_empty() {
            return Err(ConfigError::MissingField(
                "at least one of [boxplot], [barplot], [lineplot]".to_string(),
            ));
        }

        let mut columns: Vec<(&str, &str)> = Vec::new();
        if let Some(s) = &self.boxplot {
            columns.extend([("boxplot.category", s.category.as_str()), ("boxplot.value", s.value.as_str())]);
            s.chart.apply(ChartConfig::boxplot()).validate()?;
        }
        if let Some(s) = &self.barplot {
            columns.extend([
                ("barplot.group", s.group.as_str()),
                ("barplot.category", s.category.as_str()),
                ("barplot.value", s.value.as_str()),
            ]);
            s.chart.apply(ChartConfig::barplot()).validate()?;
        }
        if let Some(s) = &self.lineplot {
            columns.extend([
                ("lineplot.date", s.date.as_str()),
                ("lineplot.value", s.value.as_str()),
                ("lineplot.date_format", s.date_format.as_str()),
            ]);
            s.chart.apply(ChartConfig::lineplot()).validate()?;
        }

        if let Some((field, _)) = columns.iter().find(|(_, column)| column.trim().is_empty()) {
            return Err(ConfigError::MissingField(field.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
out_dir = "charts"

[boxplot]
source = "data/socialMedia.csv"

[barplot]
source = "data/socialMediaAvg.csv"
value = "AvgLikes"

[barplot.chart]
width = 960
palette = ["#d62728", "#9467bd"]

[lineplot]
source = "data/socialMediaTime.csv"
output = "time.svg"
"##;

    #[test]
    fn test_chart_presets() {
        let boxplot = ChartConfig::boxplot();
        assert_eq!((boxplot.width, boxplot.height), (800, 500));
        assert_eq!(boxplot.margin, Margin::new(20.0, 30.0, 40.0, 50.0));
        assert_eq!(boxplot.x_range(), (50.0, 770.0));
        assert_eq!(boxplot.y_range(), (460.0, 20.0));

        assert_eq!(ChartConfig::barplot().margin.top, 40.0);
        assert_eq!(ChartConfig::lineplot().margin.bottom, 60.0);
        assert_eq!(ChartConfig::for_kind(ChartKind::Lineplot).x_label, "Date");
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn test_chart_validation() {
        let config = ChartConfig::boxplot().with_size(60, 500);
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));

        let mut config = ChartConfig::boxplot();
        config.palette.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_parse_toml() {
        let config = PlotConfig::from_toml(SAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.chart_kinds(),
            vec![ChartKind::Boxplot, ChartKind::Barplot, ChartKind::Lineplot]
        );

        let boxplot = config.boxplot.as_ref().unwrap();
        assert_eq!(boxplot.category, "Platform");
        assert_eq!(boxplot.value, "Likes");

        let barplot = config.barplot.as_ref().unwrap();
        assert!(!barplot.average);
        assert_eq!(barplot.chart.width, Some(960));
        let chart = barplot.chart.apply(ChartConfig::barplot());
        assert_eq!(chart.width, 960);
        assert_eq!(chart.palette[0].to_hex(), "#d62728");

        let lineplot = config.lineplot.as_ref().unwrap();
        assert_eq!(lineplot.date_format, "%m/%d/%Y");
    }

    #[test]
    fn test_output_paths() {
        let config = PlotConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(
            config.output_path(ChartKind::Boxplot),
            PathBuf::from("charts").join("boxplot.svg")
        );
        assert_eq!(
            config.output_path(ChartKind::Lineplot),
            PathBuf::from("charts").join("time.svg")
        );
    }

    #[test]
    fn test_empty_config_is_invalid() {
        let config = PlotConfig::new();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_blank_column_is_invalid() {
        let mut config = PlotConfig::new();
        let mut source = BoxplotSource::new("likes.csv");
        source.value = " ".to_string();
        config.boxplot = Some(source);
        match config.validate() {
            Err(ConfigError::MissingField(field)) => assert_eq!(field, "boxplot.value"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let config = PlotConfig::from_toml(SAMPLE).unwrap();
        let json = config.to_json().unwrap();
        let parsed = PlotConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PlotConfig::new();
        config.lineplot = Some(LineplotSource::new("time.csv"));
        let toml = config.to_toml().unwrap();
        assert_eq!(PlotConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_load_resolves_relative_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, SAMPLE).unwrap();

        let config = PlotConfig::load(&path).unwrap();
        assert_eq!(
            config.boxplot.unwrap().source,
            dir.path().join("data/socialMedia.csv")
        );
        assert_eq!(config.out_dir, Some(dir.path().join("charts")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlotConfig::load("/nonexistent/socialplot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
