//! File-to-file chart pipeline
//!
//! Loads each configured source, parses it into observations, renders the
//! chart and writes the SVG.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use socialplot_io::{
    open_path, parse_nested_observations, parse_observations, parse_timed_observations, Row,
};
use socialplot_stats::{average_nested, summarize, Summaries};

use crate::chart::{render, ChartData};
use crate::config::{
    BarplotSource, BoxplotSource, ChartConfig, ChartKind, LineplotSource, PlotConfig,
};
use crate::error::ChartResult;
use crate::export::SvgExporter;

/// Rows of a source after checking its header
///
/// Fails with `ColumnNotFound` before any row is parsed. A value column whose
/// sampled type is not numeric only logs a warning; parsing reports the
/// offending row.
pub fn read_source(path: &Path, columns: &[&str], value_col: &str) -> ChartResult<Vec<Row>> {
    let reader = open_path(path)?;
    let schema = reader.schema();
    schema.require(columns)?;

    if let Some(column) = schema.column(value_col) {
        if schema.num_records > 0 && !column.dtype.is_numeric() {
            warn!(
                path = %path.display(),
                column = value_col,
                dtype = column.dtype.name(),
                "Value column does not look numeric"
            );
        }
    }

    debug!(
        path = %path.display(),
        format = reader.format_name(),
        columns = ?schema.names(),
        "Read source"
    );
    Ok(reader.rows())
}

/// Per-post observations for a boxplot
pub fn load_boxplot(source: &BoxplotSource) -> ChartResult<ChartData> {
    let columns = [source.category.as_str(), source.value.as_str()];
    let rows = read_source(&source.source, &columns, &source.value)?;
    let obs = parse_observations(&rows, &source.category, &source.value)?;
    Ok(ChartData::Boxplot(obs))
}

/// Bar values for a grouped bar plot, averaged per pair when requested
pub fn load_barplot(source: &BarplotSource) -> ChartResult<ChartData> {
    let rows = read_source(
        &source.source,
        &[
            source.group.as_str(),
            source.category.as_str(),
            source.value.as_str(),
        ],
        &source.value,
    )?;
    let obs = parse_nested_observations(&rows, &source.group, &source.category, &source.value)?;
    let obs = if source.average {
        average_nested(&obs)?
    } else {
        obs
    };
    Ok(ChartData::GroupedBar(obs))
}

/// Dated values for a line plot
pub fn load_lineplot(source: &LineplotSource) -> ChartResult<ChartData> {
    let columns = [source.date.as_str(), source.value.as_str()];
    let rows = read_source(&source.source, &columns, &source.value)?;
    let obs = parse_timed_observations(&rows, &source.date, &source.value, &source.date_format)?;
    Ok(ChartData::Line(obs))
}

/// Five-number summaries of `value_col` grouped by `group_col`
pub fn summarize_file(path: &Path, group_col: &str, value_col: &str) -> ChartResult<Summaries> {
    let rows = read_source(path, &[group_col, value_col], value_col)?;
    let obs = parse_observations(&rows, group_col, value_col)?;
    Ok(summarize(&obs, |o| o.category.clone())?)
}

/// Render one chart of `config` and write it to its output path
pub fn render_chart(config: &PlotConfig, kind: ChartKind) -> ChartResult<Option<PathBuf>> {
    let (data, chart) = match kind {
        ChartKind::Boxplot => match &config.boxplot {
            Some(s) => (load_boxplot(s)?, s.chart.apply(ChartConfig::boxplot())),
            None => return Ok(None),
        },
        ChartKind::Barplot => match &config.barplot {
            Some(s) => (load_barplot(s)?, s.chart.apply(ChartConfig::barplot())),
            None => return Ok(None),
        },
        ChartKind::Lineplot => match &config.lineplot {
            Some(s) => (load_lineplot(s)?, s.chart.apply(ChartConfig::lineplot())),
            None => return Ok(None),
        },
    };

    let scene = render(&data, &chart)?;
    let path = SvgExporter::new().write(&scene, config.output_path(kind))?;
    Ok(Some(path))
}

/// Render every configured chart, stopping at the first failure
pub fn render_all(config: &PlotConfig) -> ChartResult<Vec<PathBuf>> {
    config.validate()?;

    let mut written = Vec::new();
    for kind in [ChartKind::Boxplot, ChartKind::Barplot, ChartKind::Lineplot] {
        match render_chart(config, kind)? {
            Some(path) => written.push(path),
            None => warn!(chart = kind.name(), "No source configured, skipping"),
        }
    }
    info!(charts = written.len(), "Rendered charts");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use socialplot_io::IoError;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_barplot_averages_raw_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "likes.csv",
            "Platform,PostType,Likes\nFacebook,Video,10\nFacebook,Video,30\nTwitter,Image,5\n",
        );
        let mut source = BarplotSource::new(path);
        source.value = "Likes".to_string();
        source.average = true;

        match load_barplot(&source).unwrap() {
            ChartData::GroupedBar(obs) => {
                assert_eq!(obs.len(), 2);
                assert_eq!(obs[0].value, 20.0);
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_summarize_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "likes.csv",
            "Platform,Likes\nA,1\nA,2\nA,3\nA,4\n",
        );
        let summaries = summarize_file(&path, "Platform", "Likes").unwrap();
        assert_eq!(summaries["A"].q1, 1.75);
    }

    #[test]
    fn test_missing_source() {
        let source = BoxplotSource::new("/nonexistent/likes.csv");
        match load_boxplot(&source) {
            Err(ChartError::DataLoad(IoError::FileNotFound(_))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_fails_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "likes.csv", "Platform,Likes\n");
        match read_source(&path, &["Platform", "Shares"], "Shares") {
            Err(ChartError::DataLoad(IoError::ColumnNotFound(column))) => assert_eq!(column, "Shares"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_render_chart_skips_missing_section() {
        let config = PlotConfig::new();
        assert!(render_chart(&config, ChartKind::Lineplot).unwrap().is_none());
    }
}
