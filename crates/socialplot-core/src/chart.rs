//! Chart construction
//!
//! `render` turns parsed observations and a `ChartConfig` into a `Scene`.
//! All three charts share the same frame: a bottom axis at
//! `height - margin.bottom`, a left axis at `margin.left`, and axis titles
//! placed relative to those axes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use socialplot_stats::{
    categorical_domain, group_by, numeric_domain, summarize, temporal_domain, AxisDomain,
    NestedObservation, Observation, StatsError, TimedObservation,
};

use crate::axis::{Axis, AxisPosition, AxisTitle, DEFAULT_TIME_FORMAT};
use crate::colormap::Color;
use crate::config::{ChartConfig, ChartKind};
use crate::curve::natural_curve_path;
use crate::error::ChartResult;
use crate::scale::{BandScale, LinearScale, OrdinalColorScale, TimeScale, DEFAULT_TICK_COUNT};
use crate::scene::{GroupShape, PathShape, Scene, Shape, Stroke, TextAnchor, TextShape};

/// Inner padding between boxes
pub const BOX_PADDING: f64 = 0.3;

/// Padding between platform groups of bars
pub const GROUP_PADDING: f64 = 0.2;

/// Padding between bars inside a group
pub const BAR_PADDING: f64 = 0.05;

/// Number of ticks on the time axis
pub const TIME_TICK_COUNT: usize = 7;

/// Rotation of time tick labels
pub const TIME_LABEL_ROTATION: f64 = -25.0;

/// Distance of the legend from the right border
pub const LEGEND_INSET: f64 = 150.0;

/// Legend swatch size and vertical pitch
pub const LEGEND_SWATCH: f64 = 15.0;
pub const LEGEND_PITCH: f64 = 20.0;

/// Stroke width of the line plot curve
pub const LINE_WIDTH: f64 = 2.0;

/// Observations for one chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    /// Per-post values, summarized into one box per category
    Boxplot(Vec<Observation>),
    /// One value per (group, category) pair
    GroupedBar(Vec<NestedObservation>),
    /// Values over time
    Line(Vec<TimedObservation>),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Boxplot(_) => ChartKind::Boxplot,
            ChartData::GroupedBar(_) => ChartKind::Barplot,
            ChartData::Line(_) => ChartKind::Lineplot,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartData::Boxplot(obs) => obs.len(),
            ChartData::GroupedBar(obs) => obs.len(),
            ChartData::Line(obs) => obs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render a chart into a scene
///
/// Fails with a statistics error on empty input, and with a configuration
/// error if the margins leave no plot area.
pub fn render(data: &ChartData, config: &ChartConfig) -> ChartResult<Scene> {
    config.validate()?;
    debug!(
        kind = data.kind().name(),
        observations = data.len(),
        width = config.width,
        height = config.height,
        "Rendering chart"
    );

    let mut scene = Scene::new(config.width, config.height);
    match data {
        ChartData::Boxplot(obs) => render_boxplot(&mut scene, obs, config)?,
        ChartData::GroupedBar(obs) => render_grouped_bar(&mut scene, obs, config)?,
        ChartData::Line(obs) => render_line(&mut scene, obs, config)?,
    }

    if let Some(title) = &config.title {
        scene.push(
            TextShape::new(config.width as f64 / 2.0, config.margin.top / 2.0, title.clone())
                .with_anchor(TextAnchor::Middle)
                .with_middle_baseline()
                .with_fill(Color::BLACK),
        );
    }
    Ok(scene)
}

fn x_title(config: &ChartConfig) -> AxisTitle {
    AxisTitle {
        text: config.x_label.clone(),
        x: config.inner_width() / 2.0 + config.margin.left,
        y: config.x_label_offset,
        rotate: None,
    }
}

fn y_title(config: &ChartConfig) -> AxisTitle {
    AxisTitle {
        text: config.y_label.clone(),
        x: -config.inner_height() / 2.0,
        y: -config.y_label_offset,
        rotate: Some(-90.0),
    }
}

fn bottom_offset(config: &ChartConfig) -> f64 {
    config.height as f64 - config.margin.bottom
}

/// `[0, max]` of the values, niced
fn zero_based_scale(max_domain: AxisDomain, config: &ChartConfig) -> ChartResult<LinearScale> {
    let (_, max) = LinearScale::from_domain(&max_domain, config.y_range())?.domain();
    Ok(LinearScale::new((0.0, max), config.y_range()).nice(DEFAULT_TICK_COUNT))
}

fn render_boxplot(scene: &mut Scene, obs: &[Observation], config: &ChartConfig) -> ChartResult<()> {
    let summaries = summarize(obs, |o| o.category.clone())?;
    let platforms = categorical_domain(obs, |o| o.category.clone())?;
    let x = BandScale::from_domain(&platforms, config.x_range())?.with_padding_inner(BOX_PADDING);
    let y = LinearScale::from_domain(&numeric_domain(obs, |o| o.value)?, config.y_range())?
        .nice(DEFAULT_TICK_COUNT);

    scene.push(
        Axis::band(AxisPosition::Bottom, bottom_offset(config), &x)
            .with_title(x_title(config))
            .to_shape(),
    );
    scene.push(
        Axis::linear(AxisPosition::Left, config.margin.left, &y, DEFAULT_TICK_COUNT)
            .with_title(y_title(config))
            .to_shape(),
    );

    let stroke = Stroke::solid(Color::BLACK);
    let box_width = x.bandwidth();
    for summary in summaries.values() {
        let left = x.try_map(&summary.key)?;
        let center = left + box_width / 2.0;

        let mut group = GroupShape::new().with_class("box");
        group.push(Shape::line(center, y.map(summary.min), center, y.map(summary.max), stroke));
        group.push(Shape::rect(
            left,
            y.map(summary.q3),
            box_width,
            y.map(summary.q1) - y.map(summary.q3),
            Some(Color::LIGHT_GRAY),
            Some(stroke),
        ));
        let median = y.map(summary.median);
        group.push(Shape::line(left, median, left + box_width, median, stroke));
        scene.push(group);
    }

    debug!(boxes = summaries.len(), y_domain = ?y.domain(), "Built boxplot");
    Ok(())
}

fn render_grouped_bar(
    scene: &mut Scene,
    obs: &[NestedObservation],
    config: &ChartConfig,
) -> ChartResult<()> {
    let groups = categorical_domain(obs, |o| o.group.clone())?;
    let categories = categorical_domain(obs, |o| o.category.clone())?;

    let x0 = BandScale::from_domain(&groups, config.x_range())?.with_padding(GROUP_PADDING);
    let x1 = BandScale::from_domain(&categories, (0.0, x0.bandwidth()))?.with_padding(BAR_PADDING);
    let y = zero_based_scale(numeric_domain(obs, |o| o.value)?, config)?;
    let color = OrdinalColorScale::new(
        categories.as_categorical().unwrap_or_default().to_vec(),
        config.palette.clone(),
    )?;

    scene.push(
        Axis::band(AxisPosition::Bottom, bottom_offset(config), &x0)
            .with_title(x_title(config))
            .to_shape(),
    );
    scene.push(
        Axis::linear(AxisPosition::Left, config.margin.left, &y, DEFAULT_TICK_COUNT)
            .with_title(y_title(config))
            .to_shape(),
    );

    let baseline = bottom_offset(config);
    for (group, members) in group_by(obs, |o| o.group.clone()) {
        let mut bars = GroupShape::new()
            .with_class("bars")
            .translated(x0.try_map(&group)?, 0.0);
        for bar in members {
            let top = y.map(bar.value);
            bars.push(Shape::rect(
                x1.try_map(&bar.category)?,
                top.min(baseline),
                x1.bandwidth(),
                (baseline - top).abs(),
                Some(color.try_map(&bar.category)?),
                None,
            ));
        }
        scene.push(bars);
    }

    let mut legend = GroupShape::new()
        .with_class("legend")
        .translated(config.width as f64 - LEGEND_INSET, config.margin.top);
    for (i, label) in color.labels().iter().enumerate() {
        let row = i as f64 * LEGEND_PITCH;
        legend.push(Shape::rect(
            0.0,
            row,
            LEGEND_SWATCH,
            LEGEND_SWATCH,
            Some(color.try_map(label)?),
            None,
        ));
        legend.push(TextShape::new(20.0, row + 12.0, label.clone()).with_middle_baseline());
    }
    scene.push(legend);

    debug!(
        groups = x0.labels().len(),
        categories = x1.labels().len(),
        y_domain = ?y.domain(),
        "Built grouped bar plot"
    );
    Ok(())
}

fn render_line(scene: &mut Scene, obs: &[TimedObservation], config: &ChartConfig) -> ChartResult<()> {
    if obs.is_empty() {
        return Err(StatsError::invalid("cannot draw a line through no observations").into());
    }

    let mut points: Vec<&TimedObservation> = obs.iter().collect();
    points.sort_by_key(|o| o.timestamp);

    let x = TimeScale::from_domain(&temporal_domain(obs, |o| o.timestamp)?, config.x_range())?;
    let y = zero_based_scale(numeric_domain(obs, |o| o.value)?, config)?;

    scene.push(
        Axis::time(
            AxisPosition::Bottom,
            bottom_offset(config),
            &x,
            TIME_TICK_COUNT,
            DEFAULT_TIME_FORMAT,
        )
        .with_label_rotation(TIME_LABEL_ROTATION)
        .with_title(x_title(config))
        .to_shape(),
    );
    scene.push(
        Axis::linear(AxisPosition::Left, config.margin.left, &y, DEFAULT_TICK_COUNT)
            .with_title(y_title(config))
            .to_shape(),
    );

    let pixels: Vec<(f64, f64)> = points
        .iter()
        .map(|o| (x.map(o.timestamp), y.map(o.value)))
        .collect();
    scene.push(PathShape {
        d: natural_curve_path(&pixels),
        fill: None,
        stroke: Some(Stroke::new(Color::STEEL_BLUE, LINE_WIDTH)),
    });

    debug!(points = pixels.len(), y_domain = ?y.domain(), "Built line plot");
    Ok(())
}
