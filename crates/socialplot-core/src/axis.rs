//! Axis system for chart layout
//!
//! Provides tick value calculation, label formatting, and axis shapes
//! (spine, tick marks, tick labels, title) for linear, band and time scales.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::colormap::Color;
use crate::scale::{BandScale, LinearScale, TimeScale};
use crate::scene::{GroupShape, PathShape, Shape, Stroke, TextAnchor, TextShape};

/// Length of tick marks in pixels
pub const TICK_SIZE: f64 = 6.0;

/// Gap between a tick mark and its label
pub const TICK_PADDING: f64 = 3.0;

/// Font size of tick labels
pub const TICK_FONT_SIZE: f64 = 10.0;

/// Default label format of time ticks
pub const DEFAULT_TIME_FORMAT: &str = "%b %d";

/// Axis orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPosition {
    Left,
    Bottom,
}

impl AxisPosition {
    /// Check if this is a vertical axis
    pub fn is_vertical(&self) -> bool {
        matches!(self, AxisPosition::Left)
    }
}

/// A tick mark on an axis
#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    /// Position in pixels along the axis
    pub position: f64,

    /// Label text
    pub label: String,
}

/// Title drawn next to an axis
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    /// Position relative to the axis group
    pub x: f64,
    pub y: f64,
    pub rotate: Option<f64>,
}

/// A complete axis ready to be turned into shapes
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub position: AxisPosition,
    /// Pixel offset of the axis line (y for bottom axes, x for left axes)
    pub offset: f64,
    /// Pixel extent of the spine
    pub range: (f64, f64),
    pub ticks: Vec<TickMark>,
    pub title: Option<AxisTitle>,
    /// Rotation of tick labels in degrees (labels are then end-anchored)
    pub label_rotation: Option<f64>,
}

impl Axis {
    /// Axis for a linear scale with round tick values
    pub fn linear(position: AxisPosition, offset: f64, scale: &LinearScale, count: usize) -> Self {
        let (d0, d1) = scale.domain();
        let step = tick_step(d0, d1, count);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| TickMark {
                position: scale.map(value),
                label: format_tick(value, step),
            })
            .collect();
        Self::with_ticks(position, offset, scale.range(), ticks)
    }

    /// Axis for a band scale, one tick centered on each band
    pub fn band(position: AxisPosition, offset: f64, scale: &BandScale) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .labels()
            .iter()
            .filter_map(|label| {
                scale.map(label).map(|start| TickMark {
                    position: start + half,
                    label: label.clone(),
                })
            })
            .collect();
        let (r0, r1) = band_extent(scale);
        Self::with_ticks(position, offset, (r0, r1), ticks)
    }

    /// Axis for a time scale with day-aligned ticks
    pub fn time(
        position: AxisPosition,
        offset: f64,
        scale: &TimeScale,
        count: usize,
        format: &str,
    ) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|time| TickMark {
                position: scale.map(time),
                label: format_time(time, format),
            })
            .collect();
        let (t0, t1) = scale.domain();
        Self::with_ticks(position, offset, (scale.map(t0), scale.map(t1)), ticks)
    }

    fn with_ticks(position: AxisPosition, offset: f64, range: (f64, f64), ticks: Vec<TickMark>) -> Self {
        Self {
            position,
            offset,
            range,
            ticks,
            title: None,
            label_rotation: None,
        }
    }

    /// Set the axis title
    pub fn with_title(mut self, title: AxisTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Rotate tick labels
    pub fn with_label_rotation(mut self, degrees: f64) -> Self {
        self.label_rotation = Some(degrees);
        self
    }

    /// Build the axis group: spine, ticks, labels and title
    pub fn to_shape(&self) -> Shape {
        let stroke = Stroke::solid(Color::BLACK);
        let (r0, r1) = self.range;

        let (mut group, spine) = match self.position {
            AxisPosition::Bottom => (
                GroupShape::new().with_class("axis x").translated(0.0, self.offset),
                format!("M{},{}V0H{}V{}", fmt(r0), TICK_SIZE, fmt(r1), TICK_SIZE),
            ),
            AxisPosition::Left => (
                GroupShape::new().with_class("axis y").translated(self.offset, 0.0),
                format!("M{},{}H0V{}H{}", -TICK_SIZE, fmt(r0), fmt(r1), -TICK_SIZE),
            ),
        };
        group = group.with_font_size(TICK_FONT_SIZE);

        group.push(PathShape {
            d: spine,
            fill: None,
            stroke: Some(stroke),
        });

        for tick in &self.ticks {
            group.push(self.tick_shape(tick, stroke));
        }

        if let Some(title) = &self.title {
            let mut text = TextShape::new(title.x, title.y, title.text.clone())
                .with_anchor(TextAnchor::Middle)
                .with_fill(Color::BLACK);
            if let Some(angle) = title.rotate {
                text = text.with_rotation(angle);
            }
            group.push(text);
        }

        group.into()
    }

    fn tick_shape(&self, tick: &TickMark, stroke: Stroke) -> GroupShape {
        let label_offset = TICK_SIZE + TICK_PADDING;
        match self.position {
            AxisPosition::Bottom => {
                let mut group = GroupShape::new()
                    .with_class("tick")
                    .translated(tick.position, 0.0);
                group.push(Shape::line(0.0, 0.0, 0.0, TICK_SIZE, stroke));
                let mut label = TextShape::new(0.0, label_offset, tick.label.clone())
                    .with_fill(Color::BLACK)
                    .with_dy(0.71);
                label = match self.label_rotation {
                    Some(angle) => label.with_anchor(TextAnchor::End).with_rotation(angle),
                    None => label.with_anchor(TextAnchor::Middle),
                };
                group.push(label);
                group
            }
            AxisPosition::Left => {
                let mut group = GroupShape::new()
                    .with_class("tick")
                    .translated(0.0, tick.position);
                group.push(Shape::line(0.0, 0.0, -TICK_SIZE, 0.0, stroke));
                group.push(
                    TextShape::new(-label_offset, 0.0, tick.label.clone())
                        .with_fill(Color::BLACK)
                        .with_anchor(TextAnchor::End)
                        .with_dy(0.32),
                );
                group
            }
        }
    }
}

fn band_extent(scale: &BandScale) -> (f64, f64) {
    let labels = scale.labels();
    match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => {
            let start = scale.map(first).unwrap_or(0.0);
            let end = scale.map(last).unwrap_or(0.0) + scale.bandwidth();
            let pad = scale.step() - scale.bandwidth();
            (start.min(end) - pad / 2.0, start.max(end) + pad / 2.0)
        }
        _ => (0.0, 0.0),
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Tick indices and increment for `[start, stop]` (start <= stop)
///
/// A negative increment `-k` stands for a step of `1 / k`, which keeps
/// decimal ticks exact.
fn tick_layout(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_layout(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed tick increment for `[start, stop]`, see `tick_layout`
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_layout(start, stop, count as f64).2
}

/// Distance between adjacent round ticks
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    if !(hi > lo) || count == 0 {
        return 0.0;
    }
    let inc = tick_increment(lo, hi, count);
    if inc < 0.0 {
        1.0 / -inc
    } else {
        inc
    }
}

/// Round tick values covering `[start, stop]`, approximately `count` of them
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_layout(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let mut ticks: Vec<f64> = (0..n)
        .map(|i| {
            let index = i1 + i as f64;
            if inc < 0.0 {
                index / -inc
            } else {
                index * inc
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Format a tick value with the precision implied by the tick step
///
/// Integral parts get thousands separators: `1000` with step 100 is `1,000`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-(step.log10()) - 1e-9).ceil().max(0.0) as usize
    } else {
        0
    };
    let text = format!("{:.prec$}", value, prec = decimals);
    let text = if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    };
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}{}", sign, grouped, fraction)
}

/// Format a tick time with a chrono format string
pub fn format_time(time: NaiveDateTime, format: &str) -> String {
    time.format(format).to_string()
}

/// Format a pixel coordinate compactly (at most three decimals)
pub fn fmt(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_linear_ticks() {
        assert_eq!(
            linear_ticks(0.0, 1000.0, 10),
            vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0, 1000.0]
        );
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(linear_ticks(1.0, 0.0, 2), vec![1.0, 0.5, 0.0]);
        assert_eq!(linear_ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(linear_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0.0, 1000.0, 10), 100.0);
        assert_eq!(tick_step(0.0, 1.0, 10), 0.1);
        assert_eq!(tick_step(0.0, 947.0, 10), 100.0);
        assert_eq!(tick_step(5.0, 5.0, 10), 0.0);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0, 100.0), "0");
        assert_eq!(format_tick(1000.0, 100.0), "1,000");
        assert_eq!(format_tick(1234567.0, 1.0), "1,234,567");
        assert_eq!(format_tick(0.2, 0.1), "0.2");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(-2500.0, 500.0), "-2,500");
    }

    #[test]
    fn test_format_time() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_time(time, DEFAULT_TIME_FORMAT), "Mar 01");
    }

    #[test]
    fn test_fmt() {
        assert_eq!(fmt(50.0), "50");
        assert_eq!(fmt(12.3456), "12.346");
        assert_eq!(fmt(-0.0001), "0");
    }

    #[test]
    fn test_linear_axis_shapes() {
        let scale = LinearScale::new((0.0, 1000.0), (460.0, 20.0));
        let axis = Axis::linear(AxisPosition::Left, 50.0, &scale, 10);
        assert_eq!(axis.ticks.len(), 11);
        assert_eq!(axis.ticks[0].position, 460.0);
        assert_eq!(axis.ticks[10].label, "1,000");

        match axis.to_shape() {
            Shape::Group(group) => {
                assert_eq!(group.class.as_deref(), Some("axis y"));
                // spine + 11 ticks
                assert_eq!(group.children.len(), 12);
            }
            other => panic!("expected a group, got {:?}", other),
        }
    }

    #[test]
    fn test_band_axis_centers_ticks() {
        let scale = BandScale::new(vec!["A".to_string(), "B".to_string()], (0.0, 100.0));
        let axis = Axis::band(AxisPosition::Bottom, 460.0, &scale).with_title(AxisTitle {
            text: "Platform".to_string(),
            x: 50.0,
            y: 35.0,
            rotate: None,
        });
        assert_eq!(axis.ticks[0].position, 25.0);
        assert_eq!(axis.ticks[1].position, 75.0);
        assert_eq!(axis.range, (0.0, 100.0));

        match axis.to_shape() {
            Shape::Group(group) => assert_eq!(group.children.len(), 4),
            other => panic!("expected a group, got {:?}", other),
        }
    }
}
