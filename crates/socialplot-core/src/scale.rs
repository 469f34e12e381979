//! Scales mapping data domains onto pixel ranges
//!
//! - `LinearScale`: continuous numeric domain, with "nice" rounding
//! - `BandScale`: ordinal labels split into equal bands with padding
//! - `TimeScale`: continuous time domain
//! - `OrdinalColorScale`: labels to palette colors

use chrono::{Duration, NaiveDateTime};
use socialplot_stats::AxisDomain;

use crate::axis::{linear_ticks, tick_increment};
use crate::colormap::Color;
use crate::error::{ChartError, ChartResult};

/// Default tick count used by `nice` and axis ticks
pub const DEFAULT_TICK_COUNT: usize = 10;

fn domain_mismatch(expected: &str, domain: &AxisDomain) -> ChartError {
    ChartError::InvalidConfig(format!(
        "expected a {} domain, got {}",
        expected,
        domain.kind().name()
    ))
}

/// Linear map from `[d0, d1]` to `[r0, r1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale from explicit bounds
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Create a scale from a numeric axis domain
    pub fn from_domain(domain: &AxisDomain, range: (f64, f64)) -> ChartResult<Self> {
        domain
            .as_numeric()
            .map(|bounds| Self::new(bounds, range))
            .ok_or_else(|| domain_mismatch("numeric", domain))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Extend the domain to round tick values
    ///
    /// Repeats until the tick increment is stable, so `[0, 947]` becomes
    /// `[0, 1000]`. A degenerate domain is left unchanged.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        if !(stop > start) || count == 0 {
            return self;
        }

        // The domain only changes once the step settles
        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if !step.is_finite() || step == 0.0 {
                return self;
            }
            if previous == Some(step) {
                self.domain = if reversed { (stop, start) } else { (start, stop) };
                return self;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous = Some(step);
        }

        self
    }

    /// Map a domain value to the range
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    /// Round tick values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Ordinal scale dividing a range into uniform bands
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    /// Create a band scale without padding
    pub fn new(labels: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            labels,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Create a band scale from a categorical axis domain
    pub fn from_domain(domain: &AxisDomain, range: (f64, f64)) -> ChartResult<Self> {
        domain
            .as_categorical()
            .map(|labels| Self::new(labels.to_vec(), range))
            .ok_or_else(|| domain_mismatch("categorical", domain))
    }

    /// Fraction of the step reserved between bands
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Fraction of the step reserved before the first and after the last band
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Set inner and outer padding together
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn layout(&self) -> (f64, f64) {
        let n = self.labels.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - self.padding_inner)) * self.align;
        (start, step)
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f64 {
        self.layout().1
    }

    /// Width of one band
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `label`
    pub fn map(&self, label: &str) -> Option<f64> {
        let index = self.labels.iter().position(|l| l == label)?;
        let (start, step) = self.layout();
        let position = if self.range.1 < self.range.0 {
            self.labels.len() - 1 - index
        } else {
            index
        };
        Some(start + step * position as f64)
    }

    /// Start of the band for `label`, or `UnknownLabel`
    pub fn try_map(&self, label: &str) -> ChartResult<f64> {
        self.map(label)
            .ok_or_else(|| ChartError::UnknownLabel(label.to_string()))
    }
}

/// Linear map from a time interval to a pixel range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDateTime, NaiveDateTime),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Create a scale from a temporal axis domain
    pub fn from_domain(domain: &AxisDomain, range: (f64, f64)) -> ChartResult<Self> {
        domain
            .as_temporal()
            .map(|bounds| Self::new(bounds, range))
            .ok_or_else(|| domain_mismatch("temporal", domain))
    }

    pub fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        self.domain
    }

    /// Map a timestamp to the range
    pub fn map(&self, time: NaiveDateTime) -> f64 {
        let span = (self.domain.1 - self.domain.0).num_milliseconds() as f64;
        let offset = (time - self.domain.0).num_milliseconds() as f64;
        let (r0, r1) = self.range;
        let t = if span == 0.0 { 0.5 } else { offset / span };
        r0 + t * (r1 - r0)
    }

    /// Tick times at midnight boundaries, about `count` of them
    ///
    /// Steps are whole days from 1, 2, 7 or 14; longer spans fall back to
    /// multiples of 30 days.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        let (start, end) = if self.domain.1 < self.domain.0 {
            (self.domain.1, self.domain.0)
        } else {
            self.domain
        };
        let span_days = (end - start).num_days().max(0);
        let target = span_days as f64 / count.max(1) as f64;
        let step_days = [1, 2, 7, 14]
            .into_iter()
            .find(|d| *d as f64 >= target)
            .unwrap_or_else(|| ((target / 30.0).ceil() as i64).max(1) * 30);

        let first = start.date().and_hms_opt(0, 0, 0).unwrap_or(start);
        let first = if first < start {
            first + Duration::days(1)
        } else {
            first
        };

        std::iter::successors(Some(first), |t| Some(*t + Duration::days(step_days)))
            .take_while(|t| *t <= end)
            .collect()
    }
}

/// Maps labels to palette colors by domain position
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalColorScale {
    labels: Vec<String>,
    palette: Vec<Color>,
}

impl OrdinalColorScale {
    /// Create a color scale; the palette repeats when it is shorter than the domain
    pub fn new(labels: Vec<String>, palette: Vec<Color>) -> ChartResult<Self> {
        if palette.is_empty() {
            return Err(ChartError::InvalidConfig("color palette is empty".to_string()));
        }
        Ok(Self { labels, palette })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Color for `label`, if it is in the domain
    pub fn map(&self, label: &str) -> Option<Color> {
        let index = self.labels.iter().position(|l| l == label)?;
        Some(self.palette[index % self.palette.len()])
    }

    /// Color for `label`, or `UnknownLabel`
    pub fn try_map(&self, label: &str) -> ChartResult<Color> {
        self.map(label)
            .ok_or_else(|| ChartError::UnknownLabel(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_linear_map_inverted_range() {
        let scale = LinearScale::new((0.0, 1000.0), (460.0, 20.0));
        assert!(close(scale.map(0.0), 460.0));
        assert!(close(scale.map(1000.0), 20.0));
        assert!(close(scale.map(500.0), 240.0));
    }

    #[test]
    fn test_linear_nice() {
        let scale = LinearScale::new((0.0, 947.0), (0.0, 1.0)).nice(DEFAULT_TICK_COUNT);
        assert_eq!(scale.domain(), (0.0, 1000.0));

        let scale = LinearScale::new((13.0, 987.0), (0.0, 1.0)).nice(DEFAULT_TICK_COUNT);
        assert_eq!(scale.domain(), (0.0, 1000.0));

        let scale = LinearScale::new((0.12, 0.87), (0.0, 1.0)).nice(DEFAULT_TICK_COUNT);
        assert!(close(scale.domain().0, 0.1));
        assert!(close(scale.domain().1, 0.9));
    }

    #[test]
    fn test_degenerate_linear_domain() {
        let scale = LinearScale::new((5.0, 5.0), (100.0, 0.0)).nice(DEFAULT_TICK_COUNT);
        assert_eq!(scale.domain(), (5.0, 5.0));
        assert!(close(scale.map(5.0), 50.0));
    }

    #[test]
    fn test_nice_keeps_domain_without_finite_step() {
        let scale = LinearScale::new((-f64::MAX, f64::MAX), (0.0, 1.0)).nice(DEFAULT_TICK_COUNT);
        assert_eq!(scale.domain(), (-f64::MAX, f64::MAX));

        let scale = LinearScale::new((0.0, 947.0), (0.0, 1.0)).nice(0);
        assert_eq!(scale.domain(), (0.0, 947.0));
    }

    #[test]
    fn test_linear_from_wrong_domain() {
        let domain = AxisDomain::Categorical(labels(&["A"]));
        assert!(LinearScale::from_domain(&domain, (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_band_padding_inner() {
        // Four platforms over [50, 770] with 30% inner padding
        let scale = BandScale::new(labels(&["A", "B", "C", "D"]), (50.0, 770.0))
            .with_padding_inner(0.3);

        let step = 720.0 / 3.7;
        assert!(close(scale.step(), step));
        assert!(close(scale.bandwidth(), step * 0.7));
        assert!(close(scale.map("A").unwrap(), 50.0));
        assert!(close(scale.map("D").unwrap() + scale.bandwidth(), 770.0));
        assert!(scale.map("E").is_none());
        assert!(matches!(scale.try_map("E"), Err(ChartError::UnknownLabel(_))));
    }

    #[test]
    fn test_band_symmetric_padding() {
        let scale = BandScale::new(labels(&["A", "B"]), (0.0, 100.0)).with_padding(0.2);
        let step = 100.0 / 2.2;
        assert!(close(scale.step(), step));
        assert!(close(scale.map("A").unwrap(), step * 0.2));
        assert!(close(scale.bandwidth(), step * 0.8));
    }

    #[test]
    fn test_time_scale() {
        let scale = TimeScale::new((day(1), day(7)), (50.0, 770.0));
        assert!(close(scale.map(day(1)), 50.0));
        assert!(close(scale.map(day(4)), 410.0));
        assert!(close(scale.map(day(7)), 770.0));

        let ticks = scale.ticks(7);
        assert_eq!(ticks.len(), 7);
        assert_eq!(ticks[0], day(1));
        assert_eq!(ticks[6], day(7));
    }

    #[test]
    fn test_time_ticks_widen_for_long_spans() {
        let start = day(1);
        let end = start + Duration::days(60);
        let ticks = TimeScale::new((start, end), (0.0, 1.0)).ticks(7);
        assert!(ticks.len() <= 8);
        assert_eq!(ticks[1] - ticks[0], Duration::days(14));
    }

    #[test]
    fn test_ordinal_colors_cycle() {
        let palette = vec![Color::BLACK, Color::WHITE];
        let scale = OrdinalColorScale::new(labels(&["Image", "Video", "Text"]), palette).unwrap();
        assert_eq!(scale.map("Image"), Some(Color::BLACK));
        assert_eq!(scale.map("Video"), Some(Color::WHITE));
        assert_eq!(scale.map("Text"), Some(Color::BLACK));
        assert!(scale.try_map("Reel").is_err());
        assert!(OrdinalColorScale::new(labels(&["A"]), Vec::new()).is_err());
    }
}
