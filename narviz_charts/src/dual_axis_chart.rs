// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two series over the same years, each on its own y axis.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use narviz_core::{Record, YEAR};
use peniko::color::palette::css;

use crate::axis::{AxisSpec, AxisStyle};
use crate::chart::{input, year_extent, zero_based};
use crate::curve::monotone_x;
use crate::error::ChartError;
use crate::layout::Layout;
use crate::scale::{ScaleLinear, extent};
use crate::surface::{StrokeStyle, Surface};

/// One series of a [`DualAxisChartSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSpec {
    /// Field plotted for this series.
    pub field: &'static str,
    /// Line stroke; its brush also colors the series axis.
    pub stroke: StrokeStyle,
    /// Optional axis title.
    pub title: Option<String>,
}

impl SeriesSpec {
    /// Creates a series drawn with `stroke`.
    pub fn new(field: &'static str, stroke: StrokeStyle) -> Self {
        Self {
            field,
            stroke,
            title: None,
        }
    }

    fn points(&self, records: &[Record], x: &ScaleLinear, y: &ScaleLinear) -> Vec<Point> {
        let mut rows: Vec<(f64, f64)> = records
            .iter()
            .filter_map(|r| Some((r.f64(YEAR)?, r.f64(self.field)?)))
            .filter(|(_, v)| v.is_finite())
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        rows.into_iter()
            .map(|(year, v)| Point::new(x.map(year), y.map(v)))
            .collect()
    }
}

/// Series A on a left axis (`[0, max]`, niced) and series B on a right axis (extent, niced).
///
/// Expects two datasets, A then B. Both lines share one year axis spanning the union of their
/// years.
#[derive(Clone, Debug, PartialEq)]
pub struct DualAxisChartSpec {
    /// Left-axis series.
    pub left: SeriesSpec,
    /// Right-axis series.
    pub right: SeriesSpec,
}

impl DualAxisChartSpec {
    /// Creates a chart with a steelblue left series and an orange right series.
    pub fn new(left_field: &'static str, right_field: &'static str) -> Self {
        Self {
            left: SeriesSpec::new(left_field, StrokeStyle::solid(css::STEEL_BLUE, 2.0)),
            right: SeriesSpec::new(right_field, StrokeStyle::solid(css::ORANGE, 2.0)),
        }
    }

    /// Sets the left and right axis titles.
    pub fn with_titles(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left.title = Some(left.into());
        self.right.title = Some(right.into());
        self
    }

    /// Draws the shared x axis, both y axes and both lines.
    pub fn draw(
        &self,
        data: &[&[Record]],
        surface: &mut dyn Surface,
        layout: &Layout,
    ) -> Result<(), ChartError> {
        let a = input(data, 0, "left series")?;
        let b = input(data, 1, "right series")?;

        let x = ScaleLinear::new(year_extent(&[a, b])?, layout.x_range(), false)?;
        let y_left = ScaleLinear::new(zero_based(a, self.left.field)?, layout.y_range(), true)?;
        let y_right = ScaleLinear::new(
            extent(b, |r| r.f64(self.right.field))?,
            layout.y_range(),
            true,
        )?;

        let plot = layout.plot();
        surface.draw_axis(&AxisSpec::bottom(x, plot).with_integer_labels());
        for (series, axis) in [
            (&self.left, AxisSpec::left(y_left, plot)),
            (&self.right, AxisSpec::right(y_right, plot)),
        ] {
            let mut axis = axis.with_style(AxisStyle::colored(series.stroke.brush.clone()));
            if let Some(title) = &series.title {
                axis = axis.with_title(title.clone());
            }
            surface.draw_axis(&axis);
        }

        for (series, records, y) in [(&self.left, a, &y_left), (&self.right, b, &y_right)] {
            surface.draw_path(&monotone_x(&series.points(records, &x, y)), &series.stroke);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::PathEl;
    use peniko::Brush;

    use super::*;
    use crate::axis::{AxisOrient, AxisScale};
    use crate::recording::RecordingSurface;

    fn linear(axis: &AxisSpec) -> ScaleLinear {
        match &axis.scale {
            AxisScale::Linear(s) => *s,
            AxisScale::Band { .. } => panic!("expected a linear axis"),
        }
    }

    fn totals() -> Vec<Record> {
        vec![
            Record::new(2002).with_int("HR", 5059),
            Record::new(2003).with_int("HR", 5207),
            Record::new(2004).with_int("HR", 5451),
        ]
    }

    fn velocity() -> Vec<Record> {
        vec![
            Record::new(2003).with_float("avgVelocity", 90.2),
            Record::new(2004).with_float("avgVelocity", 90.4),
            Record::new(2005).with_float("avgVelocity", 94.7),
        ]
    }

    #[test]
    fn each_series_keeps_its_own_domain() {
        let layout = Layout::default();
        let mut surface = RecordingSurface::new();
        DualAxisChartSpec::new("HR", "avgVelocity")
            .draw(&[&totals(), &velocity()], &mut surface, &layout)
            .unwrap();

        let axes = surface.axes();
        assert_eq!(axes.len(), 3);
        assert_eq!(axes[0].orient, AxisOrient::Bottom);
        assert_eq!(linear(axes[0]).domain(), (2002.0, 2005.0));
        assert_eq!(axes[1].orient, AxisOrient::Left);
        assert_eq!(linear(axes[1]).domain(), (0.0, 5500.0));
        assert_eq!(axes[2].orient, AxisOrient::Right);
        let right = linear(axes[2]).domain();
        assert!((right.0 - 90.0).abs() < 1e-9 && (right.1 - 95.0).abs() < 1e-9);
    }

    #[test]
    fn tick_labels_reflect_each_domain_separately() {
        let hr = vec![
            Record::new(1999).with_int("HR", 6500),
            Record::new(2000).with_int("HR", 5700),
        ];
        let mph = vec![
            Record::new(1999).with_float("avgVelocity", 90.0),
            Record::new(2000).with_float("avgVelocity", 95.0),
        ];
        let mut surface = RecordingSurface::new();
        DualAxisChartSpec::new("HR", "avgVelocity")
            .draw(&[&hr, &mph], &mut surface, &Layout::default())
            .unwrap();

        let axes = surface.axes();
        let left: Vec<String> = axes[1].ticks().into_iter().map(|t| t.label).collect();
        let right: Vec<String> = axes[2].ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(left.first().map(String::as_str), Some("0"));
        assert_eq!(left.last().map(String::as_str), Some("6,500"));
        assert_eq!(right.first().map(String::as_str), Some("90.0"));
        assert_eq!(right.last().map(String::as_str), Some("95.0"));

        // Both axes span the full plot height.
        let plot = Layout::default().plot();
        for axis in &axes[1..] {
            let ticks = axis.ticks();
            assert!((ticks[0].pos - plot.y1).abs() < 1e-9);
            assert!((ticks[ticks.len() - 1].pos - plot.y0).abs() < 1e-9);
        }
    }

    #[test]
    fn axes_and_lines_share_series_colors() {
        let mut surface = RecordingSurface::new();
        DualAxisChartSpec::new("HR", "avgVelocity")
            .draw(&[&totals(), &velocity()], &mut surface, &Layout::default())
            .unwrap();

        let axes = surface.axes();
        assert_eq!(axes[1].style.label_fill, Brush::Solid(css::STEEL_BLUE));
        assert_eq!(axes[2].style.label_fill, Brush::Solid(css::ORANGE));

        let paths = surface.paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].1.brush, Brush::Solid(css::STEEL_BLUE));
        assert_eq!(paths[1].1.brush, Brush::Solid(css::ORANGE));
    }

    #[test]
    fn lines_start_at_their_own_first_year() {
        let layout = Layout::default();
        let mut surface = RecordingSurface::new();
        DualAxisChartSpec::new("HR", "avgVelocity")
            .draw(&[&totals(), &velocity()], &mut surface, &layout)
            .unwrap();

        let x = ScaleLinear::new((2002.0, 2005.0), layout.x_range(), false).unwrap();
        let starts: Vec<f64> = surface
            .paths()
            .iter()
            .filter_map(|(p, _)| match p.elements().first() {
                Some(PathEl::MoveTo(pt)) => Some(pt.x),
                _ => None,
            })
            .collect();
        assert_eq!(starts, [x.map(2002.0), x.map(2003.0)]);
    }

    #[test]
    fn titles_go_on_series_axes() {
        let spec = DualAxisChartSpec::new("HR", "avgVelocity")
            .with_titles("Total Home Runs", "Avg Pitch Velocity (mph)");
        assert_eq!(spec.left.stroke, StrokeStyle::solid(css::STEEL_BLUE, 2.0));
        assert_eq!(spec.right.stroke, StrokeStyle::solid(css::ORANGE, 2.0));

        let mut surface = RecordingSurface::new();
        spec.draw(&[&totals(), &velocity()], &mut surface, &Layout::default())
            .unwrap();
        let axes = surface.axes();
        assert_eq!(axes[1].title.as_deref(), Some("Total Home Runs"));
        assert_eq!(axes[2].title.as_deref(), Some("Avg Pitch Velocity (mph)"));

        let mut untitled = RecordingSurface::new();
        DualAxisChartSpec::new("HR", "avgVelocity")
            .draw(&[&totals(), &velocity()], &mut untitled, &Layout::default())
            .unwrap();
        assert_eq!(untitled.axes()[2].title, None);
    }

    #[test]
    fn second_dataset_is_required() {
        let mut surface = RecordingSurface::new();
        let err = DualAxisChartSpec::new("HR", "avgVelocity")
            .draw(&[&totals()], &mut surface, &Layout::default())
            .unwrap_err();
        assert_eq!(err, ChartError::MissingData("right series".into()));
        assert!(surface.marks().is_empty());
    }
}
