// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-series line chart over years.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use narviz_core::{Record, YEAR};
use peniko::color::palette::css;

use crate::annotation::Annotation;
use crate::axis::AxisSpec;
use crate::chart::{input, zero_based};
use crate::curve::monotone_x;
use crate::error::ChartError;
use crate::layout::Layout;
use crate::scale::{ScaleLinear, extent};
use crate::surface::{StrokeStyle, Surface};

/// A line through one numeric field per year.
///
/// Expects one dataset. The x axis spans the year extent of the (filtered) data; the y axis is
/// `[0, max]`, niced.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChartSpec {
    /// Field plotted on the y axis.
    pub y_field: &'static str,
    /// Inclusive year range kept before drawing.
    pub years: Option<(i64, i64)>,
    /// Line stroke.
    pub stroke: StrokeStyle,
    /// Callouts drawn on top of the line.
    pub annotations: Vec<Annotation>,
}

impl LineChartSpec {
    /// Creates a steelblue line of width 2 over `y_field`.
    pub fn new(y_field: &'static str) -> Self {
        Self {
            y_field,
            years: None,
            stroke: StrokeStyle::solid(css::STEEL_BLUE, 2.0),
            annotations: Vec::new(),
        }
    }

    /// Keeps only records with `from <= year <= to`.
    pub fn with_years(mut self, from: i64, to: i64) -> Self {
        self.years = Some((from, to));
        self
    }

    /// Sets the line stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Adds a callout.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Draws axes, the line and its annotations.
    pub fn draw(
        &self,
        data: &[&[Record]],
        surface: &mut dyn Surface,
        layout: &Layout,
    ) -> Result<(), ChartError> {
        let records = input(data, 0, "line series")?;
        let mut rows: Vec<&Record> = records
            .iter()
            .filter(|r| match self.years {
                Some((from, to)) => (from..=to).contains(&r.year()),
                None => true,
            })
            .filter(|r| r.f64(self.y_field).is_some_and(f64::is_finite))
            .collect();
        rows.sort_by_key(|r| r.year());

        let x = ScaleLinear::new(
            extent(rows.iter().copied(), |r| r.f64(YEAR))?,
            layout.x_range(),
            false,
        )?;
        let y = ScaleLinear::new(
            zero_based(rows.iter().copied(), self.y_field)?,
            layout.y_range(),
            true,
        )?;

        let plot = layout.plot();
        surface.draw_axis(&AxisSpec::bottom(x, plot).with_integer_labels());
        surface.draw_axis(&AxisSpec::left(y, plot));

        let points: Vec<Point> = rows
            .iter()
            .filter_map(|r| {
                let v = r.f64(self.y_field)?;
                Some(Point::new(x.map(r.year() as f64), y.map(v)))
            })
            .collect();
        surface.draw_path(&monotone_x(&points), &self.stroke);

        for a in &self.annotations {
            a.draw(&x, &y, surface);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::PathEl;

    use super::*;
    use crate::error::ScaleError;
    use crate::recording::RecordingSurface;

    fn season(year: i64, hr: i64) -> Record {
        Record::new(year).with_int("HR", hr)
    }

    #[test]
    fn two_seasons_scenario() {
        let data = vec![season(1998, 5064), season(1999, 5528)];
        let layout = Layout::default();
        let mut surface = RecordingSurface::new();
        LineChartSpec::new("HR")
            .with_annotation(Annotation::new((1998.0, 5500.0), "1998 HR Boom"))
            .draw(&[&data], &mut surface, &layout)
            .unwrap();

        let axes = surface.axes();
        assert_eq!(axes.len(), 2);
        let labels: Vec<_> = axes[0].ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["1998", "1999"]);
        let crate::axis::AxisScale::Linear(y) = &axes[1].scale else {
            panic!("left axis should be linear");
        };
        assert_eq!(y.domain(), (0.0, 6000.0));

        let paths = surface.paths();
        assert_eq!(paths.len(), 1);
        let (path, stroke) = paths[0];
        assert_eq!(stroke, &StrokeStyle::solid(css::STEEL_BLUE, 2.0));
        let els = path.elements();
        assert_eq!(els.len(), 2);
        let PathEl::MoveTo(start) = els[0] else {
            panic!("path should start with move_to");
        };
        assert!((start.x - 60.0).abs() < 1e-9);
        let PathEl::LineTo(end) = els[1] else {
            panic!("two points draw a straight segment");
        };
        assert!((end.x - 670.0).abs() < 1e-9);
        let expected_y = 350.0 - 5528.0 / 6000.0 * 310.0;
        assert!((end.y - expected_y).abs() < 1e-9);

        assert_eq!(surface.texts(), ["1998 HR Boom"]);
    }

    #[test]
    fn points_are_drawn_in_year_order() {
        let data = vec![season(2001, 3), season(1999, 1), season(2000, 2)];
        let mut surface = RecordingSurface::new();
        LineChartSpec::new("HR")
            .draw(&[&data], &mut surface, &Layout::default())
            .unwrap();
        let (path, _) = surface.paths()[0];
        let xs: Vec<f64> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::CurveTo(_, _, p) => Some(p.x),
                _ => None,
            })
            .collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn year_range_filters_before_scaling() {
        let data: Vec<Record> = (1990..=2010).map(|y| season(y, y - 1900)).collect();
        let mut surface = RecordingSurface::new();
        LineChartSpec::new("HR")
            .with_years(1995, 2005)
            .draw(&[&data], &mut surface, &Layout::default())
            .unwrap();

        let crate::axis::AxisScale::Linear(x) = &surface.axes()[0].scale else {
            panic!("bottom axis should be linear");
        };
        assert_eq!(x.domain(), (1995.0, 2005.0));
        let (path, _) = surface.paths()[0];
        assert_eq!(path.elements().len(), 11);
    }

    #[test]
    fn single_season_fails_before_drawing() {
        let data = vec![season(1998, 5064)];
        let mut surface = RecordingSurface::new();
        let err = LineChartSpec::new("HR")
            .draw(&[&data], &mut surface, &Layout::default())
            .unwrap_err();
        assert!(matches!(err, ChartError::Scale(ScaleError::Domain { .. })));
        assert!(surface.marks().is_empty());
    }

    #[test]
    fn missing_dataset_is_reported() {
        let mut surface = RecordingSurface::new();
        let err = LineChartSpec::new("HR")
            .draw(&[], &mut surface, &Layout::default())
            .unwrap_err();
        assert!(matches!(err, ChartError::MissingData(_)));
    }
}
