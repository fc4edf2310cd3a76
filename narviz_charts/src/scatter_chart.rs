// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Correlation scatter over two year-keyed datasets.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use narviz_core::{Record, YEAR, join};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::chart::input;
use crate::error::ChartError;
use crate::layout::Layout;
use crate::scale::{ScaleLinear, extent};
use crate::surface::Surface;

/// One circle per year present in both datasets.
///
/// Expects two datasets: the first supplies `x_field`, the second `y_field` and `label_field`.
/// They are inner-joined on year, so years missing from either side are dropped. Each circle
/// carries the tooltip `"{year}: {label} - {y}{y_suffix}, {x}{x_suffix}"`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterChartSpec {
    /// Field plotted on the x axis.
    pub x_field: &'static str,
    /// Field plotted on the y axis.
    pub y_field: &'static str,
    /// Field naming each point in the tooltip.
    pub label_field: &'static str,
    /// Text appended to the x value in the tooltip.
    pub x_suffix: String,
    /// Text appended to the y value in the tooltip.
    pub y_suffix: String,
    /// Bottom axis title.
    pub x_title: Option<String>,
    /// Left axis title.
    pub y_title: Option<String>,
    /// Circle radius.
    pub radius: f64,
    /// Circle fill.
    pub fill: Brush,
}

impl ScatterChartSpec {
    /// Creates steelblue circles of radius 5.
    pub fn new(x_field: &'static str, y_field: &'static str, label_field: &'static str) -> Self {
        Self {
            x_field,
            y_field,
            label_field,
            x_suffix: String::new(),
            y_suffix: String::new(),
            x_title: None,
            y_title: None,
            radius: 5.0,
            fill: Brush::Solid(css::STEEL_BLUE),
        }
    }

    /// Sets the tooltip suffixes for the x and y values.
    pub fn with_suffixes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_suffix = x.into();
        self.y_suffix = y.into();
        self
    }

    /// Sets the axis titles.
    pub fn with_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_title = Some(x.into());
        self.y_title = Some(y.into());
        self
    }

    /// Sets the circle fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Joins the datasets, then draws axes and one circle per joined record.
    pub fn draw(
        &self,
        data: &[&[Record]],
        surface: &mut dyn Surface,
        layout: &Layout,
    ) -> Result<(), ChartError> {
        let xs = input(data, 0, "x values")?;
        let ys = input(data, 1, "y values")?;
        let merged: Vec<Record> = join(xs, ys, YEAR)
            .into_iter()
            .filter(|r| {
                r.f64(self.x_field).is_some_and(f64::is_finite)
                    && r.f64(self.y_field).is_some_and(f64::is_finite)
            })
            .collect();

        let x = ScaleLinear::new(
            extent(&merged, |r| r.f64(self.x_field))?,
            layout.x_range(),
            true,
        )?;
        let y = ScaleLinear::new(
            extent(&merged, |r| r.f64(self.y_field))?,
            layout.y_range(),
            true,
        )?;

        let plot = layout.plot();
        let mut bottom = AxisSpec::bottom(x, plot);
        if let Some(title) = &self.x_title {
            bottom = bottom.with_title(title.clone());
        }
        let mut left = AxisSpec::left(y, plot);
        if let Some(title) = &self.y_title {
            left = left.with_title(title.clone());
        }
        surface.draw_axis(&bottom);
        surface.draw_axis(&left);

        for r in &merged {
            let (Some(vx), Some(vy)) = (r.f64(self.x_field), r.f64(self.y_field)) else {
                continue;
            };
            let center = Point::new(x.map(vx), y.map(vy));
            let id = surface.draw_circle(center, self.radius, &self.fill);
            let tip = alloc::format!(
                "{}: {} - {}{}, {}{}",
                r.year(),
                r.display(self.label_field).unwrap_or_default(),
                r.display(self.y_field).unwrap_or_default(),
                self.y_suffix,
                r.display(self.x_field).unwrap_or_default(),
                self.x_suffix,
            );
            surface.attach_tooltip(id, &tip);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::error::ScaleError;
    use crate::recording::RecordingSurface;

    fn spec() -> ScatterChartSpec {
        ScatterChartSpec::new("avgVelocity", "HR", "player")
            .with_suffixes(" mph", " HRs")
            .with_titles("Average Pitch Velocity (mph)", "Home Runs (Top Player)")
    }

    fn pitches() -> Vec<Record> {
        vec![
            Record::new(1997).with_float("avgVelocity", 89.9),
            Record::new(1998).with_float("avgVelocity", 90.5),
            Record::new(2001).with_float("avgVelocity", 91.2),
        ]
    }

    fn leaders() -> Vec<Record> {
        vec![
            Record::new(1998)
                .with_text("player", "Mark McGwire")
                .with_int("HR", 70),
            Record::new(2001)
                .with_text("player", "Barry Bonds")
                .with_int("HR", 73),
            Record::new(2002)
                .with_text("player", "Alex Rodriguez")
                .with_int("HR", 57),
        ]
    }

    #[test]
    fn only_joined_years_become_circles() {
        let mut surface = RecordingSurface::new();
        spec()
            .draw(&[&pitches(), &leaders()], &mut surface, &Layout::default())
            .unwrap();

        let circles = surface.circles();
        assert_eq!(circles.len(), 2);
        assert!(circles.iter().all(|(_, _, r)| *r == 5.0));
        assert_eq!(
            surface.tooltip(circles[0].0),
            Some("1998: Mark McGwire - 70 HRs, 90.5 mph")
        );
        assert_eq!(
            surface.tooltip(circles[1].0),
            Some("2001: Barry Bonds - 73 HRs, 91.2 mph")
        );
    }

    #[test]
    fn circles_stay_inside_the_plot() {
        let layout = Layout::default();
        let mut surface = RecordingSurface::new();
        spec()
            .draw(&[&pitches(), &leaders()], &mut surface, &layout)
            .unwrap();
        let plot = layout.plot();
        for (_, c, _) in surface.circles() {
            let inside = (plot.x0 - 1e-9..=plot.x1 + 1e-9).contains(&c.x)
                && (plot.y0 - 1e-9..=plot.y1 + 1e-9).contains(&c.y);
            assert!(inside, "{c:?} outside {plot:?}");
        }
    }

    #[test]
    fn axes_carry_titles() {
        let mut surface = RecordingSurface::new();
        spec()
            .draw(&[&pitches(), &leaders()], &mut surface, &Layout::default())
            .unwrap();
        let axes = surface.axes();
        assert_eq!(
            axes[0].title.as_deref(),
            Some("Average Pitch Velocity (mph)")
        );
        assert_eq!(axes[1].title.as_deref(), Some("Home Runs (Top Player)"));
    }

    #[test]
    fn disjoint_years_draw_nothing() {
        let only_pitch = vec![Record::new(1950).with_float("avgVelocity", 88.0)];
        let mut surface = RecordingSurface::new();
        let err = spec()
            .draw(&[&only_pitch, &leaders()], &mut surface, &Layout::default())
            .unwrap_err();
        assert_eq!(err, ChartError::Scale(ScaleError::NoData));
        assert!(surface.marks().is_empty());
    }
}
