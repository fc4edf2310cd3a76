// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One bar per year.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::Rect;
use narviz_core::Record;
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::{AxisScale, AxisSpec};
use crate::chart::{input, zero_based};
use crate::error::ChartError;
use crate::layout::Layout;
use crate::scale::{ScaleBand, ScaleLinear};
use crate::surface::Surface;

/// Category count above which band labels are rotated.
pub const ROTATE_LABELS_ABOVE: usize = 12;

/// A bar chart with years as bands and one numeric field as height.
///
/// Expects one dataset. Each bar carries the tooltip `"{label} ({year}): {value}{suffix}"`.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChartSpec {
    /// Field used for bar heights.
    pub value_field: &'static str,
    /// Field shown first in the tooltip.
    pub label_field: &'static str,
    /// Text appended to the value in the tooltip.
    pub value_suffix: String,
    /// Bar fill.
    pub fill: Brush,
    /// Band padding in `[0, 1)`.
    pub padding: f64,
    /// Label rotation used once the category count exceeds [`ROTATE_LABELS_ABOVE`].
    pub label_angle: f64,
}

impl BarChartSpec {
    /// Creates teal bars with padding `0.1`.
    pub fn new(value_field: &'static str, label_field: &'static str) -> Self {
        Self {
            value_field,
            label_field,
            value_suffix: String::new(),
            fill: Brush::Solid(css::TEAL),
            padding: 0.1,
            label_angle: -65.0,
        }
    }

    /// Sets the tooltip value suffix.
    pub fn with_value_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.value_suffix = suffix.into();
        self
    }

    /// Sets the bar fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Draws axes and bars.
    pub fn draw(
        &self,
        data: &[&[Record]],
        surface: &mut dyn Surface,
        layout: &Layout,
    ) -> Result<(), ChartError> {
        let records = input(data, 0, "bar values")?;
        let rows: Vec<&Record> = records
            .iter()
            .filter(|r| r.f64(self.value_field).is_some_and(f64::is_finite))
            .collect();

        let mut seen = HashSet::with_capacity(rows.len());
        let years: Vec<i64> = rows
            .iter()
            .map(|r| r.year())
            .filter(|y| seen.insert(*y))
            .collect();
        let x = ScaleBand::new(years, layout.x_range(), self.padding)?;
        let y = ScaleLinear::new(
            zero_based(rows.iter().copied(), self.value_field)?,
            layout.y_range(),
            true,
        )?;

        let plot = layout.plot();
        let mut bottom = AxisSpec::bottom(AxisScale::band(&x), plot);
        if x.categories().len() > ROTATE_LABELS_ABOVE {
            bottom = bottom.with_label_angle(self.label_angle);
        }
        surface.draw_axis(&bottom);
        surface.draw_axis(&AxisSpec::left(y, plot));

        let base = y.map(0.0);
        let width = x.band_width();
        for r in rows {
            let (Some(x0), Some(v)) = (x.map(&r.year()), r.f64(self.value_field)) else {
                continue;
            };
            let top = y.map(v);
            let id = surface.draw_rect(Rect::new(x0, top, x0 + width, base), &self.fill);
            let label = r.display(self.label_field).unwrap_or_default();
            let value = r.display(self.value_field).unwrap_or_default();
            let tip = alloc::format!("{label} ({}): {value}{}", r.year(), self.value_suffix);
            surface.attach_tooltip(id, &tip);
        }
        Ok(())
    }
}
