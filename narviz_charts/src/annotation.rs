// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text callouts anchored at data coordinates.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Vec2};
use peniko::Brush;
use peniko::color::palette::css;

use crate::scale::ScaleLinear;
use crate::surface::{MarkId, Surface, TextStyle};

/// A label placed at a data-space anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Anchor in data space: `(x, y)`.
    pub anchor: (f64, f64),
    /// Text drawn on the chart.
    pub label: String,
    /// Longer text shown on hover.
    pub title: Option<String>,
    /// Pixel offset from the mapped anchor.
    pub offset: Vec2,
    /// Text fill.
    pub fill: Brush,
}

impl Annotation {
    /// Creates a red annotation with no offset.
    pub fn new(anchor: (f64, f64), label: impl Into<String>) -> Self {
        Self {
            anchor,
            label: label.into(),
            title: None,
            offset: Vec2::ZERO,
            fill: Brush::Solid(css::RED),
        }
    }

    /// Sets the hover text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the pixel offset.
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Vec2::new(dx, dy);
        self
    }

    /// Sets the text fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Surface position of the label for the given scales.
    pub fn position(&self, x: &ScaleLinear, y: &ScaleLinear) -> Point {
        Point::new(x.map(self.anchor.0), y.map(self.anchor.1)) + self.offset
    }

    /// Draws the label and attaches its title as a tooltip.
    pub fn draw(&self, x: &ScaleLinear, y: &ScaleLinear, surface: &mut dyn Surface) -> MarkId {
        let style = TextStyle::default().with_fill(self.fill.clone());
        let id = surface.draw_text(self.position(x, y), &self.label, &style);
        if let Some(title) = &self.title {
            surface.attach_tooltip(id, title);
        }
        id
    }
}
