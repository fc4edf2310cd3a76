// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart layout: a view size minus margins gives the plot rectangle.

use kurbo::Rect;

/// Space reserved around the plot for axes and titles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margin {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(40.0, 30.0, 50.0, 60.0)
    }
}

/// An immutable view size plus margins, passed to every renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Total view width.
    pub width: f64,
    /// Total view height.
    pub height: f64,
    /// Margins around the plot rectangle.
    pub margin: Margin,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 400.0,
            margin: Margin::default(),
        }
    }
}

impl Layout {
    /// Creates a layout.
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Returns the same view with different margins.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// The whole view, `(0, 0)` to `(width, height)`.
    pub fn view(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The plot rectangle inside the margins.
    ///
    /// Margins wider than the view collapse the plot to zero size instead of inverting it.
    pub fn plot(&self) -> Rect {
        let m = self.margin;
        let x0 = m.left;
        let y0 = m.top;
        let x1 = (self.width - m.right).max(x0);
        let y1 = (self.height - m.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }

    /// Horizontal pixel range of the plot, left to right.
    pub fn x_range(&self) -> (f64, f64) {
        let p = self.plot();
        (p.x0, p.x1)
    }

    /// Vertical pixel range of the plot, bottom to top (larger values map higher).
    pub fn y_range(&self) -> (f64, f64) {
        let p = self.plot();
        (p.y1, p.y0)
    }
}
