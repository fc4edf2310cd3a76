// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface seam.
//!
//! Renderers never rasterize. They call into a retained-mode [`Surface`] that already knows
//! how to draw axes, paths, shapes and text, attach hover tooltips to marks and toggle named
//! containers (such as a search box) on and off.

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::AxisSpec;

/// Handle for a mark drawn on a [`Surface`].
///
/// Surfaces hand out ids that stay unique for their lifetime, including across
/// [`Surface::clear`], so a stale id can never alias a newer mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

/// A paint + width pair for stroked paths (lines, domain rules, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in surface coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor sits on the alphabetic baseline.
    Alphabetic,
    /// The anchor sits on the vertical middle of the text.
    Middle,
    /// The anchor sits on the top of the text.
    Hanging,
}

/// Text paint and placement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Fill paint.
    pub fill: Brush,
    /// Font size in surface coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation angle in degrees around the anchor point.
    pub angle: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: Brush::Solid(css::BLACK),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
        }
    }
}

impl TextStyle {
    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// A retained-mode 2-D drawing surface.
///
/// Coordinates are absolute surface coordinates; renderers place everything relative to the
/// plot rectangle of the [`Layout`](crate::Layout) they are given.
pub trait Surface {
    /// Removes every mark, tooltip and the description text.
    fn clear(&mut self);

    /// Sets the scene description shown next to the chart.
    fn set_description(&mut self, text: &str);

    /// Draws an axis (domain rule, ticks, labels, title).
    fn draw_axis(&mut self, axis: &AxisSpec) -> MarkId;

    /// Draws an unfilled path.
    fn draw_path(&mut self, path: &BezPath, stroke: &StrokeStyle) -> MarkId;

    /// Draws a filled rectangle.
    fn draw_rect(&mut self, rect: Rect, fill: &Brush) -> MarkId;

    /// Draws a filled circle.
    fn draw_circle(&mut self, center: Point, radius: f64, fill: &Brush) -> MarkId;

    /// Draws a single line of text.
    fn draw_text(&mut self, pos: Point, text: &str, style: &TextStyle) -> MarkId;

    /// Attaches hover text to a previously drawn mark.
    fn attach_tooltip(&mut self, mark: MarkId, text: &str);

    /// Shows or hides a named container outside the chart area.
    fn set_visible(&mut self, container: &str, visible: bool);
}
