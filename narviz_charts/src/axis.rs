// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis guides.
//!
//! An [`AxisSpec`] bundles a resolved scale, an orientation and the plot rectangle it borders.
//! Renderers hand it to [`Surface::draw_axis`](crate::Surface::draw_axis); surfaces that draw
//! axes from primitives can use [`AxisSpec::layout`] for the geometry of the domain rule,
//! ticks, labels and title.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Display;
use core::hash::Hash;

use kurbo::{Point, Rect};
use peniko::Brush;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::format::{format_integer, format_tick_with_step};
use crate::scale::{DEFAULT_TICK_COUNT, ScaleBand, ScaleLinear};
use crate::surface::{StrokeStyle, TextAnchor, TextBaseline, TextStyle};

/// Axis orientation relative to the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

impl AxisStyle {
    /// Default style with labels and title painted in `brush`.
    ///
    /// Dual-axis charts use this to tie each axis to its series.
    pub fn colored(brush: impl Into<Brush>) -> Self {
        let brush = brush.into();
        Self {
            label_fill: brush.clone(),
            title_fill: brush,
            ..Self::default()
        }
    }
}

/// One resolved tick: a position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Position in surface coordinates along the axis direction.
    pub pos: f64,
    /// Label text.
    pub label: String,
}

/// The scale an axis is drawn from.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// A continuous scale; ticks are generated from its domain.
    Linear(ScaleLinear),
    /// A band scale, resolved to one tick per category at the band center.
    Band {
        /// Output range of the band scale.
        range: (f64, f64),
        /// Ticks at band centers, in category order.
        ticks: Vec<AxisTick>,
    },
}

impl AxisScale {
    /// Resolves a band scale into per-category ticks labelled with `Display`.
    pub fn band<K: Clone + Eq + Hash + Display>(scale: &ScaleBand<K>) -> Self {
        let ticks = scale
            .categories()
            .iter()
            .filter_map(|c| {
                Some(AxisTick {
                    pos: scale.center(c)?,
                    label: c.to_string(),
                })
            })
            .collect();
        Self::Band {
            range: scale.range(),
            ticks,
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Band { range, .. } => *range,
        }
    }
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

/// Label formatter: `(value, tick_step) -> label`.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// An axis attached to one edge of a plot rectangle.
#[derive(Clone)]
pub struct AxisSpec {
    /// The axis scale.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// The plot rectangle the axis borders.
    pub plot: Rect,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick end and the tick label.
    pub tick_padding: f64,
    /// Only keep whole-number ticks (years, counts).
    pub integer_ticks: bool,
    /// Optional tick label formatter; defaults to [`format_tick_with_step`].
    pub tick_formatter: Option<TickFormatter>,
    /// Tick label rotation angle in degrees.
    pub label_angle: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional axis title.
    pub title: Option<String>,
    /// Distance from the domain rule to the title.
    pub title_offset: f64,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("plot", &self.plot)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("integer_ticks", &self.integer_ticks)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("label_angle", &self.label_angle)
            .field("style", &self.style)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis with default styling and [`DEFAULT_TICK_COUNT`] ticks.
    pub fn new(scale: impl Into<AxisScale>, orient: AxisOrient, plot: Rect) -> Self {
        let title_offset = if orient.is_horizontal() { 40.0 } else { 45.0 };
        Self {
            scale: scale.into(),
            orient,
            plot,
            tick_count: DEFAULT_TICK_COUNT,
            tick_size: 6.0,
            tick_padding: 3.0,
            integer_ticks: false,
            tick_formatter: None,
            label_angle: 0.0,
            style: AxisStyle::default(),
            title: None,
            title_offset,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(scale: impl Into<AxisScale>, plot: Rect) -> Self {
        Self::new(scale, AxisOrient::Bottom, plot)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(scale: impl Into<AxisScale>, plot: Rect) -> Self {
        Self::new(scale, AxisOrient::Left, plot)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right(scale: impl Into<AxisScale>, plot: Rect) -> Self {
        Self::new(scale, AxisOrient::Right, plot)
    }

    /// Keep only whole-number ticks and label them without grouping (`1998`, not `1,998`).
    pub fn with_integer_labels(mut self) -> Self {
        self.integer_ticks = true;
        self.tick_formatter = Some(Arc::new(|v, _step| format_integer(v)));
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set tick label rotation angle in degrees.
    pub fn with_label_angle(mut self, angle_degrees: f64) -> Self {
        self.label_angle = angle_degrees;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns resolved ticks: positions in surface coordinates plus formatted labels.
    pub fn ticks(&self) -> Vec<AxisTick> {
        match &self.scale {
            AxisScale::Band { ticks, .. } => ticks.clone(),
            AxisScale::Linear(s) => {
                let step = s.tick_step(self.tick_count);
                s.ticks(self.tick_count)
                    .into_iter()
                    .filter(|v| !self.integer_ticks || is_whole(*v))
                    .map(|v| AxisTick {
                        pos: s.map(v),
                        label: self.format_tick(v, step),
                    })
                    .collect()
            }
        }
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Computes the geometry of the axis: domain rule, tick rules, label and title anchors.
    pub fn layout(&self) -> AxisLayout {
        let (r0, r1) = self.scale.range();
        let (lo, hi) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
        let plot = self.plot;
        let size = self.tick_size.abs();
        let gap = size + self.tick_padding.max(0.0);
        let rotated = self.label_angle != 0.0;

        let label_style = TextStyle::default()
            .with_fill(self.style.label_fill.clone())
            .with_font_size(self.style.label_font_size)
            .with_angle(self.label_angle);
        let title_style = TextStyle::default()
            .with_fill(self.style.title_fill.clone())
            .with_font_size(self.style.title_font_size)
            .with_anchor(TextAnchor::Middle);

        let (domain, label_style, title) = match self.orient {
            AxisOrient::Bottom => {
                let y = plot.y1;
                let label_style = if rotated {
                    label_style
                        .with_anchor(TextAnchor::End)
                        .with_baseline(TextBaseline::Middle)
                } else {
                    label_style
                        .with_anchor(TextAnchor::Middle)
                        .with_baseline(TextBaseline::Hanging)
                };
                let title = Point::new((lo + hi) / 2.0, y + self.title_offset);
                (
                    (Point::new(lo, y), Point::new(hi, y)),
                    label_style,
                    (title, title_style.with_baseline(TextBaseline::Hanging)),
                )
            }
            AxisOrient::Top => {
                let y = plot.y0;
                let label_style = label_style
                    .with_anchor(if rotated {
                        TextAnchor::Start
                    } else {
                        TextAnchor::Middle
                    })
                    .with_baseline(TextBaseline::Alphabetic);
                let title = Point::new((lo + hi) / 2.0, y - self.title_offset);
                (
                    (Point::new(lo, y), Point::new(hi, y)),
                    label_style,
                    (title, title_style.with_baseline(TextBaseline::Alphabetic)),
                )
            }
            AxisOrient::Left => {
                let x = plot.x0;
                let label_style = label_style
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Middle);
                let title = Point::new(x - self.title_offset, (lo + hi) / 2.0);
                (
                    (Point::new(x, lo), Point::new(x, hi)),
                    label_style,
                    (
                        title,
                        title_style
                            .with_baseline(TextBaseline::Middle)
                            .with_angle(-90.0),
                    ),
                )
            }
            AxisOrient::Right => {
                let x = plot.x1;
                let label_style = label_style
                    .with_anchor(TextAnchor::Start)
                    .with_baseline(TextBaseline::Middle);
                let title = Point::new(x + self.title_offset, (lo + hi) / 2.0);
                (
                    (Point::new(x, lo), Point::new(x, hi)),
                    label_style,
                    (
                        title,
                        title_style
                            .with_baseline(TextBaseline::Middle)
                            .with_angle(90.0),
                    ),
                )
            }
        };

        let ticks = self
            .ticks()
            .into_iter()
            .map(|t| {
                let (rule, label_pos) = match self.orient {
                    AxisOrient::Bottom => {
                        let y = plot.y1;
                        (
                            (Point::new(t.pos, y), Point::new(t.pos, y + size)),
                            Point::new(t.pos, y + gap),
                        )
                    }
                    AxisOrient::Top => {
                        let y = plot.y0;
                        (
                            (Point::new(t.pos, y), Point::new(t.pos, y - size)),
                            Point::new(t.pos, y - gap),
                        )
                    }
                    AxisOrient::Left => {
                        let x = plot.x0;
                        (
                            (Point::new(x, t.pos), Point::new(x - size, t.pos)),
                            Point::new(x - gap, t.pos),
                        )
                    }
                    AxisOrient::Right => {
                        let x = plot.x1;
                        (
                            (Point::new(x, t.pos), Point::new(x + size, t.pos)),
                            Point::new(x + gap, t.pos),
                        )
                    }
                };
                TickLayout {
                    rule,
                    label_pos,
                    label: t.label,
                }
            })
            .collect();

        AxisLayout {
            domain,
            ticks,
            label_style,
            title: self
                .title
                .as_ref()
                .map(|text| (title.0, text.clone(), title.1)),
        }
    }
}

/// Geometry of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLayout {
    /// Tick rule endpoints.
    pub rule: (Point, Point),
    /// Label anchor point.
    pub label_pos: Point,
    /// Label text.
    pub label: String,
}

/// Geometry of a whole axis, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    /// Domain rule endpoints.
    pub domain: (Point, Point),
    /// Ticks in axis order.
    pub ticks: Vec<TickLayout>,
    /// Style shared by all tick labels.
    pub label_style: TextStyle,
    /// Title anchor, text and style.
    pub title: Option<(Point, String, TextStyle)>,
}

fn is_whole(v: f64) -> bool {
    (v - v.round()).abs() < 1e-9
}
