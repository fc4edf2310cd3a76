// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`] that records every call.
//!
//! Used by tests throughout the workspace and handy for headless inspection of a scene.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect};
use peniko::Brush;

use crate::axis::AxisSpec;
use crate::surface::{MarkId, StrokeStyle, Surface, TextStyle};

/// One recorded draw call.
#[derive(Clone, Debug)]
pub enum RecordedMark {
    /// [`Surface::draw_axis`].
    Axis {
        /// Mark id.
        id: MarkId,
        /// The axis as drawn.
        axis: AxisSpec,
    },
    /// [`Surface::draw_path`].
    Path {
        /// Mark id.
        id: MarkId,
        /// Path geometry.
        path: BezPath,
        /// Stroke.
        stroke: StrokeStyle,
    },
    /// [`Surface::draw_rect`].
    Rect {
        /// Mark id.
        id: MarkId,
        /// Rectangle geometry.
        rect: Rect,
        /// Fill.
        fill: Brush,
    },
    /// [`Surface::draw_circle`].
    Circle {
        /// Mark id.
        id: MarkId,
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill.
        fill: Brush,
    },
    /// [`Surface::draw_text`].
    Text {
        /// Mark id.
        id: MarkId,
        /// Anchor position.
        pos: Point,
        /// Text content.
        text: String,
        /// Text style.
        style: TextStyle,
    },
}

impl RecordedMark {
    /// The id handed out for this mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Axis { id, .. }
            | Self::Path { id, .. }
            | Self::Rect { id, .. }
            | Self::Circle { id, .. }
            | Self::Text { id, .. } => *id,
        }
    }
}

/// A [`Surface`] that keeps marks, tooltips, description and container visibility in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    clears: usize,
    description: String,
    marks: Vec<RecordedMark>,
    tooltips: HashMap<MarkId, String>,
    visible: HashMap<String, bool>,
}

impl RecordingSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks drawn since the last clear, in draw order.
    pub fn marks(&self) -> &[RecordedMark] {
        &self.marks
    }

    /// Current description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tooltip attached to `mark`, if any.
    pub fn tooltip(&self, mark: MarkId) -> Option<&str> {
        self.tooltips.get(&mark).map(String::as_str)
    }

    /// Visibility of a named container; containers never toggled read as hidden.
    pub fn is_visible(&self, container: &str) -> bool {
        self.visible.get(container).copied().unwrap_or(false)
    }

    /// How many times [`Surface::clear`] was called.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Text content of every text mark, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                RecordedMark::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every recorded axis, in draw order.
    pub fn axes(&self) -> Vec<&AxisSpec> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                RecordedMark::Axis { axis, .. } => Some(axis),
                _ => None,
            })
            .collect()
    }

    /// Every recorded path with its stroke, in draw order.
    pub fn paths(&self) -> Vec<(&BezPath, &StrokeStyle)> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                RecordedMark::Path { path, stroke, .. } => Some((path, stroke)),
                _ => None,
            })
            .collect()
    }

    /// Every recorded rectangle with its id, in draw order.
    pub fn rects(&self) -> Vec<(MarkId, Rect)> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                RecordedMark::Rect { id, rect, .. } => Some((*id, *rect)),
                _ => None,
            })
            .collect()
    }

    /// Every recorded circle as `(id, center, radius)`, in draw order.
    pub fn circles(&self) -> Vec<(MarkId, Point, f64)> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                RecordedMark::Circle {
                    id, center, radius, ..
                } => Some((*id, *center, *radius)),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, make: impl FnOnce(MarkId) -> RecordedMark) -> MarkId {
        let id = MarkId(self.next_id);
        self.next_id += 1;
        self.marks.push(make(id));
        id
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.marks.clear();
        self.tooltips.clear();
        self.description.clear();
    }

    fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    fn draw_axis(&mut self, axis: &AxisSpec) -> MarkId {
        self.push(|id| RecordedMark::Axis {
            id,
            axis: axis.clone(),
        })
    }

    fn draw_path(&mut self, path: &BezPath, stroke: &StrokeStyle) -> MarkId {
        self.push(|id| RecordedMark::Path {
            id,
            path: path.clone(),
            stroke: stroke.clone(),
        })
    }

    fn draw_rect(&mut self, rect: Rect, fill: &Brush) -> MarkId {
        self.push(|id| RecordedMark::Rect {
            id,
            rect,
            fill: fill.clone(),
        })
    }

    fn draw_circle(&mut self, center: Point, radius: f64, fill: &Brush) -> MarkId {
        self.push(|id| RecordedMark::Circle {
            id,
            center,
            radius,
            fill: fill.clone(),
        })
    }

    fn draw_text(&mut self, pos: Point, text: &str, style: &TextStyle) -> MarkId {
        self.push(|id| RecordedMark::Text {
            id,
            pos,
            text: text.to_string(),
            style: style.clone(),
        })
    }

    fn attach_tooltip(&mut self, mark: MarkId, text: &str) {
        self.tooltips.insert(mark, text.to_string());
    }

    fn set_visible(&mut self, container: &str, visible: bool) {
        self.visible.insert(container.to_string(), visible);
    }
}
