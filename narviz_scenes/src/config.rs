// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration.

use narviz_charts::{Layout, Margin};
use serde::{Deserialize, Serialize};

/// What navigation does past either end of the scene list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Cycle around: after the last scene comes the first.
    #[default]
    Wrap,
    /// Stay on the first or last scene.
    Clamp,
}

impl BoundaryPolicy {
    /// Index reached from `index` after moving `delta` scenes in a list of `len`.
    ///
    /// `len` must be non-zero; the result is always in `0..len`.
    pub fn step(self, index: usize, delta: isize, len: usize) -> usize {
        debug_assert!(len > 0, "scene list is never empty");
        let len = len.max(1);
        let len_i = isize::try_from(len).unwrap_or(isize::MAX);
        let index_i = isize::try_from(index.min(len - 1)).unwrap_or(isize::MAX);
        let target = match self {
            Self::Wrap => (index_i + delta % len_i).rem_euclid(len_i),
            Self::Clamp => index_i.saturating_add(delta).clamp(0, len_i - 1),
        };
        usize::try_from(target).unwrap_or(0)
    }
}

/// Margins as they appear in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        let m = Margin::default();
        Self {
            top: m.top,
            right: m.right,
            bottom: m.bottom,
            left: m.left,
        }
    }
}

/// The default chart layout as it appears in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// View width.
    pub width: f64,
    /// View height.
    pub height: f64,
    /// Plot margins.
    pub margin: MarginConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let l = Layout::default();
        Self {
            width: l.width,
            height: l.height,
            margin: MarginConfig::default(),
        }
    }
}

impl From<LayoutConfig> for Layout {
    fn from(c: LayoutConfig) -> Self {
        let m = c.margin;
        Self::new(c.width, c.height, Margin::new(m.top, m.right, m.bottom, m.left))
    }
}

/// Controller settings. Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Layout for scenes without their own.
    pub layout: LayoutConfig,
    /// Navigation past either end.
    pub boundary: BoundaryPolicy,
    /// Text drawn when a scene fails to render.
    pub failure_message: String,
    /// Text drawn when a list filter matches nothing.
    pub empty_list_message: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            boundary: BoundaryPolicy::Wrap,
            failure_message: "Failed to load data.".to_string(),
            empty_list_message: "No results".to_string(),
        }
    }
}

impl ViewConfig {
    /// Parses a JSON configuration; missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Sets the boundary policy.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// The default layout.
    pub fn layout(&self) -> Layout {
        self.layout.into()
    }
}
