// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales, axes and the scene chart renderers for Narviz.
//!
//! Renderers are small spec structs that take year-keyed records and draw them through a
//! retained-mode [`Surface`]:
//! - [`LineChartSpec`] for one series over years (optionally restricted to a year range),
//! - [`BarChartSpec`] for one bar per year,
//! - [`DualAxisChartSpec`] for two independently scaled series sharing a year axis,
//! - [`ScatterChartSpec`] for two datasets joined on year, and
//! - [`ListViewSpec`] for a text list with an exact-year [`YearFilter`].
//!
//! Every renderer resolves all of its scales before its first draw call, so a
//! [`ChartError`] always means nothing was drawn.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod annotation;
mod axis;
mod bar_chart;
mod chart;
mod curve;
mod dual_axis_chart;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod line_chart;
mod list_view;
mod recording;
mod scale;
mod scatter_chart;
mod surface;

pub use annotation::Annotation;
pub use axis::{
    AxisLayout, AxisOrient, AxisScale, AxisSpec, AxisStyle, AxisTick, TickFormatter, TickLayout,
};
pub use bar_chart::{BarChartSpec, ROTATE_LABELS_ABOVE};
pub use curve::monotone_x;
pub use dual_axis_chart::{DualAxisChartSpec, SeriesSpec};
pub use error::{ChartError, ScaleError};
pub use format::{format_integer, format_tick_with_step};
pub use layout::{Layout, Margin};
pub use line_chart::LineChartSpec;
pub use list_view::{ListViewSpec, YearFilter};
pub use recording::{RecordedMark, RecordingSurface};
pub use scale::{DEFAULT_TICK_COUNT, ScaleBand, ScaleLinear, extent};
pub use scatter_chart::ScatterChartSpec;
pub use surface::{MarkId, StrokeStyle, Surface, TextAnchor, TextBaseline, TextStyle};
