// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenes for Narviz narrative visualizations.
//!
//! A [`SceneRegistry`] holds the story's scenes in order. A [`SceneController`] owns the
//! current index, loads each scene's datasets through a [`narviz_data::DatasetCache`] and
//! draws the scene's chart onto a [`narviz_charts::Surface`].
//!
//! The [`story`] module ships the home run story told by the demo.

mod config;
mod controller;
mod error;
mod registry;
pub mod story;

pub use config::{BoundaryPolicy, LayoutConfig, MarginConfig, ViewConfig};
pub use controller::{RenderOutcome, SceneController};
pub use error::{RegistryError, RenderError};
pub use registry::{ChartKind, SceneDescriptor, SceneRegistry};
