// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene errors.

use narviz_charts::ChartError;
use narviz_data::SourceError;

/// Why a scene could not be rendered.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum RenderError {
    /// A required dataset failed to load.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The renderer rejected the data.
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// The requested index is outside the registry.
    #[error("no scene at index {index} (have {len})")]
    UnknownScene {
        /// Requested index.
        index: usize,
        /// Number of scenes.
        len: usize,
    },
}

/// A scene list that cannot form a registry.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No scenes were given.
    #[error("a scene registry needs at least one scene")]
    Empty,
    /// Two scenes share an id.
    #[error("duplicate scene id `{0}`")]
    DuplicateId(String),
}
