// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart and scale errors.

extern crate alloc;

use alloc::string::String;

/// Errors raised while building a scale from data.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ScaleError {
    /// The continuous domain is degenerate (`min == max`) or not finite.
    #[error("degenerate scale domain [{min}, {max}]")]
    Domain {
        /// Lower domain bound as given.
        min: f64,
        /// Upper domain bound as given.
        max: f64,
    },
    /// A band scale was given the same category twice.
    #[error("duplicate band category at index {index}")]
    DuplicateCategory {
        /// Position of the second occurrence in the category list.
        index: usize,
    },
    /// Band padding outside `[0, 1)`.
    #[error("band padding {0} is outside [0, 1)")]
    Padding(f64),
    /// An extent was requested over no (finite) values.
    #[error("no data to compute an extent from")]
    NoData,
}

/// Errors raised by chart renderers.
///
/// Renderers resolve every scale before drawing, so an error means nothing was drawn.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ChartError {
    /// A scale could not be built from the data.
    #[error(transparent)]
    Scale(#[from] ScaleError),
    /// The renderer was invoked without one of its datasets.
    #[error("missing dataset for {0}")]
    MissingData(String),
}
