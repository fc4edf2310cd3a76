// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by the chart renderers.

extern crate alloc;

use alloc::string::ToString;

use narviz_core::{Record, YEAR};

use crate::error::{ChartError, ScaleError};
use crate::scale::extent;

/// Picks the dataset at `index`, naming `role` in the error if it is absent.
pub(crate) fn input<'a>(
    data: &[&'a [Record]],
    index: usize,
    role: &str,
) -> Result<&'a [Record], ChartError> {
    data.get(index)
        .copied()
        .ok_or_else(|| ChartError::MissingData(role.to_string()))
}

/// `[0, max(field)]`, the domain used for counts.
pub(crate) fn zero_based<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: &str,
) -> Result<(f64, f64), ScaleError> {
    let (_, max) = extent(records, |r| r.f64(field))?;
    Ok((0.0, max))
}

/// Extent of the years of every record in `sets`.
pub(crate) fn year_extent(sets: &[&[Record]]) -> Result<(f64, f64), ScaleError> {
    extent(sets.iter().flat_map(|s| s.iter()), |r| r.f64(YEAR))
}
