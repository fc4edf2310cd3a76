// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Scales are pure value objects mapping a data domain into a pixel range:
//! - [`ScaleLinear`] for continuous values (optionally with a "nice" domain), and
//! - [`ScaleBand`] for an ordered set of distinct categories.

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;

use crate::error::ScaleError;

/// Tick count used when niceing a domain and when axes do not ask for another count.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a scale mapping `domain` values to `range` values.
    ///
    /// With `nice`, the domain bounds are first rounded outward to the tick step chosen for
    /// [`DEFAULT_TICK_COUNT`] ticks (`[0, 5528]` becomes `[0, 6000]`). This changes the axis,
    /// never the data.
    ///
    /// Fails with [`ScaleError::Domain`] if the bounds are equal or not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64), nice: bool) -> Result<Self, ScaleError> {
        let (d0, d1) = domain;
        if !d0.is_finite() || !d1.is_finite() || d0 == d1 {
            return Err(ScaleError::Domain { min: d0, max: d1 });
        }
        let domain = if nice {
            nice_domain(d0, d1, DEFAULT_TICK_COUNT)
        } else {
            domain
        };
        Ok(Self { domain, range })
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (x - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Returns the (possibly niced) domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice-ish” tick values that fall inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut lo, mut hi) = self.domain;
        if lo > hi {
            core::mem::swap(&mut lo, &mut hi);
        }
        let eps = (hi - lo) * 1e-9;
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }

    /// Returns the tick step used by [`ScaleLinear::ticks`] for `count`.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        nice_step((d1 - d0).abs() / count.max(1) as f64)
    }
}

fn nice_domain(d0: f64, d1: f64, count: usize) -> (f64, f64) {
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    let ticks = nice_ticks(lo, hi, count);
    let (Some(&first), Some(&last)) = (ticks.first(), ticks.last()) else {
        return (d0, d1);
    };
    if ticks.len() < 2 {
        return (d0, d1);
    }
    if d0 <= d1 {
        (first, last)
    } else {
        (last, first)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale over an ordered set of distinct categories.
///
/// The range is divided into one equal slot per category. Each band is
/// `slot * (1 - padding)` wide and centered in its slot.
#[derive(Clone, Debug)]
pub struct ScaleBand<K> {
    categories: Vec<K>,
    index: HashMap<K, usize>,
    range: (f64, f64),
    padding: f64,
}

impl<K: Clone + Eq + Hash> ScaleBand<K> {
    /// Creates a band scale.
    ///
    /// Fails with [`ScaleError::DuplicateCategory`] if a category repeats, and with
    /// [`ScaleError::Padding`] if `padding` is outside `[0, 1)`.
    pub fn new(
        categories: impl IntoIterator<Item = K>,
        range: (f64, f64),
        padding: f64,
    ) -> Result<Self, ScaleError> {
        if !(0.0..1.0).contains(&padding) {
            return Err(ScaleError::Padding(padding));
        }
        let categories: Vec<K> = categories.into_iter().collect();
        let mut index = HashMap::with_capacity(categories.len());
        for (i, c) in categories.iter().enumerate() {
            if index.insert(c.clone(), i).is_some() {
                return Err(ScaleError::DuplicateCategory { index: i });
            }
        }
        Ok(Self {
            categories,
            index,
            range,
            padding,
        })
    }

    /// Returns the width of one slot (band plus its share of padding).
    pub fn slot_width(&self) -> f64 {
        if self.categories.is_empty() {
            return 0.0;
        }
        let (r0, r1) = self.range;
        (r1 - r0) / self.categories.len() as f64
    }

    /// Returns the usable band width.
    pub fn band_width(&self) -> f64 {
        self.slot_width() * (1.0 - self.padding)
    }

    /// Returns the position of a category in the domain.
    pub fn index_of(&self, category: &K) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Maps a category to the start of its band, or `None` for unknown categories.
    pub fn map(&self, category: &K) -> Option<f64> {
        let i = self.index_of(category)?;
        let slot = self.slot_width();
        Some(self.range.0 + i as f64 * slot + self.padding / 2.0 * slot)
    }

    /// Maps a category to the center of its band.
    pub fn center(&self, category: &K) -> Option<f64> {
        self.map(category).map(|x| x + self.band_width() / 2.0)
    }

    /// Returns the categories in domain order.
    pub fn categories(&self) -> &[K] {
        &self.categories
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Computes `(min, max)` of `accessor` over `items` in a single pass.
///
/// Missing and non-finite values are ignored. Returns [`ScaleError::NoData`] if no finite
/// values are present.
pub fn extent<T>(
    items: impl IntoIterator<Item = T>,
    accessor: impl Fn(T) -> Option<f64>,
) -> Result<(f64, f64), ScaleError> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in items.into_iter().filter_map(accessor) {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Ok((min, max))
    } else {
        Err(ScaleError::NoData)
    }
}
