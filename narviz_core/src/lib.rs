// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record model for Narviz scenes.
//!
//! Scenes draw from small tabular datasets:
//! - a [`Record`] is one row with a mandatory `year` plus schema-ordered named fields,
//! - a [`Dataset`] is a named, ordered sequence of records sharing one schema, and
//! - [`join`] merges two record sequences on a shared key (inner join).
//!
//! Parsing raw text rows into records lives downstream (`narviz_data`), so this crate
//! stays `no_std` and allocation-only.

#![no_std]

extern crate alloc;

mod dataset;
mod join;
mod record;

pub use dataset::Dataset;
pub use join::join;
pub use record::{Key, Record, Value, YEAR};
