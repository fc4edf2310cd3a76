// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named record sequences.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::Record;

/// A named, ordered sequence of records sharing one schema.
///
/// Datasets are immutable once built; caches hand out shared references to them.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset.
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Returns the dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
