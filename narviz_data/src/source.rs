// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data source seam and an in-memory source.

use std::cell::{Cell, RefCell};
use std::fmt;

use futures::FutureExt as _;
use futures::future::{self, LocalBoxFuture};
use hashbrown::HashMap;

use crate::error::FetchError;

/// One untyped row: column name to raw text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Appends a cell.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Returns the raw text of a column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find_map(|(c, v)| (c == column).then_some(v.as_str()))
    }

    /// Iterates cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Supplies raw rows for a path.
///
/// Implementations decide what a path means (a file under a directory, a URL, a fixture).
/// The cache calls [`DataSource::fetch_table`] at most once per in-flight load.
pub trait DataSource {
    /// Fetches every row of the table at `path`.
    fn fetch_table<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<RawRow>, FetchError>>;
}

/// A [`DataSource`] serving fixed tables from memory.
///
/// Counts fetches per path, which makes it the usual fixture for cache and controller tests.
#[derive(Default)]
pub struct MemorySource {
    tables: RefCell<HashMap<String, Result<Vec<RawRow>, FetchError>>>,
    fetches: RefCell<HashMap<String, usize>>,
    total: Cell<usize>,
}

impl fmt::Debug for MemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySource")
            .field("tables", &self.tables.borrow().len())
            .field("total", &self.total.get())
            .finish_non_exhaustive()
    }
}

impl MemorySource {
    /// Creates a source with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `rows` at `path`.
    pub fn with_table(self, path: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.set_table(path, rows);
        self
    }

    /// Serves `rows` at `path`, replacing whatever was there.
    pub fn set_table(&self, path: impl Into<String>, rows: Vec<RawRow>) {
        self.tables.borrow_mut().insert(path.into(), Ok(rows));
    }

    /// Makes fetches of `path` fail with `error`.
    pub fn set_failure(&self, path: impl Into<String>, error: FetchError) {
        self.tables.borrow_mut().insert(path.into(), Err(error));
    }

    /// Number of fetches of `path` so far.
    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches.borrow().get(path).copied().unwrap_or(0)
    }

    /// Number of fetches of any path so far.
    pub fn total_fetches(&self) -> usize {
        self.total.get()
    }
}

impl DataSource for MemorySource {
    fn fetch_table<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<RawRow>, FetchError>> {
        *self.fetches.borrow_mut().entry(path.to_string()).or_default() += 1;
        self.total.set(self.total.get() + 1);
        let result = self
            .tables
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(path.to_string())));
        future::ready(result).boxed_local()
    }
}
