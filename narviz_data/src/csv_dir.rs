// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A data source reading CSV files below a directory.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use futures::FutureExt as _;
use futures::future::{self, LocalBoxFuture};

use crate::error::FetchError;
use crate::source::{DataSource, RawRow};

/// Serves `path` as the CSV file `root/path`, first line as headers.
///
/// Reads are synchronous; the returned future is already complete.
#[derive(Clone, Debug)]
pub struct CsvDirSource {
    root: PathBuf,
}

impl CsvDirSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a table synchronously.
    pub fn read(&self, path: &str) -> Result<Vec<RawRow>, FetchError> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(FetchError::NotFound(path.to_string()));
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&full)
            .map_err(|e| FetchError::read(path, e))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| FetchError::read(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| FetchError::read(path, e))?;
            rows.push(RawRow::from_pairs(
                headers.iter().map(String::as_str).zip(record.iter()),
            ));
        }
        tracing::debug!(path, rows = rows.len(), "read csv table");
        Ok(rows)
    }
}

impl DataSource for CsvDirSource {
    fn fetch_table<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<RawRow>, FetchError>> {
        future::ready(self.read(path)).boxed_local()
    }
}
