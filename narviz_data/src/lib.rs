// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset loading for Narviz.
//!
//! - A [`DataSource`] turns a path into raw text rows ([`RawRow`]).
//! - A [`DatasetSpec`] coerces those rows into typed records.
//! - A [`DatasetCache`] loads each named dataset once, sharing in-flight loads between
//!   callers and retrying after failures.
//!
//! Everything here is single-threaded (`Rc`, `RefCell`) and runs on any `futures` executor.

mod cache;
mod csv_dir;
mod error;
mod schema;
mod source;

pub use cache::DatasetCache;
pub use csv_dir::CsvDirSource;
pub use error::{FetchError, SourceError};
pub use narviz_core::join;
pub use schema::{DatasetSpec, FieldKind, FieldSpec};
pub use source::{DataSource, MemorySource, RawRow};
