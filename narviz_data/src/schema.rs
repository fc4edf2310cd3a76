// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset schemas: how raw text rows become typed records.

use narviz_core::{Dataset, Record, Value};

use crate::error::SourceError;
use crate::source::RawRow;

/// Type a raw column is coerced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Whole number; `"70"` and `"70.0"` are accepted.
    Int,
    /// Finite float.
    Float,
    /// Text, trimmed.
    Text,
}

/// One named field of a dataset, read from one raw column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Raw column name.
    pub column: String,
    /// Field name on the record.
    pub name: &'static str,
    /// Target type.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Creates a field spec.
    pub fn new(column: impl Into<String>, name: &'static str, kind: FieldKind) -> Self {
        Self {
            column: column.into(),
            name,
            kind,
        }
    }
}

/// A named dataset: where its rows live and how to coerce them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Dataset name used by scenes and the cache.
    pub name: String,
    /// Path handed to the data source.
    pub path: String,
    /// Raw column holding the year.
    pub year_column: String,
    /// Other fields, in record order.
    pub fields: Vec<FieldSpec>,
}

impl DatasetSpec {
    /// Creates a spec with no fields besides the year.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        year_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            year_column: year_column.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field.
    pub fn with_field(
        mut self,
        column: impl Into<String>,
        name: &'static str,
        kind: FieldKind,
    ) -> Self {
        self.fields.push(FieldSpec::new(column, name, kind));
        self
    }

    /// Coerces raw rows into a dataset.
    ///
    /// A row lacking a schema column fails the whole load with [`SourceError::Schema`]. A row
    /// whose year or numeric field does not parse to a finite number is skipped and logged.
    pub fn coerce(&self, rows: &[RawRow]) -> Result<Dataset, SourceError> {
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0_usize;
        for (index, row) in rows.iter().enumerate() {
            match self.coerce_row(row)? {
                Ok(record) => records.push(record),
                Err((column, raw)) => {
                    skipped += 1;
                    tracing::warn!(
                        dataset = %self.name,
                        row = index,
                        column = %column,
                        value = %raw,
                        "skipping row with unparsable value"
                    );
                }
            }
        }
        if skipped > 0 {
            tracing::debug!(dataset = %self.name, skipped, kept = records.len(), "coerced dataset");
        }
        Ok(Dataset::new(self.name.clone(), records))
    }

    /// Outer error: schema violation. Inner error: the `(column, raw)` that failed to parse.
    fn coerce_row<'r>(
        &self,
        row: &'r RawRow,
    ) -> Result<Result<Record, (&str, &'r str)>, SourceError> {
        let cell = |column: &str| {
            row.get(column).ok_or_else(|| SourceError::Schema {
                dataset: self.name.clone(),
                column: column.to_string(),
            })
        };

        let raw_year = cell(&self.year_column)?;
        let Some(year) = parse_int(raw_year) else {
            return Ok(Err((self.year_column.as_str(), raw_year)));
        };
        let mut record = Record::new(year);
        for field in &self.fields {
            let raw = cell(&field.column)?;
            let value = match field.kind {
                FieldKind::Int => parse_int(raw).map(Value::Int),
                FieldKind::Float => parse_float(raw).map(Value::Float),
                FieldKind::Text => Some(Value::Text(raw.trim().to_string())),
            };
            match value {
                Some(value) => record.set(field.name, value),
                None => return Ok(Err((field.column.as_str(), raw))),
            }
        }
        Ok(Ok(record))
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = parse_float(raw)?;
    if v.fract() != 0.0 || v.abs() > 9.0e15 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "whole and well inside the exactly representable range"
    )]
    Some(v as i64)
}
