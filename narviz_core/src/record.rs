// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed rows.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

use smallvec::SmallVec;

/// Name of the field every record carries.
pub const YEAR: &str = "year";

/// A single coerced field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer value (counts, identifiers).
    Int(i64),
    /// Finite floating-point value (averages, rates).
    Float(f64),
    /// Text passed through unchanged (names, labels).
    Text(String),
}

impl Value {
    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Returns the value as text if it is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A hashable view of a field used for joins.
///
/// Floats are never keys: equal-looking floats rarely compare equal after parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Integer key (including `year`).
    Int(i64),
    /// Text key.
    Text(&'a str),
}

/// One row of a dataset.
///
/// `year` is always present and is the natural sort and join key. Other fields are kept in
/// schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    year: i64,
    fields: SmallVec<[(&'static str, Value); 4]>,
}

impl Record {
    /// Creates a record with only a year.
    pub fn new(year: i64) -> Self {
        Self {
            year,
            fields: SmallVec::new(),
        }
    }

    /// Adds (or replaces) an integer field.
    pub fn with_int(mut self, name: &'static str, value: i64) -> Self {
        self.set(name, Value::Int(value));
        self
    }

    /// Adds (or replaces) a float field.
    pub fn with_float(mut self, name: &'static str, value: f64) -> Self {
        self.set(name, Value::Float(value));
        self
    }

    /// Adds (or replaces) a text field.
    pub fn with_text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, Value::Text(value.into()));
        self
    }

    /// Sets a field, replacing an existing value with the same name.
    ///
    /// Setting [`YEAR`] is ignored for non-integer values.
    pub fn set(&mut self, name: &'static str, value: Value) {
        if name == YEAR {
            if let Value::Int(year) = value {
                self.year = year;
            }
            return;
        }
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the year.
    pub fn year(&self) -> i64 {
        self.year
    }

    /// Returns a named field (not including `year`).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| (*n == name).then_some(v))
    }

    /// Returns a numeric field as `f64`; [`YEAR`] resolves to the year.
    pub fn f64(&self, name: &str) -> Option<f64> {
        if name == YEAR {
            return Some(self.year as f64);
        }
        self.get(name)?.as_f64()
    }

    /// Returns a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    /// Formats a field for display; [`YEAR`] resolves to the year.
    pub fn display(&self, name: &str) -> Option<String> {
        if name == YEAR {
            return Some(self.year.to_string());
        }
        self.get(name).map(ToString::to_string)
    }

    /// Returns a join key for a field, if the field exists and is joinable.
    pub fn key(&self, name: &str) -> Option<Key<'_>> {
        if name == YEAR {
            return Some(Key::Int(self.year));
        }
        match self.get(name)? {
            Value::Int(v) => Some(Key::Int(*v)),
            Value::Text(s) => Some(Key::Text(s)),
            Value::Float(_) => None,
        }
    }

    /// Iterates named fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Returns a copy of `self` extended with the fields of `other` it does not already have.
    pub fn merged(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (name, value) in other.fields() {
            if out.get(name).is_none() {
                out.fields.push((name, value.clone()));
            }
        }
        out
    }
}
