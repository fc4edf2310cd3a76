// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Searchable list of records.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use narviz_core::Record;

use crate::chart::input;
use crate::error::ChartError;
use crate::layout::Layout;
use crate::surface::{Surface, TextBaseline, TextStyle};

/// Exact-year filter parsed from free text.
///
/// Input that parses as an integer (after trimming) selects that year; anything else,
/// including empty input, selects every record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YearFilter(Option<i64>);

impl YearFilter {
    /// A filter that keeps every record.
    pub const ALL: Self = Self(None);

    /// Parses filter input.
    pub fn parse(text: &str) -> Self {
        Self(text.trim().parse().ok())
    }

    /// The selected year, if any.
    pub fn year(&self) -> Option<i64> {
        self.0
    }

    /// Records kept by this filter, in input order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records
            .iter()
            .filter(|r| self.0.is_none_or(|y| r.year() == y))
            .collect()
    }
}

/// One text row per record, `"{year}: {label} - {value}{suffix}"`.
///
/// Expects one dataset. When the filter leaves nothing, a single placeholder row is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ListViewSpec {
    /// Field naming each row.
    pub label_field: &'static str,
    /// Field shown after the label.
    pub value_field: &'static str,
    /// Text appended to the value.
    pub value_suffix: String,
    /// Placeholder drawn for an empty result.
    pub empty_message: String,
    /// Vertical distance between rows.
    pub row_height: f64,
    /// Row text style.
    pub style: TextStyle,
}

impl ListViewSpec {
    /// Creates a list with 20px rows and a `"No results"` placeholder.
    pub fn new(label_field: &'static str, value_field: &'static str) -> Self {
        Self {
            label_field,
            value_field,
            value_suffix: String::new(),
            empty_message: String::from("No results"),
            row_height: 20.0,
            style: TextStyle::default().with_baseline(TextBaseline::Hanging),
        }
    }

    /// Sets the value suffix.
    pub fn with_value_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.value_suffix = suffix.into();
        self
    }

    /// Sets the placeholder shown for an empty result.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Formats one row.
    pub fn row_text(&self, record: &Record) -> String {
        alloc::format!(
            "{}: {} - {}{}",
            record.year(),
            record.display(self.label_field).unwrap_or_default(),
            record.display(self.value_field).unwrap_or_default(),
            self.value_suffix,
        )
    }

    /// Draws every record.
    pub fn draw(
        &self,
        data: &[&[Record]],
        surface: &mut dyn Surface,
        layout: &Layout,
    ) -> Result<(), ChartError> {
        self.draw_filtered(data, YearFilter::ALL, surface, layout)
    }

    /// Draws the records kept by `filter`, or the placeholder row.
    pub fn draw_filtered(
        &self,
        data: &[&[Record]],
        filter: YearFilter,
        surface: &mut dyn Surface,
        layout: &Layout,
    ) -> Result<(), ChartError> {
        let records = input(data, 0, "list rows")?;
        let rows = filter.apply(records);
        let plot = layout.plot();
        let row_pos = |i: usize| Point::new(plot.x0, plot.y0 + i as f64 * self.row_height);

        if rows.is_empty() {
            surface.draw_text(row_pos(0), &self.empty_message, &self.style);
            return Ok(());
        }
        for (i, r) in rows.into_iter().enumerate() {
            surface.draw_text(row_pos(i), &self.row_text(r), &self.style);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::recording::RecordingSurface;

    fn leaders() -> Vec<Record> {
        vec![
            Record::new(1997)
                .with_text("player", "Ken Griffey Jr.")
                .with_int("HR", 56),
            Record::new(1998)
                .with_text("player", "Mark McGwire")
                .with_int("HR", 70),
            Record::new(1999)
                .with_text("player", "Mark McGwire")
                .with_int("HR", 65),
        ]
    }

    fn draw(filter: &str) -> RecordingSurface {
        let data = leaders();
        let mut surface = RecordingSurface::new();
        ListViewSpec::new("player", "HR")
            .with_value_suffix(" HRs")
            .draw_filtered(&[&data], YearFilter::parse(filter), &mut surface, &Layout::default())
            .unwrap();
        surface
    }

    #[test]
    fn matching_year_keeps_exactly_that_row() {
        assert_eq!(draw("1998").texts(), ["1998: Mark McGwire - 70 HRs"]);
        assert_eq!(draw("  1998 ").texts().len(), 1);
    }

    #[test]
    fn non_numeric_input_shows_everything() {
        assert_eq!(draw("abc").texts().len(), 3);
        assert_eq!(draw("").texts().len(), 3);
        assert_eq!(draw("19.98").texts().len(), 3);
    }

    #[test]
    fn absent_year_shows_the_placeholder() {
        assert_eq!(draw("1901").texts(), ["No results"]);
    }

    #[test]
    fn rows_stack_downward_in_input_order() {
        let surface = draw("");
        let ys: Vec<f64> = surface
            .marks()
            .iter()
            .filter_map(|m| match m {
                crate::recording::RecordedMark::Text { pos, .. } => Some(pos.y),
                _ => None,
            })
            .collect();
        assert_eq!(ys, [40.0, 60.0, 80.0]);
    }

    #[test]
    fn parse_recognizes_integers_only() {
        assert_eq!(YearFilter::parse("2001").year(), Some(2001));
        assert_eq!(YearFilter::parse("-5").year(), Some(-5));
        assert_eq!(YearFilter::parse("2001a").year(), None);
        assert_eq!(YearFilter::parse(""), YearFilter::ALL);
    }
}
