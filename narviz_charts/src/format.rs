// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value with as many decimals as the tick `step` needs, grouping thousands.
///
/// `6000` with step `500` becomes `"6,000"`; `90.5` with step `0.5` becomes `"90.5"`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    let decimals = decimals_for_step(step);
    let scale = 10_f64.powf(f64::from(decimals));
    let mut rounded = (v * scale).round() / scale;
    if rounded == 0.0 {
        // Collapse `-0` so labels never read "-0".
        rounded = 0.0;
    }
    let raw = alloc::format!("{rounded:.prec$}", prec = decimals as usize);
    group_thousands(&raw)
}

/// Formats a value as a plain integer (no grouping), like d3's `"d"` format.
///
/// Used for year axes where `1,998` would be wrong.
pub fn format_integer(v: f64) -> String {
    let mut rounded = v.round();
    if rounded == 0.0 {
        rounded = 0.0;
    }
    alloc::format!("{rounded:.0}")
}

fn decimals_for_step(step: f64) -> u32 {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    let d = (-step.log10() - 1e-9).ceil().clamp(0.0, 10.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=10")]
    {
        d as u32
    }
}

fn group_thousands(raw: &str) -> String {
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(raw.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac_part);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_steps_group_thousands() {
        assert_eq!(format_tick_with_step(6000.0, 500.0), "6,000");
        assert_eq!(format_tick_with_step(500.0, 500.0), "500");
        assert_eq!(format_tick_with_step(1_234_567.0, 1.0), "1,234,567");
        assert_eq!(format_tick_with_step(-2500.0, 500.0), "-2,500");
    }

    #[test]
    fn fractional_steps_keep_their_decimals() {
        assert_eq!(format_tick_with_step(90.0, 0.5), "90.0");
        assert_eq!(format_tick_with_step(90.5, 0.5), "90.5");
        assert_eq!(format_tick_with_step(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_tick_with_step(-1e-12, 0.5), "0.0");
        assert_eq!(format_integer(-0.2), "0");
    }

    #[test]
    fn years_are_not_grouped() {
        assert_eq!(format_integer(1998.0), "1998");
        assert_eq!(format_integer(2004.9999999), "2005");
    }
}
