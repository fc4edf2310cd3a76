// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inner join on a shared key.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::{Key, Record};

/// Inner-joins `left` and `right` on the field `key`.
///
/// - Only rows whose key appears on both sides are kept.
/// - Output follows `left` row order.
/// - Duplicate keys in `right` resolve to the first matching row.
/// - Rows without a joinable value for `key` are dropped.
///
/// Merged records carry the left fields followed by any right fields the left row lacks
/// (see [`Record::merged`]).
pub fn join(left: &[Record], right: &[Record], key: &str) -> Vec<Record> {
    let mut index: HashMap<Key<'_>, &Record> = HashMap::with_capacity(right.len());
    for r in right {
        if let Some(k) = r.key(key) {
            index.entry(k).or_insert(r);
        }
    }

    left.iter()
        .filter_map(|l| {
            let k = l.key(key)?;
            let r = index.get(&k)?;
            Some(l.merged(r))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::YEAR;

    fn velocity(year: i64, mph: f64) -> Record {
        Record::new(year).with_float("avgVelocity", mph)
    }

    fn leader(year: i64, player: &str, hr: i64) -> Record {
        Record::new(year).with_text("player", player).with_int("HR", hr)
    }

    #[test]
    fn join_keeps_left_order_and_drops_unmatched_rows() {
        let pitch = vec![velocity(2001, 89.0), velocity(1998, 88.5), velocity(1990, 87.0)];
        let hr = vec![leader(1998, "Mark McGwire", 70), leader(2001, "Barry Bonds", 73)];

        let merged = join(&pitch, &hr, YEAR);

        let years: Vec<_> = merged.iter().map(Record::year).collect();
        assert_eq!(years, [2001, 1998]);
        assert_eq!(merged[0].text("player"), Some("Barry Bonds"));
        assert_eq!(merged[1].f64("avgVelocity"), Some(88.5));
        assert!(merged.len() <= pitch.len().min(hr.len()));
    }

    #[test]
    fn duplicate_right_keys_take_the_first_row() {
        let left = vec![velocity(1961, 85.0)];
        let right = vec![leader(1961, "Roger Maris", 61), leader(1961, "Mickey Mantle", 54)];

        let merged = join(&left, &right, YEAR);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text("player"), Some("Roger Maris"));
    }

    #[test]
    fn disjoint_keys_yield_an_empty_result() {
        let left = vec![velocity(1950, 84.0)];
        let right = vec![leader(2020, "Luke Voit", 22)];
        assert!(join(&left, &right, YEAR).is_empty());
        assert!(join(&[], &right, YEAR).is_empty());
    }

    #[test]
    fn every_joined_key_exists_on_both_sides() {
        let left: Vec<_> = (1990..2010).map(|y| velocity(y, 88.0)).collect();
        let right: Vec<_> = (2000..2020).step_by(2).map(|y| leader(y, "x", 40)).collect();

        let merged = join(&left, &right, YEAR);

        assert_eq!(merged.len(), 5);
        for m in &merged {
            assert!(left.iter().any(|l| l.year() == m.year()));
            assert!(right.iter().any(|r| r.year() == m.year()));
        }
    }

    #[test]
    fn text_keys_join_too() {
        let left = vec![Record::new(1).with_text("team", "NYY")];
        let right = vec![Record::new(2).with_text("team", "NYY").with_int("wins", 114)];
        let merged = join(&left, &right, "team");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].year(), 1);
        assert_eq!(merged[0].f64("wins"), Some(114.0));
    }
}
