//! # Table Lookup
//!
//! Ceiling search and step interpolation over tabulated allowances.
//!
//! Every table in the engine is read the same conservative way: a query
//! selects the smallest tabulated breakpoint that is greater than or equal to
//! it, and a query above the last breakpoint clamps to the last entry. There is
//! no linear interpolation between tiers and no out-of-range error.
//!
//! ```text
//! breakpoints:  18    24    30    36
//! query 20  ──────────▶ 24
//! query 24  ──────────▶ 24
//! query 40  ──────────────────────▶ 36 (clamped)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::lookup::{ceiling_lookup, step_interpolate, LookupTable};
//!
//! let table = LookupTable::new(vec![(5.0, 0.08), (10.0, 0.09), (20.0, 0.12)]).unwrap();
//! assert_eq!(ceiling_lookup(&table, 7.0), 0.09);
//! assert_eq!(ceiling_lookup(&table, 500.0), 0.12);
//!
//! let loads = [2.0, 2.5, 3.0];
//! let masses = [2.30, 3.16, 3.94];
//! assert_eq!(step_interpolate(&loads, &masses, 2.1), 3.16);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A non-empty table of `(breakpoint, value)` rows sorted by breakpoint.
///
/// Deserialization goes through [`CeilingTable::new`], so an empty or
/// unsortable row set is rejected at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CeilingTable<V> {
    entries: Vec<(f64, V)>,
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for CeilingTable<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Rows<V> {
            entries: Vec<(f64, V)>,
        }

        let rows = Rows::<V>::deserialize(deserializer)?;
        CeilingTable::new(rows.entries).map_err(serde::de::Error::custom)
    }
}

/// One-dimensional numeric table.
pub type LookupTable = CeilingTable<f64>;

/// Outcome of a ceiling search: the row that was selected and whether the
/// query had to be clamped to the last row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a, V> {
    /// Breakpoint of the selected row
    pub breakpoint: f64,
    /// Value of the selected row
    pub value: &'a V,
    /// The query exceeded every breakpoint
    pub clamped: bool,
}

impl<V> CeilingTable<V> {
    /// Build a table, sorting rows by breakpoint.
    ///
    /// Rejects an empty row set and non-finite breakpoints.
    pub fn new(mut entries: Vec<(f64, V)>) -> CalcResult<Self> {
        if entries.is_empty() {
            return Err(CalcError::invalid_input("entries", "[]", "Lookup table needs at least one row"));
        }
        if let Some((key, _)) = entries.iter().find(|(k, _)| !k.is_finite()) {
            return Err(CalcError::invalid_input("breakpoint", key.to_string(), "Breakpoints must be finite"));
        }
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(CeilingTable { entries })
    }

    /// Build from literal table data.
    ///
    /// Only for the engine's own tables, whose non-emptiness and ordering are
    /// checked by the table tests.
    pub(crate) fn from_sorted(entries: Vec<(f64, V)>) -> Self {
        debug_assert!(!entries.is_empty());
        debug_assert!(entries.windows(2).all(|w| w[0].0 <= w[1].0));
        CeilingTable { entries }
    }

    /// Row for the smallest breakpoint ≥ `key`, clamped to the last row.
    pub fn select(&self, key: f64) -> Selection<'_, V> {
        let last = self.entries.len() - 1;
        let (idx, clamped) = match self.entries.iter().position(|(k, _)| key <= *k) {
            Some(idx) => (idx, false),
            None => (last, true),
        };
        let (breakpoint, value) = &self.entries[idx];
        Selection {
            breakpoint: *breakpoint,
            value,
            clamped,
        }
    }

    /// Value for the smallest breakpoint ≥ `key`, clamped to the last row.
    pub fn ceiling(&self, key: f64) -> &V {
        self.select(key).value
    }

    /// Value for the breakpoint closest to `key` (ties go to the smaller one).
    pub fn nearest(&self, key: f64) -> &V {
        let mut best = &self.entries[0];
        for entry in &self.entries[1..] {
            if (entry.0 - key).abs() < (best.0 - key).abs() {
                best = entry;
            }
        }
        &best.1
    }

    /// Largest tabulated breakpoint
    pub fn max_breakpoint(&self) -> f64 {
        self.entries[self.entries.len() - 1].0
    }

    /// All breakpoints in ascending order
    pub fn breakpoints(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// All rows in ascending breakpoint order
    pub fn entries(&self) -> &[(f64, V)] {
        &self.entries
    }

    /// Number of rows (never zero)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Value for the smallest tabulated key ≥ `key`; the last value when `key`
/// exceeds the table.
pub fn ceiling_lookup(table: &LookupTable, key: f64) -> f64 {
    *table.ceiling(key)
}

/// Step function over parallel breakpoint/value slices.
///
/// Returns `values[i]` for the smallest `i` with `breakpoints[i] ≥ target`,
/// or the last value when `target` exceeds every breakpoint. Returns `0.0`
/// only when `values` is empty.
pub fn step_interpolate(breakpoints: &[f64], values: &[f64], target: f64) -> f64 {
    let idx = breakpoints
        .iter()
        .position(|&b| target <= b)
        .unwrap_or(breakpoints.len().saturating_sub(1));
    values
        .get(idx)
        .or_else(|| values.last())
        .copied()
        .unwrap_or(0.0)
}

/// Smallest value in `sorted` that is ≥ `target`, clamped to the largest.
pub fn ceil_to_breakpoint(sorted: &[f64], target: f64) -> Option<f64> {
    sorted
        .iter()
        .copied()
        .find(|&v| target <= v)
        .or_else(|| sorted.last().copied())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ceiling_is_monotonic(a in 0.0_f64..600.0, b in 0.0_f64..600.0) {
            let table = LookupTable::new(vec![
                (5.0, 8.0), (10.0, 12.0), (20.0, 20.0), (50.0, 38.0), (400.0, 175.0),
            ]).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ceiling_lookup(&table, lo) <= ceiling_lookup(&table, hi));
        }

        #[test]
        fn beyond_last_breakpoint_returns_last(extra in 0.001_f64..1.0e6) {
            let table = LookupTable::new(vec![(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]).unwrap();
            prop_assert_eq!(ceiling_lookup(&table, 3.0 + extra), 9.0);
            prop_assert!(table.select(3.0 + extra).clamped);
        }

        #[test]
        fn step_interpolate_returns_a_tabulated_value(target in -10.0_f64..50.0) {
            let loads = [2.0, 4.0, 6.0, 8.0];
            let masses = [1.0, 1.5, 2.5, 4.0];
            let v = step_interpolate(&loads, &masses, target);
            prop_assert!(masses.contains(&v));
        }
    }
}
