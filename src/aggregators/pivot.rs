use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A sparse two-way table of summed counts.
///
/// Rows and columns are kept in ascending key order. Only combinations that
/// received at least one value exist; [`Pivot::get`] returns `None` for the
/// rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pivot<R, C> {
    rows: BTreeMap<R, BTreeMap<C, u64>>,
    columns: BTreeSet<C>,
}

impl<R: Ord + Copy, C: Ord + Copy> Pivot<R, C> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            columns: BTreeSet::new(),
        }
    }

    /// Adds `value` to the cell at (`row`, `column`), creating it if needed.
    pub fn add(&mut self, row: R, column: C, value: u64) {
        let cell = self.rows.entry(row).or_default().entry(column).or_insert(0);
        *cell = cell.saturating_add(value);
        self.columns.insert(column);
    }

    /// Row keys in ascending order.
    pub fn index(&self) -> Vec<R> {
        self.rows.keys().copied().collect()
    }

    /// Column keys in ascending order.
    pub fn columns(&self) -> Vec<C> {
        self.columns.iter().copied().collect()
    }

    pub fn get(&self, row: R, column: C) -> Option<u64> {
        self.rows.get(&row)?.get(&column).copied()
    }

    /// The populated cells of one column as `(row, value)` pairs.
    pub fn column(&self, column: C) -> Vec<(R, u64)> {
        self.rows
            .iter()
            .filter_map(|(row, cells)| cells.get(&column).map(|v| (*row, *v)))
            .collect()
    }

    pub fn column_total(&self, column: C) -> u64 {
        self.column(column)
            .iter()
            .fold(0, |acc, (_, v)| acc.saturating_add(*v))
    }

    pub fn grand_total(&self) -> u64 {
        self.rows
            .values()
            .flat_map(|cells| cells.values())
            .fold(0, |acc, v| acc.saturating_add(*v))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Ord + Copy, C: Ord + Copy> Default for Pivot<R, C> {
    fn default() -> Self {
        Self::new()
    }
}
