//! # Column Rows
//!
//! An N-span building has N+1 longitudinal column rows. The two outer rows
//! border one span each; every interior row borders the spans on both sides.
//!
//! ```text
//!  row 0      row 1      row 2
//!    │  span 0  │  span 1  │
//!    │          │          │
//!  edge     interior     edge
//! ```
//!
//! For a single span both edge rows border span 0.

use serde::{Deserialize, Serialize};

/// Position of a column row across the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowPosition {
    /// Outer row, one adjacent span
    Edge,
    /// Inner row, two adjacent spans
    Interior,
}

impl RowPosition {
    pub fn is_edge(&self) -> bool {
        matches!(self, RowPosition::Edge)
    }
}

/// One longitudinal line of columns and the spans it supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// Row index from 0 (left edge) to N (right edge)
    pub index: usize,
    pub position: RowPosition,
    /// Indices of the adjacent spans, left to right
    pub spans: Vec<usize>,
}

impl ColumnRow {
    /// Human-readable label ("Edge L", "Interior 1", "Edge R")
    pub fn label(&self, span_count: usize) -> String {
        match self.position {
            RowPosition::Edge if self.index == 0 => "Edge L".to_string(),
            RowPosition::Edge if self.index == span_count => "Edge R".to_string(),
            RowPosition::Edge => format!("Edge {}", self.index),
            RowPosition::Interior => format!("Interior {}", self.index),
        }
    }
}

/// Column rows of a building with `span_count` spans, left to right.
///
/// Returns `span_count + 1` rows, or none for zero spans.
pub fn column_rows(span_count: usize) -> Vec<ColumnRow> {
    if span_count == 0 {
        return Vec::new();
    }

    (0..=span_count)
        .map(|index| {
            if index == 0 {
                ColumnRow {
                    index,
                    position: RowPosition::Edge,
                    spans: vec![0],
                }
            } else if index == span_count {
                ColumnRow {
                    index,
                    position: RowPosition::Edge,
                    spans: vec![span_count - 1],
                }
            } else {
                ColumnRow {
                    index,
                    position: RowPosition::Interior,
                    spans: vec![index - 1, index],
                }
            }
        })
        .collect()
}
