//! Shared inputs of every estimator for one computation call.

use serde::{Deserialize, Serialize};

use crate::params::{BuildingParameters, SpanParameters};
use crate::tables::LookupTables;

/// Plan geometry derived from the building and its spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingGeometry {
    /// Number of spans across the width
    pub span_count: usize,
    /// Overall length (m)
    pub length_m: f64,
    /// Overall width, the sum of all spans (m)
    pub width_m: f64,
    /// Plan floor area (m²)
    pub floor_area_m2: f64,
    /// Plan perimeter (m)
    pub perimeter_m: f64,
}

impl BuildingGeometry {
    pub fn new(building: &BuildingParameters, spans: &[SpanParameters]) -> Self {
        let width_m: f64 = spans.iter().map(|s| s.span_m).sum();
        let length_m = building.building_length_m;
        BuildingGeometry {
            span_count: spans.len(),
            length_m,
            width_m,
            floor_area_m2: length_m * width_m,
            perimeter_m: 2.0 * (length_m + width_m),
        }
    }

    /// Plan area of one span (m²)
    pub fn span_area_m2(&self, span: &SpanParameters) -> f64 {
        self.length_m * span.span_m
    }
}

/// Borrowed view of everything an estimator reads.
#[derive(Debug, Clone, Copy)]
pub struct EstimateContext<'a> {
    pub building: &'a BuildingParameters,
    pub spans: &'a [SpanParameters],
    pub tables: &'a LookupTables,
    pub geometry: BuildingGeometry,
}

impl<'a> EstimateContext<'a> {
    pub fn new(building: &'a BuildingParameters, spans: &'a [SpanParameters], tables: &'a LookupTables) -> Self {
        EstimateContext {
            building,
            spans,
            tables,
            geometry: BuildingGeometry::new(building, spans),
        }
    }

    /// Largest crane capacity over all spans (t)
    pub fn max_crane_capacity(&self) -> f64 {
        self.spans
            .iter()
            .map(|s| s.crane_capacity_t)
            .fold(0.0, f64::max)
    }
}

/// Clamped-lookup notices collected during one call.
///
/// Each notice is also emitted as a `tracing` warning.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn new() -> Self {
        Warnings(Vec::new())
    }

    /// Record a notice for a category
    pub fn push(&mut self, category: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(category, "{}", message);
        self.0.push(format!("{category}: {message}"));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
