//! # Steel Takeoff Calculations
//!
//! Every estimator follows the same pattern:
//!
//! - reads the shared [`EstimateContext`] (building, spans, tables, geometry)
//! - returns a `*Result` record (JSON-serializable) with its intermediate values
//! - records clamped lookups into [`Warnings`]
//!
//! [`Estimator::compute`] runs all of them and applies the hybrid summation.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::compute;
//! use takeoff_core::params::{BuildingParameters, SpanParameters};
//!
//! let building = BuildingParameters::default();
//! let spans = vec![SpanParameters::default()];
//! let result = compute(&building, &spans).unwrap();
//!
//! assert!(result.totals.method1.0 > 0.0);
//! assert!(result.totals.method2.0 > 0.0);
//! ```
//!
//! ## Estimators
//!
//! - [`purlin`] - Channel purlins
//! - [`truss`] - Roof trusses (dual method)
//! - [`bracing`] - Roof bracing
//! - [`subtruss`] - Sub-trusses on a 12 m grid (dual method)
//! - [`crane_beam`] - Crane beams and brake structures per column row (dual method)
//! - [`column`] - Stepped columns per column row
//! - [`envelope`] - Wall framing, cladding areas, pipe supports

pub mod bracing;
pub mod column;
pub mod context;
pub mod crane_beam;
pub mod envelope;
pub mod method;
pub mod purlin;
pub mod rows;
pub mod subtruss;
pub mod summary;
pub mod truss;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::params::{BuildingParameters, SpanParameters};
use crate::tables::LookupTables;

pub use bracing::BracingResult;
pub use column::{ColumnHeights, ColumnResult, ColumnRowResult};
pub use context::{BuildingGeometry, EstimateContext, Warnings};
pub use crane_beam::{CraneBeamResult, CraneBeamRowResult};
pub use envelope::{CladdingResult, PipeSupportResult, WallFramingResult};
pub use method::MethodValue;
pub use purlin::PurlinResult;
pub use rows::{column_rows, ColumnRow, RowPosition};
pub use subtruss::SubTrussResult;
pub use summary::{Category, CategoryKind, CategoryTotals, Totals};
pub use truss::TrussResult;

/// Full takeoff of one building.
///
/// Created fresh by every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub geometry: BuildingGeometry,
    pub purlins: PurlinResult,
    pub trusses: TrussResult,
    pub bracing: BracingResult,
    pub sub_trusses: SubTrussResult,
    pub crane_beams: CraneBeamResult,
    pub columns: ColumnResult,
    pub wall_framing: WallFramingResult,
    pub cladding: CladdingResult,
    pub pipe_supports: PipeSupportResult,
    /// Per-category masses entering the totals
    pub categories: BTreeMap<Category, CategoryTotals>,
    pub totals: Totals,
    /// Notices for lookups that fell back to the nearest tabulated tier
    pub warnings: Vec<String>,
}

impl ComputationResult {
    pub fn category(&self, category: Category) -> Option<&CategoryTotals> {
        self.categories.get(&category)
    }
}

/// Takeoff engine bound to a set of lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'t> {
    tables: &'t LookupTables,
}

impl<'t> Estimator<'t> {
    pub fn new(tables: &'t LookupTables) -> Self {
        Estimator { tables }
    }

    /// Compute the takeoff for a building and its spans, left to right.
    ///
    /// Parameters are taken as given; run `validate()` on them first when
    /// they come from user input. The only rejected input is an empty span list.
    pub fn compute(&self, building: &BuildingParameters, spans: &[SpanParameters]) -> CalcResult<ComputationResult> {
        if spans.is_empty() {
            return Err(CalcError::EmptySpanList);
        }

        let ctx = EstimateContext::new(building, spans, self.tables);
        let area = ctx.geometry.floor_area_m2;
        let mut warnings = Warnings::new();
        tracing::debug!(spans = spans.len(), area, "computing takeoff");

        let purlins = purlin::estimate(&ctx, &mut warnings);
        let trusses = truss::estimate(&ctx, &mut warnings);
        let bracing = bracing::estimate(&ctx);
        let sub_trusses = subtruss::estimate(&ctx, &mut warnings);
        let crane_beams = crane_beam::estimate(&ctx, &mut warnings);
        let columns = column::estimate(&ctx);
        let height = columns.heights.total_m;
        let wall_framing = envelope::estimate_wall_framing(&ctx, height, &mut warnings);
        let cladding = envelope::estimate_cladding(&ctx, height);
        let pipe_supports = envelope::estimate_pipe_supports(&ctx);

        let categories = BTreeMap::from([
            (
                Category::Purlins,
                CategoryTotals::invariant(MethodValue::Applicable(purlins.total), area),
            ),
            (
                Category::Trusses,
                CategoryTotals::dual(trusses.method1, trusses.method2, area),
            ),
            (
                Category::Bracing,
                CategoryTotals::invariant(MethodValue::Applicable(bracing.mass), area),
            ),
            (
                Category::SubTrusses,
                CategoryTotals::dual(sub_trusses.method1(), sub_trusses.method2(), area),
            ),
            (
                Category::CraneBeams,
                CategoryTotals::dual(crane_beams.method1, crane_beams.method2, area),
            ),
            (
                Category::Columns,
                CategoryTotals::invariant(MethodValue::Applicable(columns.total), area),
            ),
            (
                Category::WallFraming,
                CategoryTotals::invariant(wall_framing.mass, area),
            ),
            (
                Category::PipeSupports,
                CategoryTotals::invariant(MethodValue::Applicable(pipe_supports.mass), area),
            ),
        ]);
        let totals = summary::summarize(&categories, area);
        tracing::debug!(
            method1 = totals.method1.0,
            method2 = totals.method2.0,
            "takeoff complete"
        );

        Ok(ComputationResult {
            geometry: ctx.geometry,
            purlins,
            trusses,
            bracing,
            sub_trusses,
            crane_beams,
            columns,
            wall_framing,
            cladding,
            pipe_supports,
            categories,
            totals,
            warnings: warnings.into_vec(),
        })
    }
}

impl Default for Estimator<'static> {
    fn default() -> Self {
        Estimator::new(LookupTables::standard())
    }
}

/// Compute with the built-in tables.
pub fn compute(building: &BuildingParameters, spans: &[SpanParameters]) -> CalcResult<ComputationResult> {
    Estimator::default().compute(building, spans)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::params::{ColumnSpacing, CraneDuty, TrussFamily};
    use proptest::prelude::*;

    fn span_strategy() -> impl Strategy<Value = SpanParameters> {
        (
            prop::sample::select(vec![12.0, 18.0, 24.0, 30.0, 36.0]),
            prop::sample::select(TrussFamily::ALL.to_vec()),
            1.0f64..450.0,
            1u8..=2,
            any::<bool>(),
            prop::sample::select(CraneDuty::ALL.to_vec()),
        )
            .prop_map(|(span_m, truss_family, crane_capacity_t, crane_count, with_passage, crane_duty)| {
                SpanParameters {
                    span_m,
                    truss_family,
                    crane_capacity_t,
                    crane_count,
                    with_passage,
                    crane_duty,
                }
            })
    }

    fn building_strategy() -> impl Strategy<Value = BuildingParameters> {
        (
            prop::sample::select(vec![60.0, 72.0, 120.0, 144.0]),
            prop::sample::select(vec![6.0, 12.0]),
            prop::sample::select(ColumnSpacing::ALL.to_vec()),
            0.5f64..4.0,
        )
            .prop_map(|(building_length_m, truss_spacing_m, column_spacing_m, snow_load)| BuildingParameters {
                building_length_m,
                truss_spacing_m,
                column_spacing_m,
                snow_load,
                ..BuildingParameters::default()
            })
    }

    proptest! {
        #[test]
        fn compute_is_deterministic(
            building in building_strategy(),
            spans in prop::collection::vec(span_strategy(), 1..5),
        ) {
            let first = compute(&building, &spans).unwrap();
            let second = compute(&building, &spans).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn row_masses_add_up(
            building in building_strategy(),
            spans in prop::collection::vec(span_strategy(), 1..5),
        ) {
            let ctx = EstimateContext::new(&building, &spans, LookupTables::standard());
            let result = compute(&building, &spans).unwrap();
            let heights = column::column_heights(&ctx);

            let mut beams = 0.0;
            let mut cols = 0.0;
            for row in column_rows(spans.len()) {
                beams += crane_beam::estimate_row(&ctx, &row).method1.contribution().0;
                cols += column::estimate_row(&ctx, &heights, &row).mass.0;
            }
            prop_assert_eq!(result.crane_beams.rows.len(), spans.len() + 1);
            prop_assert!((result.crane_beams.method1.contribution().0 - beams).abs() < 1e-6);
            prop_assert!((result.columns.total.0 - cols).abs() < 1e-6);
        }

        #[test]
        fn totals_are_finite_and_ordered(
            building in building_strategy(),
            spans in prop::collection::vec(span_strategy(), 1..5),
        ) {
            let totals = compute(&building, &spans).unwrap().totals;
            prop_assert!(totals.method1.0.is_finite() && totals.method1.0 > 0.0);
            prop_assert!(totals.method2.0.is_finite() && totals.method2.0 > 0.0);
            prop_assert!(totals.min.0 <= totals.max.0);
        }
    }
}
