//! # Crane Beams and Brake Structures
//!
//! Estimated per column row. Every span adjacent to a row contributes its own
//! runway beam and brake structure with its own crane, so an interior row
//! carries two contributions and an edge row one.
//!
//! **Method 1**, closed form per beam (beam span `l` = column spacing):
//!
//! ```text
//! G = (α · l + q_rail) · l · 1.4    [kN]
//! ```
//!
//! with `α` and `q_rail` read by crane capacity.
//!
//! **Method 2**, tabulated allowances in kg/m:
//!
//! ```text
//! m = (g_beam + g_brake) · k_duty · l · n_bays / 1000    [t]
//! ```
//!
//! A contribution whose beam or brake allowance is missing is not applicable
//! for Method 2 and adds nothing to its row.

use serde::{Deserialize, Serialize};

use super::context::{EstimateContext, Warnings};
use super::method::MethodValue;
use super::rows::{column_rows, ColumnRow};
use crate::coefficients::CRANE_BEAM_DYNAMIC_FACTOR;
use crate::lookup::ceiling_lookup;
use crate::tables::LookupTables;
use crate::units::{Kilonewtons, Tonnes};

/// One adjacent span's runway beam on a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneBeamContribution {
    pub span_index: usize,
    pub crane_capacity_t: f64,
    pub double_crane: bool,
    /// Self-weight of one beam (kN)
    pub beam_weight_kn: f64,
    /// Beam allowance (kg/m), if tabulated
    pub beam_allowance_kg_m: Option<f64>,
    /// Brake-structure allowance (kg/m), if tabulated
    pub brake_allowance_kg_m: Option<f64>,
    pub method1: MethodValue,
    pub method2: MethodValue,
}

/// Runway beams of one column row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneBeamRowResult {
    pub row: ColumnRow,
    pub label: String,
    pub contributions: Vec<CraneBeamContribution>,
    pub method1: MethodValue,
    pub method2: MethodValue,
}

/// Runway beams of the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneBeamResult {
    /// Beam span, equal to the column spacing (m)
    pub beam_span_m: f64,
    /// Column bays along the building
    pub bays: f64,
    pub rows: Vec<CraneBeamRowResult>,
    pub method1: MethodValue,
    pub method2: MethodValue,
}

/// Self-weight of one runway beam including the rail
pub fn beam_self_weight(tables: &LookupTables, capacity_t: f64, beam_span_m: f64) -> Kilonewtons {
    let alpha = ceiling_lookup(&tables.crane_beam_alpha, capacity_t);
    let rail = ceiling_lookup(&tables.rail_weight, capacity_t);
    Kilonewtons((alpha * beam_span_m + rail) * beam_span_m * CRANE_BEAM_DYNAMIC_FACTOR)
}

/// Column bays along the building, rounded up
pub fn bay_count(ctx: &EstimateContext<'_>) -> f64 {
    (ctx.building.building_length_m / ctx.building.column_spacing()).ceil()
}

/// Estimate one row in isolation.
pub fn estimate_row(ctx: &EstimateContext<'_>, row: &ColumnRow) -> CraneBeamRowResult {
    let beam_span = ctx.building.column_spacing();
    let bays = bay_count(ctx);
    let edge = row.position.is_edge();

    let contributions: Vec<CraneBeamContribution> = row
        .spans
        .iter()
        .filter_map(|&span_index| ctx.spans.get(span_index).map(|span| (span_index, span)))
        .map(|(span_index, span)| {
            let capacity = span.crane_capacity_t;
            let double_crane = span.is_double_crane();
            let weight = beam_self_weight(ctx.tables, capacity, beam_span);

            let beam_allowance = ctx
                .tables
                .crane_beams_for(capacity)
                .allowance(beam_span, capacity, double_crane);
            let brake_allowance = ctx
                .tables
                .brakes_for(capacity)
                .allowance(beam_span, edge, span.with_passage, double_crane);

            let method2 = match (beam_allowance, brake_allowance) {
                (Some(beam), Some(brake)) => {
                    MethodValue::Applicable(Tonnes((beam + brake) * span.crane_duty.factor() * beam_span * bays / 1000.0))
                }
                _ => MethodValue::NotApplicable,
            };

            CraneBeamContribution {
                span_index,
                crane_capacity_t: capacity,
                double_crane,
                beam_weight_kn: weight.0,
                beam_allowance_kg_m: beam_allowance,
                brake_allowance_kg_m: brake_allowance,
                method1: MethodValue::Applicable(weight.to_tonnes() * bays),
                method2,
            }
        })
        .collect();

    let method1 = MethodValue::accumulate(contributions.iter().map(|c| c.method1));
    let method2 = MethodValue::accumulate(contributions.iter().map(|c| c.method2));

    CraneBeamRowResult {
        label: row.label(ctx.spans.len()),
        row: row.clone(),
        contributions,
        method1,
        method2,
    }
}

pub fn estimate(ctx: &EstimateContext<'_>, warnings: &mut Warnings) -> CraneBeamResult {
    let max_capacity = ctx.tables.max_crane_capacity();
    for (i, span) in ctx.spans.iter().enumerate() {
        if span.crane_capacity_t > max_capacity {
            warnings.push(
                "crane beams",
                format!(
                    "span {} crane {} t exceeds the tabulated range; using the {} t tier",
                    i + 1,
                    span.crane_capacity_t,
                    max_capacity
                ),
            );
        }
    }

    let rows: Vec<CraneBeamRowResult> = column_rows(ctx.spans.len())
        .iter()
        .map(|row| estimate_row(ctx, row))
        .collect();

    let method1 = MethodValue::accumulate(rows.iter().map(|r| r.method1));
    let method2 = MethodValue::accumulate(rows.iter().map(|r| r.method2));
    tracing::debug!(rows = rows.len(), %method1, %method2, "crane beams");

    CraneBeamResult {
        beam_span_m: ctx.building.column_spacing(),
        bays: bay_count(ctx),
        rows,
        method1,
        method2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BuildingParameters, CraneDuty, SpanParameters};

    fn run(building: &BuildingParameters, spans: &[SpanParameters]) -> (CraneBeamResult, Warnings) {
        let ctx = EstimateContext::new(building, spans, LookupTables::standard());
        let mut warnings = Warnings::new();
        (estimate(&ctx, &mut warnings), warnings)
    }

    #[test]
    fn test_beam_self_weight() {
        // (0.18 · 12 + 0.461) · 12 · 1.4
        let weight = beam_self_weight(LookupTables::standard(), 50.0, 12.0);
        assert!((weight.0 - 44.0328).abs() < 1e-9);
    }

    #[test]
    fn test_single_span_two_edge_rows() {
        let building = BuildingParameters::default();
        let (result, warnings) = run(&building, &[SpanParameters::default()]);
        assert!(warnings.is_empty());
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.bays, 10.0);

        let row = &result.rows[0];
        assert_eq!(row.contributions.len(), 1);
        let c = &row.contributions[0];
        assert_eq!(c.beam_allowance_kg_m, Some(220.0));
        assert_eq!(c.brake_allowance_kg_m, Some(100.0));
        // (220 + 100) · 12 · 10 / 1000
        assert!((c.method2.contribution().0 - 38.4).abs() < 1e-9);
        // 44.0328 kN / 9.81 · 10 bays
        assert!((c.method1.contribution().0 - 44.886).abs() < 0.001);

        assert!((result.method2.contribution().0 - 76.8).abs() < 1e-9);
    }

    #[test]
    fn test_interior_row_takes_both_spans() {
        let building = BuildingParameters::default();
        let spans = vec![
            SpanParameters::default(),
            SpanParameters {
                crane_capacity_t: 20.0,
                crane_count: 2,
                ..Default::default()
            },
        ];
        let (result, _) = run(&building, &spans);
        assert_eq!(result.rows.len(), 3);

        let interior = &result.rows[1];
        let span_indices: Vec<usize> = interior.contributions.iter().map(|c| c.span_index).collect();
        assert_eq!(span_indices, vec![0, 1]);
        // Capacities are not averaged
        assert_eq!(interior.contributions[0].crane_capacity_t, 50.0);
        assert_eq!(interior.contributions[1].crane_capacity_t, 20.0);
        // 20 t, two cranes at 12 m → 200 kg/m
        assert_eq!(interior.contributions[1].beam_allowance_kg_m, Some(200.0));
    }

    #[test]
    fn test_rows_add_up() {
        let building = BuildingParameters::default();
        let spans = vec![
            SpanParameters::default(),
            SpanParameters {
                crane_capacity_t: 125.0,
                ..Default::default()
            },
            SpanParameters {
                crane_capacity_t: 10.0,
                with_passage: false,
                ..Default::default()
            },
        ];
        let ctx = EstimateContext::new(&building, &spans, LookupTables::standard());
        let result = estimate(&ctx, &mut Warnings::new());

        let (m1, m2) = column_rows(spans.len()).iter().fold((0.0, 0.0), |(m1, m2), row| {
            let r = estimate_row(&ctx, row);
            (m1 + r.method1.contribution().0, m2 + r.method2.contribution().0)
        });
        assert!((result.method1.contribution().0 - m1).abs() < 1e-9);
        assert!((result.method2.contribution().0 - m2).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_duty_scales_method2_only() {
        let building = BuildingParameters::default();
        let light = run(&building, &[SpanParameters::default()]).0;
        let heavy = run(
            &building,
            &[SpanParameters {
                crane_duty: CraneDuty::Heavy,
                ..Default::default()
            }],
        )
        .0;
        assert_eq!(light.method1, heavy.method1);
        let ratio = heavy.method2.contribution().0 / light.method2.contribution().0;
        assert!((ratio - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_missing_beam_allowance_is_not_applicable() {
        let building = BuildingParameters::default();
        let spans = vec![
            SpanParameters::default(),
            SpanParameters {
                crane_capacity_t: 125.0,
                ..Default::default()
            },
        ];
        let standard = EstimateContext::new(&building, &spans, LookupTables::standard());
        let full = estimate(&standard, &mut Warnings::new());

        // Light cranes lose their beam column, heavy cranes keep theirs
        let mut tables = LookupTables::standard().clone();
        tables.crane_beams_low.capacities.clear();
        let ctx = EstimateContext::new(&building, &spans, &tables);
        let partial = estimate(&ctx, &mut Warnings::new());

        assert_eq!(partial.method1, full.method1);

        let mut lost = 0.0;
        for (row, full_row) in partial.rows.iter().zip(&full.rows) {
            for (c, full_c) in row.contributions.iter().zip(&full_row.contributions) {
                assert_eq!(c.method1, full_c.method1);
                if c.span_index == 0 {
                    assert_eq!(c.beam_allowance_kg_m, None);
                    assert_eq!(c.method2, MethodValue::NotApplicable);
                    assert_eq!(c.method2.contribution(), Tonnes(0.0));
                    lost += full_c.method2.contribution().0;
                } else {
                    assert_eq!(c.method2, full_c.method2);
                }
            }
        }
        // Edge L sees only span 0
        assert_eq!(partial.rows[0].method2, MethodValue::NotApplicable);
        assert!(lost > 0.0);
        let drop = full.method2.contribution().0 - partial.method2.contribution().0;
        assert!((drop - lost).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_crane_clamps() {
        let building = BuildingParameters::default();
        let spans = [SpanParameters {
            crane_capacity_t: 500.0,
            ..Default::default()
        }];
        let (result, warnings) = run(&building, &spans);
        assert!(!warnings.is_empty());
        assert!(result.method1.contribution().0.is_finite());
        assert!(result.method1.contribution().0 > 0.0);
        assert!(result.method2.contribution().0.is_finite());
    }
}
