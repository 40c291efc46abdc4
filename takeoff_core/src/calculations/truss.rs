//! # Roof Trusses
//!
//! Two independent estimates per span.
//!
//! **Method 1** (angle-section trusses only), closed form:
//!
//! ```text
//! G = (g_n · B / 1000 + 0.018) · 1.4 · L² / 0.85 · γn     [kN per truss]
//! ```
//!
//! **Method 2**, tabulated: the span is rounded up to the family's tabulated
//! span, then the per-length load `q = g_n · B · γn / g` [t/m] is stepped up
//! to the next load breakpoint of that span's mass curve.
//!
//! Both are multiplied by the number of truss lines `L_bld / B + 1`.
//! `g_n` is the roof load including the connection allowance.

use serde::{Deserialize, Serialize};

use super::context::{EstimateContext, Warnings};
use super::method::MethodValue;
use crate::coefficients::{GRAVITY, TRUSS_LOAD_FACTOR, TRUSS_SELF_WEIGHT_TERM, TRUSS_UTILISATION};
use crate::lookup::step_interpolate;
use crate::params::{SpanParameters, TrussFamily};
use crate::units::{Kilonewtons, Tonnes};

/// Truss estimate for one span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussSpanResult {
    pub span_index: usize,
    pub family: TrussFamily,
    /// Per-length truss load (t/m)
    pub line_load_t_m: f64,
    /// Truss lines along the building
    pub truss_count: f64,
    /// Tabulated span the Method-2 curve was read from (m)
    pub table_span_m: Option<f64>,
    /// One truss, Method 1
    pub unit_method1: MethodValue,
    /// One truss, Method 2
    pub unit_method2: MethodValue,
    /// All trusses of the span, Method 1
    pub method1: MethodValue,
    /// All trusses of the span, Method 2
    pub method2: MethodValue,
}

/// Roof trusses of the whole building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussResult {
    pub spans: Vec<TrussSpanResult>,
    pub method1: MethodValue,
    pub method2: MethodValue,
}

/// Per-length truss load (t/m)
pub fn truss_line_load(ctx: &EstimateContext<'_>) -> f64 {
    let b = ctx.building;
    b.truss_load_total() * b.truss_spacing_m * b.importance_factor / GRAVITY
}

/// Truss lines along the building length
pub fn truss_count(ctx: &EstimateContext<'_>) -> f64 {
    ctx.building.building_length_m / ctx.building.truss_spacing_m + 1.0
}

/// Closed-form mass of one angle-section truss; `None` for other families.
pub fn closed_form_mass(ctx: &EstimateContext<'_>, span: &SpanParameters) -> Option<Tonnes> {
    if !span.truss_family.has_closed_form() {
        return None;
    }
    let b = ctx.building;
    let per_length = b.truss_load_total() * b.truss_spacing_m / 1000.0 + TRUSS_SELF_WEIGHT_TERM;
    let weight = per_length * TRUSS_LOAD_FACTOR * span.span_m.powi(2) / TRUSS_UTILISATION * b.importance_factor;
    Some(Kilonewtons(weight).to_tonnes())
}

pub fn estimate(ctx: &EstimateContext<'_>, warnings: &mut Warnings) -> TrussResult {
    let line_load = truss_line_load(ctx);
    let count = truss_count(ctx);
    let breakpoints = &ctx.tables.truss_load_breakpoints;

    if breakpoints.last().is_some_and(|&max| line_load > max) {
        warnings.push(
            "trusses",
            format!("truss load {:.2} t/m exceeds the tabulated range; using the top load tier", line_load),
        );
    }

    let spans: Vec<TrussSpanResult> = ctx
        .spans
        .iter()
        .enumerate()
        .map(|(span_index, span)| {
            let unit_method1 = MethodValue::from(closed_form_mass(ctx, span));

            let (table_span_m, unit_method2) = match ctx.tables.truss_masses.get(&span.truss_family) {
                Some(curves) => {
                    let selection = curves.select(span.span_m);
                    if selection.clamped {
                        warnings.push(
                            "trusses",
                            format!(
                                "span {} ({} m) exceeds the {} table; using the {} m curve",
                                span_index + 1,
                                span.span_m,
                                span.truss_family,
                                selection.breakpoint
                            ),
                        );
                    }
                    let mass = step_interpolate(breakpoints, selection.value, line_load);
                    (Some(selection.breakpoint), MethodValue::Applicable(Tonnes(mass)))
                }
                None => (None, MethodValue::NotApplicable),
            };

            TrussSpanResult {
                span_index,
                family: span.truss_family,
                line_load_t_m: line_load,
                truss_count: count,
                table_span_m,
                unit_method1,
                unit_method2,
                method1: unit_method1.scale(count),
                method2: unit_method2.scale(count),
            }
        })
        .collect();

    let method1 = MethodValue::accumulate(spans.iter().map(|s| s.method1));
    let method2 = MethodValue::accumulate(spans.iter().map(|s| s.method2));
    tracing::debug!(line_load, count, %method1, %method2, "trusses");

    TrussResult { spans, method1, method2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BuildingParameters;
    use crate::tables::LookupTables;

    fn run(building: &BuildingParameters, spans: &[SpanParameters]) -> TrussResult {
        let ctx = EstimateContext::new(building, spans, LookupTables::standard());
        estimate(&ctx, &mut Warnings::new())
    }

    #[test]
    fn test_angle_truss_both_methods() {
        let building = BuildingParameters::default();
        let result = run(&building, &[SpanParameters::default()]);
        let span = &result.spans[0];

        // q = 3.15 · 6 / 9.81 = 1.927 t/m → first load tier of the 24 m curve
        assert!((span.line_load_t_m - 1.927).abs() < 0.001);
        assert_eq!(span.truss_count, 21.0);
        assert_eq!(span.table_span_m, Some(24.0));
        assert_eq!(span.unit_method2, MethodValue::Applicable(Tonnes(2.30)));

        // G = 0.0369 · 1.4 · 576 / 0.85 = 35.01 kN → 3.569 t
        let unit_m1 = span.unit_method1.mass().unwrap();
        assert!((unit_m1.0 - 3.569).abs() < 0.001);

        let m1 = result.method1.mass().unwrap();
        let m2 = result.method2.mass().unwrap();
        assert!((m1.0 - 3.5685 * 21.0).abs() < 0.05);
        assert!((m2.0 - 48.3).abs() < 1e-9);
    }

    #[test]
    fn test_non_angle_family_has_no_method1() {
        let building = BuildingParameters::default();
        let spans = vec![SpanParameters {
            truss_family: TrussFamily::IBeams,
            ..Default::default()
        }];
        let result = run(&building, &spans);
        assert_eq!(result.method1, MethodValue::NotApplicable);
        assert_eq!(result.method1.contribution(), Tonnes(0.0));
        // 24 m I-beam curve, first tier
        assert_eq!(result.method2, MethodValue::Applicable(Tonnes(4.60 * 21.0)));
    }

    #[test]
    fn test_method2_independent_of_method1_availability() {
        let building = BuildingParameters {
            snow_load: 5.0,
            ..BuildingParameters::default()
        };
        for family in TrussFamily::ALL {
            let spans = vec![SpanParameters {
                truss_family: family,
                ..Default::default()
            }];
            let result = run(&building, &spans);
            assert!(result.method2.is_applicable());
            assert_eq!(result.method1.is_applicable(), family.has_closed_form());
        }
    }

    #[test]
    fn test_span_rounds_up_and_clamps() {
        let building = BuildingParameters::default();
        let result = run(&building, &[SpanParameters { span_m: 21.0, ..Default::default() }]);
        assert_eq!(result.spans[0].table_span_m, Some(24.0));

        let ctx_spans = [SpanParameters { span_m: 42.0, ..Default::default() }];
        let ctx = EstimateContext::new(&building, &ctx_spans, LookupTables::standard());
        let mut warnings = Warnings::new();
        let result = estimate(&ctx, &mut warnings);
        assert_eq!(result.spans[0].table_span_m, Some(36.0));
        assert!(!warnings.is_empty());
    }

    #[test]
    fn test_mixed_families_accumulate() {
        let building = BuildingParameters::default();
        let spans = vec![
            SpanParameters::default(),
            SpanParameters {
                truss_family: TrussFamily::Molodechno,
                ..Default::default()
            },
        ];
        let result = run(&building, &spans);
        // Only the angle span contributes to Method 1
        assert_eq!(result.method1, result.spans[0].method1);
        let m2: f64 = result.spans.iter().map(|s| s.method2.contribution().0).sum();
        assert!((result.method2.contribution().0 - m2).abs() < 1e-9);
    }
}
