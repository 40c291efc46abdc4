//! # Purlins
//!
//! Selects a standard channel profile per span from the line load on one
//! purlin and converts it into a floor-area allowance.
//!
//! ```text
//! q = (q_roof + q_purlin + q_snow + q_dust + q_tech) · a · γn / g   [t/m]
//! n = L / a + 3                                                       [lines]
//! g_p = m_purlin · n / (L · B)                                        [kg/m²]
//! ```
//!
//! where `a` is the purlin spacing (3 m), `L` the truss span and `B` the
//! truss spacing (the purlin's own span). Bays up to 6 m take the short-span
//! purlin mass, wider bays the long-span mass.

use serde::{Deserialize, Serialize};

use super::context::{EstimateContext, Warnings};
use crate::coefficients::{GRAVITY, PURLIN_EXTRA_LINES, PURLIN_SHORT_SPAN_LIMIT, PURLIN_SPACING};
use crate::units::{KgPerM2, Tonnes};

/// Purlin selection for one span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlinSpanResult {
    pub span_index: usize,
    /// Selected profile designation
    pub profile: String,
    /// Load exceeded the heaviest tabulated tier; the heaviest profile is reported
    pub over_limit: bool,
    /// Line load on one purlin (t/m)
    pub line_load_t_m: f64,
    /// Mass of one purlin (kg)
    pub unit_mass_kg: f64,
    /// Purlin lines across the span
    pub lines: f64,
    /// Allowance over the span area
    pub allowance: KgPerM2,
    /// Purlin mass of the span
    pub mass: Tonnes,
}

/// Purlins of the whole roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlinResult {
    pub spans: Vec<PurlinSpanResult>,
    pub total: Tonnes,
}

/// Line load on one purlin (t/m)
pub fn purlin_line_load(ctx: &EstimateContext<'_>) -> f64 {
    ctx.building.roof_load_total() * PURLIN_SPACING * ctx.building.importance_factor / GRAVITY
}

pub fn estimate(ctx: &EstimateContext<'_>, warnings: &mut Warnings) -> PurlinResult {
    let bay_m = ctx.building.truss_spacing_m;
    let line_load = purlin_line_load(ctx);
    let selection = ctx.tables.purlins.select(line_load);
    let profile = selection.value;
    let unit_mass_kg = if bay_m <= PURLIN_SHORT_SPAN_LIMIT {
        profile.short_span_kg
    } else {
        profile.long_span_kg
    };

    if selection.clamped {
        warnings.push(
            "purlins",
            format!(
                "line load {:.3} t/m exceeds the heaviest tier ({:.2} t/m); using {}",
                line_load, selection.breakpoint, profile.name
            ),
        );
    }

    let spans: Vec<PurlinSpanResult> = ctx
        .spans
        .iter()
        .enumerate()
        .map(|(span_index, span)| {
            let lines = span.span_m / PURLIN_SPACING + PURLIN_EXTRA_LINES;
            let allowance = KgPerM2(unit_mass_kg * lines / (span.span_m * bay_m));
            let mass = allowance.over_area(ctx.geometry.span_area_m2(span));
            PurlinSpanResult {
                span_index,
                profile: profile.name.clone(),
                over_limit: selection.clamped,
                line_load_t_m: line_load,
                unit_mass_kg,
                lines,
                allowance,
                mass,
            }
        })
        .collect();

    let total: Tonnes = spans.iter().map(|s| s.mass).sum();
    tracing::debug!(profile = %profile.name, line_load, total = total.0, "purlins");

    PurlinResult { spans, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BuildingParameters, SpanParameters};
    use crate::tables::LookupTables;

    fn run(building: &BuildingParameters, spans: &[SpanParameters]) -> (PurlinResult, Warnings) {
        let ctx = EstimateContext::new(building, spans, LookupTables::standard());
        let mut warnings = Warnings::new();
        (estimate(&ctx, &mut warnings), warnings)
    }

    #[test]
    fn test_default_building_selects_channel_27() {
        let building = BuildingParameters::default();
        let spans = vec![SpanParameters::default()];
        let (result, warnings) = run(&building, &spans);

        // q = 3.1 · 3 / 9.81 = 0.948 t/m → 1.25 tier
        let span = &result.spans[0];
        assert!((span.line_load_t_m - 0.948).abs() < 0.001);
        assert_eq!(span.profile, "Channel 27");
        assert_eq!(span.unit_mass_kg, 166.2);
        assert!(!span.over_limit);
        assert!(warnings.is_empty());

        // g = 166.2 · 11 / (24 · 6) = 12.70 kg/m², over 2880 m²
        assert!((span.allowance.0 - 12.696).abs() < 0.01);
        assert!((result.total.0 - 36.56).abs() < 0.01);
    }

    #[test]
    fn test_light_roof_selects_channel_20() {
        let building = BuildingParameters {
            roof_load: 0.1,
            purlin_load: 0.1,
            snow_load: 1.0,
            ..BuildingParameters::default()
        };
        let (result, _) = run(&building, &[SpanParameters::default()]);
        assert_eq!(result.spans[0].profile, "Channel 20");
    }

    #[test]
    fn test_long_bay_uses_long_span_mass() {
        let building = BuildingParameters {
            truss_spacing_m: 12.0,
            ..BuildingParameters::default()
        };
        let (result, _) = run(&building, &[SpanParameters::default()]);
        assert_eq!(result.spans[0].unit_mass_kg, 332.4);
    }

    #[test]
    fn test_overload_clamps_to_heaviest_profile() {
        let building = BuildingParameters {
            snow_load: 10.0,
            ..BuildingParameters::default()
        };
        let (result, warnings) = run(&building, &[SpanParameters::default()]);
        assert_eq!(result.spans[0].profile, "2×Channel 20");
        assert!(result.spans[0].over_limit);
        assert!(!warnings.is_empty());
    }

    #[test]
    fn test_total_sums_spans() {
        let building = BuildingParameters::default();
        let spans = vec![SpanParameters::default(), SpanParameters { span_m: 18.0, ..Default::default() }];
        let (result, _) = run(&building, &spans);
        let sum: f64 = result.spans.iter().map(|s| s.mass.0).sum();
        assert!((result.total.0 - sum).abs() < 1e-9);
    }
}
