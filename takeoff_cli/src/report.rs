//! Plain-text rendering of a takeoff.

use std::fmt::Write;

use takeoff_core::calculations::{Category, CategoryKind, ComputationResult, SubTrussResult};

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Full report: headline range, method totals, then one section per category.
pub fn render(label: &str, result: &ComputationResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, label, result);
    out
}

fn write_report(out: &mut String, label: &str, r: &ComputationResult) -> std::fmt::Result {
    let t = &r.totals;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  STEEL TAKEOFF: {label}")?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "  {} span(s), {:.0} × {:.0} m, floor {:.0} m²",
        r.geometry.span_count, r.geometry.length_m, r.geometry.width_m, r.geometry.floor_area_m2
    )?;
    writeln!(out)?;
    writeln!(out, "  Estimated steel: {:.1} … {:.1} t", t.min.0, t.max.0)?;
    writeln!(out, "  Method 1 (formulas): {:>9.1} t  {:>6.1} kg/m²", t.method1.0, t.method1_per_area.0)?;
    writeln!(out, "  Method 2 (tables):   {:>9.1} t  {:>6.1} kg/m²", t.method2.0, t.method2_per_area.0)?;
    writeln!(out)?;

    writeln!(out, "  {:<26} {:>12} {:>12}", "Category", "Method 1", "Method 2")?;
    for category in Category::ALL {
        if let Some(c) = r.category(category) {
            let marker = match c.kind {
                CategoryKind::MethodInvariant => " ",
                CategoryKind::DualMethod => "*",
            };
            writeln!(
                out,
                "  {:<25}{} {:>12} {:>12}",
                category.display_name(),
                marker,
                c.method1.to_string(),
                c.method2.to_string()
            )?;
        }
    }
    writeln!(out, "  (* estimated separately by each method)")?;
    writeln!(out)?;

    writeln!(out, "Purlins:")?;
    for s in &r.purlins.spans {
        writeln!(
            out,
            "  Span {}: {}{} at q = {:.3} t/m, {:.1} kg/m², {:.2} t",
            s.span_index + 1,
            s.profile,
            if s.over_limit { " (over limit)" } else { "" },
            s.line_load_t_m,
            s.allowance.0,
            s.mass.0
        )?;
    }

    writeln!(out, "Roof trusses:")?;
    for s in &r.trusses.spans {
        writeln!(
            out,
            "  Span {}: {}, {:.0} trusses, M1 {}, M2 {}",
            s.span_index + 1,
            s.family,
            s.truss_count,
            s.method1,
            s.method2
        )?;
    }

    writeln!(
        out,
        "Roof bracing: {:.0} kg/m² for {:.0} t cranes, {:.2} t",
        r.bracing.allowance.0, r.bracing.governing_capacity_t, r.bracing.mass.0
    )?;

    match &r.sub_trusses {
        SubTrussResult::NotRequired => writeln!(out, "Sub-trusses: not required")?,
        SubTrussResult::Required { count, spans, .. } => {
            writeln!(out, "Sub-trusses: {count:.0}")?;
            for s in spans {
                writeln!(
                    out,
                    "  Span {}: R = {:.1} kN, M1 {}, M2 {}",
                    s.span_index + 1,
                    s.reaction_kn,
                    s.method1,
                    s.method2
                )?;
            }
        }
    }

    writeln!(
        out,
        "Crane beams: {:.0} m beams, {:.0} bays",
        r.crane_beams.beam_span_m, r.crane_beams.bays
    )?;
    for row in &r.crane_beams.rows {
        writeln!(out, "  {}: M1 {}, M2 {}", row.label, row.method1, row.method2)?;
    }

    let h = &r.columns.heights;
    writeln!(
        out,
        "Columns: H = {:.2} m (upper {:.2}, lower {:.2}){}, {:.0} per row",
        h.total_m,
        h.upper_m,
        h.lower_m,
        if h.overridden { ", override" } else { "" },
        r.columns.columns_per_row
    )?;
    for row in &r.columns.rows {
        writeln!(
            out,
            "  {}: {:.0} kg each, {:.2} t",
            row.label, row.unit_mass_kg, row.mass.0
        )?;
    }

    writeln!(
        out,
        "Wall framing: type {:?}, {:.0} m² of wall, {}",
        r.wall_framing.key.framing_type, r.wall_framing.wall_area_m2, r.wall_framing.mass
    )?;
    writeln!(
        out,
        "Cladding: walls {:.0} m², roof {:.0} m²",
        r.cladding.wall_area_m2, r.cladding.roof_area_m2
    )?;
    writeln!(
        out,
        "Pipe supports: {} at {:.1} kg/m², {:.2} t",
        r.pipe_supports.building_use, r.pipe_supports.allowance.0, r.pipe_supports.mass.0
    )?;

    if !r.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notes:")?;
        for w in &r.warnings {
            writeln!(out, "  - {w}")?;
        }
    }
    writeln!(out, "{RULE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_core::{compute, BuildingParameters, SpanParameters};

    #[test]
    fn test_report_lists_every_category() {
        let result = compute(&BuildingParameters::default(), &[SpanParameters::default()]).unwrap();
        let text = render("Hall 1", &result);
        assert!(text.contains("STEEL TAKEOFF: Hall 1"));
        for category in Category::ALL {
            assert!(text.contains(category.display_name()));
        }
        assert!(text.contains("Edge L"));
        assert!(text.contains("Edge R"));
    }
}
