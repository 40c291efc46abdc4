//! # Columns
//!
//! Stepped columns with an upper (roof) segment and a lower (crane) segment,
//! estimated per column row from the governing axial force of each segment.
//!
//! ## Heights
//!
//! ```text
//! h_beam  = l · r(Q)                         crane-beam depth
//! H_upper = max(1.5, h_beam + 0.12 + 0.3)    beam, rail and clearance
//! H_lower = rail elevation
//! ```
//!
//! `r(Q)` is the depth-to-span ratio for the heaviest crane, read from the
//! short-grid column for `l ≤ 6 m` and the long-grid column otherwise. An
//! explicit total height replaces the computed one only if it is larger; the
//! upper segment takes up the difference.
//!
//! ## Forces and masses (per column)
//!
//! ```text
//! N_upper = q_roof · l · ΣL / 2 + G_wall,upper
//! G_upper = N_upper · ρ · μ_u · H_upper / (k_u · R)
//! N_lower = N_upper + D_max + G_beams + G_wall,lower + G_upper
//! G_lower = N_lower · ρ · μ_l · H_lower / (k_l · R)
//! ```
//!
//! `ΣL` is the single adjacent span for an edge row and the two adjacent spans
//! for an interior row. Crane reactions and beam weights are summed over the
//! adjacent spans.
//!
//! Columns are estimated by one method only.

use serde::{Deserialize, Serialize};

use super::context::EstimateContext;
use super::crane_beam::beam_self_weight;
use super::rows::{column_rows, ColumnRow};
use crate::coefficients::{
    CRANE_CLEARANCE, CRANE_IMPACT_FACTOR, GRAVITY, LOWER_MOMENT_COEFFICIENT, LOWER_SLENDERNESS,
    MIN_UPPER_SEGMENT_HEIGHT, RAIL_HEIGHT, STEEL_DESIGN_STRENGTH, STEEL_UNIT_WEIGHT, UPPER_MOMENT_COEFFICIENT,
    UPPER_SLENDERNESS, WALL_OPENING_RATIO, WALL_WEIGHT,
};
use crate::lookup::ceiling_lookup;
use crate::units::Tonnes;

/// Segment heights shared by every column of the building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeights {
    /// Crane-beam depth (m)
    pub beam_depth_m: f64,
    /// Upper segment (m)
    pub upper_m: f64,
    /// Lower segment, equal to the rail elevation (m)
    pub lower_m: f64,
    /// Overall column height (m)
    pub total_m: f64,
    /// The override height was applied
    pub overridden: bool,
}

/// One column row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRowResult {
    pub row: ColumnRow,
    pub label: String,
    /// Sum of adjacent spans carried by the row (m)
    pub tributary_span_m: f64,
    /// Governing force of the upper segment (kN)
    pub upper_force_kn: f64,
    /// Governing force of the lower segment (kN)
    pub lower_force_kn: f64,
    /// Mass of one column (kg)
    pub unit_mass_kg: f64,
    /// Columns in the row
    pub count: f64,
    pub mass: Tonnes,
}

/// Columns of the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnResult {
    pub heights: ColumnHeights,
    /// Columns along the building in every row
    pub columns_per_row: f64,
    pub rows: Vec<ColumnRowResult>,
    pub total: Tonnes,
}

impl ColumnResult {
    /// Column count over all rows
    pub fn column_count(&self) -> f64 {
        self.columns_per_row * self.rows.len() as f64
    }
}

/// Segment heights for the heaviest crane in the building.
pub fn column_heights(ctx: &EstimateContext<'_>) -> ColumnHeights {
    let b = ctx.building;
    let spacing = b.column_spacing();
    let ratio = ctx.tables.beam_height_ratio.nearest(ctx.max_crane_capacity());
    let ratio = if spacing <= 6.0 { ratio.short_grid } else { ratio.long_grid };

    let beam_depth_m = spacing * ratio;
    let mut upper_m = (beam_depth_m + RAIL_HEIGHT + CRANE_CLEARANCE).max(MIN_UPPER_SEGMENT_HEIGHT);
    let lower_m = b.rail_elevation_m;
    let mut total_m = upper_m + lower_m;

    let overridden = match b.column_height_override_m {
        Some(h) if h > total_m => {
            total_m = h;
            upper_m = h - lower_m;
            true
        }
        _ => false,
    };

    ColumnHeights {
        beam_depth_m,
        upper_m,
        lower_m,
        total_m,
        overridden,
    }
}

/// Columns along the building in one row
pub fn columns_per_row(ctx: &EstimateContext<'_>) -> f64 {
    (ctx.building.building_length_m / ctx.building.column_spacing()).round() + 1.0
}

/// Estimate one row in isolation.
pub fn estimate_row(ctx: &EstimateContext<'_>, heights: &ColumnHeights, row: &ColumnRow) -> ColumnRowResult {
    let b = ctx.building;
    let spacing = b.column_spacing();
    let adjacent: Vec<_> = row.spans.iter().filter_map(|&i| ctx.spans.get(i)).collect();

    let wall = |height: f64| WALL_WEIGHT * height * (1.0 - WALL_OPENING_RATIO) * spacing;
    let wall_upper = wall(heights.upper_m);
    let wall_lower = wall(heights.lower_m);

    let tributary_span_m: f64 = adjacent.iter().map(|s| s.span_m).sum();
    let upper_force_kn = b.roof_load_total() * spacing * tributary_span_m / 2.0 + wall_upper;
    let upper_weight_kn = upper_force_kn * STEEL_UNIT_WEIGHT * UPPER_SLENDERNESS * heights.upper_m
        / (UPPER_MOMENT_COEFFICIENT * STEEL_DESIGN_STRENGTH);

    let crane_reaction_kn: f64 = adjacent
        .iter()
        .map(|s| ceiling_lookup(&ctx.tables.crane_wheel_load, s.crane_capacity_t) * spacing * CRANE_IMPACT_FACTOR * b.importance_factor)
        .sum();
    let beams_kn: f64 = adjacent
        .iter()
        .map(|s| beam_self_weight(ctx.tables, s.crane_capacity_t, spacing).0)
        .sum();

    let lower_force_kn = upper_force_kn + crane_reaction_kn + beams_kn + wall_lower + upper_weight_kn;
    let lower_weight_kn = lower_force_kn * STEEL_UNIT_WEIGHT * LOWER_SLENDERNESS * heights.lower_m
        / (LOWER_MOMENT_COEFFICIENT * STEEL_DESIGN_STRENGTH);

    let unit_mass_kg = (upper_weight_kn + lower_weight_kn) / GRAVITY * 1000.0;
    let count = columns_per_row(ctx);

    ColumnRowResult {
        label: row.label(ctx.spans.len()),
        row: row.clone(),
        tributary_span_m,
        upper_force_kn,
        lower_force_kn,
        unit_mass_kg,
        count,
        mass: Tonnes(unit_mass_kg * count / 1000.0),
    }
}

pub fn estimate(ctx: &EstimateContext<'_>) -> ColumnResult {
    let heights = column_heights(ctx);
    let rows: Vec<ColumnRowResult> = column_rows(ctx.spans.len())
        .iter()
        .map(|row| estimate_row(ctx, &heights, row))
        .collect();
    let total: Tonnes = rows.iter().map(|r| r.mass).sum();
    tracing::debug!(
        upper = heights.upper_m,
        lower = heights.lower_m,
        rows = rows.len(),
        total = total.0,
        "columns"
    );

    ColumnResult {
        heights,
        columns_per_row: columns_per_row(ctx),
        rows,
        total,
    }
}
