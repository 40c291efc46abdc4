//! # Roof Bracing
//!
//! Flat allowance over the floor area, chosen by the heaviest crane in the
//! building and the truss spacing.
//!
//! | Crane capacity | B ≤ 6 m | B > 6 m |
//! |----------------|---------|---------|
//! | ≤ 120 t        | 15      | 35      |
//! | > 120 t        | 40      | 55      |

use serde::{Deserialize, Serialize};

use super::context::EstimateContext;
use crate::coefficients::{BRACING_CAPACITY_THRESHOLD, BRACING_SPACING_THRESHOLD};
use crate::tables::BracingAllowances;
use crate::units::{KgPerM2, Tonnes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracingResult {
    /// Heaviest crane over all spans (t)
    pub governing_capacity_t: f64,
    pub allowance: KgPerM2,
    pub mass: Tonnes,
}

/// Allowance for a crane capacity and truss spacing
pub fn bracing_allowance(table: &BracingAllowances, capacity_t: f64, truss_spacing_m: f64) -> KgPerM2 {
    let narrow = truss_spacing_m <= BRACING_SPACING_THRESHOLD;
    let value = match (capacity_t <= BRACING_CAPACITY_THRESHOLD, narrow) {
        (true, true) => table.light_narrow,
        (true, false) => table.light_wide,
        (false, true) => table.heavy_narrow,
        (false, false) => table.heavy_wide,
    };
    KgPerM2(value)
}

pub fn estimate(ctx: &EstimateContext<'_>) -> BracingResult {
    let governing_capacity_t = ctx.max_crane_capacity();
    let allowance = bracing_allowance(&ctx.tables.bracing, governing_capacity_t, ctx.building.truss_spacing_m);
    let mass = allowance.over_area(ctx.geometry.floor_area_m2);
    tracing::debug!(governing_capacity_t, allowance = allowance.0, mass = mass.0, "bracing");

    BracingResult {
        governing_capacity_t,
        allowance,
        mass,
    }
}
