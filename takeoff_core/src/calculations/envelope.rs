//! # Wall Framing, Cladding and Pipe Supports
//!
//! Table-driven allowances over the wall or floor area, with no formula
//! alternative.
//!
//! Wall framing is keyed by layout type, rigid-beam load band and building
//! height band:
//!
//! | Column grid | Intermediate post | Type |
//! |-------------|-------------------|------|
//! | ≤ 6 m       | no                | I    |
//! | ≤ 6 m       | yes               | III  |
//! | 12 m        | n/a               | II   |

use serde::{Deserialize, Serialize};

use super::context::{EstimateContext, Warnings};
use super::method::MethodValue;
use crate::coefficients::{FRAMING_HEIGHT_BANDS, FRAMING_LOAD_BANDS};
use crate::params::BuildingUse;
use crate::tables::{FramingKey, FramingType};
use crate::units::{KgPerM2, Tonnes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallFramingResult {
    pub key: FramingKey,
    /// Wall area, perimeter × column height (m²)
    pub wall_area_m2: f64,
    /// Tabulated allowance over the wall area, if any
    pub allowance: Option<KgPerM2>,
    pub mass: MethodValue,
}

/// Envelope areas, reported for reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CladdingResult {
    pub wall_area_m2: f64,
    pub roof_area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSupportResult {
    pub building_use: BuildingUse,
    /// Midpoint of the category's range
    pub allowance: KgPerM2,
    pub mass: Tonnes,
}

/// Number of thresholds `value` exceeds
fn band(value: f64, thresholds: &[f64]) -> u8 {
    thresholds.iter().filter(|&&t| value > t).count() as u8
}

/// Framing table key for the building
pub fn framing_key(ctx: &EstimateContext<'_>, height_m: f64) -> FramingKey {
    let b = ctx.building;
    let framing_type = match (b.column_spacing() <= 6.0, b.has_framing_post) {
        (true, true) => FramingType::III,
        (true, false) => FramingType::I,
        (false, _) => FramingType::II,
    };
    FramingKey {
        framing_type,
        load_band: band(b.rigid_beam_load_kn, &FRAMING_LOAD_BANDS),
        height_band: band(height_m, &FRAMING_HEIGHT_BANDS),
    }
}

/// Wall framing for a building of the given column height.
pub fn estimate_wall_framing(ctx: &EstimateContext<'_>, height_m: f64, warnings: &mut Warnings) -> WallFramingResult {
    let key = framing_key(ctx, height_m);
    let wall_area_m2 = ctx.geometry.perimeter_m * height_m;
    let allowance = ctx.tables.wall_framing.get(&key).copied().map(KgPerM2);

    if allowance.is_none() {
        warnings.push("wall framing", format!("no tabulated allowance for {:?}", key));
    }
    let mass: MethodValue = allowance.map(|a| a.over_area(wall_area_m2)).into();
    tracing::debug!(?key, wall_area_m2, %mass, "wall framing");

    WallFramingResult {
        key,
        wall_area_m2,
        allowance,
        mass,
    }
}

pub fn estimate_cladding(ctx: &EstimateContext<'_>, height_m: f64) -> CladdingResult {
    CladdingResult {
        wall_area_m2: ctx.geometry.perimeter_m * height_m,
        roof_area_m2: ctx.geometry.floor_area_m2,
    }
}

pub fn estimate_pipe_supports(ctx: &EstimateContext<'_>) -> PipeSupportResult {
    let building_use = ctx.building.building_use;
    let (low, high) = building_use.pipe_support_range();
    let allowance = KgPerM2((low + high) / 2.0);
    let mass = allowance.over_area(ctx.geometry.floor_area_m2);
    tracing::debug!(%building_use, allowance = allowance.0, mass = mass.0, "pipe supports");

    PipeSupportResult {
        building_use,
        allowance,
        mass,
    }
}
