//! # Sub-trusses
//!
//! Needed only on a 12 m column grid carrying trusses at a closer spacing:
//! every other truss lands on a sub-truss spanning between columns.
//!
//! Per span, the truss support reaction is
//!
//! ```text
//! R = g_n · B · γn · L / 2    [kN]
//! ```
//!
//! **Method 1**: `(0.044 + 0.0002 · (clamp(R, 100, 400) − 100)) · 12²` tonnes
//! per sub-truss.
//!
//! **Method 2**: the reaction in tonnes, unclamped, rounded up to the next
//! tabulated reaction and read from the sub-truss mass table.
//!
//! Sub-truss count is `L_bld / 12` per line, with one line per interior row
//! (at least one), shared equally between the spans.

use serde::{Deserialize, Serialize};

use super::context::{EstimateContext, Warnings};
use super::method::MethodValue;
use crate::coefficients::{
    GRAVITY, SUBTRUSS_ALLOWANCE_BASE, SUBTRUSS_ALLOWANCE_SLOPE, SUBTRUSS_REACTION_MAX, SUBTRUSS_REACTION_MIN,
    SUBTRUSS_SPAN,
};
use crate::lookup::{ceil_to_breakpoint, step_interpolate};
use crate::params::ColumnSpacing;
use crate::units::Tonnes;

/// Sub-truss estimate for one span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTrussSpanResult {
    pub span_index: usize,
    /// Truss support reaction (kN)
    pub reaction_kn: f64,
    /// Reaction used by Method 1 after clamping (kN)
    pub clamped_reaction_kn: f64,
    /// Sub-trusses attributed to this span
    pub count: f64,
    pub method1: MethodValue,
    pub method2: MethodValue,
}

/// Sub-trusses of the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SubTrussResult {
    /// Column grid matches the truss grid
    NotRequired,
    Required {
        /// Total sub-truss count
        count: f64,
        spans: Vec<SubTrussSpanResult>,
        method1: MethodValue,
        method2: MethodValue,
    },
}

impl SubTrussResult {
    pub fn is_required(&self) -> bool {
        matches!(self, SubTrussResult::Required { .. })
    }

    pub fn method1(&self) -> MethodValue {
        match self {
            SubTrussResult::NotRequired => MethodValue::NotApplicable,
            SubTrussResult::Required { method1, .. } => *method1,
        }
    }

    pub fn method2(&self) -> MethodValue {
        match self {
            SubTrussResult::NotRequired => MethodValue::NotApplicable,
            SubTrussResult::Required { method2, .. } => *method2,
        }
    }
}

/// Whether the column grid is coarser than the truss grid
pub fn is_required(ctx: &EstimateContext<'_>) -> bool {
    ctx.building.column_spacing_m == ColumnSpacing::Twelve && ctx.building.truss_spacing_m < ctx.building.column_spacing()
}

/// Method-1 mass of one sub-truss for a support reaction in kN
pub fn closed_form_mass(reaction_kn: f64) -> Tonnes {
    let r = reaction_kn.clamp(SUBTRUSS_REACTION_MIN, SUBTRUSS_REACTION_MAX);
    let allowance = (r - SUBTRUSS_REACTION_MIN) * SUBTRUSS_ALLOWANCE_SLOPE + SUBTRUSS_ALLOWANCE_BASE;
    Tonnes(allowance * SUBTRUSS_SPAN.powi(2))
}

pub fn estimate(ctx: &EstimateContext<'_>, warnings: &mut Warnings) -> SubTrussResult {
    if !is_required(ctx) {
        tracing::debug!("sub-trusses not required");
        return SubTrussResult::NotRequired;
    }

    let b = ctx.building;
    let n = ctx.spans.len() as f64;
    let lines = (ctx.spans.len().saturating_sub(1)).max(1) as f64;
    let count = b.building_length_m / b.column_spacing() * lines;
    let per_span = count / n;

    let loads = &ctx.tables.subtruss_load_breakpoints;
    let masses = &ctx.tables.subtruss_masses;

    let spans: Vec<SubTrussSpanResult> = ctx
        .spans
        .iter()
        .enumerate()
        .map(|(span_index, span)| {
            let reaction_kn = b.truss_load_total() * b.truss_spacing_m * b.importance_factor * span.span_m / 2.0;
            let reaction_t = reaction_kn / GRAVITY;

            let method1 = MethodValue::Applicable(closed_form_mass(reaction_kn) * per_span);

            if loads.last().is_some_and(|&max| reaction_t > max) {
                warnings.push(
                    "sub-trusses",
                    format!("span {} reaction {:.1} t exceeds the table; using the top tier", span_index + 1, reaction_t),
                );
            }
            let method2: MethodValue = ceil_to_breakpoint(loads, reaction_t)
                .map(|key| Tonnes(step_interpolate(loads, masses, key)) * per_span)
                .into();

            SubTrussSpanResult {
                span_index,
                reaction_kn,
                clamped_reaction_kn: reaction_kn.clamp(SUBTRUSS_REACTION_MIN, SUBTRUSS_REACTION_MAX),
                count: per_span,
                method1,
                method2,
            }
        })
        .collect();

    let method1 = MethodValue::accumulate(spans.iter().map(|s| s.method1));
    let method2 = MethodValue::accumulate(spans.iter().map(|s| s.method2));
    tracing::debug!(count, %method1, %method2, "sub-trusses");

    SubTrussResult::Required {
        count,
        spans,
        method1,
        method2,
    }
}
