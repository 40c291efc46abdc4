//! # Engine Coefficients
//!
//! Fixed material, safety and geometry coefficients used by the closed-form
//! estimates. Grouped by the estimator that consumes them.
//!
//! | Group        | Coefficient                 | Value   |
//! |--------------|-----------------------------|---------|
//! | General      | Standard gravity            | 9.81    |
//! | General      | Connection allowance        | 0.05    |
//! | Purlins      | Purlin spacing (m)          | 3.0     |
//! | Trusses      | Load factor                 | 1.4     |
//! | Sub-trusses  | Reaction clamp (kN)         | 100-400 |
//! | Crane beams  | Dynamic factor              | 1.4     |
//! | Columns      | Steel design strength (kPa) | 24000   |

/// Standard gravity, kN per tonne
pub const GRAVITY: f64 = 9.81;

/// Allowance for connections and bracing self-weight added to roof loads (kN/m²)
pub const CONNECTION_ALLOWANCE: f64 = 0.05;

// ============================================================================
// Purlins
// ============================================================================

/// Purlin spacing along the truss top chord (m)
pub const PURLIN_SPACING: f64 = 3.0;

/// Bays up to this span use the short-span purlin mass (m)
pub const PURLIN_SHORT_SPAN_LIMIT: f64 = 6.0;

/// Extra purlin lines per span (ridge, eaves, skylight edges)
pub const PURLIN_EXTRA_LINES: f64 = 3.0;

// ============================================================================
// Trusses (Method 1, angle-section trusses)
// ============================================================================

/// Self-weight term added to the per-length load (MN/m)
pub const TRUSS_SELF_WEIGHT_TERM: f64 = 0.018;

/// Load safety factor
pub const TRUSS_LOAD_FACTOR: f64 = 1.4;

/// Section utilisation
pub const TRUSS_UTILISATION: f64 = 0.85;

// ============================================================================
// Bracing
// ============================================================================

/// Crane capacity separating light and heavy bracing allowances (t)
pub const BRACING_CAPACITY_THRESHOLD: f64 = 120.0;

/// Truss spacing separating the narrow and wide bracing allowances (m)
pub const BRACING_SPACING_THRESHOLD: f64 = 6.0;

// ============================================================================
// Sub-trusses
// ============================================================================

/// Reaction range over which the Method-1 allowance is linear (kN)
pub const SUBTRUSS_REACTION_MIN: f64 = 100.0;
pub const SUBTRUSS_REACTION_MAX: f64 = 400.0;

/// Method-1 allowance: `BASE + SLOPE · (R − R_min)` (t/m²)
pub const SUBTRUSS_ALLOWANCE_BASE: f64 = 0.044;
pub const SUBTRUSS_ALLOWANCE_SLOPE: f64 = 0.0002;

/// Sub-truss span (m)
pub const SUBTRUSS_SPAN: f64 = 12.0;

// ============================================================================
// Crane beams
// ============================================================================

/// Dynamic factor on crane-beam self-weight
pub const CRANE_BEAM_DYNAMIC_FACTOR: f64 = 1.4;

/// Impact factor on the vertical crane wheel reaction
pub const CRANE_IMPACT_FACTOR: f64 = 1.1;

/// Crane capacity separating the low and high crane-beam tables (t)
pub const CRANE_TABLE_SPLIT: f64 = 50.0;

// ============================================================================
// Columns
// ============================================================================

/// Unit weight of steel (kN/m³)
pub const STEEL_UNIT_WEIGHT: f64 = 78.5;

/// Steel design strength (kN/m²)
pub const STEEL_DESIGN_STRENGTH: f64 = 24000.0;

/// Slenderness coefficient of the upper (roof-level) segment
pub const UPPER_SLENDERNESS: f64 = 1.4;

/// Slenderness coefficient of the lower (crane-level) segment
pub const LOWER_SLENDERNESS: f64 = 2.1;

/// Moment coefficient of the upper segment
pub const UPPER_MOMENT_COEFFICIENT: f64 = 0.275;

/// Moment coefficient of the lower segment
pub const LOWER_MOMENT_COEFFICIENT: f64 = 0.45;

/// Wall cladding self-weight (kN/m²)
pub const WALL_WEIGHT: f64 = 0.25;

/// Share of wall area taken by openings
pub const WALL_OPENING_RATIO: f64 = 0.15;

/// Rail height above the crane-beam top flange (m)
pub const RAIL_HEIGHT: f64 = 0.12;

/// Clearance between rail head and roof structure (m)
pub const CRANE_CLEARANCE: f64 = 0.3;

/// Minimum height of the upper column segment (m)
pub const MIN_UPPER_SEGMENT_HEIGHT: f64 = 1.5;

// ============================================================================
// Wall framing
// ============================================================================

/// Rigid-beam load bands (kN): `≤ 0`, `≤ 100`, above
pub const FRAMING_LOAD_BANDS: [f64; 2] = [0.0, 100.0];

/// Building height bands (m): `≤ 10`, `≤ 20`, above
pub const FRAMING_HEIGHT_BANDS: [f64; 2] = [10.0, 20.0];
