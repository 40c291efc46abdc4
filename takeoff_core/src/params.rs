//! # Building and Span Parameters
//!
//! Input value objects for one estimate: a single [`BuildingParameters`] for
//! the whole frame and one [`SpanParameters`] per bay across the width.
//!
//! All lengths are metres, load intensities kN/m², crane capacities tonnes.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "building_length_m": 120.0,
//!   "truss_spacing_m": 6.0,
//!   "column_spacing_m": 12.0,
//!   "rail_elevation_m": 8.0,
//!   "snow_load": 2.1,
//!   "dust_load": 0.0,
//!   "roof_load": 0.65,
//!   "purlin_load": 0.35,
//!   "importance_factor": 1.0,
//!   "has_framing_post": false,
//!   "rigid_beam_load_kn": 0.0,
//!   "building_use": "MainProduction"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Enumerated choices
// ============================================================================

/// Column spacing along the building length.
///
/// Only the two standard grids are supported. Serialized as the spacing in
/// metres (`6` or `12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "f64", into = "f64")]
pub enum ColumnSpacing {
    /// 6 m grid
    Six,
    /// 12 m grid
    #[default]
    Twelve,
}

impl ColumnSpacing {
    /// All spacings for UI selection
    pub const ALL: [ColumnSpacing; 2] = [ColumnSpacing::Six, ColumnSpacing::Twelve];

    /// Spacing in metres
    pub fn meters(&self) -> f64 {
        match self {
            ColumnSpacing::Six => 6.0,
            ColumnSpacing::Twelve => 12.0,
        }
    }
}

impl TryFrom<f64> for ColumnSpacing {
    type Error = CalcError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 6.0 {
            Ok(ColumnSpacing::Six)
        } else if value == 12.0 {
            Ok(ColumnSpacing::Twelve)
        } else {
            Err(CalcError::invalid_input(
                "column_spacing_m",
                value.to_string(),
                "Column spacing must be 6 or 12 m",
            ))
        }
    }
}

impl From<ColumnSpacing> for f64 {
    fn from(spacing: ColumnSpacing) -> Self {
        spacing.meters()
    }
}

impl std::fmt::Display for ColumnSpacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters())
    }
}

/// Roof truss family.
///
/// Each family has its own table of truss masses. Only angle-section trusses
/// have a closed-form (Method 1) estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum TrussFamily {
    /// Paired angle sections
    #[default]
    Angles,
    /// Wide-flange I-section chords
    IBeams,
    /// Closed bent-welded tube sections ("Molodechno" type)
    Molodechno,
}

impl TrussFamily {
    /// All families for UI selection
    pub const ALL: [TrussFamily; 3] = [TrussFamily::Angles, TrussFamily::IBeams, TrussFamily::Molodechno];

    /// Whether the closed-form Method-1 estimate applies
    pub fn has_closed_form(&self) -> bool {
        matches!(self, TrussFamily::Angles)
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            TrussFamily::Angles => "Angles",
            TrussFamily::IBeams => "I-beams",
            TrussFamily::Molodechno => "Molodechno",
        }
    }
}

impl std::fmt::Display for TrussFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Crane duty group, scaling the tabulated crane-beam and brake allowances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CraneDuty {
    /// Light and medium duty, groups 1K-6K: ×1.00
    #[default]
    Light,
    /// Heavy duty, groups 7K-8K: ×1.15
    Heavy,
}

impl CraneDuty {
    /// All duty groups for UI selection
    pub const ALL: [CraneDuty; 2] = [CraneDuty::Light, CraneDuty::Heavy];

    /// Duty-mode multiplier
    pub fn factor(&self) -> f64 {
        match self {
            CraneDuty::Light => 1.00,
            CraneDuty::Heavy => 1.15,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CraneDuty::Light => "Duty 1K-6K (1.00)",
            CraneDuty::Heavy => "Duty 7K-8K (1.15)",
        }
    }
}

impl std::fmt::Display for CraneDuty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Building-use category; drives the pipe-support allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildingUse {
    /// Main production buildings: 11-22 kg/m²
    #[default]
    MainProduction,
    /// Energy-supply buildings (boiler houses, compressor stations): 23-40 kg/m²
    EnergySupply,
    /// Auxiliary buildings: 2-4 kg/m²
    Auxiliary,
}

impl BuildingUse {
    /// All categories for UI selection
    pub const ALL: [BuildingUse; 3] = [
        BuildingUse::MainProduction,
        BuildingUse::EnergySupply,
        BuildingUse::Auxiliary,
    ];

    /// Tabulated pipe-support allowance range (kg/m²)
    pub fn pipe_support_range(&self) -> (f64, f64) {
        match self {
            BuildingUse::MainProduction => (11.0, 22.0),
            BuildingUse::EnergySupply => (23.0, 40.0),
            BuildingUse::Auxiliary => (2.0, 4.0),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingUse::MainProduction => "Main production",
            BuildingUse::EnergySupply => "Energy supply",
            BuildingUse::Auxiliary => "Auxiliary",
        }
    }
}

impl std::fmt::Display for BuildingUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Roof build-up layer with its unit weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofLayer {
    /// Profiled sheet H-75, t = 0.8 mm
    ProfiledSheetH75,
    /// Profiled sheet H-60, t = 0.7 mm
    ProfiledSheetH60,
    /// Profiled sheet HC-35, t = 0.7 mm
    ProfiledSheetHc35,
    /// Mineral wool insulation, 200 mm
    MineralWool200,
    /// Mineral wool insulation, 150 mm
    MineralWool150,
    /// PIR insulation board, 150 mm
    Pir150,
    /// Vapour barrier film
    VapourBarrier,
    /// Single-ply waterproofing membrane
    Membrane,
    /// Two-layer bitumen roofing
    Bitumen2Layer,
    /// Cement screed, 30 mm
    CementScreed30,
    /// Roof sandwich panel, 200 mm
    SandwichPanel200,
}

impl RoofLayer {
    /// All layers for UI selection
    pub const ALL: [RoofLayer; 11] = [
        RoofLayer::ProfiledSheetH75,
        RoofLayer::ProfiledSheetH60,
        RoofLayer::ProfiledSheetHc35,
        RoofLayer::MineralWool200,
        RoofLayer::MineralWool150,
        RoofLayer::Pir150,
        RoofLayer::VapourBarrier,
        RoofLayer::Membrane,
        RoofLayer::Bitumen2Layer,
        RoofLayer::CementScreed30,
        RoofLayer::SandwichPanel200,
    ];

    /// Unit weight (kN/m²)
    pub fn unit_weight(&self) -> f64 {
        match self {
            RoofLayer::ProfiledSheetH75 => 0.10,
            RoofLayer::ProfiledSheetH60 => 0.08,
            RoofLayer::ProfiledSheetHc35 => 0.06,
            RoofLayer::MineralWool200 => 0.05,
            RoofLayer::MineralWool150 => 0.04,
            RoofLayer::Pir150 => 0.03,
            RoofLayer::VapourBarrier => 0.01,
            RoofLayer::Membrane => 0.02,
            RoofLayer::Bitumen2Layer => 0.06,
            RoofLayer::CementScreed30 => 0.60,
            RoofLayer::SandwichPanel200 => 0.15,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RoofLayer::ProfiledSheetH75 => "Profiled sheet H-75 (t=0.8 mm)",
            RoofLayer::ProfiledSheetH60 => "Profiled sheet H-60 (t=0.7 mm)",
            RoofLayer::ProfiledSheetHc35 => "Profiled sheet HC-35 (t=0.7 mm)",
            RoofLayer::MineralWool200 => "Mineral wool 200 mm",
            RoofLayer::MineralWool150 => "Mineral wool 150 mm",
            RoofLayer::Pir150 => "PIR board 150 mm",
            RoofLayer::VapourBarrier => "Vapour barrier film",
            RoofLayer::Membrane => "Single-ply membrane",
            RoofLayer::Bitumen2Layer => "Bitumen roofing, 2 layers",
            RoofLayer::CementScreed30 => "Cement screed 30 mm",
            RoofLayer::SandwichPanel200 => "Roof sandwich panel 200 mm",
        }
    }
}

impl std::fmt::Display for RoofLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sum a roof build-up into a roof load intensity (kN/m²).
///
/// Each entry is a layer and the number of times it occurs.
///
/// ```rust
/// use takeoff_core::params::{roof_load_from_layers, RoofLayer};
///
/// let q = roof_load_from_layers(&[
///     (RoofLayer::ProfiledSheetH75, 1),
///     (RoofLayer::MineralWool200, 1),
///     (RoofLayer::Membrane, 1),
/// ]);
/// assert!((q - 0.17).abs() < 1e-9);
/// ```
pub fn roof_load_from_layers(layers: &[(RoofLayer, u32)]) -> f64 {
    layers
        .iter()
        .map(|(layer, count)| layer.unit_weight() * f64::from(*count))
        .sum()
}

// ============================================================================
// Building parameters
// ============================================================================

/// Global parameters of the building, shared by every span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingParameters {
    /// Overall building length (m)
    pub building_length_m: f64,

    /// Roof truss spacing along the length (m)
    pub truss_spacing_m: f64,

    /// Column spacing along the length
    pub column_spacing_m: ColumnSpacing,

    /// Crane rail head elevation (m)
    pub rail_elevation_m: f64,

    /// Optional total column height; replaces the computed height when larger (m)
    #[serde(default)]
    pub column_height_override_m: Option<f64>,

    /// Snow load (kN/m²)
    pub snow_load: f64,

    /// Industrial dust load (kN/m²)
    pub dust_load: f64,

    /// Roof build-up load (kN/m²)
    pub roof_load: f64,

    /// Purlin self-weight (kN/m²)
    pub purlin_load: f64,

    /// Technological load from services and equipment hung from the roof (kN/m²)
    #[serde(default)]
    pub tech_load: f64,

    /// Responsibility (importance) factor γn
    pub importance_factor: f64,

    /// Intermediate wall-framing posts present
    pub has_framing_post: bool,

    /// Load on the wall-framing rigid beam (kN)
    pub rigid_beam_load_kn: f64,

    /// Building-use category
    pub building_use: BuildingUse,
}

impl Default for BuildingParameters {
    fn default() -> Self {
        BuildingParameters {
            building_length_m: 120.0,
            truss_spacing_m: 6.0,
            column_spacing_m: ColumnSpacing::Twelve,
            rail_elevation_m: 8.0,
            column_height_override_m: None,
            snow_load: 2.1,
            dust_load: 0.0,
            roof_load: 0.65,
            purlin_load: 0.35,
            tech_load: 0.0,
            importance_factor: 1.0,
            has_framing_post: false,
            rigid_beam_load_kn: 0.0,
            building_use: BuildingUse::MainProduction,
        }
    }
}

impl BuildingParameters {
    /// Sum of roof, purlin, snow, dust and technological loads (kN/m²)
    pub fn roof_load_total(&self) -> f64 {
        self.roof_load + self.purlin_load + self.snow_load + self.dust_load + self.tech_load
    }

    /// Roof load including the connection allowance, as carried by trusses (kN/m²)
    pub fn truss_load_total(&self) -> f64 {
        self.roof_load_total() + crate::coefficients::CONNECTION_ALLOWANCE
    }

    /// Column spacing in metres
    pub fn column_spacing(&self) -> f64 {
        self.column_spacing_m.meters()
    }

    /// Validate input parameters.
    ///
    /// The estimator itself does not call this; it is the check an input
    /// collector runs before handing parameters over.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("building_length_m", self.building_length_m),
            ("truss_spacing_m", self.truss_spacing_m),
            ("rail_elevation_m", self.rail_elevation_m),
            ("importance_factor", self.importance_factor),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }

        let non_negative = [
            ("snow_load", self.snow_load),
            ("dust_load", self.dust_load),
            ("roof_load", self.roof_load),
            ("purlin_load", self.purlin_load),
            ("tech_load", self.tech_load),
            ("rigid_beam_load_kn", self.rigid_beam_load_kn),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
            }
        }

        if let Some(h) = self.column_height_override_m {
            if h < 0.0 {
                return Err(CalcError::invalid_input(
                    "column_height_override_m",
                    h.to_string(),
                    "Override height cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Span parameters
// ============================================================================

/// Parameters of one bay across the building width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanParameters {
    /// Truss span (m)
    pub span_m: f64,

    /// Truss family
    pub truss_family: TrussFamily,

    /// Rated crane capacity (t)
    pub crane_capacity_t: f64,

    /// Number of cranes in the span (1 or 2)
    pub crane_count: u8,

    /// Walkway along the crane rail
    pub with_passage: bool,

    /// Crane duty group
    #[serde(default)]
    pub crane_duty: CraneDuty,
}

impl Default for SpanParameters {
    fn default() -> Self {
        SpanParameters {
            span_m: 24.0,
            truss_family: TrussFamily::Angles,
            crane_capacity_t: 50.0,
            crane_count: 1,
            with_passage: true,
            crane_duty: CraneDuty::Light,
        }
    }
}

impl SpanParameters {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.span_m > 0.0) || !self.span_m.is_finite() {
            return Err(CalcError::invalid_input(
                "span_m",
                self.span_m.to_string(),
                "Span must be positive",
            ));
        }
        if !(self.crane_capacity_t > 0.0) || !self.crane_capacity_t.is_finite() {
            return Err(CalcError::invalid_input(
                "crane_capacity_t",
                self.crane_capacity_t.to_string(),
                "Crane capacity must be positive",
            ));
        }
        if !(1..=2).contains(&self.crane_count) {
            return Err(CalcError::invalid_input(
                "crane_count",
                self.crane_count.to_string(),
                "Crane count must be 1 or 2",
            ));
        }
        Ok(())
    }

    /// Whether two cranes share the span
    pub fn is_double_crane(&self) -> bool {
        self.crane_count >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_spacing_serialization() {
        let json = serde_json::to_string(&ColumnSpacing::Twelve).unwrap();
        assert_eq!(json, "12.0");
        let six: ColumnSpacing = serde_json::from_str("6").unwrap();
        assert_eq!(six, ColumnSpacing::Six);
        assert!(serde_json::from_str::<ColumnSpacing>("9").is_err());
    }

    #[test]
    fn test_default_building_roundtrip() {
        let params = BuildingParameters::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let roundtrip: BuildingParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, roundtrip);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "building_length_m": 60.0,
            "truss_spacing_m": 6.0,
            "column_spacing_m": 6,
            "rail_elevation_m": 8.0,
            "snow_load": 1.5,
            "dust_load": 0.0,
            "roof_load": 0.5,
            "purlin_load": 0.3,
            "importance_factor": 1.0,
            "has_framing_post": true,
            "rigid_beam_load_kn": 0.0,
            "building_use": "Auxiliary"
        }"#;
        let params: BuildingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.tech_load, 0.0);
        assert_eq!(params.column_height_override_m, None);
        assert_eq!(params.column_spacing_m, ColumnSpacing::Six);
    }

    #[test]
    fn test_load_totals() {
        let params = BuildingParameters {
            tech_load: 0.4,
            ..BuildingParameters::default()
        };
        // 0.65 + 0.35 + 2.1 + 0 + 0.4
        assert!((params.roof_load_total() - 3.5).abs() < 1e-9);
        assert!((params.truss_load_total() - 3.55).abs() < 1e-9);
    }

    #[test]
    fn test_building_validation() {
        assert!(BuildingParameters::default().validate().is_ok());

        let mut params = BuildingParameters::default();
        params.building_length_m = 0.0;
        assert!(params.validate().is_err());

        let mut params = BuildingParameters::default();
        params.snow_load = -1.0;
        assert!(params.validate().is_err());

        let mut params = BuildingParameters::default();
        params.importance_factor = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_span_validation() {
        assert!(SpanParameters::default().validate().is_ok());

        let mut span = SpanParameters::default();
        span.crane_count = 3;
        assert!(span.validate().is_err());

        let mut span = SpanParameters::default();
        span.span_m = -18.0;
        assert!(span.validate().is_err());
    }

    #[test]
    fn test_crane_duty_factor() {
        assert_eq!(CraneDuty::Light.factor(), 1.0);
        assert_eq!(CraneDuty::Heavy.factor(), 1.15);
    }

    #[test]
    fn test_pipe_support_ranges() {
        for category in BuildingUse::ALL {
            let (lo, hi) = category.pipe_support_range();
            assert!(lo < hi);
        }
    }

    #[test]
    fn test_roof_layers() {
        assert_eq!(roof_load_from_layers(&[]), 0.0);
        let q = roof_load_from_layers(&[(RoofLayer::CementScreed30, 2), (RoofLayer::VapourBarrier, 1)]);
        assert!((q - 1.21).abs() < 1e-9);
    }
}
