//! # Lookup Tables
//!
//! All tabulated allowances used by the estimators, collected into one
//! immutable [`LookupTables`] value. The engine borrows it for the duration of
//! a call and never mutates it.
//!
//! [`LookupTables::standard()`] returns the built-in tables, constructed once
//! per process.
//!
//! ## Contents
//!
//! | Table                 | Keyed by                                  | Unit       |
//! |-----------------------|-------------------------------------------|------------|
//! | `purlins`             | line load on the purlin                   | kg/purlin  |
//! | `crane_beam_alpha`    | crane capacity                            | kN/m²      |
//! | `rail_weight`         | crane capacity                            | kN/m       |
//! | `crane_wheel_load`    | crane capacity                            | kN/m       |
//! | `beam_height_ratio`   | crane capacity (nearest)                  | h/L        |
//! | `truss_masses`        | family, span, per-length load             | t/truss    |
//! | `subtruss_masses`     | support reaction                          | t/sub-truss|
//! | `crane_beams_*`       | column spacing, capacity tier, crane count| kg/m       |
//! | `brakes_*`            | column spacing, row position, passage     | kg/m       |
//! | `wall_framing`        | framing type, load band, height band      | kg/m² wall |

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::lookup::{CeilingTable, LookupTable};
use crate::params::TrussFamily;

/// One purlin load tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlinProfile {
    /// Profile designation
    pub name: String,
    /// Mass of one purlin on a bay up to 6 m (kg)
    pub short_span_kg: f64,
    /// Mass of one purlin on a longer bay (kg)
    pub long_span_kg: f64,
}

/// Crane-beam height as a fraction of its span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamHeightRatio {
    /// Ratio for column spacing up to 6 m
    pub short_grid: f64,
    /// Ratio for wider column spacing
    pub long_grid: f64,
}

/// Tabulated crane-beam allowance for one capacity range.
///
/// Each row holds two columns per capacity tier: single crane, then two cranes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneBeamTable {
    /// Capacity tiers in column order (t)
    pub capacities: Vec<f64>,
    /// Beam span (column spacing) → row of allowances (kg/m)
    pub rows: CeilingTable<Vec<f64>>,
}

impl CraneBeamTable {
    /// Allowance for a crane of `capacity_t`, matched to the nearest tier.
    ///
    /// `None` when the row has no column for the selected tier.
    pub fn allowance(&self, beam_span_m: f64, capacity_t: f64, double_crane: bool) -> Option<f64> {
        let row = self.rows.ceiling(beam_span_m);
        let tier = self
            .capacities
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - capacity_t).abs().total_cmp(&(b.1 - capacity_t).abs()))
            .map(|(i, _)| i)?;
        let column = tier * 2 + usize::from(double_crane);
        row.get(column).copied()
    }
}

/// One brake-structure row for a given column spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakeEntry {
    /// Edge (true) or interior (false) column row
    pub edge: bool,
    /// Walkway along the rail
    pub passage: bool,
    /// Allowance with one crane (kg/m)
    pub single: f64,
    /// Allowance with two cranes (kg/m)
    pub double: f64,
}

/// Tabulated brake-structure allowance for one capacity range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakeTable {
    /// Column spacing → entries for every row position / passage combination
    pub rows: CeilingTable<Vec<BrakeEntry>>,
}

impl BrakeTable {
    /// Allowance for a row position and passage option.
    ///
    /// Falls back to the first entry at the selected spacing when the exact
    /// combination is not tabulated; `None` only if that spacing has no entries.
    pub fn allowance(&self, beam_span_m: f64, edge: bool, passage: bool, double_crane: bool) -> Option<f64> {
        let entries = self.rows.ceiling(beam_span_m);
        let entry = entries
            .iter()
            .find(|e| e.edge == edge && e.passage == passage)
            .or_else(|| entries.first())?;
        Some(if double_crane { entry.double } else { entry.single })
    }
}

/// Wall-framing layout type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FramingType {
    /// 6 m column grid without intermediate posts
    I,
    /// 12 m column grid
    II,
    /// 6 m column grid with intermediate posts
    III,
}

/// Composite key into the wall-framing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FramingKey {
    pub framing_type: FramingType,
    /// 0: no rigid-beam load, 1: ≤ 100 kN, 2: above
    pub load_band: u8,
    /// 0: ≤ 10 m, 1: ≤ 20 m, 2: above
    pub height_band: u8,
}

/// Roof-bracing allowances (kg/m² of floor).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracingAllowances {
    /// Light cranes, truss spacing ≤ 6 m
    pub light_narrow: f64,
    /// Light cranes, wider truss spacing
    pub light_wide: f64,
    /// Heavy cranes, truss spacing ≤ 6 m
    pub heavy_narrow: f64,
    /// Heavy cranes, wider truss spacing
    pub heavy_wide: f64,
}

/// Every table the estimators read.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTables {
    /// Maximum purlin line load (t/m) → profile
    pub purlins: CeilingTable<PurlinProfile>,
    /// Crane capacity (t) → crane-beam self-weight coefficient
    pub crane_beam_alpha: LookupTable,
    /// Crane capacity (t) → rail self-weight (kN/m)
    pub rail_weight: LookupTable,
    /// Crane capacity (t) → equivalent vertical wheel load (kN/m)
    pub crane_wheel_load: LookupTable,
    /// Crane capacity (t) → crane-beam height ratio (read by nearest capacity)
    pub beam_height_ratio: CeilingTable<BeamHeightRatio>,
    /// Truss per-length load breakpoints (t/m), shared by every family curve
    pub truss_load_breakpoints: Vec<f64>,
    /// Family → span (m) → truss mass curve over `truss_load_breakpoints` (t)
    pub truss_masses: BTreeMap<TrussFamily, CeilingTable<Vec<f64>>>,
    /// Sub-truss reaction breakpoints (t)
    pub subtruss_load_breakpoints: Vec<f64>,
    /// Sub-truss mass per reaction breakpoint (t)
    pub subtruss_masses: Vec<f64>,
    /// Crane beams for cranes up to 50 t
    pub crane_beams_low: CraneBeamTable,
    /// Crane beams for heavier cranes
    pub crane_beams_high: CraneBeamTable,
    /// Brake structures for cranes up to 50 t
    pub brakes_low: BrakeTable,
    /// Brake structures for heavier cranes
    pub brakes_high: BrakeTable,
    /// Wall-framing allowance (kg/m² of wall)
    pub wall_framing: HashMap<FramingKey, f64>,
    /// Roof-bracing allowances
    pub bracing: BracingAllowances,
}

static STANDARD: Lazy<LookupTables> = Lazy::new(LookupTables::build_standard);

impl LookupTables {
    /// Built-in tables, constructed once per process.
    pub fn standard() -> &'static LookupTables {
        &STANDARD
    }

    fn build_standard() -> LookupTables {
        LookupTables {
            purlins: CeilingTable::from_sorted(
                [
                    (0.45, 110.4, 220.8, "Channel 20"),
                    (0.65, 126.0, 252.0, "Channel 22"),
                    (0.90, 144.0, 288.0, "Channel 24"),
                    (1.25, 166.2, 332.4, "Channel 27"),
                    (1.70, 190.8, 381.6, "Channel 30"),
                    (2.50, 220.8, 441.6, "2×Channel 20"),
                ]
                .into_iter()
                .map(|(load, short, long, name)| {
                    (
                        load,
                        PurlinProfile {
                            name: name.to_string(),
                            short_span_kg: short,
                            long_span_kg: long,
                        },
                    )
                })
                .collect(),
            ),
            crane_beam_alpha: capacity_table(&[
                0.08, 0.09, 0.12, 0.15, 0.18, 0.22, 0.26, 0.30, 0.36, 0.40, 0.45,
            ]),
            rail_weight: capacity_table(&[
                0.461, 0.461, 0.461, 0.598, 0.598, 0.831, 1.135, 1.135, 1.135, 1.417, 1.417,
            ]),
            crane_wheel_load: capacity_table(&[
                8.0, 12.0, 20.0, 28.0, 38.0, 55.0, 68.0, 80.0, 105.0, 145.0, 175.0,
            ]),
            beam_height_ratio: CeilingTable::from_sorted(
                [
                    (20.0, 7.0, 9.0),
                    (32.0, 7.0, 9.0),
                    (50.0, 6.0, 8.5),
                    (80.0, 6.0, 7.5),
                    (100.0, 6.0, 7.0),
                    (125.0, 6.0, 7.0),
                    (160.0, 6.0, 7.0),
                    (200.0, 6.0, 7.0),
                ]
                .into_iter()
                .map(|(q, short, long)| {
                    (
                        q,
                        BeamHeightRatio {
                            short_grid: 1.0 / short,
                            long_grid: 1.0 / long,
                        },
                    )
                })
                .collect(),
            ),
            truss_load_breakpoints: (0..22).map(|i| 2.0 + 0.5 * f64::from(i)).collect(),
            truss_masses: truss_masses(),
            subtruss_load_breakpoints: vec![
                18.0, 36.0, 54.0, 72.0, 81.0, 108.0, 126.0, 144.0, 162.0, 180.0, 198.0, 216.0, 234.0, 255.0,
            ],
            subtruss_masses: vec![
                1.57, 2.22, 2.31, 2.72, 2.72, 4.59, 5.32, 5.32, 5.70, 5.80, 6.30, 6.30, 6.53, 6.71,
            ],
            crane_beams_low: CraneBeamTable {
                capacities: vec![5.0, 10.0, 20.0, 32.0, 50.0],
                rows: CeilingTable::from_sorted(vec![
                    (6.0, vec![80.0, 85.0, 90.0, 190.0, 200.0, 100.0, 240.0, 250.0, 105.0, 140.0]),
                    (12.0, vec![150.0, 160.0, 320.0, 350.0, 180.0, 200.0, 390.0, 440.0, 220.0, 470.0]),
                ]),
            },
            crane_beams_high: CraneBeamTable {
                capacities: vec![80.0, 100.0, 125.0, 200.0, 400.0],
                rows: CeilingTable::from_sorted(vec![
                    (12.0, vec![290.0, 320.0, 380.0, 940.0, 980.0, 300.0, 330.0, 500.0, 350.0, 540.0]),
                    (18.0, vec![460.0, 480.0, 500.0, 1020.0, 1080.0, 490.0, 520.0, 540.0, 1120.0, 1180.0]),
                    (24.0, vec![680.0, 720.0, 780.0, 1040.0, 1120.0, 820.0, 920.0, 1620.0, 1840.0, 880.0]),
                ]),
            },
            brakes_low: BrakeTable {
                rows: CeilingTable::from_sorted(vec![
                    (6.0, brake_row([(100.0, 110.0), (65.0, 70.0), (120.0, 140.0), (70.0, 75.0)])),
                    (12.0, brake_row([(100.0, 120.0), (65.0, 70.0), (100.0, 120.0), (70.0, 75.0)])),
                ]),
            },
            brakes_high: BrakeTable {
                rows: CeilingTable::from_sorted(vec![
                    (12.0, brake_row([(120.0, 140.0), (80.0, 100.0), (140.0, 160.0), (60.0, 80.0)])),
                    (18.0, brake_row([(120.0, 140.0), (80.0, 100.0), (140.0, 160.0), (80.0, 100.0)])),
                    (24.0, brake_row([(220.0, 240.0), (140.0, 160.0), (220.0, 240.0), (140.0, 160.0)])),
                ]),
            },
            wall_framing: wall_framing(),
            bracing: BracingAllowances {
                light_narrow: 15.0,
                light_wide: 35.0,
                heavy_narrow: 40.0,
                heavy_wide: 55.0,
            },
        }
    }

    /// Crane-beam table for a crane capacity
    pub fn crane_beams_for(&self, capacity_t: f64) -> &CraneBeamTable {
        if capacity_t <= crate::coefficients::CRANE_TABLE_SPLIT {
            &self.crane_beams_low
        } else {
            &self.crane_beams_high
        }
    }

    /// Brake table for a crane capacity
    pub fn brakes_for(&self, capacity_t: f64) -> &BrakeTable {
        if capacity_t <= crate::coefficients::CRANE_TABLE_SPLIT {
            &self.brakes_low
        } else {
            &self.brakes_high
        }
    }

    /// Largest crane capacity covered by the capacity-indexed tables (t)
    pub fn max_crane_capacity(&self) -> f64 {
        self.crane_beam_alpha.max_breakpoint()
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        LookupTables::standard().clone()
    }
}

const CRANE_CAPACITIES: [f64; 11] = [5.0, 10.0, 20.0, 32.0, 50.0, 80.0, 100.0, 125.0, 200.0, 320.0, 400.0];

fn capacity_table(values: &[f64; 11]) -> LookupTable {
    CeilingTable::from_sorted(CRANE_CAPACITIES.iter().copied().zip(values.iter().copied()).collect())
}

/// Entries in the order (edge, passage), (edge, none), (interior, passage), (interior, none).
fn brake_row(values: [(f64, f64); 4]) -> Vec<BrakeEntry> {
    let keys = [(true, true), (true, false), (false, true), (false, false)];
    keys.into_iter()
        .zip(values)
        .map(|((edge, passage), (single, double))| BrakeEntry {
            edge,
            passage,
            single,
            double,
        })
        .collect()
}

fn truss_masses() -> BTreeMap<TrussFamily, CeilingTable<Vec<f64>>> {
    let angles = vec![
        (18.0, vec![2.16, 2.16, 2.34, 2.45, 2.68, 2.68, 2.83, 2.91, 3.17, 3.64, 3.64, 3.77, 3.95, 3.95, 4.10, 4.10, 4.51, 4.51, 4.51, 5.26, 5.26, 5.26]),
        (24.0, vec![2.30, 3.16, 3.94, 3.97, 4.29, 5.75, 5.75, 6.28, 6.28, 6.28, 6.53, 6.53, 6.90, 7.97, 8.87, 8.87, 8.87, 8.87, 8.87, 9.11, 10.45, 11.24]),
        (30.0, vec![5.20, 5.97, 6.47, 7.14, 7.14, 7.70, 9.00, 9.00, 10.20, 10.20, 10.53, 11.64, 13.63, 13.63, 14.43, 14.43, 15.25, 15.25, 16.43, 16.43, 16.43, 17.27]),
        (36.0, vec![5.90, 7.54, 10.37, 11.12, 12.30, 12.74, 13.30, 14.74, 15.66, 15.66, 18.89, 18.89, 18.89, 19.30, 21.50, 21.50, 22.52, 23.70, 24.57, 24.57, 26.30, 26.92]),
    ];
    let i_beams = vec![
        (18.0, vec![2.92, 2.92, 2.92, 2.92, 3.37, 3.92, 3.92, 3.92, 4.34, 4.34, 4.34, 4.72, 4.72, 4.72, 4.72, 4.72, 5.42, 5.42, 5.49, 5.49, 5.86, 5.86]),
        (24.0, vec![4.60, 4.60, 5.19, 5.30, 5.79, 5.79, 6.35, 6.63, 7.48, 8.31, 8.31, 8.47, 8.47, 8.63, 9.30, 9.30, 11.08, 11.08, 11.08, 11.08, 11.08, 12.10]),
        (30.0, vec![6.27, 6.38, 6.38, 8.07, 8.23, 8.90, 9.84, 9.93, 10.35, 12.99, 12.99, 12.99, 12.99, 14.89, 14.89, 14.89, 15.35, 18.68, 18.68, 18.68, 19.69, 19.69]),
        (36.0, vec![9.60, 10.20, 10.20, 11.47, 12.50, 13.49, 15.14, 15.28, 15.87, 17.18, 18.72, 21.06, 21.06, 21.06, 22.11, 22.11, 25.52, 25.52, 30.78, 31.66, 31.66, 31.85]),
    ];
    let molodechno = vec![
        (18.0, vec![1.29, 1.54, 1.58, 2.07, 2.18, 2.65, 3.40, 3.40, 3.40, 3.40, 4.08, 4.08, 4.08, 4.70, 4.83, 4.83, 5.70, 6.07, 6.07, 6.07, 6.07, 7.08]),
        (24.0, vec![2.48, 3.60, 3.85, 4.11, 5.07, 5.07, 6.18, 6.24, 6.47, 8.02, 8.02, 8.70, 9.37, 9.37, 10.00, 10.90, 10.90, 11.54, 11.54, 12.37, 13.62, 13.62]),
        (30.0, vec![5.24, 5.80, 5.80, 7.34, 7.34, 11.55, 10.40, 11.97, 11.97, 13.59, 13.59, 13.59, 15.40, 16.22, 17.70, 19.54, 19.54, 19.54, 21.37, 21.37, 21.37, 21.37]),
        (36.0, vec![7.00, 8.05, 9.20, 12.25, 13.53, 13.53, 15.96, 17.18, 17.61, 21.26, 21.26, 23.01, 24.25, 29.80, 29.80, 29.80, 29.80, 29.80, 31.57, 37.40, 37.40, 37.40]),
    ];

    BTreeMap::from([
        (TrussFamily::Angles, CeilingTable::from_sorted(angles)),
        (TrussFamily::IBeams, CeilingTable::from_sorted(i_beams)),
        (TrussFamily::Molodechno, CeilingTable::from_sorted(molodechno)),
    ])
}

fn wall_framing() -> HashMap<FramingKey, f64> {
    // [load band][height band]
    let data: [(FramingType, [[f64; 3]; 3]); 3] = [
        (FramingType::I, [[9.0, 10.0, 11.0], [9.0, 11.0, 11.0], [10.0, 12.0, 12.0]]),
        (FramingType::II, [[23.0, 25.0, 25.0], [23.0, 25.0, 25.0], [26.0, 30.0, 30.0]]),
        (FramingType::III, [[19.0, 28.0, 45.0], [19.0, 29.0, 46.0], [20.0, 30.0, 48.0]]),
    ];

    let mut map = HashMap::new();
    for (framing_type, bands) in data {
        for (load_band, row) in (0u8..).zip(bands) {
            for (height_band, value) in (0u8..).zip(row) {
                map.insert(
                    FramingKey {
                        framing_type,
                        load_band,
                        height_band,
                    },
                    value,
                );
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_are_ordered() {
        let t = LookupTables::standard();
        let ascending = |keys: Vec<f64>| keys.windows(2).all(|w| w[0] < w[1]);

        assert!(ascending(t.purlins.breakpoints().collect()));
        assert!(ascending(t.crane_beam_alpha.breakpoints().collect()));
        assert!(ascending(t.beam_height_ratio.breakpoints().collect()));
        assert!(ascending(t.truss_load_breakpoints.clone()));
        assert!(ascending(t.subtruss_load_breakpoints.clone()));
        for table in t.truss_masses.values() {
            assert!(ascending(table.breakpoints().collect()));
        }
    }

    #[test]
    fn test_truss_curves_match_breakpoints() {
        let t = LookupTables::standard();
        assert_eq!(t.truss_load_breakpoints.len(), 22);
        assert_eq!(t.truss_load_breakpoints[0], 2.0);
        assert_eq!(t.truss_load_breakpoints[21], 12.5);
        assert_eq!(t.truss_masses.len(), TrussFamily::ALL.len());
        for table in t.truss_masses.values() {
            for (_, curve) in table.entries() {
                assert_eq!(curve.len(), t.truss_load_breakpoints.len());
            }
        }
        assert_eq!(t.subtruss_masses.len(), t.subtruss_load_breakpoints.len());
    }

    #[test]
    fn test_crane_beam_allowance() {
        let t = LookupTables::standard();
        // 50 t, 12 m beam: tier 4, single crane → column 8
        assert_eq!(t.crane_beams_for(50.0).allowance(12.0, 50.0, false), Some(220.0));
        assert_eq!(t.crane_beams_for(50.0).allowance(12.0, 50.0, true), Some(470.0));
        // 6 m spacing rounds up to the 12 m row of the heavy table
        assert_eq!(t.crane_beams_for(100.0).allowance(6.0, 100.0, false), Some(380.0));
        // Beyond the heaviest tier: nearest is 400 t
        assert_eq!(t.crane_beams_for(500.0).allowance(12.0, 500.0, true), Some(540.0));
    }

    #[test]
    fn test_brake_allowance() {
        let t = LookupTables::standard();
        assert_eq!(t.brakes_for(50.0).allowance(12.0, true, true, false), Some(100.0));
        assert_eq!(t.brakes_for(50.0).allowance(6.0, false, true, true), Some(140.0));
        assert_eq!(t.brakes_for(125.0).allowance(12.0, false, false, false), Some(60.0));
    }

    #[test]
    fn test_brake_falls_back_to_first_entry_at_spacing() {
        let entry = |edge, passage, single, double| BrakeEntry {
            edge,
            passage,
            single,
            double,
        };
        let brakes = BrakeTable {
            rows: CeilingTable::new(vec![
                (6.0, vec![entry(true, true, 90.0, 95.0), entry(false, true, 60.0, 65.0)]),
                (12.0, vec![]),
            ])
            .unwrap(),
        };
        // Interior row without passage is not tabulated at 6 m
        assert_eq!(brakes.allowance(6.0, false, false, false), Some(90.0));
        assert_eq!(brakes.allowance(6.0, false, false, true), Some(95.0));
        assert_eq!(brakes.allowance(6.0, false, true, false), Some(60.0));
        // No entries at all for the 12 m spacing
        assert_eq!(brakes.allowance(12.0, true, true, false), None);
    }

    #[test]
    fn test_crane_tables_reject_empty_rows() {
        assert!(serde_json::from_str::<BrakeTable>(r#"{"rows":{"entries":[]}}"#).is_err());
        assert!(serde_json::from_str::<CraneBeamTable>(r#"{"capacities":[5.0],"rows":{"entries":[]}}"#).is_err());

        let brakes = &LookupTables::standard().brakes_low;
        let json = serde_json::to_string(brakes).unwrap();
        assert_eq!(&serde_json::from_str::<BrakeTable>(&json).unwrap(), brakes);
    }

    #[test]
    fn test_wall_framing_complete() {
        let t = LookupTables::standard();
        assert_eq!(t.wall_framing.len(), 27);
        let key = FramingKey {
            framing_type: FramingType::III,
            load_band: 2,
            height_band: 2,
        };
        assert_eq!(t.wall_framing.get(&key), Some(&48.0));
    }

    #[test]
    fn test_standard_is_shared() {
        assert!(std::ptr::eq(LookupTables::standard(), LookupTables::standard()));
    }
}
