//! # Unit Types
//!
//! Thin newtype wrappers for the quantities that leave the engine. Inputs
//! stay plain `f64` in metres and kN/m² so that parameter files read the way
//! an engineer writes them; results are reported in tonnes and kg/m².
//!
//! ## SI Units
//!
//! - Length: metres (m)
//! - Force: kilonewtons (kN)
//! - Load intensity: kN/m²
//! - Mass: kilograms (kg), tonnes (t)
//! - Steel allowance: kg per m² of floor (or wall) area
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Kilograms, KgPerM2, Kilonewtons, Tonnes};
//!
//! let beam: Tonnes = Kilograms(1500.0).into();
//! assert_eq!(beam.0, 1.5);
//!
//! let allowance = KgPerM2(25.0);
//! assert_eq!(allowance.over_area(1000.0), Tonnes(25.0));
//!
//! let weight = Kilonewtons(98.1);
//! assert!((weight.to_tonnes().0 - 10.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

use crate::coefficients::GRAVITY;

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * 1000.0)
    }
}

impl Tonnes {
    /// Spread this mass over an area, giving a kg/m² allowance.
    ///
    /// A zero area yields a zero allowance rather than infinity.
    pub fn per_area(self, area_m2: f64) -> KgPerM2 {
        if area_m2 > 0.0 {
            KgPerM2(self.0 * 1000.0 / area_m2)
        } else {
            KgPerM2(0.0)
        }
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force (or self-weight) in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl Kilonewtons {
    /// Mass that weighs this much under standard gravity
    pub fn to_tonnes(self) -> Tonnes {
        Tonnes(self.0 / GRAVITY)
    }
}

// ============================================================================
// Allowance Units
// ============================================================================

/// Steel allowance in kilograms per square metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM2(pub f64);

impl KgPerM2 {
    /// Total mass of this allowance applied over an area
    pub fn over_area(self, area_m2: f64) -> Tonnes {
        Tonnes(self.0 * area_m2 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Tonnes);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(KgPerM2);
