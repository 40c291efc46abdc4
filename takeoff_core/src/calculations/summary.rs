//! # Hybrid Summation
//!
//! Combines the category masses into a Method-1 total and a Method-2 total.
//!
//! | Kind             | Categories                                          | Method 1 | Method 2 |
//! |------------------|-----------------------------------------------------|----------|----------|
//! | Method-invariant | purlins, columns, bracing, wall framing, pipe supports | same  | same     |
//! | Dual-method      | trusses, sub-trusses, crane beams                   | own M1   | own M2   |
//!
//! A figure marked not applicable adds zero to its own method's total.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::method::MethodValue;
use crate::units::{KgPerM2, Tonnes};

/// How a category enters the two totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    /// One figure, counted in both totals
    MethodInvariant,
    /// Separate Method-1 and Method-2 figures
    DualMethod,
}

/// Steel categories that carry mass.
///
/// Cladding is reported for reference and is not a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Purlins,
    Trusses,
    Bracing,
    SubTrusses,
    CraneBeams,
    Columns,
    WallFraming,
    PipeSupports,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Category; 8] = [
        Category::Purlins,
        Category::Trusses,
        Category::Bracing,
        Category::SubTrusses,
        Category::CraneBeams,
        Category::Columns,
        Category::WallFraming,
        Category::PipeSupports,
    ];

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Trusses | Category::SubTrusses | Category::CraneBeams => CategoryKind::DualMethod,
            Category::Purlins
            | Category::Columns
            | Category::Bracing
            | Category::WallFraming
            | Category::PipeSupports => CategoryKind::MethodInvariant,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Purlins => "Purlins",
            Category::Trusses => "Roof trusses",
            Category::Bracing => "Roof bracing",
            Category::SubTrusses => "Sub-trusses",
            Category::CraneBeams => "Crane beams and brakes",
            Category::Columns => "Columns",
            Category::WallFraming => "Wall framing",
            Category::PipeSupports => "Pipe supports",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Mass of one category under both methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub kind: CategoryKind,
    pub method1: MethodValue,
    pub method2: MethodValue,
    pub method1_per_area: KgPerM2,
    pub method2_per_area: KgPerM2,
}

impl CategoryTotals {
    /// A method-invariant category
    pub fn invariant(mass: MethodValue, floor_area_m2: f64) -> Self {
        Self::build(CategoryKind::MethodInvariant, mass, mass, floor_area_m2)
    }

    /// A dual-method category
    pub fn dual(method1: MethodValue, method2: MethodValue, floor_area_m2: f64) -> Self {
        Self::build(CategoryKind::DualMethod, method1, method2, floor_area_m2)
    }

    fn build(kind: CategoryKind, method1: MethodValue, method2: MethodValue, floor_area_m2: f64) -> Self {
        CategoryTotals {
            kind,
            method1,
            method2,
            method1_per_area: method1.contribution().per_area(floor_area_m2),
            method2_per_area: method2.contribution().per_area(floor_area_m2),
        }
    }
}

/// Grand totals of one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub floor_area_m2: f64,
    /// Sum of the method-invariant categories
    pub common: Tonnes,
    pub method1: Tonnes,
    pub method2: Tonnes,
    pub method1_per_area: KgPerM2,
    pub method2_per_area: KgPerM2,
    /// Smaller of the two totals
    pub min: Tonnes,
    /// Larger of the two totals
    pub max: Tonnes,
}

/// Hybrid summation over the category masses.
pub fn summarize(categories: &BTreeMap<Category, CategoryTotals>, floor_area_m2: f64) -> Totals {
    let mut common = Tonnes(0.0);
    let mut dual1 = Tonnes(0.0);
    let mut dual2 = Tonnes(0.0);

    for totals in categories.values() {
        match totals.kind {
            CategoryKind::MethodInvariant => common = common + totals.method1.contribution(),
            CategoryKind::DualMethod => {
                dual1 = dual1 + totals.method1.contribution();
                dual2 = dual2 + totals.method2.contribution();
            }
        }
    }

    let method1 = common + dual1;
    let method2 = common + dual2;
    let (min, max) = if method1.0 <= method2.0 {
        (method1, method2)
    } else {
        (method2, method1)
    };

    Totals {
        floor_area_m2,
        common,
        method1,
        method2,
        method1_per_area: method1.per_area(floor_area_m2),
        method2_per_area: method2.per_area(floor_area_m2),
        min,
        max,
    }
}
