//! Per-method mass figures that may be unavailable.

use serde::{Deserialize, Serialize};

use crate::units::Tonnes;

/// Mass from one estimation method, or a marker that the method does not
/// apply to this category.
///
/// A `NotApplicable` figure contributes zero to its method's total. It is
/// never replaced by the other method's figure.
///
/// ```rust
/// use takeoff_core::calculations::MethodValue;
/// use takeoff_core::units::Tonnes;
///
/// let m1 = MethodValue::NotApplicable;
/// let m2 = MethodValue::Applicable(Tonnes(12.0));
/// assert_eq!(m1.contribution(), Tonnes(0.0));
/// assert_eq!(m2.contribution(), Tonnes(12.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "mass_t")]
pub enum MethodValue {
    Applicable(Tonnes),
    NotApplicable,
}

impl MethodValue {
    /// Contribution to a method total (zero when not applicable)
    pub fn contribution(&self) -> Tonnes {
        match self {
            MethodValue::Applicable(mass) => *mass,
            MethodValue::NotApplicable => Tonnes(0.0),
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, MethodValue::Applicable(_))
    }

    pub fn mass(&self) -> Option<Tonnes> {
        match self {
            MethodValue::Applicable(mass) => Some(*mass),
            MethodValue::NotApplicable => None,
        }
    }

    /// Scale an applicable mass
    pub fn scale(self, factor: f64) -> MethodValue {
        match self {
            MethodValue::Applicable(mass) => MethodValue::Applicable(mass * factor),
            MethodValue::NotApplicable => MethodValue::NotApplicable,
        }
    }

    /// Sum of the applicable figures; `NotApplicable` only if none applies.
    pub fn accumulate(values: impl IntoIterator<Item = MethodValue>) -> MethodValue {
        values
            .into_iter()
            .fold(MethodValue::NotApplicable, |acc, value| match (acc, value) {
                (MethodValue::Applicable(a), MethodValue::Applicable(b)) => MethodValue::Applicable(a + b),
                (MethodValue::Applicable(a), MethodValue::NotApplicable) => MethodValue::Applicable(a),
                (MethodValue::NotApplicable, other) => other,
            })
    }
}

impl From<Option<Tonnes>> for MethodValue {
    fn from(mass: Option<Tonnes>) -> Self {
        match mass {
            Some(mass) => MethodValue::Applicable(mass),
            None => MethodValue::NotApplicable,
        }
    }
}

impl std::fmt::Display for MethodValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodValue::Applicable(mass) => write!(f, "{:.2} t", mass.0),
            MethodValue::NotApplicable => write!(f, "n/a"),
        }
    }
}
