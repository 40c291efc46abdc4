//! # takeoff_core - Steel Quantity Takeoff Engine
//!
//! `takeoff_core` estimates the structural steel of single-storey industrial
//! buildings with overhead cranes. Given the global building parameters and
//! one description per span, it derives the steel mass of every element
//! category by two independent methods (closed-form empirical formulas and
//! table lookup) and combines them into two grand totals.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure call per building, safe to repeat or run in parallel
//! - **JSON-First**: all inputs and results implement Serialize/Deserialize
//! - **Total**: out-of-range table queries clamp to the last tier instead of failing
//! - **Explicit**: "not applicable" is a variant, never a borrowed number
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::{compute, BuildingParameters, SpanParameters};
//!
//! let building = BuildingParameters::default();
//! let spans = vec![SpanParameters::default(), SpanParameters::default()];
//! let result = compute(&building, &spans).unwrap();
//!
//! println!(
//!     "{:.1} - {:.1} t",
//!     result.totals.min.0, result.totals.max.0
//! );
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Category estimators and the hybrid summation
//! - [`params`] - Building and span parameters
//! - [`tables`] - Built-in lookup tables
//! - [`lookup`] - Ceiling lookup and step interpolation
//! - [`coefficients`] - Engine constants
//! - [`units`] - Type-safe unit wrappers
//! - [`project`] - Project container with building variants
//! - [`file_io`] - Atomic project saves
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod coefficients;
pub mod errors;
pub mod file_io;
pub mod lookup;
pub mod params;
pub mod project;
pub mod tables;
pub mod units;

pub use calculations::{compute, ComputationResult, Estimator, MethodValue};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use params::{BuildingParameters, SpanParameters};
pub use project::{BuildingVariant, Project, ProjectMetadata};
pub use tables::LookupTables;
