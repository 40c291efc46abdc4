//! # Project Data Structures
//!
//! A `Project` groups the building variants studied for one job. Projects
//! serialize to `.mce.json` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! └── variants: HashMap<Uuid, BuildingVariant> (building + spans per variant)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::project::{BuildingVariant, Project};
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Steel");
//! let id = project.add_variant(BuildingVariant::default());
//!
//! let result = project.estimate(&id).unwrap();
//! assert!(result.totals.max.0 > 0.0);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{compute, ComputationResult};
use crate::errors::{CalcError, CalcResult};
use crate::params::{roof_load_from_layers, BuildingParameters, RoofLayer, SpanParameters};

/// Current schema version for .mce.json files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One building layout to estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingVariant {
    /// User label (e.g., "Option A, 2×24 m")
    pub label: String,

    pub building: BuildingParameters,

    /// Spans across the width, left to right
    pub spans: Vec<SpanParameters>,

    /// Roof build-up; replaces `building.roof_load` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_layers: Option<Vec<(RoofLayer, u32)>>,
}

impl BuildingVariant {
    pub fn new(label: impl Into<String>, building: BuildingParameters, spans: Vec<SpanParameters>) -> Self {
        BuildingVariant {
            label: label.into(),
            building,
            spans,
            roof_layers: None,
        }
    }

    /// Building parameters with the roof load taken from the layers, if given
    pub fn effective_building(&self) -> BuildingParameters {
        let mut building = self.building.clone();
        if let Some(layers) = &self.roof_layers {
            building.roof_load = roof_load_from_layers(layers);
        }
        building
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.spans.is_empty() {
            return Err(CalcError::EmptySpanList);
        }
        self.effective_building().validate()?;
        for span in &self.spans {
            span.validate()?;
        }
        Ok(())
    }

    /// Validate, then compute with the built-in tables.
    pub fn estimate(&self) -> CalcResult<ComputationResult> {
        self.validate()?;
        compute(&self.effective_building(), &self.spans)
    }
}

impl Default for BuildingVariant {
    fn default() -> Self {
        BuildingVariant::new("Variant 1", BuildingParameters::default(), vec![SpanParameters::default()])
    }
}

/// Estimate of one variant within a project run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantEstimate {
    pub id: Uuid,
    pub label: String,
    pub result: CalcResult<ComputationResult>,
}

/// Root project container.
///
/// Variants are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Building variants, keyed by UUID
    pub variants: HashMap<Uuid, BuildingVariant>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use takeoff_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            variants: HashMap::new(),
        }
    }

    /// Add a variant. Returns the UUID assigned to it.
    pub fn add_variant(&mut self, variant: BuildingVariant) -> Uuid {
        let id = Uuid::new_v4();
        self.variants.insert(id, variant);
        self.touch();
        id
    }

    /// Remove a variant by UUID.
    pub fn remove_variant(&mut self, id: &Uuid) -> Option<BuildingVariant> {
        let variant = self.variants.remove(id);
        if variant.is_some() {
            self.touch();
        }
        variant
    }

    pub fn get_variant(&self, id: &Uuid) -> Option<&BuildingVariant> {
        self.variants.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Variants sorted by label, then id
    pub fn sorted_variants(&self) -> Vec<(&Uuid, &BuildingVariant)> {
        let mut variants: Vec<_> = self.variants.iter().collect();
        variants.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        variants
    }

    /// Estimate one variant.
    pub fn estimate(&self, id: &Uuid) -> CalcResult<ComputationResult> {
        self.get_variant(id)
            .ok_or_else(|| CalcError::variant_not_found(id.to_string()))?
            .estimate()
    }

    /// Estimate every variant independently, in label order.
    ///
    /// A failing variant does not stop the others.
    pub fn estimate_all(&self) -> Vec<VariantEstimate> {
        self.sorted_variants()
            .into_iter()
            .map(|(id, variant)| {
                let result = variant.estimate();
                if let Err(e) = &result {
                    tracing::warn!(variant = %variant.label, error = %e, "variant not estimated");
                }
                VariantEstimate {
                    id: *id,
                    label: variant.label.clone(),
                    result,
                }
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ColumnSpacing;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.variant_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_variant(BuildingVariant::default());
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Variant 1"));
        // Column spacing is written as metres
        assert!(json.contains("\"column_spacing_m\": 12.0"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.variant_count(), 1);
    }

    #[test]
    fn test_add_remove_variant() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_variant(BuildingVariant::default());
        assert!(project.get_variant(&id).is_some());

        let removed = project.remove_variant(&id);
        assert!(removed.is_some());
        assert_eq!(project.variant_count(), 0);
        assert!(project.remove_variant(&id).is_none());
    }

    #[test]
    fn test_estimate_unknown_variant() {
        let project = Project::default();
        let err = project.estimate(&Uuid::new_v4()).unwrap_err();
        assert_eq!(err.error_code(), "VARIANT_NOT_FOUND");
    }

    #[test]
    fn test_estimate_all_is_independent() {
        let mut project = Project::default();
        project.add_variant(BuildingVariant::new(
            "A",
            BuildingParameters::default(),
            vec![SpanParameters::default()],
        ));
        project.add_variant(BuildingVariant::new("B", BuildingParameters::default(), vec![]));
        project.add_variant(BuildingVariant::new(
            "C",
            BuildingParameters {
                column_spacing_m: ColumnSpacing::Six,
                ..BuildingParameters::default()
            },
            vec![SpanParameters::default(); 2],
        ));

        let estimates = project.estimate_all();
        let labels: Vec<&str> = estimates.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert!(estimates[0].result.is_ok());
        assert_eq!(estimates[1].result, Err(CalcError::EmptySpanList));
        assert!(estimates[2].result.is_ok());
    }

    #[test]
    fn test_roof_layers_replace_roof_load() {
        let mut variant = BuildingVariant::default();
        let plain = variant.estimate().unwrap();

        variant.roof_layers = Some(vec![(RoofLayer::ProfiledSheetH75, 1)]);
        let building = variant.effective_building();
        assert_eq!(building.roof_load, RoofLayer::ProfiledSheetH75.unit_weight());
        let layered = variant.estimate().unwrap();
        assert_ne!(plain.totals.method1, layered.totals.method1);
    }

    #[test]
    fn test_invalid_span_rejected() {
        let variant = BuildingVariant::new(
            "bad",
            BuildingParameters::default(),
            vec![SpanParameters {
                crane_count: 3,
                ..Default::default()
            }],
        );
        assert_eq!(variant.estimate().unwrap_err().error_code(), "INVALID_INPUT");
    }
}
