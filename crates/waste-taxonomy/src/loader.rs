//! Taxonomy loading from JSON files
//!
//! Accepts either a bare `{ key: profile }` map or an object wrapping it
//! under `waste_database`. The map key is the waste-type key; a `key`
//! field inside the profile is ignored.

use crate::{
    EnvironmentalImpact, ImpactFactors, PrepComplexity, Result, SafetyLevel, TaxonomyError,
    WasteCategory, WasteTaxonomy, WasteTypeProfile,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Profile as written in a taxonomy file
#[derive(Debug, Deserialize)]
struct RawProfile {
    category: WasteCategory,
    #[serde(default)]
    priority_methods: Vec<String>,
    safety_level: SafetyLevel,
    prep_complexity: PrepComplexity,
    environmental_impact: EnvironmentalImpact,
    #[serde(default)]
    impact_factors: ImpactFactors,
}

impl RawProfile {
    fn into_profile(self, key: String) -> WasteTypeProfile {
        WasteTypeProfile {
            key,
            category: self.category,
            priority_methods: self.priority_methods,
            safety_level: self.safety_level,
            prep_complexity: self.prep_complexity,
            environmental_impact: self.environmental_impact,
            impact_factors: self.impact_factors,
        }
    }
}

/// Parse a taxonomy from a JSON value
pub fn from_json_value(raw: serde_json::Value) -> Result<WasteTaxonomy> {
    let table = match raw.get("waste_database") {
        Some(db) => db.clone(),
        None => raw,
    };

    if !table.is_object() {
        return Err(TaxonomyError::Json(serde::de::Error::custom(
            "expected an object of waste-type profiles",
        )));
    }

    // BTreeMap keeps duplicate detection deterministic after normalization
    let raw_profiles: BTreeMap<String, RawProfile> = serde_json::from_value(table)?;

    WasteTaxonomy::from_profiles(
        raw_profiles
            .into_iter()
            .map(|(key, raw)| raw.into_profile(key)),
    )
}

/// Parse a taxonomy from JSON text
pub fn from_json_str(json: &str) -> Result<WasteTaxonomy> {
    from_json_value(serde_json::from_str(json)?)
}

/// Load a taxonomy from a JSON file
pub fn load_taxonomy(path: impl AsRef<Path>) -> Result<WasteTaxonomy> {
    let path = path.as_ref();
    info!("Loading waste taxonomy from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    from_json_value(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "waste_database": {
            "Plastic": {
                "category": "recyclable",
                "priority_methods": ["recycling"],
                "safety_level": "low",
                "prep_complexity": "simple",
                "environmental_impact": "high",
                "impact_factors": {"co2": 2.0, "energy": 1000, "water": 0.5, "base_points": 10}
            },
            "styrofoam": {
                "category": "special_handling",
                "safety_level": "medium",
                "prep_complexity": "medium",
                "environmental_impact": "critical"
            }
        }
    }"#;

    #[test]
    fn test_load_taxonomy_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let taxonomy = load_taxonomy(file.path()).unwrap();
        assert_eq!(taxonomy.len(), 2);

        let plastic = taxonomy.classify("plastic");
        assert_eq!(plastic.key, "plastic");
        assert_eq!(plastic.impact_factors.base_points_per_unit, 10.0);

        // Missing impact factors default to zero
        let foam = taxonomy.classify("STYROFOAM");
        assert_eq!(foam.category, WasteCategory::SpecialHandling);
        assert_eq!(foam.impact_factors, ImpactFactors::default());
        assert!(foam.priority_methods.is_empty());
    }

    #[test]
    fn test_bare_map_accepted() {
        let json = r#"{
            "tyre": {
                "category": "special_handling",
                "safety_level": "low",
                "prep_complexity": "simple",
                "environmental_impact": "medium"
            }
        }"#;
        let taxonomy = from_json_str(json).unwrap();
        assert!(taxonomy.contains("tyre"));
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let json = r#"{
            "Glass": {"category": "recyclable", "safety_level": "low", "prep_complexity": "simple", "environmental_impact": "low"},
            "glass": {"category": "recyclable", "safety_level": "low", "prep_complexity": "simple", "environmental_impact": "low"}
        }"#;
        assert!(matches!(from_json_str(json), Err(TaxonomyError::DuplicateKey(_))));
    }

    #[test]
    fn test_negative_factor_rejected() {
        let json = r#"{
            "glass": {
                "category": "recyclable", "safety_level": "low", "prep_complexity": "simple",
                "environmental_impact": "low",
                "impact_factors": {"co2": -1.0, "energy": 0, "water": 0.0, "base_points": 1}
            }
        }"#;
        assert!(matches!(from_json_str(json), Err(TaxonomyError::InvalidFactors(_))));
    }

    #[test]
    fn test_bundled_table() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/waste_database.json");
        let taxonomy = load_taxonomy(path).unwrap();

        assert_eq!(taxonomy.len(), 4);
        assert_eq!(taxonomy.category("furniture"), WasteCategory::Reusable);
        assert_eq!(taxonomy.classify("cardboard").prep_complexity, PrepComplexity::VerySimple);
    }

    #[test]
    fn test_general_category_rejected() {
        let json = r#"{
            "tyre": {
                "category": "general", "safety_level": "low", "prep_complexity": "simple",
                "environmental_impact": "medium",
                "impact_factors": {"co2": 1.0, "energy": 10, "water": 0.0, "base_points": 5}
            }
        }"#;

        match from_json_str(json) {
            Err(TaxonomyError::UnassignableCategory { key, category }) => {
                assert_eq!(key, "tyre");
                assert_eq!(category, WasteCategory::General);
            }
            other => panic!("expected UnassignableCategory, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(from_json_str("[1, 2]"), Err(TaxonomyError::Json(_))));
    }
}
