//! Waste Taxonomy
//!
//! Maps a free-form waste-type string to a classification profile with
//! handling metadata and per-unit impact factors.
//!
//! # Lookup Model
//!
//! ```text
//! key = lowercase(trim(raw))
//! classify(raw) = profiles[key] | General
//! ```
//!
//! Unknown keys are not an error. They resolve to the General profile
//! (category `general`, zero impact factors).
//!
//! | Category         | Keys                                   |
//! |------------------|----------------------------------------|
//! | recyclable       | plastic, metal, glass, paper           |
//! | special_handling | electronic, phone                      |
//! | hazardous        | battery, hazardous, paint              |
//! | compostable      | organic, food                          |
//! | reusable         | textile, clothing                      |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

mod defaults;
pub mod identify;
pub mod loader;

pub use identify::identify_key;

/// Key of the fallback profile returned for unknown waste types
pub const GENERAL_KEY: &str = "general";

/// Built-in taxonomy, built once per process
static DEFAULT_TAXONOMY: Lazy<Arc<WasteTaxonomy>> =
    Lazy::new(|| Arc::new(WasteTaxonomy::with_defaults()));

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate waste-type key: {0}")]
    DuplicateKey(String),
    #[error("Waste-type key is empty")]
    EmptyKey,
    #[error("Waste-type key is reserved for the fallback profile: {0}")]
    ReservedKey(String),
    #[error("Impact factors must be finite and non-negative: {0}")]
    InvalidFactors(String),
    #[error("Category {category} cannot be assigned to waste type {key}")]
    UnassignableCategory { key: String, category: WasteCategory },
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;

/// Normalize a raw waste-type string into a lookup key
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Top-level handling category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    Recyclable,
    SpecialHandling,
    Hazardous,
    Compostable,
    Reusable,
    General,
}

impl WasteCategory {
    /// Categories a taxonomy entry may carry (General is fallback-only)
    pub const ASSIGNABLE: [WasteCategory; 5] = [
        WasteCategory::Recyclable,
        WasteCategory::SpecialHandling,
        WasteCategory::Compostable,
        WasteCategory::Reusable,
        WasteCategory::Hazardous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recyclable => "recyclable",
            Self::SpecialHandling => "special_handling",
            Self::Hazardous => "hazardous",
            Self::Compostable => "compostable",
            Self::Reusable => "reusable",
            Self::General => "general",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepComplexity {
    VerySimple,
    Simple,
    Medium,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalImpact {
    Low,
    Medium,
    High,
    VeryHigh,
    Critical,
}

/// Per-unit savings and reward for disposing of one item correctly
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactFactors {
    /// kg CO2 avoided per item
    #[serde(rename = "co2")]
    pub co2_per_unit: f64,
    /// Energy saved per item (integral units)
    #[serde(rename = "energy")]
    pub energy_per_unit: u64,
    /// Water saved per item
    #[serde(rename = "water")]
    pub water_per_unit: f64,
    /// Reward points per item
    #[serde(rename = "base_points")]
    pub base_points_per_unit: f64,
}

impl ImpactFactors {
    /// Impact factors are non-negative and finite
    pub fn is_valid(&self) -> bool {
        [self.co2_per_unit, self.water_per_unit, self.base_points_per_unit]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Classification profile for one waste-type key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteTypeProfile {
    pub key: String,
    pub category: WasteCategory,
    /// Disposal methods in preference order
    pub priority_methods: Vec<String>,
    pub safety_level: SafetyLevel,
    pub prep_complexity: PrepComplexity,
    pub environmental_impact: EnvironmentalImpact,
    pub impact_factors: ImpactFactors,
}

impl WasteTypeProfile {
    /// The fallback profile for keys with no taxonomy entry
    pub fn general() -> Self {
        Self {
            key: GENERAL_KEY.to_string(),
            category: WasteCategory::General,
            priority_methods: vec!["check_local_guidelines".to_string()],
            safety_level: SafetyLevel::Low,
            prep_complexity: PrepComplexity::Simple,
            environmental_impact: EnvironmentalImpact::Low,
            impact_factors: ImpactFactors::default(),
        }
    }

    pub fn is_general(&self) -> bool {
        self.category == WasteCategory::General
    }

    pub fn is_recyclable(&self) -> bool {
        self.category == WasteCategory::Recyclable
    }
}

/// Immutable key → profile table
#[derive(Debug, Clone)]
pub struct WasteTaxonomy {
    profiles: HashMap<String, WasteTypeProfile>,
    general: WasteTypeProfile,
}

impl WasteTaxonomy {
    /// Build a taxonomy from profiles, normalizing each key
    pub fn from_profiles(profiles: impl IntoIterator<Item = WasteTypeProfile>) -> Result<Self> {
        let mut table = HashMap::new();

        for mut profile in profiles {
            let key = normalize_key(&profile.key);
            if key.is_empty() {
                return Err(TaxonomyError::EmptyKey);
            }
            if key == GENERAL_KEY {
                return Err(TaxonomyError::ReservedKey(key));
            }
            if table.contains_key(&key) {
                return Err(TaxonomyError::DuplicateKey(key));
            }
            if !profile.impact_factors.is_valid() {
                return Err(TaxonomyError::InvalidFactors(key));
            }
            if !WasteCategory::ASSIGNABLE.contains(&profile.category) {
                return Err(TaxonomyError::UnassignableCategory {
                    key,
                    category: profile.category,
                });
            }
            profile.key = key.clone();
            table.insert(key, profile);
        }

        info!("Loaded waste taxonomy with {} profiles", table.len());

        Ok(Self {
            profiles: table,
            general: WasteTypeProfile::general(),
        })
    }

    /// Built-in table of 13 waste types
    pub fn with_defaults() -> Self {
        let profiles = defaults::default_profiles()
            .into_iter()
            .map(|p| (p.key.clone(), p))
            .collect();

        Self {
            profiles,
            general: WasteTypeProfile::general(),
        }
    }

    /// Shared handle to the built-in taxonomy
    pub fn shared_default() -> Arc<WasteTaxonomy> {
        Arc::clone(&DEFAULT_TAXONOMY)
    }

    /// Resolve a raw waste-type string to its profile, or General
    pub fn classify(&self, raw: &str) -> &WasteTypeProfile {
        self.profiles
            .get(&normalize_key(raw))
            .unwrap_or(&self.general)
    }

    pub fn category(&self, raw: &str) -> WasteCategory {
        self.classify(raw).category
    }

    /// True if the key has its own entry (not the General fallback)
    pub fn contains(&self, raw: &str) -> bool {
        self.profiles.contains_key(&normalize_key(raw))
    }

    pub fn general(&self) -> &WasteTypeProfile {
        &self.general
    }

    /// Profiles sorted by key
    pub fn profiles(&self) -> Vec<&WasteTypeProfile> {
        let mut all: Vec<&WasteTypeProfile> = self.profiles.values().collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        all
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for WasteTaxonomy {
    fn default() -> Self {
        Self::with_defaults()
    }
}
