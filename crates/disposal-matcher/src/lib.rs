//! Disposal Matcher
//!
//! Ranks disposal centers for a waste type and scores the environmental
//! impact of disposing of it.
//!
//! # Ranking Model
//!
//! ```text
//! keep(c)  = accepts(c, key) ∨ accepts(c, "all")
//! d(o, c)  = 2R·atan2(√a, √(1−a)),  a = sin²(Δφ/2) + cos φ₁·cos φ₂·sin²(Δλ/2)
//! order    = d ↑, rating ↓, id ↑
//! ```
//!
//! # Impact Model
//!
//! | Metric | Formula                         | Rounding      |
//! |--------|---------------------------------|---------------|
//! | CO2    | co2_per_unit · n                | 2 decimals    |
//! | Energy | energy_per_unit · n             | integral      |
//! | Water  | water_per_unit · n              | 2 decimals    |
//! | Points | base_points_per_unit · n        | nearest, half-up |
//!
//! The disposal method is accepted and echoed but does not enter the formula.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use thiserror::Error;

pub mod catalog;
pub mod facade;
pub mod history;
pub mod impact;
pub mod lifecycle;
pub mod loader;
pub mod ranker;

pub use catalog::Catalog;
pub use facade::{MatchingFacade, ScoredDisposal};
pub use history::{HistoryEntry, ImpactSummary};
pub use impact::{ImpactCalculator, ImpactResult};
pub use lifecycle::{DisposalStatus, WasteRecord};
pub use ranker::RankedCenter;
pub use waste_taxonomy::{normalize_key, WasteCategory, WasteTaxonomy, WasteTypeProfile};

/// Earth radius used for great-circle distances, km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Sentinel accepted-waste entry meaning "accepts every type"
pub const ACCEPTS_ALL: &str = "all";

/// Maximum center rating
pub const MAX_RATING: f64 = 5.0;

/// A failed input precondition. Never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("itemCount must be a positive integer, got {0}")]
    InvalidItemCount(i64),
    #[error("latitude must be within [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be within [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),
    #[error("radiusKm must be a positive number when supplied, got {0}")]
    NonPositiveRadius(f64),
    #[error("maxResults must be at least 1 when supplied")]
    InvalidMaxResults,
    #[error("disposalMethod must not be empty")]
    EmptyDisposalMethod,
    #[error("rating must be within [{min}, {max}], got {value}")]
    RatingOutOfRange { value: f64, min: f64, max: f64 },
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] waste_taxonomy::TaxonomyError),
    #[error("Invalid disposal status transition: {from} -> {to}")]
    InvalidTransition {
        from: DisposalStatus,
        to: DisposalStatus,
    },
}

pub type Result<T> = std::result::Result<T, MatchError>;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range or non-finite coordinates
    pub fn new(latitude: f64, longitude: f64) -> std::result::Result<Self, ValidationError> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !(self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude)) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude)) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Great-circle distance to another point in km
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// A disposal center from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalCenter {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Normalized waste-type keys, possibly including `"all"`
    #[serde(rename = "acceptedWaste")]
    pub accepted_waste_types: BTreeSet<String>,
    pub hours: String,
    /// 0.0 - 5.0
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl DisposalCenter {
    /// Create a center, normalizing accepted waste types
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        location: GeoPoint,
        accepted: impl IntoIterator<Item = impl AsRef<str>>,
        hours: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            location,
            accepted_waste_types: accepted
                .into_iter()
                .map(|w| normalize_key(w.as_ref()))
                .filter(|w| !w.is_empty())
                .collect(),
            hours: hours.into(),
            rating,
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// True if the center takes this normalized key or takes everything
    pub fn accepts(&self, waste_type_key: &str) -> bool {
        self.accepted_waste_types.contains(waste_type_key)
            || self.accepted_waste_types.contains(ACCEPTS_ALL)
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.location.validate()?;
        if !(self.rating.is_finite() && (0.0..=MAX_RATING).contains(&self.rating)) {
            return Err(ValidationError::RatingOutOfRange {
                value: self.rating,
                min: 0.0,
                max: MAX_RATING,
            });
        }
        Ok(())
    }
}

/// Haversine distance between two points in km
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * PI / 180.0;
    let lat2_rad = lat2 * PI / 180.0;
    let dlat = (lat2 - lat1) * PI / 180.0;
    let dlon = (lon2 - lon1) * PI / 180.0;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards against a drifting a hair past 1.0 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn lat() -> impl Strategy<Value = f64> {
        -90.0f64..=90.0
    }

    fn lon() -> impl Strategy<Value = f64> {
        -180.0f64..=180.0
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        // distance(p, p) == 0
        #[test]
        fn fuzz_distance_identity(la in lat(), lo in lon()) {
            prop_assert!(haversine_km(la, lo, la, lo).abs() < 1e-9);
        }

        // distance(a, b) == distance(b, a)
        #[test]
        fn fuzz_distance_symmetry(la1 in lat(), lo1 in lon(), la2 in lat(), lo2 in lon()) {
            let ab = haversine_km(la1, lo1, la2, lo2);
            let ba = haversine_km(la2, lo2, la1, lo1);
            prop_assert!((ab - ba).abs() < 1e-6, "ab={} ba={}", ab, ba);
        }

        // Never longer than half the circumference
        #[test]
        fn fuzz_distance_bounds(la1 in lat(), lo1 in lon(), la2 in lat(), lo2 in lon()) {
            let d = haversine_km(la1, lo1, la2, lo2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
