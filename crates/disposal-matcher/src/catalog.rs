//! Read-only disposal center catalog

use crate::{DisposalCenter, GeoPoint, ValidationError};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

#[allow(clippy::too_many_arguments)]
fn builtin_center(
    id: &str,
    name: &str,
    address: &str,
    latitude: f64,
    longitude: f64,
    accepted: &[&str],
    hours: &str,
    rating: f64,
) -> DisposalCenter {
    DisposalCenter::new(
        id,
        name,
        address,
        GeoPoint {
            latitude,
            longitude,
        },
        accepted.iter().copied(),
        hours,
        rating,
    )
    .with_phone(format!("+1-555-ECO-{}000", id))
}

static DEFAULT_CATALOG: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::with_defaults()));

/// Immutable list of disposal centers in catalog order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    centers: Vec<DisposalCenter>,
}

impl Catalog {
    /// Build a catalog from centers, validating each one
    ///
    /// Duplicate ids are logged, not rejected.
    pub fn from_centers(centers: Vec<DisposalCenter>) -> Result<Self, ValidationError> {
        for center in &centers {
            center.validate()?;
        }

        let unique: HashSet<&str> = centers.iter().map(|c| c.id.as_str()).collect();
        if unique.len() != centers.len() {
            warn!(
                "Catalog has {} duplicate center ids",
                centers.len() - unique.len()
            );
        }

        info!("Catalog ready with {} disposal centers", centers.len());
        Ok(Self { centers })
    }

    /// Built-in catalog of six centers around lower Manhattan
    #[rustfmt::skip]
    pub fn with_defaults() -> Self {
        Self {
            centers: vec![
                builtin_center("1", "EcoCenter Downtown", "123 Green St, City", 40.7128, -74.0060,
                    &["plastic", "metal", "glass"], "Mon-Fri 8AM-6PM", 4.5),
                builtin_center("2", "Recycling Plus", "456 Earth Ave, City", 40.7589, -73.9851,
                    &["electronic", "battery", "plastic"], "Daily 7AM-7PM", 4.2),
                builtin_center("3", "Green Disposal Hub", "789 Eco Blvd, City", 40.6782, -73.9442,
                    &["organic", "food", "yard"], "Mon-Sat 9AM-5PM", 4.0),
                builtin_center("4", "Hazmat Facility", "321 Safe Way, City", 40.7306, -73.9352,
                    &["hazardous", "paint", "chemical"], "Tue-Thu 9AM-3PM", 4.3),
                builtin_center("5", "Textile Recycling Co", "654 Fashion Ave, City", 40.7505, -73.9934,
                    &["textile", "clothing", "shoes"], "Mon-Fri 10AM-6PM", 4.1),
                builtin_center("6", "E-Waste Solutions", "987 Tech Blvd, City", 40.7831, -73.9712,
                    &["electronic", "phone", "computer"], "Wed-Sun 8AM-5PM", 4.4),
            ],
        }
    }

    /// Shared handle to the built-in catalog
    pub fn shared_default() -> Arc<Catalog> {
        Arc::clone(&DEFAULT_CATALOG)
    }

    pub fn centers(&self) -> &[DisposalCenter] {
        &self.centers
    }

    pub fn get(&self, id: &str) -> Option<&DisposalCenter> {
        self.centers.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::with_defaults();
        assert_eq!(catalog.len(), 6);
        for center in catalog.centers() {
            assert!(center.validate().is_ok(), "{} invalid", center.id);
        }
        assert_eq!(catalog.get("4").map(|c| c.name.as_str()), Some("Hazmat Facility"));
        assert_eq!(catalog.get("1").and_then(|c| c.phone.as_deref()), Some("+1-555-ECO-1000"));
    }

    #[test]
    fn test_from_centers_rejects_bad_location() {
        let bad = DisposalCenter::new(
            "x",
            "Nowhere",
            "",
            GeoPoint {
                latitude: 123.0,
                longitude: 0.0,
            },
            ["all"],
            "",
            3.0,
        );
        assert_eq!(
            Catalog::from_centers(vec![bad]).unwrap_err(),
            ValidationError::LatitudeOutOfRange(123.0)
        );
    }
}
