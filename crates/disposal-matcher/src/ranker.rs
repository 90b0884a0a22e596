//! Disposal center ranking by waste-type compatibility and distance

use crate::{normalize_key, round_to, DisposalCenter, GeoPoint, ValidationError};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A center that passed filtering, with its distance from the origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCenter {
    #[serde(flatten)]
    pub center: DisposalCenter,
    /// Rounded to 2 decimals; absent when no origin was supplied
    #[serde(rename = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Check an explicitly supplied radius
pub fn validate_radius(radius_km: Option<f64>) -> Result<(), ValidationError> {
    match radius_km {
        Some(r) if !(r.is_finite() && r > 0.0) => Err(ValidationError::NonPositiveRadius(r)),
        _ => Ok(()),
    }
}

/// Filter and order centers for a waste type
///
/// Without an origin the result keeps catalog order and carries no
/// distances; the radius is then validated but not applied. With an origin,
/// centers beyond `radius_km` are dropped and the rest are sorted by
/// unrounded distance, then rating descending, then id.
pub fn rank(
    origin: Option<GeoPoint>,
    waste_type_key: &str,
    radius_km: Option<f64>,
    centers: &[DisposalCenter],
) -> Result<Vec<RankedCenter>, ValidationError> {
    rank_filtered(origin, Some(waste_type_key), radius_km, centers)
}

/// Like [`rank`], but `None` skips the waste-type filter entirely
pub fn rank_filtered(
    origin: Option<GeoPoint>,
    waste_type_key: Option<&str>,
    radius_km: Option<f64>,
    centers: &[DisposalCenter],
) -> Result<Vec<RankedCenter>, ValidationError> {
    validate_radius(radius_km)?;
    if let Some(o) = &origin {
        o.validate()?;
    }

    let key = waste_type_key.map(normalize_key);
    let accepting = centers
        .iter()
        .filter(|c| key.as_deref().map_or(true, |k| c.accepts(k)));

    let Some(origin) = origin else {
        let ranked: Vec<RankedCenter> = accepting
            .map(|c| RankedCenter {
                center: c.clone(),
                distance_km: None,
            })
            .collect();
        debug!("Ranked {} centers for {:?} without origin", ranked.len(), key);
        return Ok(ranked);
    };

    let mut in_range: Vec<(&DisposalCenter, f64)> = accepting
        .map(|c| (c, origin.distance_km(&c.location)))
        .filter(|(_, d)| radius_km.map_or(true, |r| *d <= r))
        .collect();

    in_range.sort_by(|(a, da), (b, db)| compare_ranked(a, *da, b, *db));

    debug!(
        "Ranked {} centers for {:?} within {:?} km",
        in_range.len(),
        key,
        radius_km
    );

    Ok(in_range
        .into_iter()
        .map(|(c, d)| RankedCenter {
            center: c.clone(),
            distance_km: Some(round_to(d, 2)),
        })
        .collect())
}

/// Distance ascending, rating descending, id ascending
fn compare_ranked(a: &DisposalCenter, da: f64, b: &DisposalCenter, db: f64) -> Ordering {
    da.total_cmp(&db)
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| a.id.cmp(&b.id))
}

/// Export ranked centers to GeoJSON
pub fn to_geojson(ranked: &[RankedCenter]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = ranked
        .iter()
        .map(|r| {
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [r.center.location.longitude, r.center.location.latitude]
                },
                "properties": {
                    "id": r.center.id,
                    "name": r.center.name,
                    "address": r.center.address,
                    "hours": r.center.hours,
                    "rating": r.center.rating,
                    "accepted_waste": r.center.accepted_waste_types,
                    "distance_km": r.distance_km
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn center_strategy() -> impl Strategy<Value = DisposalCenter> {
        (0u32..1000, -1.0f64..1.0, -1.0f64..1.0, 0.0f64..=5.0, any::<bool>()).prop_map(
            |(id, lat, lon, rating, all)| {
                let accepted: &[&str] = if all { &["all"] } else { &["plastic"] };
                DisposalCenter::new(
                    id.to_string(),
                    "fuzz",
                    "",
                    GeoPoint {
                        latitude: lat,
                        longitude: lon,
                    },
                    accepted.iter().copied(),
                    "",
                    rating,
                )
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        // Adjacent results are in non-decreasing distance and inside the radius
        #[test]
        fn fuzz_rank_sorted_within_radius(
            centers in prop::collection::vec(center_strategy(), 0..40),
            radius in 1.0f64..200.0,
        ) {
            let origin = GeoPoint { latitude: 0.0, longitude: 0.0 };
            let ranked = rank(Some(origin), "plastic", Some(radius), &centers).unwrap();

            for pair in ranked.windows(2) {
                let d1 = origin.distance_km(&pair[0].center.location);
                let d2 = origin.distance_km(&pair[1].center.location);
                prop_assert!(d1 <= d2);
            }
            for r in &ranked {
                prop_assert!(origin.distance_km(&r.center.location) <= radius);
            }
        }
    }
}
