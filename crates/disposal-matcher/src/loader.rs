//! Catalog loading from JSON files

use crate::{Catalog, DisposalCenter, GeoPoint, MatchError, Result, MAX_RATING};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Sanitize ID (alphanumeric, dash, underscore only)
fn sanitize_id(id: String) -> String {
    id.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(128)
        .collect()
}

/// Raw disposal center from JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCenter {
    id: Option<serde_json::Value>,
    name: Option<String>,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(alias = "acceptedWasteTypes", alias = "accepted_waste")]
    accepted_waste: Option<Vec<String>>,
    #[serde(alias = "operatingHours")]
    hours: Option<String>,
    rating: Option<f64>,
    #[serde(alias = "phoneNumber")]
    phone: Option<String>,
}

/// Ids may be numbers or strings in exported catalogs
fn id_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert raw records, skipping ones with missing or invalid coordinates
fn centers_from_raw(raw: Vec<RawCenter>) -> Vec<DisposalCenter> {
    let mut centers = Vec::new();
    let mut skipped = 0;

    for (i, record) in raw.into_iter().enumerate() {
        let location = match (record.latitude, record.longitude) {
            (Some(lat), Some(lon)) => match GeoPoint::new(lat, lon) {
                Ok(point) => point,
                Err(e) => {
                    warn!("Skipping center #{}: {}", i, e);
                    skipped += 1;
                    continue;
                }
            },
            _ => {
                warn!("Skipping center #{}: missing coordinates", i);
                skipped += 1;
                continue;
            }
        };

        let rating = record.rating.unwrap_or(0.0);
        if !(rating.is_finite() && (0.0..=MAX_RATING).contains(&rating)) {
            warn!("Skipping center #{}: rating {} outside [0, {}]", i, rating, MAX_RATING);
            skipped += 1;
            continue;
        }

        let id = record
            .id
            .and_then(id_to_string)
            .map(sanitize_id)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("dc-{}", i));

        let mut center = DisposalCenter::new(
            id,
            record.name.unwrap_or_else(|| "Unknown".to_string()),
            record.address.unwrap_or_default(),
            location,
            record.accepted_waste.unwrap_or_default(),
            record.hours.unwrap_or_default(),
            rating,
        );
        center.phone = record.phone;

        centers.push(center);
    }

    info!(
        "Loaded {} disposal centers ({} skipped for bad coords or rating)",
        centers.len(),
        skipped
    );

    centers
}

/// Parse a catalog from a JSON value: a bare array or `{ "centers": [...] }`
pub fn catalog_from_value(raw: serde_json::Value) -> Result<Catalog> {
    let records: Vec<RawCenter> = if let Some(list) = raw.get("centers").or_else(|| raw.get("data")) {
        serde_json::from_value(list.clone())?
    } else if raw.is_array() {
        serde_json::from_value(raw)?
    } else {
        return Err(MatchError::Json(serde::de::Error::custom(
            "expected an array of disposal centers",
        )));
    };

    Ok(Catalog::from_centers(centers_from_raw(records))?)
}

/// Load a disposal center catalog from a JSON file
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    info!("Loading disposal centers from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    catalog_from_value(raw)
}
