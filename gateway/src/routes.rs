use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use disposal_matcher::{
    GeoPoint, HistoryEntry, ImpactSummary, MatchingFacade, RankedCenter, ScoredDisposal,
    ValidationError, WasteCategory, WasteTypeProfile,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct AppState {
    pub facade: MatchingFacade,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

fn bad_request(err: ValidationError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

/// Data routes consumed by the mobile app and workflow automation
pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/waste-types", get(list_waste_types))
        .route("/classify", get(classify))
        .route("/disposal-centers", get(find_disposal_centers))
        .route("/impact", post(score_impact))
        .route("/history/summary", post(summarize_history))
        .with_state(state)
}

#[derive(Serialize)]
pub struct WasteTypesResponse {
    pub success: bool,
    pub waste_database: BTreeMap<String, WasteTypeProfile>,
    pub total_types: usize,
    pub categories: Vec<&'static str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyQuery {
    pub waste_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub input: String,
    pub matched: bool,
    pub recyclable: bool,
    pub profile: WasteTypeProfile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterQuery {
    pub waste_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct FiltersApplied {
    #[serde(rename = "wasteType")]
    pub waste_type: String,
    pub radius: Option<f64>,
    pub location_based: bool,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct CentersResponse {
    pub success: bool,
    pub data: Vec<RankedCenter>,
    pub total: usize,
    pub filters_applied: FiltersApplied,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
    pub waste_type: String,
    pub item_count: i64,
    pub disposal_method: String,
}

#[derive(Serialize)]
pub struct ImpactResponse {
    pub success: bool,
    pub impact: ScoredDisposal,
}

#[derive(Deserialize)]
pub struct HistoryRequest {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub summary: ImpactSummary,
}

/// Full waste-type database
pub async fn list_waste_types(State(state): State<AppState>) -> Json<WasteTypesResponse> {
    let taxonomy = state.facade.taxonomy();
    Json(WasteTypesResponse {
        success: true,
        waste_database: taxonomy
            .profiles()
            .into_iter()
            .map(|p| (p.key.clone(), p.clone()))
            .collect(),
        total_types: taxonomy.len(),
        categories: WasteCategory::ASSIGNABLE.iter().map(|c| c.as_str()).collect(),
    })
}

/// Classify a waste type key, or identify one from a description
pub async fn classify(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> ApiResult<ClassifyResponse> {
    let taxonomy = state.facade.taxonomy();

    let (input, profile) = match (query.waste_type, query.description) {
        (Some(waste_type), _) => {
            let profile = taxonomy.classify(&waste_type);
            (waste_type, profile)
        }
        (None, Some(description)) => {
            let profile = taxonomy.identify(&description);
            (description, profile)
        }
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "wasteType or description is required".to_string(),
            ))
        }
    };

    Ok(Json(ClassifyResponse {
        success: true,
        input,
        matched: !profile.is_general(),
        recyclable: profile.is_recyclable(),
        profile: profile.clone(),
    }))
}

/// Disposal centers accepting a waste type, closest first
pub async fn find_disposal_centers(
    State(state): State<AppState>,
    Query(query): Query<CenterQuery>,
) -> ApiResult<CentersResponse> {
    let origin = match (query.latitude, query.longitude) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon).map_err(bad_request)?),
        (None, None) => None,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "latitude and longitude must be supplied together".to_string(),
            ))
        }
    };

    let waste_type = query.waste_type.filter(|w| !w.trim().is_empty());
    let centers = match &waste_type {
        Some(w) => state.facade.find_centers(origin, w, query.radius, query.limit),
        None => state.facade.list_centers(origin, query.radius, query.limit),
    }
    .map_err(bad_request)?;

    tracing::debug!(
        "disposal-centers wasteType={:?} origin={:?} -> {}",
        waste_type,
        origin,
        centers.len()
    );

    Ok(Json(CentersResponse {
        success: true,
        total: centers.len(),
        data: centers,
        filters_applied: FiltersApplied {
            waste_type: waste_type.unwrap_or_else(|| "all".to_string()),
            radius: query.radius,
            location_based: origin.is_some(),
            limit: query.limit,
        },
    }))
}

/// Score the impact of a disposal
pub async fn score_impact(
    State(state): State<AppState>,
    Json(req): Json<ImpactRequest>,
) -> ApiResult<ImpactResponse> {
    let impact = state
        .facade
        .score_disposal(&req.waste_type, req.item_count, &req.disposal_method)
        .map_err(bad_request)?;

    tracing::info!(
        "Scored {} x{} ({}) -> {} points",
        impact.impact.waste_type,
        impact.impact.item_count,
        impact.category,
        impact.impact.points_earned
    );

    Ok(Json(ImpactResponse {
        success: true,
        impact,
    }))
}

/// Totals over a user's disposal history
pub async fn summarize_history(Json(req): Json<HistoryRequest>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        success: true,
        summary: ImpactSummary::from_entries(&req.entries),
    })
}
