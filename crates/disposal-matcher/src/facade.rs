//! Entry points composing taxonomy, ranking and impact scoring

use crate::impact::{ImpactCalculator, ImpactResult};
use crate::ranker::{self, RankedCenter};
use crate::{Catalog, GeoPoint, ValidationError, WasteCategory, WasteTaxonomy, WasteTypeProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Impact result with the resolved category attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDisposal {
    #[serde(flatten)]
    pub impact: ImpactResult,
    pub category: WasteCategory,
}

/// Shared, read-only matcher over a taxonomy and a center catalog
///
/// Cloning is cheap; both tables sit behind `Arc` and are never mutated, so
/// concurrent callers need no coordination.
#[derive(Debug, Clone)]
pub struct MatchingFacade {
    taxonomy: Arc<WasteTaxonomy>,
    catalog: Arc<Catalog>,
}

impl MatchingFacade {
    pub fn new(taxonomy: Arc<WasteTaxonomy>, catalog: Arc<Catalog>) -> Self {
        Self { taxonomy, catalog }
    }

    /// Facade over the built-in taxonomy and catalog
    pub fn with_defaults() -> Self {
        Self::new(WasteTaxonomy::shared_default(), Catalog::shared_default())
    }

    pub fn taxonomy(&self) -> &WasteTaxonomy {
        &self.taxonomy
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classify(&self, raw_waste_type: &str) -> &WasteTypeProfile {
        self.taxonomy.classify(raw_waste_type)
    }

    /// Nearby centers that accept a waste type, closest first
    ///
    /// `max_results` truncates after ordering; `None` keeps everything.
    pub fn find_centers(
        &self,
        origin: Option<GeoPoint>,
        waste_type_raw: &str,
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<Vec<RankedCenter>, ValidationError> {
        if max_results == Some(0) {
            return Err(ValidationError::InvalidMaxResults);
        }

        let key = waste_taxonomy::normalize_key(waste_type_raw);
        let mut ranked = ranker::rank(origin, &key, radius_km, self.catalog.centers())?;

        if let Some(max) = max_results {
            ranked.truncate(max);
        }

        debug!("find_centers({:?}) -> {} centers", key, ranked.len());
        Ok(ranked)
    }

    /// Every center regardless of waste type, closest first when an origin is given
    pub fn list_centers(
        &self,
        origin: Option<GeoPoint>,
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<Vec<RankedCenter>, ValidationError> {
        if max_results == Some(0) {
            return Err(ValidationError::InvalidMaxResults);
        }

        let mut ranked = ranker::rank_filtered(origin, None, radius_km, self.catalog.centers())?;
        if let Some(max) = max_results {
            ranked.truncate(max);
        }
        Ok(ranked)
    }

    /// Impact of disposing of `item_count` items, with the resolved category
    pub fn score_disposal(
        &self,
        waste_type_raw: &str,
        item_count: i64,
        disposal_method: &str,
    ) -> Result<ScoredDisposal, ValidationError> {
        let impact = ImpactCalculator::new(&self.taxonomy).compute_impact(
            waste_type_raw,
            item_count,
            disposal_method,
        )?;

        Ok(ScoredDisposal {
            category: self.taxonomy.category(waste_type_raw),
            impact,
        })
    }
}

impl Default for MatchingFacade {
    fn default() -> Self {
        Self::with_defaults()
    }
}
