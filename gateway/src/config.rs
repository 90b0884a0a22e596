//! Gateway configuration from environment variables

use anyhow::{Context, Result};
use disposal_matcher::{loader, Catalog, MatchingFacade, WasteTaxonomy};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 18080;

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub port: u16,
    /// Disposal center catalog JSON; built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Waste taxonomy JSON; built-in table when unset
    pub taxonomy_path: Option<PathBuf>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (env in production, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("ECOHAUL_GATEWAY_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid port: {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Ok(Self {
            port,
            catalog_path: path("ECOHAUL_CATALOG_PATH"),
            taxonomy_path: path("ECOHAUL_TAXONOMY_PATH"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Load the taxonomy and catalog once for the life of the process
    pub fn load_facade(&self) -> Result<MatchingFacade> {
        let taxonomy = match &self.taxonomy_path {
            Some(path) => Arc::new(
                waste_taxonomy::loader::load_taxonomy(path)
                    .with_context(|| format!("loading taxonomy from {}", path.display()))?,
            ),
            None => WasteTaxonomy::shared_default(),
        };

        let catalog = match &self.catalog_path {
            Some(path) => Arc::new(
                loader::load_catalog(path)
                    .with_context(|| format!("loading catalog from {}", path.display()))?,
            ),
            None => Catalog::shared_default(),
        };

        Ok(MatchingFacade::new(taxonomy, catalog))
    }
}
