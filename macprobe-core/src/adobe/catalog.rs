// macprobe-core/src/adobe/catalog.rs
use std::collections::BTreeMap;

use macprobe_common::error::{MacProbeError, Result};
use serde::Deserialize;

/// Mapping of base version string -> year label (or a product-name
/// fallback label for editions that never carried a year).
pub type VersionYearMap = BTreeMap<String, String>;

/// Static reference data for one curated Creative Cloud product, as
/// shipped with the tool: display name, SAP code, preference path
/// templates, and the version -> year table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub sap: String,
    pub name: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(rename = "baseVersions", default)]
    pub base_versions: VersionYearMap,
}

/// The curated product table, loaded once at startup from the embedded
/// `cc.json` and injected into the resolver. Tests substitute fixture
/// catalogs through [`ProductCatalog::from_json`].
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: BTreeMap<String, ProductEntry>,
}

const EMBEDDED_CATALOG: &str = include_str!("../../assets/cc.json");

impl ProductCatalog {
    /// Loads the catalog shipped with the tool.
    pub fn load() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MacProbeError::ParseError("product catalog", e.to_string()))
    }

    /// An empty catalog; every lookup falls through to uninstall records.
    pub fn empty() -> Self {
        Self {
            products: BTreeMap::new(),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&ProductEntry> {
        self.products.get(slug)
    }

    /// The curated slugs, in stable order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }
}
