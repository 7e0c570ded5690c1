// macprobe-core/src/adobe/resolver.rs
use std::path::{Path, PathBuf};

use macprobe_common::config::Config;
use macprobe_common::error::{MacProbeError, Result};
use macprobe_common::model::Version;
use tracing::debug;

use super::catalog::{ProductCatalog, VersionYearMap};
use super::index::VersionYearIndex;
use super::paths::{bundle_root, candidate_years, parse_name_year, substitute, PathResolver};
use super::records::UninstallRecordStore;
use super::slug::{normalize_slug, split_slug_year};
use crate::macos::bundle::MacBundle;

/// The fixed Creative Cloud uninstall invocation. Building it requires a
/// resolved SAP code and base version; emitting it with either blank would
/// produce a broken command.
const UNINSTALL_TEMPLATE: &str = r"/Library/Application\ Support/Adobe/Adobe\ Desktop\ Common/HDBox/Setup --uninstall=1 --sapCode={sap} --baseVersion={version} --deleteUserPreferences=false --platform=osx10-64";

/// Everything known about one product family, merged from the ordered
/// profile sources (catalog first, uninstall records second, records
/// refining a catalog hit). This is the join point between a user slug and
/// the on-disk evidence.
#[derive(Debug, Clone)]
pub struct ProductProfile {
    pub slug: String,
    pub display_name: String,
    pub sap: Option<String>,
    pub preferences: Vec<String>,
    pub base_versions: VersionYearMap,
    /// Display-name variants to probe install paths with, in precedence
    /// order.
    pub name_variants: Vec<String>,
}

/// Resolves user-supplied slugs (and already-known bundle paths) into
/// [`AdobeApplication`] descriptors. Holds no state beyond its injected
/// configuration and catalog; every lookup re-reads the filesystem.
#[derive(Debug, Clone)]
pub struct AdobeResolver {
    config: Config,
    catalog: ProductCatalog,
}

impl AdobeResolver {
    pub fn new(config: Config, catalog: ProductCatalog) -> Self {
        Self { config, catalog }
    }

    /// Resolves the installed application matching the slug, which may
    /// embed a trailing year (`"photoshop-2019"`). `None` means no
    /// installed copy matches; that is the expected outcome for absent
    /// software, never an error.
    pub fn resolve_by_slug(&self, slug: &str, year: Option<&str>) -> Option<AdobeApplication> {
        let normalized = normalize_slug(slug);
        let (base_slug, embedded_year) = if year.is_none() {
            split_slug_year(&normalized)
        } else {
            (normalized, None)
        };
        let wanted_year = year.map(str::to_string).or(embedded_year);

        let profile = self.profile(&base_slug)?;
        let years = match &wanted_year {
            Some(y) => vec![y.clone()],
            None => {
                let numeric = numeric_labels(&profile.base_versions);
                if numeric.is_empty() {
                    // No year evidence at all; sweep the whole window.
                    candidate_years()
                } else {
                    numeric
                }
            }
        };

        let path_resolver = PathResolver::new(self.config.clone());
        for info_path in path_resolver.find_existing(&profile.name_variants, &years) {
            let app_path = bundle_root(&info_path);
            // A path found through a yearless template carries no year and
            // never satisfies an explicit-year lookup.
            if let Some(wanted) = &wanted_year {
                let path_year = parse_name_year(&app_path).and_then(|ny| ny.year);
                if path_year.as_deref() != Some(wanted.as_str()) {
                    debug!(
                        "Skipping {} (year {:?} != requested {})",
                        app_path.display(),
                        path_year,
                        wanted
                    );
                    continue;
                }
            }
            return Some(self.describe(app_path, profile));
        }

        debug!("No installed copy of '{}' found", base_slug);
        None
    }

    /// Builds a descriptor for an already-known bundle path. Paths outside
    /// the `Adobe <name> [<year>]` naming shape leave slug, year, and the
    /// CC flag indeterminate.
    pub fn resolve_by_path(&self, path: impl Into<PathBuf>) -> AdobeApplication {
        let path = path.into();
        let profile = parse_name_year(&path)
            .map(|ny| normalize_slug(&ny.name))
            .and_then(|slug| self.profile(&slug));
        match profile {
            Some(profile) => self.describe(path, profile),
            None => AdobeApplication::indeterminate(path),
        }
    }

    /// Assembles the product profile from the ordered source list:
    ///
    /// 1. the curated catalog entry for the slug;
    /// 2. the uninstall records on disk.
    ///
    /// First success supplies the identity; records additionally refine a
    /// catalog hit with version/year evidence the catalog does not carry.
    /// `None` when neither source knows the slug.
    pub fn profile(&self, slug: &str) -> Option<ProductProfile> {
        let records = UninstallRecordStore::new(self.config.clone()).find_records(slug);
        let record_sap = VersionYearIndex::sap_code(&records);

        if let Some(entry) = self.catalog.get(slug) {
            let mut name_variants = vec![entry.name.clone()];
            for record in &records {
                if !name_variants.contains(&record.product_name) {
                    name_variants.push(record.product_name.clone());
                }
            }

            let mut base_versions = entry.base_versions.clone();
            let index = VersionYearIndex::new(self.config.clone());
            for (version, label) in index.version_year_map(&records, &name_variants) {
                base_versions.entry(version).or_insert(label);
            }

            return Some(ProductProfile {
                slug: slug.to_string(),
                display_name: entry.name.clone(),
                sap: Some(entry.sap.clone()).filter(|s| !s.is_empty()).or(record_sap),
                preferences: entry.preferences.clone(),
                base_versions,
                name_variants,
            });
        }

        if records.is_empty() {
            return None;
        }

        let mut name_variants: Vec<String> = Vec::new();
        for record in &records {
            if !name_variants.contains(&record.product_name) {
                name_variants.push(record.product_name.clone());
            }
        }
        let display_name = name_variants[0].clone();
        let index = VersionYearIndex::new(self.config.clone());
        let base_versions = index.version_year_map(&records, &name_variants);

        Some(ProductProfile {
            slug: slug.to_string(),
            display_name,
            sap: record_sap,
            preferences: Vec::new(),
            base_versions,
            name_variants,
        })
    }

    /// Populates the immutable descriptor for a verified bundle path. All
    /// derived fields are computed here, once; the descriptor never
    /// mutates afterwards.
    fn describe(&self, path: PathBuf, profile: ProductProfile) -> AdobeApplication {
        let name_year = parse_name_year(&path);
        let (slug, year, is_cc) = match &name_year {
            Some(ny) => (
                Some(normalize_slug(&ny.name)),
                ny.year.clone(),
                Some(ny.name.contains("CC")),
            ),
            None => (None, None, None),
        };

        let bundle = MacBundle::new(&path);
        let bundle_short_version = bundle.short_version();
        let bundle_version = bundle.version();

        // The base version is the map entry whose label matches this
        // app's year, or its display name for yearless editions. No match
        // is a valid terminal state.
        let label_key = year
            .clone()
            .or_else(|| name_year.as_ref().map(|ny| ny.name.clone()))
            .unwrap_or_else(|| profile.display_name.clone());
        let base_version = profile
            .base_versions
            .iter()
            .find(|(_, label)| *label == &label_key)
            .and_then(|(version, _)| Version::parse(version).ok());

        AdobeApplication {
            pathname: path,
            slug,
            year,
            is_cc,
            product_name: Some(profile.display_name),
            sap: profile.sap,
            base_version,
            bundle_short_version,
            bundle_version,
            preference_templates: profile.preferences,
        }
    }
}

/// The resolved descriptor for one installed Creative Cloud application.
/// Slug, year, and the CC flag are derived together from a single match
/// against the pathname: either all three are known or all three are
/// indeterminate.
#[derive(Debug, Clone)]
pub struct AdobeApplication {
    pathname: PathBuf,
    slug: Option<String>,
    year: Option<String>,
    is_cc: Option<bool>,
    product_name: Option<String>,
    sap: Option<String>,
    base_version: Option<Version>,
    bundle_short_version: Option<Version>,
    bundle_version: Option<Version>,
    preference_templates: Vec<String>,
}

impl AdobeApplication {
    /// A descriptor for a path the resolver knows nothing about; only the
    /// path-derived fields (if any) are populated.
    fn indeterminate(path: PathBuf) -> Self {
        let name_year = parse_name_year(&path);
        let (slug, year, is_cc, product_name) = match name_year {
            Some(ny) => (
                Some(normalize_slug(&ny.name)),
                ny.year.clone(),
                Some(ny.name.contains("CC")),
                Some(ny.name),
            ),
            None => (None, None, None, None),
        };
        let bundle = MacBundle::new(&path);
        let bundle_short_version = bundle.short_version();
        let bundle_version = bundle.version();
        Self {
            pathname: path,
            slug,
            year,
            is_cc,
            product_name,
            sap: None,
            base_version: None,
            bundle_short_version,
            bundle_version,
            preference_templates: Vec::new(),
        }
    }

    pub fn pathname(&self) -> &Path {
        &self.pathname
    }

    /// The product's base name, such as `Photoshop` for
    /// `Adobe Photoshop 2022`.
    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// Whether the matched product-name segment carries the CC branding.
    /// `None` when the path shape did not match at all.
    pub fn is_cc(&self) -> Option<bool> {
        self.is_cc
    }

    /// Adobe's internal 4-letter product code.
    pub fn sap(&self) -> Option<&str> {
        self.sap.as_deref()
    }

    /// The internal version Adobe used for this yearly edition. Absent is
    /// common for unrecognized or very new releases.
    pub fn base_version(&self) -> Option<&Version> {
        self.base_version.as_ref()
    }

    pub fn bundle_short_version(&self) -> Option<&Version> {
        self.bundle_short_version.as_ref()
    }

    pub fn bundle_version(&self) -> Option<&Version> {
        self.bundle_version.as_ref()
    }

    /// Candidate preference paths for this specific app, relative to the
    /// user's home directory. The list is returned without existence
    /// filtering; callers probe each entry individually. Placeholders
    /// whose field never resolved are left verbatim.
    pub fn preference_paths(&self) -> Vec<String> {
        let version = self
            .bundle_short_version
            .as_ref()
            .or(self.bundle_version.as_ref());
        let major = version
            .or(self.base_version.as_ref())
            .map(|v| v.major().to_string());
        let version_raw = version.map(|v| v.raw().to_string());
        let base_raw = self.base_version.as_ref().map(|v| v.raw().to_string());

        self.preference_templates
            .iter()
            .map(|template| {
                substitute(
                    template,
                    &[
                        ("name", self.product_name.as_deref()),
                        ("year", self.year.as_deref()),
                        ("version", version_raw.as_deref()),
                        ("baseVersion", base_raw.as_deref()),
                        ("majorVersion", major.as_deref()),
                        ("major", major.as_deref()),
                    ],
                )
            })
            .collect()
    }

    /// The Setup invocation that would uninstall this application. Fails
    /// when the SAP code or base version is unresolved; a command with
    /// either blank must never be produced.
    pub fn uninstall_command(&self) -> Result<String> {
        let product = self
            .product_name
            .clone()
            .unwrap_or_else(|| self.pathname.display().to_string());
        let sap = self
            .sap
            .as_deref()
            .ok_or_else(|| MacProbeError::IncompleteUninstallData {
                product: product.clone(),
                missing: "SAP code".to_string(),
            })?;
        let base = self
            .base_version
            .as_ref()
            .ok_or_else(|| MacProbeError::IncompleteUninstallData {
                product,
                missing: "base version".to_string(),
            })?;

        Ok(substitute(
            UNINSTALL_TEMPLATE,
            &[("sap", Some(sap)), ("version", Some(base.raw()))],
        ))
    }
}

/// The purely numeric labels of a version/year table, ascending and
/// de-duplicated. Name fallback labels cannot fill a `{year}` placeholder
/// and are excluded from path probing by design.
fn numeric_labels(map: &VersionYearMap) -> Vec<String> {
    let mut years: Vec<String> = map
        .values()
        .filter(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()))
        .cloned()
        .collect();
    years.sort();
    years.dedup();
    years
}
