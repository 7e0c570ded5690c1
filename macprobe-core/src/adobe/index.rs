// macprobe-core/src/adobe/index.rs
use macprobe_common::config::Config;
use macprobe_common::model::Version;
use tracing::debug;

use super::catalog::VersionYearMap;
use super::paths::{bundle_root, candidate_years, parse_name_year, PathResolver};
use super::records::UninstallRecord;
use crate::macos::bundle::MacBundle;

/// Builds the per-product version -> year table and extracts the SAP code
/// from a product's uninstall records.
#[derive(Debug, Clone)]
pub struct VersionYearIndex {
    paths: PathResolver,
}

impl VersionYearIndex {
    pub fn new(config: Config) -> Self {
        Self {
            paths: PathResolver::new(config),
        }
    }

    /// The SAP code taken from the last record in enumeration order.
    /// Records arrive sorted by file name, so "last" is deterministic.
    /// Absence is a valid answer, not an error.
    pub fn sap_code(records: &[UninstallRecord]) -> Option<String> {
        records
            .last()
            .and_then(|record| record.sap_code.clone())
            .filter(|sap| !sap.is_empty())
    }

    /// Maps each record's product version to a year label, or to the raw
    /// product name when no year can be determined. Later records
    /// overwrite earlier ones for the same version key.
    ///
    /// The year is recovered from disk: the install-path templates are
    /// probed over the candidate-year window, and the first installed
    /// bundle whose short-version major matches the record's version major
    /// supplies the year.
    pub fn version_year_map(
        &self,
        records: &[UninstallRecord],
        display_names: &[String],
    ) -> VersionYearMap {
        let mut map = VersionYearMap::new();
        for record in records {
            let Some(version) = record.product_version.as_deref() else {
                continue;
            };
            let label = self
                .year_from_version(version, display_names)
                .unwrap_or_else(|| record.product_name.clone());
            map.insert(version.to_string(), label);
        }
        map
    }

    /// Finds the release year for an uninstall record's version by
    /// matching its major version against the installed bundles. `None`
    /// when nothing on disk matches.
    fn year_from_version(&self, version: &str, display_names: &[String]) -> Option<String> {
        let major = major_of(version)?;
        for info_path in self.paths.find_existing(display_names, &candidate_years()) {
            let bundle = MacBundle::new(bundle_root(&info_path));
            let Some(installed) = bundle.short_version() else {
                continue;
            };
            if installed.major() == major {
                let year = parse_name_year(bundle.pathname()).and_then(|ny| ny.year);
                debug!(
                    "Matched version {} (major {}) to installed bundle {} (year {:?})",
                    version,
                    major,
                    bundle.pathname().display(),
                    year
                );
                return year;
            }
        }
        None
    }
}

/// Major component of a loosely-shaped version string. Falls back to the
/// leading dot-separated field when the fixer cannot parse the whole
/// string.
fn major_of(version: &str) -> Option<u64> {
    match Version::parse(version) {
        Ok(v) => Some(v.major()),
        Err(_) => version.split('.').next()?.trim().parse().ok(),
    }
}
