// macprobe-core/src/adobe/records.rs
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use macprobe_common::config::Config;
use regex::Regex;
use tracing::{debug, warn};

use super::slug::normalize_slug;

lazy_static! {
    static ref ARG_LINE_RE: Regex =
        Regex::new(r"^--(?P<key>[^=]+)=(?P<value>.*)$").expect("adbarg line regex must compile");
}

/// One parsed uninstall metadata file. Adobe's installer leaves these
/// behind as text files of `--key=value` argument lines; they are the only
/// on-disk source tying a product name to its SAP code and base version.
#[derive(Debug, Clone)]
pub struct UninstallRecord {
    pub product_name: String,
    pub sap_code: Option<String>,
    pub product_version: Option<String>,
    pub product_platform: Option<String>,
    /// The file this record was parsed from.
    pub source: PathBuf,
}

impl UninstallRecord {
    /// Parses one record file. Lines that do not match the `--key=value`
    /// shape are ignored; a file without a `productName` field yields
    /// `None` and contributes nothing.
    pub fn parse(path: &Path, contents: &str) -> Option<Self> {
        let mut product_name = None;
        let mut sap_code = None;
        let mut product_version = None;
        let mut product_platform = None;

        for line in contents.lines() {
            let Some(caps) = ARG_LINE_RE.captures(line.trim_end()) else {
                continue;
            };
            let value = caps["value"].to_string();
            match &caps["key"] {
                "productName" => product_name = Some(value),
                "sapCode" => sap_code = Some(value),
                "productVersion" => product_version = Some(value),
                "productPlatform" => product_platform = Some(value),
                other => debug!("Ignoring unrecognized adbarg key '{}' in {}", other, path.display()),
            }
        }

        let product_name = product_name.filter(|n| !n.is_empty())?;
        Some(Self {
            product_name,
            sap_code: sap_code.filter(|s| !s.is_empty()),
            product_version: product_version.filter(|v| !v.is_empty()),
            product_platform: product_platform.filter(|p| !p.is_empty()),
            source: path.to_path_buf(),
        })
    }

    pub fn normalized_name(&self) -> String {
        normalize_slug(&self.product_name)
    }
}

/// Scans the Adobe uninstall-metadata directory and groups records by
/// normalized product name. Every query re-reads the directory; nothing is
/// cached across calls.
#[derive(Debug, Clone)]
pub struct UninstallRecordStore {
    config: Config,
}

impl UninstallRecordStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the records whose normalized product name equals the given
    /// slug, ordered by record file name so that last-write-wins policies
    /// downstream are deterministic. A missing uninstall directory yields
    /// an empty result.
    pub fn find_records(&self, slug: &str) -> Vec<UninstallRecord> {
        self.all_records()
            .into_iter()
            .filter(|record| record.normalized_name() == slug)
            .collect()
    }

    fn all_records(&self) -> Vec<UninstallRecord> {
        let dir = self.config.adobe_uninstall_dir();
        if !dir.is_dir() {
            debug!("Adobe uninstall directory {} does not exist.", dir.display());
            return Vec::new();
        }

        let pattern = self.config.adobe_uninstall_glob();
        let mut paths: Vec<PathBuf> = match glob::glob(&pattern) {
            Ok(entries) => entries
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!("Error reading entry for pattern {}: {}", pattern, e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!("Invalid uninstall record pattern {}: {}", pattern, e);
                return Vec::new();
            }
        };
        // Filesystem enumeration order is not guaranteed stable; sort by
        // file name so repeated scans agree.
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    if let Some(record) = UninstallRecord::parse(&path, &contents) {
                        records.push(record);
                    } else {
                        debug!(
                            "Skipping uninstall record without productName: {}",
                            path.display()
                        );
                    }
                }
                Err(e) => warn!("Failed to read uninstall record {}: {}", path.display(), e),
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn store_with_records(files: &[(&str, &str)]) -> (tempfile::TempDir, UninstallRecordStore) {
        let tmp = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(tmp.path().join(name), contents).unwrap();
        }
        let config = Config::with_roots("/nonexistent", tmp.path(), "/nonexistent");
        (tmp, UninstallRecordStore::new(config))
    }

    #[test]
    fn parses_key_value_lines_and_ignores_the_rest() {
        let contents = "\
--productName=Photoshop
--sapCode=PHSP
--productVersion=23.0
--productPlatform=osx10-64
# a comment line
not an argument line
--=missing key is harmless
";
        let record = UninstallRecord::parse(Path::new("r.adbarg"), contents).unwrap();
        assert_eq!(record.product_name, "Photoshop");
        assert_eq!(record.sap_code.as_deref(), Some("PHSP"));
        assert_eq!(record.product_version.as_deref(), Some("23.0"));
        assert_eq!(record.product_platform.as_deref(), Some("osx10-64"));
    }

    #[test]
    fn file_without_product_name_contributes_nothing() {
        assert!(UninstallRecord::parse(
            Path::new("r.adbarg"),
            "--sapCode=PHSP\n--productVersion=23.0\n"
        )
        .is_none());
        assert!(UninstallRecord::parse(Path::new("r.adbarg"), "--productName=\n").is_none());
    }

    #[test]
    fn filters_by_normalized_name() {
        let (_tmp, store) = store_with_records(&[
            ("a.adbarg", "--productName=After Effects\n--sapCode=AEFT\n"),
            ("b.adbarg", "--productName=Photoshop\n--sapCode=PHSP\n"),
            ("c.adbarg", "--sapCode=ORPH\n"),
        ]);

        let found = store.find_records("after-effects");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sap_code.as_deref(), Some("AEFT"));
        assert!(store.find_records("indesign").is_empty());
    }

    #[test]
    fn records_come_back_in_file_name_order() {
        let (_tmp, store) = store_with_records(&[
            ("02-newer.adbarg", "--productName=Photoshop\n--sapCode=PHSP\n"),
            ("01-older.adbarg", "--productName=Photoshop\n--sapCode=OLD1\n"),
        ]);

        let found = store.find_records("photoshop");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].sap_code.as_deref(), Some("OLD1"));
        assert_eq!(found[1].sap_code.as_deref(), Some("PHSP"));
    }

    #[test]
    fn missing_directory_is_empty_not_an_error() {
        let config = Config::with_roots("/nonexistent", "/definitely/not/here", "/nonexistent");
        let store = UninstallRecordStore::new(config);
        assert!(store.find_records("photoshop").is_empty());
    }

    #[test]
    fn only_adbarg_files_are_scanned() {
        let (_tmp, store) = store_with_records(&[
            ("real.adbarg", "--productName=Bridge\n"),
            ("note.txt", "--productName=Bridge\n"),
        ]);
        assert_eq!(store.find_records("bridge").len(), 1);
    }
}
