// macprobe-core/src/adobe/paths.rs
use std::path::{Path, PathBuf};

use chrono::Datelike;
use lazy_static::lazy_static;
use macprobe_common::config::Config;
use regex::Regex;
use tracing::debug;

/// Historically-known install layouts, relative to the Applications
/// directory and pointing at each bundle's Info.plist. Ordered from most
/// to least specific; during discovery the first existing expansion wins.
pub const APP_PATH_TEMPLATES: [&str; 4] = [
    "Adobe {name} {year}/Adobe {name} {year}.app/Contents/Info.plist",
    "Adobe {name} {year}/Adobe {name}.app/Contents/Info.plist",
    "Adobe {name}/Adobe {name}.app/Contents/Info.plist",
    "Adobe {name} CC/Adobe {name}.app/Contents/Info.plist",
];

/// Creative Cloud switched to year-branded releases in 2015.
const FIRST_CC_YEAR: i32 = 2015;

lazy_static! {
    static ref NAME_YEAR_RE: Regex =
        Regex::new(r"/Adobe (?P<name>[a-zA-Z][a-zA-Z ]*?) ?(?P<year>[1-9][0-9]{3})?/")
            .expect("name-year regex must compile");
}

/// Name and year recovered from an install path. Both come from the same
/// directory segment; a segment without a year is a valid partial match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNameYear {
    pub name: String,
    pub year: Option<String>,
}

/// Extracts the product name (and year, when present) from a path shaped
/// like `.../Adobe <name>[ <year>]/...`. Paths that do not match this
/// shape yield `None`; the caller must treat the fields as indeterminate,
/// not empty.
pub fn parse_name_year(path: &Path) -> Option<PathNameYear> {
    // The trailing separator in the regex anchors the match to a full
    // directory segment, so append one for bundle paths like
    // ".../Adobe Photoshop 2022.app".
    let haystack = format!("{}/", path.display());
    let caps = NAME_YEAR_RE.captures(&haystack)?;
    Some(PathNameYear {
        name: caps["name"].trim_end().to_string(),
        year: caps.name("year").map(|m| m.as_str().to_string()),
    })
}

/// Replaces each `{placeholder}` that has a value; placeholders without a
/// value are left verbatim so the caller can see what was indeterminate.
pub fn substitute(template: &str, values: &[(&str, Option<&str>)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        if let Some(value) = value {
            out = out.replace(&format!("{{{key}}}"), value);
        }
    }
    out
}

/// The `.app` bundle directory for a discovered `Contents/Info.plist`
/// path.
pub fn bundle_root(info_plist_path: &Path) -> PathBuf {
    info_plist_path
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| info_plist_path.to_path_buf())
}

/// The default candidate-year window: 2015 through the current year.
pub fn candidate_years() -> Vec<String> {
    let current = chrono::Utc::now().year();
    (FIRST_CC_YEAR..=current).map(|y| y.to_string()).collect()
}

/// Expands the install-path templates over display names and candidate
/// years and filters to the Info.plist paths that exist on disk.
#[derive(Debug, Clone)]
pub struct PathResolver {
    config: Config,
}

impl PathResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Every existing expansion, de-duplicated in first-seen order. The
    /// loop nesting encodes the discovery precedence: template order
    /// outranks year order outranks display-name order. An empty result is
    /// a valid outcome.
    pub fn find_existing(&self, names: &[String], years: &[String]) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = Vec::new();
        for template in APP_PATH_TEMPLATES {
            for year in years {
                for name in names {
                    let relative = substitute(
                        template,
                        &[("name", Some(name.as_str())), ("year", Some(year.as_str()))],
                    );
                    let path = self.config.applications_dir().join(relative);
                    if path.exists() && !found.contains(&path) {
                        debug!("Found installed candidate: {}", path.display());
                        found.push(path);
                    }
                }
            }
        }
        found
    }
}
