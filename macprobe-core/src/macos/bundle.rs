// macprobe-core/src/macos/bundle.rs
use std::path::{Path, PathBuf};

use macprobe_common::model::Version;
use plist::Value as PlistValue;
use tracing::debug;

/// A macOS application bundle, read through its `Contents/Info.plist`.
///
/// Missing or unreadable metadata is modeled as `None` on every accessor;
/// a bundle directory without a parseable Info.plist is still a valid
/// `MacBundle`, it just answers nothing.
#[derive(Debug, Clone)]
pub struct MacBundle {
    path: PathBuf,
    info: Option<plist::Dictionary>,
}

impl MacBundle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let info_path = path.join("Contents/Info.plist");
        let info = match PlistValue::from_file(&info_path) {
            Ok(PlistValue::Dictionary(dict)) => Some(dict),
            Ok(other) => {
                debug!(
                    "Info.plist at {} is not a dictionary (found {:?})",
                    info_path.display(),
                    other
                );
                None
            }
            Err(e) => {
                debug!("No readable Info.plist at {}: {}", info_path.display(), e);
                None
            }
        };
        Self { path, info }
    }

    pub fn pathname(&self) -> &Path {
        &self.path
    }

    pub fn info_path(&self) -> PathBuf {
        self.path.join("Contents/Info.plist")
    }

    /// `CFBundleName`, falling back to the bundle's basename without `.app`.
    pub fn name(&self) -> String {
        self.plist_string("CFBundleName").unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    pub fn identifier(&self) -> Option<String> {
        self.plist_string("CFBundleIdentifier")
    }

    /// `CFBundleShortVersionString` parsed through the version fixer.
    pub fn short_version(&self) -> Option<Version> {
        self.plist_string("CFBundleShortVersionString")
            .and_then(|s| Version::parse(&s).ok())
    }

    /// `CFBundleVersion` parsed through the version fixer.
    pub fn version(&self) -> Option<Version> {
        self.plist_string("CFBundleVersion")
            .and_then(|s| Version::parse(&s).ok())
    }

    fn plist_string(&self, key: &str) -> Option<String> {
        self.info
            .as_ref()
            .and_then(|dict| dict.get(key))
            .and_then(|v| v.as_string())
            .map(str::to_string)
    }
}
