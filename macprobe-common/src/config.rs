// macprobe-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::error::Result;

const DEFAULT_ADOBE_UNINSTALL_DIR: &str = "/Library/Application Support/Adobe/Uninstall";
const ADOBE_UNINSTALL_RECORD_EXT: &str = "adbarg";

/// Well-known filesystem roots used by the probes. Constructed once and
/// passed down so tests can point the resolvers at fixture directories.
#[derive(Debug, Clone)]
pub struct Config {
    pub applications_dir: PathBuf,
    pub adobe_uninstall_dir: PathBuf,
    pub home_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading macprobe configuration");

        let applications_dir = env::var("MACPROBE_APPLICATIONS_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_applications_dir);

        let adobe_uninstall_dir = env::var("MACPROBE_ADOBE_UNINSTALL_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ADOBE_UNINSTALL_DIR));

        let home_dir =
            UserDirs::new().map_or_else(|| PathBuf::from("/"), |ud| ud.home_dir().to_path_buf());

        debug!(
            "Effective applications dir: {}, uninstall dir: {}",
            applications_dir.display(),
            adobe_uninstall_dir.display()
        );

        Ok(Self {
            applications_dir,
            adobe_uninstall_dir,
            home_dir,
        })
    }

    /// Configuration rooted at explicit directories, for tests and callers
    /// that inspect a mounted volume rather than the running system.
    pub fn with_roots(
        applications_dir: impl Into<PathBuf>,
        adobe_uninstall_dir: impl Into<PathBuf>,
        home_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            applications_dir: applications_dir.into(),
            adobe_uninstall_dir: adobe_uninstall_dir.into(),
            home_dir: home_dir.into(),
        }
    }

    pub fn applications_dir(&self) -> &Path {
        &self.applications_dir
    }

    pub fn adobe_uninstall_dir(&self) -> &Path {
        &self.adobe_uninstall_dir
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Glob pattern matching every Adobe uninstall record file.
    pub fn adobe_uninstall_glob(&self) -> String {
        format!(
            "{}/*.{}",
            self.adobe_uninstall_dir.display(),
            ADOBE_UNINSTALL_RECORD_EXT
        )
    }
}

fn default_applications_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Applications")
    } else {
        UserDirs::new()
            .map_or_else(|| PathBuf::from("/"), |ud| ud.home_dir().to_path_buf())
            .join("Applications")
    }
}

pub fn load_config() -> Result<Config> {
    Config::load()
}
