use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MacProbeError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("Semantic Versioning Error: {0}")]
    SemVer(#[from] Arc<semver::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Parsing Error in {0}: {1}")]
    ParseError(&'static str, String),

    #[error("Version error: {0}")]
    VersionError(String),

    #[error("Incomplete uninstall data for {product}: missing {missing}")]
    IncompleteUninstallData { product: String, missing: String },

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for MacProbeError {
    fn from(err: std::io::Error) -> Self {
        MacProbeError::Io(Arc::new(err))
    }
}

impl From<semver::Error> for MacProbeError {
    fn from(err: semver::Error) -> Self {
        MacProbeError::SemVer(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, MacProbeError>;
