// macprobe-common/src/model/version.rs
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MacProbeError, Result};

/// Wrapper around semver::Version that keeps the raw string it was parsed
/// from. Version strings found on disk are loosely structured ("23.0",
/// "11", "22.4.1") so parsing pads short forms before handing them to
/// semver.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    parsed: semver::Version,
}

impl Version {
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MacProbeError::VersionError(
                "Cannot parse an empty version string".to_string(),
            ));
        }

        // Attempt a standard semver parse first
        semver::Version::parse(trimmed)
            .map(|parsed| Version {
                raw: trimmed.to_string(),
                parsed,
            })
            .or_else(|_| {
                // Installer metadata often carries "23.0" or just "11";
                // pad to three components before retrying.
                let cleaned = trimmed.split(['_', '-', '+']).next().unwrap_or(trimmed);
                let parts: Vec<&str> = cleaned.split('.').collect();
                let padded = match parts.len() {
                    1 => format!("{}.0.0", parts[0]),
                    2 => format!("{}.{}.0", parts[0], parts[1]),
                    _ => cleaned.to_string(),
                };
                semver::Version::parse(&padded)
                    .map(|parsed| Version {
                        raw: trimmed.to_string(),
                        parsed,
                    })
                    .map_err(|e| {
                        MacProbeError::VersionError(format!(
                            "Failed to parse version '{trimmed}' (tried '{padded}'): {e}"
                        ))
                    })
            })
    }

    /// The string this version was parsed from, unmodified.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u64 {
        self.parsed.major
    }

    pub fn minor(&self) -> u64 {
        self.parsed.minor
    }

    pub fn patch(&self) -> u64 {
        self.parsed.patch
    }
}

impl FromStr for Version {
    type Err = MacProbeError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

impl From<Version> for semver::Version {
    fn from(version: Version) -> Self {
        version.parsed
    }
}

// Manual Serialize/Deserialize to round-trip the raw string
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Version::from_str(&s).map_err(serde::de::Error::custom)
    }
}
