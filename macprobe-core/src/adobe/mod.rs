//! Adobe Creative Cloud application discovery and identification.
//!
//! Resolution is a pure read of local evidence: uninstall metadata records
//! left behind by Adobe's installer, a curated product catalog, and the
//! historically-known install path layouts. Absence of an installed copy,
//! a SAP code, or a base version is an expected outcome, not an error.

pub mod catalog;
pub mod index;
pub mod paths;
pub mod records;
pub mod resolver;
pub mod slug;
