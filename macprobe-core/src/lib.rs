// macprobe-core/src/lib.rs

// Declare the top-level modules within the library crate
pub mod adobe;
pub mod macos;

// Re-export key types for easier use by the CLI crate
pub use adobe::catalog::ProductCatalog;
pub use adobe::records::{UninstallRecord, UninstallRecordStore};
pub use adobe::resolver::{AdobeApplication, AdobeResolver};
pub use macos::bundle::MacBundle;
