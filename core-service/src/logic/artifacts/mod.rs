//! Artifacts Module - pre-trained objects loaded read-only
//!
//! Classifier, target label encoder and training column schema, produced
//! by the training pipeline and never modified here.

pub mod config;
pub mod manifest;
pub mod store;

// Re-export common types
pub use config::ArtifactConfig;
pub use manifest::{sha256_hex, ArtifactManifest};
pub use store::{ArtifactMetadata, Artifacts, ModelState};
