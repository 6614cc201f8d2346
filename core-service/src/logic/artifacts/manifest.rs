//! Artifact manifest - SHA-256 checksums of the serialized artifacts
//!
//! Optional. When `manifest.json` sits next to the artifacts every listed
//! file must hash to its recorded digest before anything is deserialized.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ArtifactError, ArtifactResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Free-form artifact set version, e.g. the training run id
    #[serde(default)]
    pub version: Option<String>,
    /// File name -> lowercase hex SHA-256
    pub files: BTreeMap<String, String>,
}

impl ArtifactManifest {
    pub fn load(path: &Path) -> ArtifactResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Verify `bytes` against the digest recorded for `name`.
    /// Files the manifest does not list are accepted.
    pub fn verify(&self, name: &str, bytes: &[u8]) -> ArtifactResult<()> {
        let Some(expected) = self.files.get(name) else {
            log::debug!("{} not listed in manifest, skipping checksum", name);
            return Ok(());
        };

        let actual = sha256_hex(bytes);
        if !expected.eq_ignore_ascii_case(&actual) {
            return Err(ArtifactError::ChecksumMismatch {
                name: name.to_string(),
                expected: expected.clone(),
                actual,
            });
        }

        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
