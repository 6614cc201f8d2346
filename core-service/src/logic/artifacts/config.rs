//! Where the artifacts live

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LABEL_ENCODER_FILE, DEFAULT_MODEL_FILE, DEFAULT_TRAINING_COLUMNS_FILE, MANIFEST_FILE,
};

/// Artifact directory and file names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub model_file: String,
    pub label_encoder_file: String,
    pub training_columns_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ArtifactConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            label_encoder_file: DEFAULT_LABEL_ENCODER_FILE.to_string(),
            training_columns_file: DEFAULT_TRAINING_COLUMNS_FILE.to_string(),
        }
    }

    pub fn with_model_file(mut self, name: impl Into<String>) -> Self {
        self.model_file = name.into();
        self
    }

    pub fn with_label_encoder_file(mut self, name: impl Into<String>) -> Self {
        self.label_encoder_file = name.into();
        self
    }

    pub fn with_training_columns_file(mut self, name: impl Into<String>) -> Self {
        self.training_columns_file = name.into();
        self
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_file)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.dir.join(&self.label_encoder_file)
    }

    pub fn training_columns_path(&self) -> PathBuf {
        self.dir.join(&self.training_columns_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// The three required artifact paths
    pub fn required_paths(&self) -> [PathBuf; 3] {
        [
            self.model_path(),
            self.label_encoder_path(),
            self.training_columns_path(),
        ]
    }

    /// Required paths that do not exist
    pub fn missing_paths(&self) -> Vec<PathBuf> {
        self.required_paths()
            .into_iter()
            .filter(|p| !p.exists())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let cfg = ArtifactConfig::new("/models");
        assert_eq!(cfg.model_path(), PathBuf::from("/models/modelo_rf_binario.onnx"));
        assert_eq!(
            cfg.training_columns_path(),
            PathBuf::from("/models/colunas_treino_binario_rf.json")
        );
    }

    #[test]
    fn test_missing_paths_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ArtifactConfig::new(dir.path());
        assert_eq!(cfg.missing_paths().len(), 3);
    }
}
