//! Configuration module

use std::env;
use std::path::PathBuf;

use severity_core::constants::{
    DEFAULT_LABEL_ENCODER_FILE, DEFAULT_MODEL_FILE, DEFAULT_TRAINING_COLUMNS_FILE,
};
use severity_core::ArtifactConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format ("pretty" or "json")
    pub log_format: String,

    /// Directory holding the model artifacts
    pub artifacts_dir: PathBuf,

    /// Directory holding the pre-rendered chart images
    pub charts_dir: PathBuf,

    /// Classifier artifact file name (.onnx or .json)
    pub model_file: String,

    /// Target label encoder file name
    pub label_encoder_file: String,

    /// Training column schema file name
    pub training_columns_file: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string()),

            artifacts_dir: env::var("ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("artifacts")),

            charts_dir: env::var("CHARTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("charts")),

            model_file: env::var("MODEL_FILE")
                .unwrap_or_else(|_| DEFAULT_MODEL_FILE.to_string()),

            label_encoder_file: env::var("LABEL_ENCODER_FILE")
                .unwrap_or_else(|_| DEFAULT_LABEL_ENCODER_FILE.to_string()),

            training_columns_file: env::var("TRAINING_COLUMNS_FILE")
                .unwrap_or_else(|_| DEFAULT_TRAINING_COLUMNS_FILE.to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Artifact locations for the core loader
    pub fn artifact_config(&self) -> ArtifactConfig {
        ArtifactConfig::new(&self.artifacts_dir)
            .with_model_file(&self.model_file)
            .with_label_encoder_file(&self.label_encoder_file)
            .with_training_columns_file(&self.training_columns_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "development".to_string(),
            log_format: "pretty".to_string(),
            artifacts_dir: PathBuf::from("artifacts"),
            charts_dir: PathBuf::from("charts"),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            label_encoder_file: DEFAULT_LABEL_ENCODER_FILE.to_string(),
            training_columns_file: DEFAULT_TRAINING_COLUMNS_FILE.to_string(),
        }
    }
}
